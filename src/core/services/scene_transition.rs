//=========================================================================
// Scene Transition Service
//=========================================================================
//
// Front door for scene changes and shutdown.
//
// Requests are validated and queued here; the scene manager applies them
// at the tick boundary and reports back through `mark_active` and
// `finish_transition`.
//
// States:
//   Idle ──switch_to / switch_to_async──► InFlight ──applied──► Idle
//
// While a transition is in flight further switch requests are rejected.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use crossbeam_channel::{bounded, Receiver};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::Service;
use crate::core::scene::{LoadMode, TransitionComplete, TransitionQueue, TransitionRequest};
use crate::error::TransitionError;

//=== ExitReason ==========================================================

/// Why the engine loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Quit requested in a release build: terminate the process.
    Quit,

    /// Quit requested in a debug build: stop the session only.
    SessionStopped,

    /// The host layer closed or disconnected.
    HostClosed,
}

//=== TransitionHandle ====================================================

/// Observer for an asynchronous transition.
///
/// [`try_complete`](Self::try_complete) yields the completion signal
/// exactly once, on the first poll after the scene became active.
#[derive(Debug)]
pub struct TransitionHandle {
    scene: String,
    receiver: Receiver<TransitionComplete>,
    completed: bool,
}

impl TransitionHandle {
    fn new(scene: String, receiver: Receiver<TransitionComplete>) -> Self {
        Self {
            scene,
            receiver,
            completed: false,
        }
    }

    /// Target scene name.
    pub fn scene(&self) -> &str {
        &self.scene
    }

    /// Returns the completion signal the first time it is observed.
    pub fn try_complete(&mut self) -> Option<TransitionComplete> {
        if self.completed {
            return None;
        }

        let signal = self.receiver.try_recv().ok()?;
        self.completed = true;
        Some(signal)
    }

    /// Polls and reports whether the transition has finished.
    pub fn is_complete(&mut self) -> bool {
        self.try_complete();
        self.completed
    }
}

//=== SceneTransitionService ==============================================

/// Process-wide scene transition service.
#[derive(Debug, Default)]
pub struct SceneTransitionService {
    catalog: HashSet<String>,
    active: Option<String>,
    queue: TransitionQueue,
    in_flight: Option<String>,
    quit: Option<ExitReason>,
}

impl Service for SceneTransitionService {
    const NAME: &'static str = "SceneTransitionService";
}

impl SceneTransitionService {
    //--- Requests ---------------------------------------------------------

    /// Switches to `name` at the current tick boundary.
    pub fn switch_to(&mut self, name: &str) -> Result<(), TransitionError> {
        self.request(name, LoadMode::Immediate, None)
    }

    /// Starts loading `name` and returns immediately.
    ///
    /// The new scene is not active until the returned handle reports
    /// completion.
    pub fn switch_to_async(&mut self, name: &str) -> Result<TransitionHandle, TransitionError> {
        let (tx, rx) = bounded(1);
        self.request(name, LoadMode::Async, Some(tx))?;
        Ok(TransitionHandle::new(name.to_string(), rx))
    }

    /// Re-enters the active scene.
    pub fn reload(&mut self) -> Result<(), TransitionError> {
        let Some(active) = self.active.clone() else {
            warn!(target: "scene", "Reload requested with no active scene");
            return Err(TransitionError::NoActiveScene);
        };

        self.switch_to(&active)
    }

    /// Requests shutdown of the running session.
    ///
    /// Debug builds stop the session and leave the host running; release
    /// builds quit. The first request wins.
    pub fn quit(&mut self) {
        let reason = if cfg!(debug_assertions) {
            ExitReason::SessionStopped
        } else {
            ExitReason::Quit
        };

        if self.quit.is_none() {
            info!(target: "scene", "Quit requested ({:?})", reason);
            self.quit = Some(reason);
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn active_scene(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_transition_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns true if `name` is a registered scene.
    pub fn is_known(&self, name: &str) -> bool {
        self.catalog.contains(name)
    }

    pub fn quit_requested(&self) -> Option<ExitReason> {
        self.quit
    }

    //--- Scene Manager Hooks ----------------------------------------------

    pub(crate) fn set_catalog<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.catalog = names.into_iter().collect();
        debug!(target: "scene", "Scene catalog: {} scenes", self.catalog.len());
    }

    pub(crate) fn take_requests(&mut self) -> Vec<TransitionRequest> {
        self.queue.take()
    }

    pub(crate) fn mark_active(&mut self, name: &str) {
        self.active = Some(name.to_string());
    }

    pub(crate) fn finish_transition(&mut self) {
        self.in_flight = None;
    }

    //--- Internal Helpers -------------------------------------------------

    fn request(
        &mut self,
        name: &str,
        mode: LoadMode,
        completion: Option<crossbeam_channel::Sender<TransitionComplete>>,
    ) -> Result<(), TransitionError> {
        if !self.catalog.contains(name) {
            warn!(target: "scene", "Transition to unknown scene {:?}", name);
            return Err(TransitionError::UnknownScene(name.to_string()));
        }

        if let Some(pending) = &self.in_flight {
            warn!(
                target: "scene",
                "Transition to {:?} rejected, {:?} still in flight",
                name, pending
            );
            return Err(TransitionError::AlreadyInFlight {
                requested: name.to_string(),
                pending: pending.clone(),
            });
        }

        debug!(target: "scene", "Queued {:?} transition to {:?}", mode, name);
        self.in_flight = Some(name.to_string());
        self.queue.push(TransitionRequest {
            scene: name.to_string(),
            mode,
            completion,
        });
        Ok(())
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SceneTransitionService {
        let mut service = SceneTransitionService::default();
        service.set_catalog(["Title".to_string(), "Game".to_string()]);
        service
    }

    #[test]
    fn switch_to_known_scene_queues_request() {
        let mut service = service();

        service.switch_to("Game").unwrap();

        assert!(service.is_transition_in_flight());
        let requests = service.take_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].scene, "Game");
        assert_eq!(requests[0].mode, LoadMode::Immediate);
    }

    #[test]
    fn switch_to_unknown_scene_fails() {
        let mut service = service();

        let result = service.switch_to("Credits");

        assert_eq!(result, Err(TransitionError::UnknownScene("Credits".into())));
        assert!(!service.is_transition_in_flight());
        assert!(service.take_requests().is_empty());
    }

    #[test]
    fn overlapping_request_is_rejected() {
        let mut service = service();
        service.switch_to("Game").unwrap();

        let result = service.switch_to("Title");

        assert_eq!(
            result,
            Err(TransitionError::AlreadyInFlight {
                requested: "Title".into(),
                pending: "Game".into(),
            })
        );
        assert_eq!(service.take_requests().len(), 1);
    }

    #[test]
    fn finishing_allows_next_request() {
        let mut service = service();
        service.switch_to("Game").unwrap();
        service.take_requests();
        service.finish_transition();

        assert!(service.switch_to("Title").is_ok());
    }

    #[test]
    fn async_switch_returns_pending_handle() {
        let mut service = service();

        let mut handle = service.switch_to_async("Game").unwrap();

        assert_eq!(handle.scene(), "Game");
        assert!(!handle.is_complete());
        assert_eq!(service.take_requests()[0].mode, LoadMode::Async);
    }

    #[test]
    fn handle_yields_completion_once() {
        let mut service = service();
        let mut handle = service.switch_to_async("Game").unwrap();
        let request = service.take_requests().pop().unwrap();

        request
            .completion
            .unwrap()
            .send(TransitionComplete { scene: "Game".into() })
            .unwrap();

        assert_eq!(
            handle.try_complete(),
            Some(TransitionComplete { scene: "Game".into() })
        );
        assert_eq!(handle.try_complete(), None);
        assert!(handle.is_complete());
    }

    #[test]
    fn reload_requires_active_scene() {
        let mut service = service();
        assert_eq!(service.reload(), Err(TransitionError::NoActiveScene));

        service.mark_active("Title");
        service.reload().unwrap();

        assert_eq!(service.take_requests()[0].scene, "Title");
    }

    #[test]
    fn quit_reason_depends_on_build() {
        let mut service = service();
        assert_eq!(service.quit_requested(), None);

        service.quit();

        let expected = if cfg!(debug_assertions) {
            ExitReason::SessionStopped
        } else {
            ExitReason::Quit
        };
        assert_eq!(service.quit_requested(), Some(expected));
    }

    #[test]
    fn empty_catalog_rejects_everything() {
        let mut service = SceneTransitionService::default();
        assert!(!service.is_known("Title"));
        assert!(service.switch_to("Title").is_err());
    }
}
