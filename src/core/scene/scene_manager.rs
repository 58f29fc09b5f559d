//=========================================================================
// Scene Manager
//=========================================================================
//
// Manages scene registration, the active scene and scene switching.
//
// Scenes are stored in a HashMap by name and keep their own state
// between activations. Switching always runs the same sequence:
//
//   on_exit(old) → clear_context() → on_enter(new) → settle_context()
//
// so service objects placed by the new scene are promoted, and the ones
// left behind by the old scene are dropped with it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use crossbeam_channel::Sender;
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{LoadMode, Scene, TransitionComplete, TransitionRequest};
use crate::core::globals::GlobalContext;
use crate::core::services::{SceneTransitionService, ServiceRegistry};

//=== Pending Load ========================================================

struct PendingLoad {
    scene: String,
    remaining: u32,
    completion: Option<Sender<TransitionComplete>>,
}

//=== Scene Manager =======================================================

/// Host-side context switching facility.
///
/// Owns every scene and applies the requests queued on the
/// [`SceneTransitionService`].
pub struct SceneManager {
    scenes: HashMap<String, Box<dyn Scene>>,
    initial: Option<String>,
    active: Option<String>,
    loading: Option<PendingLoad>,
}

impl SceneManager {
    //--- Construction -----------------------------------------------------

    /// Creates a manager with no scenes.
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            initial: None,
            active: None,
            loading: None,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene under `name`.
    pub fn register_scene<T>(&mut self, name: impl Into<String>, scene: T)
    where
        T: Scene + 'static,
    {
        let name = name.into();
        if self.scenes.insert(name.clone(), Box::new(scene)).is_some() {
            warn!(target: "scene", "Scene {:?} was already registered and has been replaced", name);
        }
    }

    /// Registers a scene and makes it the one entered at startup.
    pub fn register_default<T>(&mut self, name: impl Into<String>, scene: T)
    where
        T: Scene + 'static,
    {
        let name = name.into();
        if let Some(previous) = self.initial.replace(name.clone()) {
            warn!(target: "scene", "Initial scene changed from {:?} to {:?}", previous, name);
        }
        self.register_scene(name, scene);
    }

    //--- Query API --------------------------------------------------------

    /// Names of all registered scenes.
    pub fn catalog(&self) -> Vec<String> {
        self.scenes.keys().cloned().collect()
    }

    pub fn has_scene(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    pub fn active_scene(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn initial_scene(&self) -> Option<&str> {
        self.initial.as_deref()
    }

    /// Returns true while an asynchronous load is in progress.
    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    //--- Startup ----------------------------------------------------------

    /// Wiring phase: lets every scene resolve its services and publishes
    /// the scene catalog to the transition service.
    pub fn wire(&mut self, services: &mut ServiceRegistry) {
        debug!(target: "scene", "Wiring {} scenes", self.scenes.len());

        for scene in self.scenes.values_mut() {
            scene.wire(services);
        }

        services
            .instance::<SceneTransitionService>()
            .set_catalog(self.catalog());
    }

    /// Enters the initial scene.
    pub fn start(&mut self, context: &mut GlobalContext) {
        let Some(initial) = self.initial.clone() else {
            warn!(target: "scene", "No initial scene registered");
            return;
        };

        info!(target: "scene", "Starting with initial scene {:?}", initial);
        self.enter(&initial, context);
    }

    //--- Update Loop ------------------------------------------------------

    /// Updates the active scene.
    pub fn update(&mut self, context: &mut GlobalContext) {
        let Some(active) = &self.active else {
            return;
        };

        if let Some(scene) = self.scenes.get_mut(active) {
            scene.update(context);
        }
    }

    //--- Transition Processing --------------------------------------------

    /// Applies transitions at the tick boundary.
    ///
    /// An in-flight asynchronous load advances first, so a load requested
    /// during this tick starts counting on the next one.
    pub fn process_transitions(&mut self, context: &mut GlobalContext) {
        self.advance_loading(context);

        let requests = context
            .services
            .instance::<SceneTransitionService>()
            .take_requests();

        for request in requests {
            self.apply(request, context);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn apply(&mut self, request: TransitionRequest, context: &mut GlobalContext) {
        let Some(scene) = self.scenes.get(&request.scene) else {
            warn!(target: "scene", "Attempted to switch to unregistered scene {:?}", request.scene);
            context
                .services
                .instance::<SceneTransitionService>()
                .finish_transition();
            return;
        };

        match request.mode {
            LoadMode::Immediate => self.switch(&request.scene, context),
            LoadMode::Async => {
                let steps = scene.load_steps().max(1);
                debug!(target: "scene", "Loading {:?} over {} ticks", request.scene, steps);
                self.loading = Some(PendingLoad {
                    scene: request.scene,
                    remaining: steps,
                    completion: request.completion,
                });
            }
        }
    }

    fn advance_loading(&mut self, context: &mut GlobalContext) {
        let Some(load) = self.loading.as_mut() else {
            return;
        };

        load.remaining = load.remaining.saturating_sub(1);
        if load.remaining > 0 {
            return;
        }

        let Some(load) = self.loading.take() else {
            return;
        };

        self.switch(&load.scene, context);

        if let Some(completion) = load.completion {
            // The handle may already be gone; nobody is waiting then
            let _ = completion.send(TransitionComplete { scene: load.scene });
        }
    }

    fn switch(&mut self, name: &str, context: &mut GlobalContext) {
        info!(target: "scene", "Switching scene {:?} -> {:?}", self.active, name);

        self.exit_active(context);
        context
            .services
            .instance::<SceneTransitionService>()
            .finish_transition();
        self.enter(name, context);
    }

    fn exit_active(&mut self, context: &mut GlobalContext) {
        let Some(active) = self.active.take() else {
            return;
        };

        if let Some(scene) = self.scenes.get_mut(&active) {
            scene.on_exit(context);
        }
        context.services.clear_context();
    }

    fn enter(&mut self, name: &str, context: &mut GlobalContext) {
        let Some(scene) = self.scenes.get_mut(name) else {
            warn!(target: "scene", "Scene {:?} not registered", name);
            return;
        };

        self.active = Some(name.to_string());
        context
            .services
            .instance::<SceneTransitionService>()
            .mark_active(name);
        scene.on_enter(context);
        context.services.settle_context();
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================
