//=========================================================================
// Scene System
//=========================================================================
//
// Manages named scenes and switches the single active one.
//
// Architecture:
//   SceneManager
//     ├─ scenes:  HashMap<String, Box<dyn Scene>>
//     ├─ active:  Option<String>
//     └─ loading: Option<PendingLoad>   (async transition in flight)
//
// Flow:
//   update() → active Scene::update()
//   process_transitions() → advance load → drain SceneTransitionService
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::services::ServiceRegistry;

//=== Module Declarations =================================================

mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use scene_manager::SceneManager;
pub use transition_queue::{LoadMode, TransitionComplete};
pub(crate) use transition_queue::{TransitionQueue, TransitionRequest};

//=== Scene Trait =========================================================

/// Defines scene behavior with lifecycle hooks and update logic.
///
/// Scenes are registered in the [`SceneManager`] by name. Only `update()`
/// is required:
///
/// ```rust
/// # use startup_clicker::prelude::*;
/// struct Credits;
///
/// impl Scene for Credits {
///     fn update(&mut self, context: &mut GlobalContext) {
///         if context.ui_events().contains(&UiEvent::AnyKey) {
///             let _ = context.services.instance::<SceneTransitionService>().switch_to("Title");
///         }
///     }
/// }
/// ```
pub trait Scene: Send {
    /// Second startup phase, run once after every scene is registered.
    ///
    /// Check the services this scene depends on here. Use `get` rather
    /// than `instance`: a service a scene places on enter is not there yet.
    fn wire(&mut self, _services: &mut ServiceRegistry) {}

    /// Called when the scene becomes active.
    ///
    /// Services placed here are adopted once the hook returns. A transition
    /// requested here is applied on the following tick.
    fn on_enter(&mut self, _context: &mut GlobalContext) {}

    /// Called when the scene stops being active.
    fn on_exit(&mut self, _context: &mut GlobalContext) {}

    /// Called every tick while the scene is active.
    fn update(&mut self, context: &mut GlobalContext);

    /// Ticks an asynchronous load of this scene takes. Minimum 1.
    fn load_steps(&self) -> u32 {
        1
    }
}
