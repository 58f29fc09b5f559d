//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Contains the systems that drive scenes. Systems operate on
// GlobalContext data.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::scene::SceneManager;

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
///
/// # Available Systems
///
/// - `scene_manager`: named scene registry and scene switching
pub struct GlobalSystems {
    /// The scene manager for scene lifecycle and switching.
    ///
    /// Applies the requests queued on the scene transition service.
    pub scene_manager: SceneManager,
}

impl GlobalSystems {
    /// Creates a new systems container with default-initialized systems.
    ///
    /// This is typically called internally by the engine. Users should access
    /// systems via [`crate::Engine::init`] instead.
    pub(crate) fn new() -> Self {
        Self {
            scene_manager: SceneManager::new(),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Updates all engine systems for the current frame.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Scene Update**: Updates the active scene with the frame's UI events
    /// 2. **Transition Processing**: Applies queued scene transitions
    /// 3. **Event Reset**: Clears the frame's UI events
    pub(crate) fn update(&mut self, context: &mut GlobalContext) {
        // 1. Update the active scene (reads UI events, calls services)
        self.scene_manager.update(context);

        // 2. Process scene transitions
        self.scene_manager.process_transitions(context);

        // 3. Events belong to the frame they arrived in
        context.frame_events.clear();
    }
}
