//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for scenes.
//
// Contains state data that scenes read/write:
// - services: the service registry (audio, scene transitions, ...)
// - frame_events: UI events reported by the host for this frame
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::services::ServiceRegistry;
use crate::core::ui_event::UiEvent;

//=== GlobalContext =======================================================

/// Shared context data accessible to scenes during updates.
///
/// Scenes receive `&mut GlobalContext` during their lifecycle methods.
/// This separates scene-accessible data from the systems that drive them.
pub struct GlobalContext {
    /// Access point for every long-lived service.
    ///
    /// Lives as long as the engine, so services survive scene switches.
    pub services: ServiceRegistry,

    /// UI events for the current frame.
    ///
    /// Populated from the host bridge at the start of each tick and
    /// replaced on the next one.
    pub(crate) frame_events: Vec<UiEvent>,
}

impl GlobalContext {
    /// Creates a new context with an empty registry.
    pub(crate) fn new() -> Self {
        Self {
            services: ServiceRegistry::new(),
            frame_events: Vec::new(),
        }
    }

    /// UI events reported during the current frame, in arrival order.
    pub fn ui_events(&self) -> &[UiEvent] {
        &self.frame_events
    }
}
