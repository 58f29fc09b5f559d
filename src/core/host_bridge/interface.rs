//=========================================================================
// Host Bridge Interface
//=========================================================================
//
// Host-to-core interface types.
//
// Defines the contract for communication between the display/UI layer
// and the engine loop.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::ui_event::UiEvent;

//=== HostEvent ===========================================================

/// Events sent from the host layer to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// UI events batched for a frame.
    Ui(Vec<UiEvent>),

    /// The host window or session is closing.
    CloseRequested,
}
