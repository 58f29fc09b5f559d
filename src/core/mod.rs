//=========================================================================
// Core Systems
//
// Everything that runs on the engine's logic thread.
//
// Responsibilities:
// - Own the service registry and the services it hands out
// - Manage named scenes and apply transition requests at tick boundaries
// - Receive host events and forward playback commands to the host
//
// Notes:
// All service state is mutated on one logical thread. The only
// cross-thread surfaces are the host bridge channels.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod globals;
pub mod host_bridge;
pub mod scene;
pub mod services;
pub mod ui_event;

//=== Public API ==========================================================

pub use globals::{GlobalContext, GlobalSystems};
pub use host_bridge::{AudioDevice, HostEvent, LogDevice, TickControl};
pub use scene::{Scene, SceneManager};
pub use services::{AudioService, SceneTransitionService, Service, ServiceRegistry};
pub use ui_event::UiEvent;
