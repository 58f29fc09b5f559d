//=========================================================================
// Services
//=========================================================================
//
// Long-lived, single-instance services reachable from every scene.
//
// Architecture:
//   ServiceRegistry (access point, one slot per type)
//     ├─ AudioService            (ambient + effect channels, volumes)
//     └─ SceneTransitionService  (switch / reload / quit requests)
//
// The two services are independent; neither calls back into scenes.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod audio;
mod registry;
pub mod scene_transition;

//=== Public API ==========================================================

pub use audio::{AmbientChannel, AudioClip, AudioService, PlaybackCommand};
pub use registry::{Registration, Service, ServiceRegistry};
pub use scene_transition::{ExitReason, SceneTransitionService, TransitionHandle};
