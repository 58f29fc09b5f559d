//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use startup_clicker::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems};

// Host bridge
pub use crate::core::host_bridge::{AudioDevice, HostEvent, LogDevice, TickControl};
pub use crate::core::ui_event::UiEvent;

// Scene system
pub use crate::core::scene::{Scene, SceneManager};

// Services
pub use crate::core::services::{
    AudioClip, AudioService, ExitReason, PlaybackCommand, Registration, SceneTransitionService,
    Service, ServiceRegistry, TransitionHandle,
};

// Errors
pub use crate::error::{ServiceError, TransitionError};

// Clicker scenes
pub use crate::game::{GameScene, TitleScene, GAME_SCENE, TITLE_SCENE};
