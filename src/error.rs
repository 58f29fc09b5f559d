//=========================================================================
// Errors
//=========================================================================
//
// Typed failures surfaced by the service layer.
//
// Nothing here is fatal. Every error is also logged at the point where it
// is produced, so callers that ignore the result still leave a trace.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== TransitionError =====================================================

/// Rejected scene transition requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The requested name does not match any registered scene.
    #[error("Unknown scene: {0}")]
    UnknownScene(String),

    /// Another transition is queued or loading.
    #[error("Transition to {requested} rejected, transition to {pending} still in flight")]
    AlreadyInFlight { requested: String, pending: String },

    /// Reload requested before any scene became active.
    #[error("No active scene to reload")]
    NoActiveScene,
}

//=== ServiceError ========================================================

/// Failed service lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// No instance of the named service is registered.
    #[error("Service {0} is not registered")]
    Missing(&'static str),
}
