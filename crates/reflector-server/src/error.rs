//! Coordinator error types.

use reflector_core::ReflectError;
use thiserror::Error;

/// Errors returned through a [`CoordinatorHandle`](crate::CoordinatorHandle).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    /// The coordinator task has exited; the command was not processed.
    #[error("coordinator stopped")]
    Stopped,

    /// Update generation failed as a whole.
    #[error("reflection failed: {0}")]
    Reflect(#[from] ReflectError),
}

impl CoordinatorError {
    /// Returns true if the coordinator can no longer serve requests.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Stopped => true,
            // A bad version tag is the caller's configuration problem
            Self::Reflect(_) => false,
        }
    }
}
