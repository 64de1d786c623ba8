use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error taxonomy for task operations.
///
/// Every failure in the core resolves to one of these values and is returned
/// to the immediate caller; nothing is retried and nothing is fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskError {
    /// Caller-supplied input violates a precondition.
    #[error("Task name is required")]
    Validation,

    /// Referenced task id does not exist (never created, or already deleted).
    #[error("Task not found")]
    NotFound,

    /// Task exists but has not reached a terminal state yet.
    #[error("Task is not completed yet")]
    NotReady,
}

impl TaskError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady)
    }
}
