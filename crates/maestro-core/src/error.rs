// Error types for orchestration

use thiserror::Error;

/// Result type for orchestration operations
pub type Result<T> = std::result::Result<T, MaestroError>;

/// Errors surfaced to callers of the master orchestrator.
///
/// Only input rejection and unknown-id lookups are raised as errors. A plan
/// with no capable orchestras and per-stage execution failures are reported
/// as data inside the solution, never as an `Err`.
#[derive(Debug, Error)]
pub enum MaestroError {
    /// The problem description was empty or missing.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Status query for an unknown task id.
    #[error("Task not found: {0}")]
    TaskNotFound(String),
}

/// Errors raised inside a single orchestra's execution.
///
/// Caught at the stage boundary and recorded as an error stage result;
/// remaining stages still run.
#[derive(Debug, Error)]
pub enum OrchestraError {
    /// The orchestra failed while producing its result.
    #[error("Orchestra '{orchestra}' failed: {reason}")]
    ExecutionFailed {
        /// Orchestra name
        orchestra: String,
        /// Reason for the failure
        reason: String,
    },
}
