/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Submission errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SubmitError {
    #[error("Action queue full: capacity {0} reached")]
    #[diagnostic(
        code(agent::queue_full),
        help("The cell's bounded queue is at capacity. Drain with await_idle or construct the cell with a larger queue.")
    )]
    QueueFull(usize),

    #[error("Dispatch pool is shut down")]
    #[diagnostic(
        code(dispatch::pool_shutdown),
        help("The pool no longer accepts tasks. Construct a new Dispatcher.")
    )]
    PoolShutdown,

    #[error("Failed to spawn worker thread: {0}")]
    #[diagnostic(
        code(dispatch::spawn_failed),
        help("The OS refused a new thread. The system may be at its thread limit.")
    )]
    SpawnFailed(String),
}

/// Errors surfaced while waiting on a cell
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum WaitError {
    #[error("Timed out waiting for queue drain")]
    #[diagnostic(
        code(agent::wait_timeout),
        help("Actions were still queued or in flight when the deadline elapsed.")
    )]
    Timeout,
}

/// Result type for submission paths
pub type AgentResult<T> = Result<T, SubmitError>;
