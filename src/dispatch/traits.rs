/*!
 * Dispatch Traits
 * Pool abstraction behind which bounded and unbounded executors sit
 */

use crate::core::errors::SubmitError;

/// A unit of work handed to a pool
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Thread-pool abstraction consumed by the dispatch engine
///
/// Implementations must be:
/// - **Thread-safe**: `submit` may be called from any thread
/// - **Fire-and-forget**: `submit` returns once the task is accepted,
///   not once it has run
/// - **Eventually live**: an accepted task runs unless the pool shuts down
///
/// No fairness or ordering guarantee is required across tasks; cells
/// serialize their own actions.
pub trait DispatchPool: Send + Sync {
    /// Hand a task to the pool
    fn submit(&self, task: Task) -> Result<(), SubmitError>;

    /// Worker threads currently dedicated to this pool
    ///
    /// For growable pools this is the number of live task threads.
    fn worker_count(&self) -> usize;
}
