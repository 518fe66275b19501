/*!
 * agentcell
 *
 * Reference cells for shared mutable state:
 * - `SyncCell`: lock-free synchronous updates via compare-and-swap retry
 * - `AsyncCell`: asynchronous serialized actions applied in submission order
 *
 * Both cells expose a non-blocking `read`. `SyncCell` commits on the caller's
 * thread; `AsyncCell` hands actions to a shared `Dispatcher` and commits them
 * one at a time, in the exact order they were submitted, regardless of which
 * pool thread runs them.
 */

pub mod agent;
pub mod core;
pub mod dispatch;
pub mod sync;

// Re-exports
pub use crate::core::errors::{AgentResult, SubmitError, WaitError};
pub use crate::core::types::{ActionSeq, DispatchMode};
pub use agent::AsyncCell;
pub use dispatch::{BoundedPool, DispatchPool, Dispatcher, DispatcherConfig, Task, UnboundedPool};
pub use sync::SyncCell;
