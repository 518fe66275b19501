/*!
 * Dispatch Pools
 *
 * Thin thread-pool wrappers consumed by `AsyncCell`:
 * - `BoundedPool`: fixed worker set for non-blocking, CPU-bound actions
 * - `UnboundedPool`: growable, one thread per task, for blocking actions
 * - `Dispatcher`: the fast/blocking pair handed to cells
 *
 * Pools make no ordering promise. Serialization of a cell's actions is
 * enforced by the cell's own queue and busy flag, never by the pool.
 */

mod bounded;
mod config;
mod router;
mod traits;
mod unbounded;

pub use bounded::BoundedPool;
pub use config::DispatcherConfig;
pub use router::Dispatcher;
pub use traits::{DispatchPool, Task};
pub use unbounded::UnboundedPool;
