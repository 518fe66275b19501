/*!
 * Unbounded Pool
 *
 * Growable pool for blocking actions: one named thread per task, so a
 * sleeping or I/O-bound action never starves unrelated work. Threads are
 * not cached; the cost of a spawn is accepted in exchange for isolation.
 */

use super::traits::{DispatchPool, Task};
use crate::core::errors::SubmitError;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::error;

/// Growable dispatch pool, one thread per task
pub struct UnboundedPool {
    spawned: AtomicU64,
    active: Arc<AtomicUsize>,
}

impl UnboundedPool {
    /// Create an empty pool; threads appear as tasks arrive
    pub fn new() -> Self {
        Self {
            spawned: AtomicU64::new(0),
            active: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Default for UnboundedPool {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchPool for UnboundedPool {
    fn submit(&self, task: Task) -> Result<(), SubmitError> {
        let seq = self.spawned.fetch_add(1, Ordering::Relaxed);
        let active = Arc::clone(&self.active);

        active.fetch_add(1, Ordering::SeqCst);
        let spawned = std::thread::Builder::new()
            .name(format!("agentcell-blocking-{}", seq))
            .spawn(move || {
                task();
                active.fetch_sub(1, Ordering::SeqCst);
            });

        match spawned {
            Ok(_) => Ok(()),
            Err(e) => {
                self.active.fetch_sub(1, Ordering::SeqCst);
                error!(error = %e, "failed to spawn blocking worker");
                Err(SubmitError::SpawnFailed(e.to_string()))
            }
        }
    }

    fn worker_count(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}
