/*!
 * Dispatcher
 * Routes actions to the fast or blocking pool by mode
 */

use super::bounded::BoundedPool;
use super::config::DispatcherConfig;
use super::traits::DispatchPool;
use super::unbounded::UnboundedPool;
use crate::core::types::DispatchMode;
use std::sync::Arc;

/// The fast/blocking pool pair shared by any number of cells
///
/// Constructed explicitly and passed to each `AsyncCell`; there is no
/// process-wide default instance.
pub struct Dispatcher {
    fast: Arc<dyn DispatchPool>,
    blocking: Arc<dyn DispatchPool>,
}

impl Dispatcher {
    /// Dispatcher with default sizing (`available_parallelism + 2` fast workers)
    pub fn new() -> Arc<Self> {
        Self::with_config(DispatcherConfig::default())
    }

    /// Dispatcher with explicit sizing
    pub fn with_config(config: DispatcherConfig) -> Arc<Self> {
        Arc::new(Self {
            fast: Arc::new(BoundedPool::new(config.fast_workers)),
            blocking: Arc::new(UnboundedPool::new()),
        })
    }

    /// Dispatcher over caller-supplied pools (custom executors, test doubles)
    pub fn with_pools(fast: Arc<dyn DispatchPool>, blocking: Arc<dyn DispatchPool>) -> Arc<Self> {
        Arc::new(Self { fast, blocking })
    }

    /// Pool selected by `mode`
    #[inline]
    pub fn pool(&self, mode: DispatchMode) -> &dyn DispatchPool {
        match mode {
            DispatchMode::Fast => &*self.fast,
            DispatchMode::Blocking => &*self.blocking,
        }
    }
}
