/*!
 * Dispatcher Configuration
 * Runtime sizing for the fast pool
 */

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Worker threads in the fast (bounded) pool
    pub fast_workers: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            fast_workers: default_fast_workers(),
        }
    }
}

impl DispatcherConfig {
    /// Configuration with an explicit fast-pool size
    pub const fn with_fast_workers(fast_workers: usize) -> Self {
        Self { fast_workers }
    }
}

/// Hardware parallelism plus headroom for the occasional mis-sized action
pub(crate) fn default_fast_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
        + 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sizes_to_parallelism() {
        let config = DispatcherConfig::default();
        assert!(config.fast_workers >= 3);
    }
}
