/*!
 * Synchronous CAS Cell
 * Atomic read-modify-write over a single shared value
 */

use arc_swap::ArcSwap;
use std::sync::Arc;

/// Shared reference cell with synchronous, lock-free updates
///
/// # Performance
///
/// - **Reads**: zero-contention atomic pointer load (~1-2ns)
/// - **Updates**: clone-compute-swap with CAS retry; cost scales with
///   contention and the price of the update function, never with readers
///
/// # Contract
///
/// The update function may run more than once per logical `update` call when
/// another writer wins the race. It must be a pure function of its argument.
/// Side-effecting work on a cell's value belongs in an `AsyncCell`, which
/// runs each action exactly once.
///
/// # Example
///
/// ```ignore
/// let counter = SyncCell::new(0u64);
///
/// // Read (never blocks)
/// let snapshot = counter.read();
///
/// // Atomic increment (retries internally under contention)
/// counter.update(|n| n + 1);
/// ```
pub struct SyncCell<T> {
    inner: Arc<ArcSwap<T>>,
}

impl<T> SyncCell<T> {
    /// Create a cell holding `initial`
    #[inline]
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(initial)),
        }
    }

    /// Current snapshot; never blocks, never fails
    #[inline(always)]
    pub fn read(&self) -> Arc<T> {
        self.inner.load_full()
    }

    /// Unconditionally replace the value, returning the new value
    ///
    /// Visible to subsequent reads on any thread (sequentially consistent
    /// store underneath).
    #[inline]
    pub fn reset(&self, new: T) -> Arc<T> {
        let new = Arc::new(new);
        self.inner.store(Arc::clone(&new));
        new
    }

    /// Replace the value and return the previous one
    #[inline]
    pub fn swap(&self, new: T) -> Arc<T> {
        self.inner.swap(Arc::new(new))
    }

    /// Apply `f` to the current value and install the result, returning it
    ///
    /// Classic CAS retry loop: read, compute, swap-if-unchanged. Identity is
    /// compared by pointer, not by value equality, so an ABA value that was
    /// genuinely re-installed still counts as a fresh observation. `f` is
    /// re-invoked with the latest value each time the swap loses a race; a
    /// CAS mismatch is invisible to the caller.
    ///
    /// # Panics
    ///
    /// A panic inside `f` propagates to the caller. The stored value is
    /// untouched because the swap for that invocation is never attempted.
    pub fn update<F>(&self, f: F) -> Arc<T>
    where
        F: Fn(&T) -> T,
    {
        let mut current = self.inner.load_full();
        loop {
            let next = Arc::new(f(&current));
            let prev = self.inner.compare_and_swap(&current, Arc::clone(&next));
            if Arc::ptr_eq(&*prev, &current) {
                return next;
            }
            // Lost the race: retry against the value that beat us
            current = Arc::clone(&*prev);
        }
    }
}

impl<T> Clone for SyncCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SyncCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SyncCell").field(&self.inner.load()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::thread;

    #[test]
    fn test_basic_read_reset() {
        let cell = SyncCell::new(42);

        assert_eq!(*cell.read(), 42);

        cell.reset(100);
        assert_eq!(*cell.read(), 100);
    }

    #[test]
    fn test_update_returns_new_value() {
        let cell = SyncCell::new(10);

        assert_eq!(*cell.update(|n| n + 5), 15);
        assert_eq!(*cell.update(|n| n * 2), 30);
        assert_eq!(*cell.read(), 30);
    }

    #[test]
    fn test_swap_returns_previous() {
        let cell = SyncCell::new("initial");

        let old = cell.swap("replaced");
        assert_eq!(*old, "initial");
        assert_eq!(*cell.read(), "replaced");
    }

    #[test]
    fn test_concurrent_increments_lose_nothing() {
        let cell = Arc::new(SyncCell::new(0u64));
        let mut handles = vec![];

        for _ in 0..8 {
            let cell = cell.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..10_000 {
                    cell.update(|n| n + 1);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(*cell.read(), 80_000);
    }

    #[test]
    fn test_update_may_reinvoke_but_commits_once() {
        let cell = Arc::new(SyncCell::new(0u64));
        let invocations = Arc::new(AtomicU64::new(0));
        let mut handles = vec![];

        for _ in 0..4 {
            let cell = cell.clone();
            let invocations = invocations.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..5_000 {
                    cell.update(|n| {
                        invocations.fetch_add(1, Ordering::Relaxed);
                        n + 1
                    });
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        // Every logical call commits exactly once; retries only add invocations
        assert_eq!(*cell.read(), 20_000);
        assert!(invocations.load(Ordering::Relaxed) >= 20_000);
    }

    #[test]
    fn test_panic_in_update_leaves_value_unchanged() {
        let cell = SyncCell::new(7);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            cell.update(|_| panic!("boom"));
        }));

        assert!(result.is_err());
        assert_eq!(*cell.read(), 7);
    }
}
