/*!
 * Asynchronous Serialized-Action Cell
 *
 * The cell's queue and busy flag enforce serialization; the dispatch pools
 * only supply threads. At most one action per cell is ever scheduled or
 * running, so pool thread assignment cannot reorder commits.
 *
 * # Consistency
 *
 * `read` returns the last committed value and never waits. With actions
 * queued or in flight it is stale by design; after a drain the value equals
 * the left-fold of every submitted function in submission order.
 *
 * # Error Policy
 *
 * Skip-and-continue: a panicking action is caught, reported through
 * `tracing` and the optional error hook, the cell keeps its pre-action
 * value, and the next queued action runs. The cell never poisons.
 */

use super::action::PendingAction;
use super::queue::ActionQueue;
use crate::core::errors::{AgentResult, WaitError};
use crate::core::types::{ActionSeq, DispatchMode};
use crate::dispatch::{Dispatcher, Task};
use arc_swap::ArcSwap;
use parking_lot::{Condvar, Mutex, RwLock};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, warn};

/// Callback invoked when a submitted action panics
type ErrorHook = Arc<dyn Fn(ActionSeq, &str) + Send + Sync>;

/// Reference cell with asynchronous, strictly ordered updates
///
/// Cloning shares the underlying cell. All clones observe the same commits.
///
/// # Example
///
/// ```ignore
/// let dispatcher = Dispatcher::new();
/// let cell = AsyncCell::new(0u64, dispatcher);
///
/// cell.submit(|n| n + 1, DispatchMode::Fast)?;
/// cell.await_idle(None)?;
/// assert_eq!(*cell.read(), 1);
/// ```
pub struct AsyncCell<T> {
    inner: Arc<CellInner<T>>,
}

struct CellInner<T> {
    /// Last committed value
    value: ArcSwap<T>,
    /// Private FIFO of submitted, not-yet-executed actions
    queue: ActionQueue<T>,
    /// Set while an action is scheduled or executing for this cell
    busy: AtomicBool,
    /// Next submission sequence number
    next_seq: AtomicU64,
    /// Actions submitted but not yet committed (queued + executing)
    in_flight: AtomicUsize,
    idle_lock: Mutex<()>,
    idle_cv: Condvar,
    error_hook: RwLock<Option<ErrorHook>>,
    dispatcher: Arc<Dispatcher>,
}

impl<T: Send + Sync + 'static> AsyncCell<T> {
    /// Cell with an unbounded action queue
    pub fn new(initial: T, dispatcher: Arc<Dispatcher>) -> Self {
        Self::with_queue(initial, dispatcher, ActionQueue::unbounded())
    }

    /// Cell whose queue rejects submissions beyond `capacity`
    ///
    /// Rejection is an explicit `SubmitError::QueueFull`, never a silent drop.
    pub fn bounded(initial: T, dispatcher: Arc<Dispatcher>, capacity: usize) -> Self {
        Self::with_queue(initial, dispatcher, ActionQueue::bounded(capacity))
    }

    fn with_queue(initial: T, dispatcher: Arc<Dispatcher>, queue: ActionQueue<T>) -> Self {
        Self {
            inner: Arc::new(CellInner {
                value: ArcSwap::from_pointee(initial),
                queue,
                busy: AtomicBool::new(false),
                next_seq: AtomicU64::new(0),
                in_flight: AtomicUsize::new(0),
                idle_lock: Mutex::new(()),
                idle_cv: Condvar::new(),
                error_hook: RwLock::new(None),
                dispatcher,
            }),
        }
    }

    /// Last committed value; never suspends, may be stale while actions drain
    #[inline(always)]
    pub fn read(&self) -> Arc<T> {
        self.inner.value.load_full()
    }

    /// Enqueue an action and return without waiting for it to run
    ///
    /// `mode` picks the pool the action executes on; it has no effect on
    /// ordering, which always equals submission order.
    ///
    /// # Errors
    ///
    /// `QueueFull` for a bounded cell at capacity.
    pub fn submit<F>(&self, f: F, mode: DispatchMode) -> AgentResult<()>
    where
        F: FnOnce(&T) -> T + Send + 'static,
    {
        let inner = &self.inner;
        let seq = inner.next_seq.fetch_add(1, Ordering::Relaxed);
        let action = PendingAction::new(Box::new(f), mode, seq);

        inner.in_flight.fetch_add(1, Ordering::SeqCst);
        if let Err(err) = inner.queue.push(action) {
            inner.depart();
            warn!(seq, error = %err, "submission rejected");
            return Err(err);
        }

        // First submitter after an idle period starts the drain
        if !inner.busy.swap(true, Ordering::AcqRel) {
            CellInner::forward_next(inner);
        }
        Ok(())
    }

    /// Block the calling thread until every previously submitted action has
    /// committed (queue drained, nothing executing)
    ///
    /// # Errors
    ///
    /// `Timeout` if `timeout` elapses with work still outstanding.
    pub fn await_idle(&self, timeout: Option<Duration>) -> Result<(), WaitError> {
        let inner = &self.inner;
        let deadline = timeout.map(|t| Instant::now() + t);

        let mut guard = inner.idle_lock.lock();
        while inner.in_flight.load(Ordering::SeqCst) != 0 {
            match deadline {
                Some(deadline) => {
                    if inner.idle_cv.wait_until(&mut guard, deadline).timed_out() {
                        if inner.in_flight.load(Ordering::SeqCst) == 0 {
                            return Ok(());
                        }
                        return Err(WaitError::Timeout);
                    }
                }
                None => inner.idle_cv.wait(&mut guard),
            }
        }
        Ok(())
    }

    /// Actions submitted but not yet committed
    pub fn pending(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    /// Actions waiting in the queue (excludes the one executing)
    pub fn queued(&self) -> usize {
        self.inner.queue.len()
    }

    /// Register a hook called with the sequence number and panic message of
    /// any action that panics; replaces a previously registered hook
    pub fn on_action_error<F>(&self, hook: F)
    where
        F: Fn(ActionSeq, &str) + Send + Sync + 'static,
    {
        *self.inner.error_hook.write() = Some(Arc::new(hook));
    }
}

impl<T: Send + Sync + 'static> CellInner<T> {
    /// Pop the next action and schedule it, or release the busy flag
    ///
    /// The re-acquire loop closes the race where a submit lands between the
    /// empty pop and the flag release: either this thread wins the flag back
    /// and drains the late arrival, or the submitter does.
    fn forward_next(inner: &Arc<Self>) {
        loop {
            match inner.queue.pop() {
                Some(action) => {
                    if Self::schedule(inner, action) {
                        return;
                    }
                    // Pool rejected the action; it is dropped and logged.
                    // Keep draining so the queue cannot wedge behind it.
                }
                None => {
                    inner.busy.store(false, Ordering::Release);
                    if inner.queue.is_empty() {
                        return;
                    }
                    if inner.busy.swap(true, Ordering::AcqRel) {
                        return;
                    }
                }
            }
        }
    }

    /// Hand one action to the pool for its mode; true if accepted
    fn schedule(inner: &Arc<Self>, action: PendingAction<T>) -> bool {
        let mode = action.mode;
        let seq = action.seq;
        let cell = Arc::clone(inner);
        let task: Task = Box::new(move || Self::run(&cell, action));

        match inner.dispatcher.pool(mode).submit(task) {
            Ok(()) => true,
            Err(err) => {
                error!(seq, ?mode, error = %err, "dispatch pool rejected action; dropping it");
                inner.depart();
                false
            }
        }
    }

    /// Execute one action on a pool thread, commit, then forward the next
    fn run(inner: &Arc<Self>, action: PendingAction<T>) {
        let PendingAction { op, seq, .. } = action;
        let current = inner.value.load_full();

        match catch_unwind(AssertUnwindSafe(move || op(&current))) {
            Ok(next) => inner.value.store(Arc::new(next)),
            Err(payload) => {
                let msg = panic_message(payload);
                error!(seq, panic = %msg, "action panicked; value unchanged");
                // Clone the hook out of the lock before calling it so a hook
                // may itself call on_action_error without deadlocking
                let hook = inner.error_hook.read().clone();
                if let Some(hook) = hook {
                    if catch_unwind(AssertUnwindSafe(|| (*hook)(seq, &msg))).is_err() {
                        warn!(seq, "action error hook panicked");
                    }
                }
            }
        }

        inner.depart();
        Self::forward_next(inner);
    }

    /// One action left the system; wake idle waiters on the last one out
    fn depart(&self) {
        if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _guard = self.idle_lock.lock();
            self.idle_cv.notify_all();
        }
    }
}

impl<T> Clone for AsyncCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for AsyncCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncCell")
            .field("value", &self.inner.value.load())
            .field("pending", &self.inner.in_flight.load(Ordering::SeqCst))
            .finish()
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
