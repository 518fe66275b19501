/*!
 * Bounded Pool
 *
 * Fixed worker set pulling tasks from a shared channel. Sized to hardware
 * parallelism because its tasks are expected to be CPU-bound and short.
 *
 * # Misuse Hazard
 *
 * A task that blocks (I/O, sleeps, lock waits) parks one of the few workers
 * and can starve every cell routed to this pool. The pool cannot detect
 * this; callers pick `DispatchMode::Blocking` for such work instead.
 */

use super::traits::{DispatchPool, Task};
use crate::core::errors::SubmitError;
use std::thread::JoinHandle;
use tracing::{debug, info};

/// Fixed-size dispatch pool fed by an MPMC channel
pub struct BoundedPool {
    sender: Option<flume::Sender<Task>>,
    workers: Vec<JoinHandle<()>>,
}

impl BoundedPool {
    /// Start `worker_count` named worker threads
    ///
    /// # Panics
    ///
    /// Panics if the OS refuses to spawn a worker thread at startup. Pools
    /// are constructed once, up front; failing loudly here beats limping
    /// along with zero workers.
    pub fn new(worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        let (sender, receiver) = flume::unbounded::<Task>();

        let workers = (0..worker_count)
            .map(|i| {
                let receiver = receiver.clone();
                std::thread::Builder::new()
                    .name(format!("agentcell-fast-{}", i))
                    .spawn(move || {
                        // Runs until every sender is dropped and the channel drains
                        while let Ok(task) = receiver.recv() {
                            task();
                        }
                        debug!(worker = i, "fast pool worker exiting");
                    })
                    .expect("failed to spawn fast pool worker")
            })
            .collect();

        info!(workers = worker_count, "bounded dispatch pool started");
        Self {
            sender: Some(sender),
            workers,
        }
    }
}

impl DispatchPool for BoundedPool {
    fn submit(&self, task: Task) -> Result<(), SubmitError> {
        self.sender
            .as_ref()
            .ok_or(SubmitError::PoolShutdown)?
            .send(task)
            .map_err(|_| SubmitError::PoolShutdown)
    }

    fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

impl Drop for BoundedPool {
    fn drop(&mut self) {
        // Closing the channel lets workers drain outstanding tasks and exit
        self.sender.take();

        // Drop can land on one of our own workers when a task held the last
        // reference to the pool (fire-and-forget callers drop their handles
        // with actions still in flight). Joining that worker from itself
        // deadlocks, so it is detached instead; it exits right after this
        // drop returns because the channel is already closed.
        let current = std::thread::current().id();
        for handle in self.workers.drain(..) {
            if handle.thread().id() == current {
                continue;
            }
            let _ = handle.join();
        }
        debug!("bounded dispatch pool stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_executes_submitted_tasks() {
        let pool = BoundedPool::new(2);
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..100 {
            let counter = counter.clone();
            pool.submit(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();
        }

        // Drop joins workers after the channel drains
        drop(pool);
        assert_eq!(counter.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn test_worker_count_is_at_least_one() {
        let pool = BoundedPool::new(0);
        assert_eq!(pool.worker_count(), 1);
    }

    #[test]
    fn test_drop_on_own_worker_does_not_self_join() {
        let pool = Arc::new(BoundedPool::new(2));
        let (gate_tx, gate_rx) = flume::bounded::<()>(0);
        let (done_tx, done_rx) = flume::bounded::<()>(1);

        // The task keeps the pool alive; once the main handle is gone, the
        // worker running the task tears the pool down itself
        let task_pool = Arc::clone(&pool);
        pool.submit(Box::new(move || {
            let _ = gate_rx.recv();
            drop(task_pool);
            let _ = done_tx.send(());
        }))
        .unwrap();

        drop(pool);
        gate_tx.send(()).unwrap();

        // A self-join in drop would panic the worker before the send
        done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    }

    #[test]
    fn test_tasks_run_concurrently_across_workers() {
        let pool = BoundedPool::new(4);
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        for _ in 0..4 {
            let running = running.clone();
            let peak = peak.clone();
            pool.submit(Box::new(move || {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(50));
                running.fetch_sub(1, Ordering::SeqCst);
            }))
            .unwrap();
        }

        drop(pool);
        assert!(peak.load(Ordering::SeqCst) >= 2);
    }
}
