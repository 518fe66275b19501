/*!
 * Action Queues
 *
 * Lock-free FIFO behind each cell. Unbounded by default; a bounded variant
 * rejects submissions at capacity with an explicit error instead of
 * dropping silently. There is no other hidden cap anywhere in the engine.
 */

use super::action::PendingAction;
use crate::core::errors::SubmitError;
use crossbeam_queue::{ArrayQueue, SegQueue};

/// FIFO of pending actions, single-consumer by protocol (the busy flag)
pub(crate) enum ActionQueue<T> {
    Unbounded(SegQueue<PendingAction<T>>),
    Bounded(ArrayQueue<PendingAction<T>>),
}

impl<T> ActionQueue<T> {
    pub(crate) fn unbounded() -> Self {
        Self::Unbounded(SegQueue::new())
    }

    pub(crate) fn bounded(capacity: usize) -> Self {
        Self::Bounded(ArrayQueue::new(capacity.max(1)))
    }

    /// Append an action, rejecting at capacity for bounded queues
    pub(crate) fn push(&self, action: PendingAction<T>) -> Result<(), SubmitError> {
        match self {
            Self::Unbounded(q) => {
                q.push(action);
                Ok(())
            }
            Self::Bounded(q) => q.push(action).map_err(|_| SubmitError::QueueFull(q.capacity())),
        }
    }

    /// Dequeue the oldest action
    pub(crate) fn pop(&self) -> Option<PendingAction<T>> {
        match self {
            Self::Unbounded(q) => q.pop(),
            Self::Bounded(q) => q.pop(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Self::Unbounded(q) => q.is_empty(),
            Self::Bounded(q) => q.is_empty(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Unbounded(q) => q.len(),
            Self::Bounded(q) => q.len(),
        }
    }
}
