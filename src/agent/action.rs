/*!
 * Pending Actions
 */

use crate::core::types::{ActionSeq, DispatchMode};

/// Type-erased update function with its captured arguments
pub(crate) type ActionFn<T> = Box<dyn FnOnce(&T) -> T + Send + 'static>;

/// A submitted, not-yet-committed update
pub(crate) struct PendingAction<T> {
    pub(crate) op: ActionFn<T>,
    pub(crate) mode: DispatchMode,
    pub(crate) seq: ActionSeq,
}

impl<T> PendingAction<T> {
    pub(crate) fn new(op: ActionFn<T>, mode: DispatchMode, seq: ActionSeq) -> Self {
        Self { op, mode, seq }
    }
}
