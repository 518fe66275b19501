/*!
 * Synchronous Cells
 *
 * Lock-free reference cells with compare-and-swap retry updates:
 * - Zero-contention reads (atomic pointer load)
 * - Updates commit on the caller's thread, retrying under contention
 * - No locks, no wait states, no error states
 */

mod cell;

pub use cell::SyncCell;
