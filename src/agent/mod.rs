/*!
 * Asynchronous Cells
 *
 * Serialized-action reference cells:
 * - `submit` enqueues a closure and returns immediately
 * - Actions for one cell run one at a time, in submission order, no matter
 *   which pool thread picks them up
 * - `read` never suspends and may observe a value with actions still queued
 *   (eventual, not immediate, consistency)
 *
 * # Architecture
 *
 * Each cell owns a private FIFO queue and a busy flag. Submission pushes and,
 * if no drain is in progress, pops the head and schedules it on the pool for
 * its mode. Completion commits the result, then pops and forwards the next
 * action. The cell's own state enforces serialization; pools only supply
 * threads.
 */

mod action;
mod cell;
mod queue;

pub use cell::AsyncCell;
