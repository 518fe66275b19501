/*!
 * Core Types
 * Shared identifiers and dispatch selectors
 */

use serde::{Deserialize, Serialize};

/// Submission sequence number assigned to each pending action
pub type ActionSeq = u64;

/// Which dispatch pool receives a submitted action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Non-blocking, CPU-bound actions. Routed to the bounded pool sized to
    /// hardware parallelism. Blocking inside a Fast action starves the pool
    /// for every cell sharing it; the engine cannot detect this.
    Fast,
    /// Actions that may block (I/O, sleeps). Routed to the growable pool so
    /// blocking work never starves unrelated cells.
    Blocking,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_mode_serde() {
        assert_eq!(serde_json::to_string(&DispatchMode::Fast).unwrap(), "\"fast\"");
        assert_eq!(
            serde_json::from_str::<DispatchMode>("\"blocking\"").unwrap(),
            DispatchMode::Blocking
        );
    }
}
