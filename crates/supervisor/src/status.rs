use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Bot status as served by `/api/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub running: bool,
    pub pids: Vec<u32>,
    /// Bot-owned state file contents, `{}` when absent or unreadable.
    pub state: Map<String, Value>,
    /// The last few trades, oldest first.
    pub recent_trades: Vec<Value>,
    pub trade_count: usize,
    pub checked_at: DateTime<Utc>,
}

impl StatusReport {
    #[must_use]
    pub fn new(
        pids: Vec<u32>,
        state: Map<String, Value>,
        trades: &[Value],
        recent: usize,
        checked_at: DateTime<Utc>,
    ) -> Self {
        let start = trades.len().saturating_sub(recent);
        Self {
            running: !pids.is_empty(),
            pids,
            state,
            recent_trades: trades[start..].to_vec(),
            trade_count: trades.len(),
            checked_at,
        }
    }
}
