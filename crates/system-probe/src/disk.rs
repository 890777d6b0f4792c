use serde::{Deserialize, Serialize};

/// Root filesystem usage as printed by `df -h /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub total: String,
    pub used: String,
    pub avail: String,
    pub pct: String,
}

/// Parses the first data row of `df -h` output.
///
/// Returns `None` when the header or the row is missing or the row has too
/// few columns (e.g. a long device name wrapped onto its own line).
#[must_use]
pub fn parse_df(output: &str) -> Option<DiskUsage> {
    let row = output.trim().lines().nth(1)?;
    let cols: Vec<&str> = row.split_whitespace().collect();
    if cols.len() < 5 {
        return None;
    }
    Some(DiskUsage {
        total: cols[1].to_string(),
        used: cols[2].to_string(),
        avail: cols[3].to_string(),
        pct: cols[4].to_string(),
    })
}
