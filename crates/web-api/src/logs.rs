use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub const DEFAULT_LOG_LINES: usize = 50;

pub const NO_LOG_DIR: &str = "log directory not found";
pub const NO_LOG_FILES: &str = "no log files found";

/// Most recently modified `*.log` file in `dir`.
fn latest_log(dir: &Path) -> std::io::Result<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("log") || !path.is_file() {
            continue;
        }
        let modified = std::fs::metadata(&path)?.modified()?;
        if newest.as_ref().map_or(true, |(t, _)| modified > *t) {
            newest = Some((modified, path));
        }
    }
    Ok(newest.map(|(_, path)| path))
}

/// Last `lines` lines of the newest log in `dir`, or a readable placeholder.
#[must_use]
pub fn tail_latest_log(dir: &Path, lines: usize) -> String {
    if !dir.is_dir() {
        return NO_LOG_DIR.to_string();
    }
    let path = match latest_log(dir) {
        Ok(Some(path)) => path,
        Ok(None) => return NO_LOG_FILES.to_string(),
        Err(e) => return format!("failed to read log: {e}"),
    };
    match std::fs::read(&path) {
        Ok(bytes) => tail_lines(&String::from_utf8_lossy(&bytes), lines),
        Err(e) => format!("failed to read log: {e}"),
    }
}

fn tail_lines(content: &str, lines: usize) -> String {
    let all: Vec<&str> = content.trim().split('\n').collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}

/// Parses the `lines` query value, falling back to [`DEFAULT_LOG_LINES`].
#[must_use]
pub fn parse_lines(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_LOG_LINES)
}
