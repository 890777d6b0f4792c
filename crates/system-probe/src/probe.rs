use bot_panel_core::{best_effort, run_command, CommandError, PanelConfig};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::time::Duration;

use crate::disk::{parse_df, DiskUsage};
use crate::overlay::{parse_overlay, OverlayStatus};

/// Placeholder for a probe that produced nothing usable.
pub const UNAVAILABLE: &str = "N/A";

#[cfg(target_os = "macos")]
const MEMORY_COMMAND: (&str, &[&str]) = ("vm_stat", &[]);
#[cfg(not(target_os = "macos"))]
const MEMORY_COMMAND: (&str, &[&str]) = ("free", &["-h"]);

/// Host status as served by `/api/system`.
#[derive(Debug, Clone, Serialize)]
pub struct SystemSnapshot {
    pub uptime: String,
    /// `{}` on the wire when the disk probe failed.
    #[serde(serialize_with = "empty_object_when_none")]
    pub disk: Option<DiskUsage>,
    pub memory_raw: String,
    pub tailscale: OverlayStatus,
}

fn empty_object_when_none<S: Serializer>(
    disk: &Option<DiskUsage>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match disk {
        Some(usage) => usage.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

#[derive(Debug, Clone)]
pub struct SystemProbe {
    timeout: Duration,
    memory_max_chars: usize,
}

impl SystemProbe {
    #[must_use]
    pub const fn new(timeout: Duration, memory_max_chars: usize) -> Self {
        Self {
            timeout,
            memory_max_chars,
        }
    }

    #[must_use]
    pub fn from_config(config: &PanelConfig) -> Self {
        Self::new(config.probe_timeout(), config.probe.memory_max_chars)
    }

    /// Runs every probe concurrently and assembles the snapshot.
    pub async fn probe(&self) -> SystemSnapshot {
        let (uptime, disk, memory_raw, tailscale) = tokio::join!(
            self.uptime(),
            self.disk(),
            self.memory(),
            self.overlay()
        );
        SystemSnapshot {
            uptime,
            disk,
            memory_raw,
            tailscale,
        }
    }

    async fn stdout_of(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        run_command(program, args, None, self.timeout)
            .await
            .map(|out| out.stdout)
    }

    pub async fn uptime(&self) -> String {
        let op = async { self.stdout_of("uptime", &[]).await.map(|s| s.trim().to_string()) };
        best_effort("uptime", op, UNAVAILABLE.to_string()).await
    }

    pub async fn disk(&self) -> Option<DiskUsage> {
        let op = async { self.stdout_of("df", &["-h", "/"]).await.map(|s| parse_df(&s)) };
        let usage = best_effort("disk usage", op, None).await;
        if usage.is_none() {
            tracing::warn!("Disk probe returned no usable row");
        }
        usage
    }

    /// Raw memory report (`vm_stat` on macOS, `free -h` elsewhere), truncated.
    pub async fn memory(&self) -> String {
        let (program, args) = MEMORY_COMMAND;
        let op = async {
            self.stdout_of(program, args)
                .await
                .map(|s| truncate_chars(s.trim(), self.memory_max_chars))
        };
        best_effort("memory", op, UNAVAILABLE.to_string()).await
    }

    pub async fn overlay(&self) -> OverlayStatus {
        let op = async {
            let stdout = self
                .stdout_of("tailscale", &["status", "--json"])
                .await
                .map_err(|e| e.to_string())?;
            parse_overlay(&stdout).map_err(|e| e.to_string())
        };
        best_effort("tailscale status", op, OverlayStatus::offline()).await
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
