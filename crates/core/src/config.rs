use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub server: ServerConfig,
    pub bot: BotConfig,
    pub dashboard: DashboardConfig,
    pub update: UpdateConfig,
    pub probe: ProbeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the supervised bot lives and how it is launched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Panel base directory. Pages, dashboard data and the update script live here.
    pub base_dir: PathBuf,
    /// Bot working directory. Defaults to `<base_dir>/bot`.
    pub bot_dir: Option<PathBuf>,
    /// Script file name, also used as the process-table match pattern.
    pub script: String,
    /// Runtime used to launch the bot script and the update script.
    pub interpreter: String,
    pub state_file: PathBuf,
    pub trades_file: PathBuf,
    pub log_dir: PathBuf,
    pub restart_delay_ms: u64,
    /// Number of trades surfaced by the status report.
    pub recent_trades: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_file: PathBuf,
    pub control_page: PathBuf,
    pub dashboard_page: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    pub script: PathBuf,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Timeout applied to each external probe and to the process lookup.
    pub timeout_secs: u64,
    /// Raw memory report is truncated to this many characters.
    pub memory_max_chars: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7777,
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            bot_dir: None,
            script: "alfred_ws_v5.py".to_string(),
            interpreter: "python3".to_string(),
            state_file: PathBuf::from("state_v5.json"),
            trades_file: PathBuf::from("trades_v5.json"),
            log_dir: PathBuf::from("logs"),
            restart_delay_ms: 2000,
            recent_trades: 5,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("dashboard_data.json"),
            control_page: PathBuf::from("control.html"),
            dashboard_page: PathBuf::from("index.html"),
        }
    }
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            script: PathBuf::from("update_dashboard.py"),
            timeout_secs: 30,
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            memory_max_chars: 500,
        }
    }
}

/// Joins `path` onto `parent` unless it is already absolute.
fn resolve(parent: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        parent.join(path)
    }
}

impl PanelConfig {
    /// Socket address string the HTTP server binds to.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.bot.base_dir
    }

    #[must_use]
    pub fn bot_dir(&self) -> PathBuf {
        match &self.bot.bot_dir {
            Some(dir) => resolve(&self.bot.base_dir, dir),
            None => self.bot.base_dir.join("bot"),
        }
    }

    #[must_use]
    pub fn bot_script_path(&self) -> PathBuf {
        self.bot_dir().join(&self.bot.script)
    }

    #[must_use]
    pub fn state_path(&self) -> PathBuf {
        resolve(&self.bot_dir(), &self.bot.state_file)
    }

    #[must_use]
    pub fn trades_path(&self) -> PathBuf {
        resolve(&self.bot_dir(), &self.bot.trades_file)
    }

    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        resolve(&self.bot_dir(), &self.bot.log_dir)
    }

    #[must_use]
    pub fn dashboard_data_path(&self) -> PathBuf {
        resolve(&self.bot.base_dir, &self.dashboard.data_file)
    }

    #[must_use]
    pub fn control_page_path(&self) -> PathBuf {
        resolve(&self.bot.base_dir, &self.dashboard.control_page)
    }

    #[must_use]
    pub fn dashboard_page_path(&self) -> PathBuf {
        resolve(&self.bot.base_dir, &self.dashboard.dashboard_page)
    }

    #[must_use]
    pub fn update_script_path(&self) -> PathBuf {
        resolve(&self.bot.base_dir, &self.update.script)
    }

    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe.timeout_secs)
    }

    #[must_use]
    pub const fn update_timeout(&self) -> Duration {
        Duration::from_secs(self.update.timeout_secs)
    }

    #[must_use]
    pub const fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.bot.restart_delay_ms)
    }
}
