//! Start/stop/restart of the bot process.
//!
//! The supervisor keeps no record of what it launched. Every call asks the
//! process table whether the bot is running and acts on that answer, so the
//! panel can be restarted, or the bot managed by hand, without the two
//! drifting apart.
//!
//! `stop` only delivers SIGTERM. It does not wait for the process to exit and
//! never escalates to SIGKILL; callers that need certainty should poll
//! [`ProcessTable::locate`] afterwards.

use crate::commands::BotCommand;
use crate::status::StatusReport;
use bot_panel_core::{OperationResult, PanelConfig, ProcessTable, StateReader};
use chrono::Utc;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;

pub struct Supervisor {
    config: Arc<PanelConfig>,
    table: Arc<dyn ProcessTable>,
}

impl Supervisor {
    #[must_use]
    pub fn new(config: Arc<PanelConfig>, table: Arc<dyn ProcessTable>) -> Self {
        Self { config, table }
    }

    /// Current PIDs of the bot, straight from the process table.
    pub async fn pids(&self) -> Vec<u32> {
        self.table.locate().await
    }

    /// Dispatches a [`BotCommand`] to the matching operation.
    pub async fn execute(&self, command: BotCommand) -> OperationResult {
        match command {
            BotCommand::Start => self.start().await,
            BotCommand::Stop => self.stop().await,
            BotCommand::Restart => self.restart().await,
        }
    }

    /// Launches the bot as a detached process unless it is already running.
    pub async fn start(&self) -> OperationResult {
        let pids = self.pids().await;
        if !pids.is_empty() {
            return OperationResult::failure(format!("bot already running (PIDs: {pids:?})"));
        }

        let script = self.config.bot_script_path();
        if !script.exists() {
            tracing::warn!("Bot script not found: {}", script.display());
            return OperationResult::failure(format!("bot script not found: {}", script.display()));
        }

        // Own process group so the bot outlives the panel; the child handle
        // is dropped without waiting.
        let spawned = Command::new(&self.config.bot.interpreter)
            .arg(&script)
            .current_dir(self.config.bot_dir())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn();

        match spawned {
            Ok(child) => match child.id() {
                Some(pid) => {
                    tracing::info!("Started bot {} (PID: {})", script.display(), pid);
                    OperationResult::success(format!("bot started (PID: {pid})")).with_pid(pid)
                }
                None => OperationResult::failure("bot exited immediately after launch"),
            },
            Err(e) => {
                tracing::error!("Failed to start bot {}: {}", script.display(), e);
                OperationResult::failure(format!("start failed: {e}"))
            }
        }
    }

    /// Sends SIGTERM to every running bot process.
    ///
    /// Success means the signals were delivered, not that the processes exited.
    pub async fn stop(&self) -> OperationResult {
        let pids = self.pids().await;
        if pids.is_empty() {
            return OperationResult::failure("bot not running");
        }

        for &pid in &pids {
            if let Err(e) = terminate(pid) {
                tracing::error!("Failed to signal bot PID {}: {}", pid, e);
                return OperationResult::failure(format!("stop failed: {e}"));
            }
        }

        tracing::info!("Sent SIGTERM to bot (PIDs: {:?})", pids);
        OperationResult::success(format!("bot stopped (PIDs: {pids:?})"))
    }

    /// Stop, wait the configured delay, then start.
    ///
    /// The result is ok only if the start phase succeeded.
    pub async fn restart(&self) -> OperationResult {
        let stopped = self.stop().await;
        tokio::time::sleep(self.config.restart_delay()).await;
        let started = self.start().await;

        OperationResult {
            ok: started.ok,
            message: format!("stop: {} -> start: {}", stopped.message, started.message),
            pid: started.pid,
        }
    }

    /// Running flag, PIDs, bot state and recent trades in one snapshot.
    pub async fn status(&self) -> StatusReport {
        let pids = self.pids().await;
        let state = StateReader::read_map(&self.config.state_path());
        let trades = StateReader::read_list(&self.config.trades_path());

        StatusReport::new(pids, state, &trades, self.config.bot.recent_trades, Utc::now())
    }
}

fn terminate(pid: u32) -> Result<(), String> {
    let raw = i32::try_from(pid).map_err(|_| format!("invalid PID {pid}"))?;
    kill(Pid::from_raw(raw), Signal::SIGTERM).map_err(|e| format!("PID {pid}: {e}"))
}
