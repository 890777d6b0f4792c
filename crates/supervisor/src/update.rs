use bot_panel_core::{run_command, OperationResult, PanelConfig};
use std::sync::Arc;

/// Runs the external dashboard update script on demand.
pub struct UpdateRunner {
    config: Arc<PanelConfig>,
}

impl UpdateRunner {
    #[must_use]
    pub const fn new(config: Arc<PanelConfig>) -> Self {
        Self { config }
    }

    /// Runs the update script and waits for it, bounded by the update timeout.
    ///
    /// `ok` mirrors a zero exit status; `msg` is the script's stdout, or its
    /// stderr when stdout is empty.
    pub async fn run(&self) -> OperationResult {
        let script = self.config.update_script_path();
        let base_dir = self.config.base_dir();
        let outcome = run_command(
            &self.config.bot.interpreter,
            [script.as_os_str()],
            Some(base_dir),
            self.config.update_timeout(),
        )
        .await;

        match outcome {
            Ok(out) => {
                let stdout = out.stdout.trim();
                let message = if stdout.is_empty() {
                    out.stderr.trim()
                } else {
                    stdout
                };
                if out.success() {
                    tracing::info!("Dashboard update finished");
                } else {
                    tracing::warn!("Dashboard update exited with {:?}", out.code);
                }
                OperationResult {
                    ok: out.success(),
                    message: message.to_string(),
                    pid: None,
                }
            }
            Err(e) => {
                tracing::warn!("Dashboard update failed: {}", e);
                OperationResult::failure(format!("update failed: {e}"))
            }
        }
    }
}
