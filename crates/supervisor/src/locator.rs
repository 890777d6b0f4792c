use async_trait::async_trait;
use bot_panel_core::{best_effort, run_command, PanelConfig, ProcessTable};
use std::time::Duration;

/// Finds bot processes with `pgrep -f <pattern>`.
#[derive(Debug, Clone)]
pub struct PgrepLocator {
    program: String,
    pattern: String,
    timeout: Duration,
}

impl PgrepLocator {
    #[must_use]
    pub fn new(pattern: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: "pgrep".to_string(),
            pattern: pattern.into(),
            timeout,
        }
    }

    /// Locator for the bot script named in `config`.
    #[must_use]
    pub fn from_config(config: &PanelConfig) -> Self {
        Self::new(config.bot.script.clone(), config.probe_timeout())
    }

    /// Replaces the lookup tool, mainly so tests can point at a missing binary.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

/// Parses one PID per line, skipping blanks, junk and our own PID.
#[must_use]
pub fn parse_pids(output: &str) -> Vec<u32> {
    let own = std::process::id();
    output
        .lines()
        .filter_map(|line| line.trim().parse::<u32>().ok())
        .filter(|pid| *pid != own)
        .collect()
}

#[async_trait]
impl ProcessTable for PgrepLocator {
    async fn locate(&self) -> Vec<u32> {
        // pgrep exits 1 when nothing matches; stdout is empty then, so the
        // status code carries no extra information.
        let lookup = async {
            run_command(
                &self.program,
                ["-f", self.pattern.as_str()],
                None,
                self.timeout,
            )
            .await
            .map(|out| parse_pids(&out.stdout))
        };
        best_effort("process lookup", lookup, Vec::new()).await
    }
}
