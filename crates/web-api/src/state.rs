use bot_panel_core::{PanelConfig, ProcessTable};
use bot_panel_probe::SystemProbe;
use bot_panel_supervisor::{Supervisor, UpdateRunner};
use std::sync::Arc;

/// Everything a handler needs. Holds no mutable state: each request
/// re-derives its answer from the filesystem or the process table.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PanelConfig>,
    pub supervisor: Arc<Supervisor>,
    pub probe: SystemProbe,
    pub updater: Arc<UpdateRunner>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Arc<PanelConfig>, table: Arc<dyn ProcessTable>) -> Self {
        Self {
            supervisor: Arc::new(Supervisor::new(config.clone(), table)),
            probe: SystemProbe::from_config(&config),
            updater: Arc::new(UpdateRunner::new(config.clone())),
            config,
        }
    }
}
