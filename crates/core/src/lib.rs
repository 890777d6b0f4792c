pub mod config;
pub mod config_loader;
pub mod external;
pub mod result;
pub mod state;
pub mod traits;

pub use config::{
    BotConfig, DashboardConfig, PanelConfig, ProbeConfig, ServerConfig, UpdateConfig,
};
pub use config_loader::ConfigLoader;
pub use external::{best_effort, best_effort_sync, run_command, CommandError, CommandOutput};
pub use result::OperationResult;
pub use state::{StateError, StateReader};
pub use traits::ProcessTable;
