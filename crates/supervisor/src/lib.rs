pub mod commands;
pub mod locator;
pub mod status;
pub mod supervisor;
pub mod update;

pub use commands::BotCommand;
pub use locator::PgrepLocator;
pub use status::StatusReport;
pub use supervisor::Supervisor;
pub use update::UpdateRunner;
