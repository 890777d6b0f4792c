pub mod handlers;
pub mod logs;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use routes::{Endpoint, Verb, ROUTES};
pub use server::{ApiServer, PanelService};
pub use state::AppState;
