//! The panel's HTTP surface as data.
//!
//! Every declared `(method, path)` pair maps to one [`Endpoint`]. Anything not
//! listed, including a listed path with the wrong method, goes to
//! [`handlers::unknown_route`].

use crate::handlers;
use crate::state::AppState;
use axum::extract::State;
use axum::routing::{on, MethodFilter, MethodRouter};
use bot_panel_supervisor::BotCommand;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
}

impl Verb {
    #[must_use]
    pub const fn filter(self) -> MethodFilter {
        match self {
            Self::Get => MethodFilter::GET,
            Self::Post => MethodFilter::POST,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Get => "GET",
            Self::Post => "POST",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Status,
    System,
    Logs,
    DashboardData,
    ControlPage,
    DashboardPage,
    Bot(BotCommand),
    Update,
}

pub const ROUTES: &[(Verb, &str, Endpoint)] = &[
    (Verb::Get, "/api/status", Endpoint::Status),
    (Verb::Get, "/api/system", Endpoint::System),
    (Verb::Get, "/api/logs", Endpoint::Logs),
    (Verb::Get, "/api/dashboard", Endpoint::DashboardData),
    (Verb::Get, "/", Endpoint::ControlPage),
    (Verb::Get, "/control", Endpoint::ControlPage),
    (Verb::Get, "/dashboard", Endpoint::DashboardPage),
    (Verb::Post, "/api/bot/start", Endpoint::Bot(BotCommand::Start)),
    (Verb::Post, "/api/bot/stop", Endpoint::Bot(BotCommand::Stop)),
    (Verb::Post, "/api/bot/restart", Endpoint::Bot(BotCommand::Restart)),
    (Verb::Post, "/api/update", Endpoint::Update),
];

impl Endpoint {
    /// Handler for this endpoint, reachable only through `verb`.
    #[must_use]
    pub fn method_router(self, verb: Verb) -> MethodRouter<AppState> {
        let filter = verb.filter();
        let route = match self {
            Self::Status => on(filter, handlers::status),
            Self::System => on(filter, handlers::system),
            Self::Logs => on(filter, handlers::logs),
            Self::DashboardData => on(filter, handlers::dashboard_data),
            Self::ControlPage => on(filter, handlers::control_page),
            Self::DashboardPage => on(filter, handlers::dashboard_page),
            Self::Bot(command) => on(filter, move |state: State<AppState>| {
                handlers::bot_command(state, command)
            }),
            Self::Update => on(filter, handlers::update),
        };
        route.fallback(handlers::unknown_route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn declared(verb: Verb, path: &str) -> Option<Endpoint> {
        ROUTES
            .iter()
            .find(|(v, p, _)| *v == verb && *p == path)
            .map(|(_, _, endpoint)| *endpoint)
    }

    #[test]
    fn test_paths_are_unique() {
        let paths: HashSet<_> = ROUTES.iter().map(|(_, p, _)| *p).collect();
        assert_eq!(paths.len(), ROUTES.len());
    }

    #[test]
    fn test_route_table() {
        assert_eq!(declared(Verb::Get, "/api/status"), Some(Endpoint::Status));
        assert_eq!(
            declared(Verb::Post, "/api/bot/restart"),
            Some(Endpoint::Bot(BotCommand::Restart))
        );
        assert_eq!(declared(Verb::Post, "/api/status"), None);
        assert_eq!(declared(Verb::Get, "/api/unknown"), None);
    }

    #[test]
    fn test_every_bot_command_is_routed() {
        for command in [BotCommand::Start, BotCommand::Stop, BotCommand::Restart] {
            let path = format!("/api/bot/{command}");
            assert_eq!(declared(Verb::Post, &path), Some(Endpoint::Bot(command)));
        }
    }

    #[test]
    fn test_verb_honours_width() {
        assert_eq!(format!("{:<4}|", Verb::Get), "GET |");
        assert_eq!(format!("{:<4}|", Verb::Post), "POST|");
    }
}
