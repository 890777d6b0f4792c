use crate::logs::{parse_lines, tail_latest_log};
use crate::response::{not_found, PrettyJson};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Query, Request, State},
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Response},
};
use bot_panel_core::{OperationResult, StateReader};
use bot_panel_probe::SystemSnapshot;
use bot_panel_supervisor::{BotCommand, StatusReport};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tower::ServiceExt;
use tower_http::services::ServeDir;

#[derive(Serialize)]
pub struct LogsResponse {
    pub logs: String,
}

/// GET /api/status
pub async fn status(State(state): State<AppState>) -> PrettyJson<StatusReport> {
    PrettyJson(state.supervisor.status().await)
}

/// GET /api/system
pub async fn system(State(state): State<AppState>) -> PrettyJson<SystemSnapshot> {
    PrettyJson(state.probe.probe().await)
}

/// GET /api/logs?lines=N
///
/// A repeated `lines` key uses its first value.
pub async fn logs(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> PrettyJson<LogsResponse> {
    let first = query.iter().find(|(key, _)| key == "lines");
    let lines = parse_lines(first.map(|(_, value)| value.as_str()));
    PrettyJson(LogsResponse {
        logs: tail_latest_log(&state.config.log_dir(), lines),
    })
}

/// GET /api/dashboard
pub async fn dashboard_data(State(state): State<AppState>) -> PrettyJson<Value> {
    PrettyJson(StateReader::read_document(&state.config.dashboard_data_path()))
}

/// GET / and /control
pub async fn control_page(State(state): State<AppState>) -> Response {
    serve_page(&state.config.control_page_path()).await
}

/// GET /dashboard
pub async fn dashboard_page(State(state): State<AppState>) -> Response {
    serve_page(&state.config.dashboard_page_path()).await
}

/// POST /api/bot/{start,stop,restart}
pub async fn bot_command(
    State(state): State<AppState>,
    command: BotCommand,
) -> PrettyJson<OperationResult> {
    tracing::info!("Bot {} requested", command);
    let result = state.supervisor.execute(command).await;
    if !result.ok {
        tracing::warn!("Bot {} refused: {}", command, result.message);
    }
    PrettyJson(result)
}

/// POST /api/update
pub async fn update(State(state): State<AppState>) -> PrettyJson<OperationResult> {
    PrettyJson(state.updater.run().await)
}

/// Default case for every undeclared method/path pair.
///
/// GET and HEAD fall through to static files under the base directory;
/// anything else is a 404 with `{ok: false}`.
pub async fn unknown_route(State(state): State<AppState>, req: Request) -> Response {
    if req.method() == Method::GET || req.method() == Method::HEAD {
        let files = ServeDir::new(state.config.base_dir());
        return match files.oneshot(req).await {
            Ok(response) => response.map(Body::new),
            Err(never) => match never {},
        };
    }
    tracing::debug!("Unknown endpoint: {} {}", req.method(), req.uri().path());
    not_found("Unknown endpoint")
}

async fn serve_page(path: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(content) => (
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            )],
            content,
        )
            .into_response(),
        Err(e) => {
            tracing::debug!("Page {} unavailable: {}", path.display(), e);
            not_found("File not found")
        }
    }
}
