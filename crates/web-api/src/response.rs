use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bot_panel_core::OperationResult;
use serde::Serialize;

/// JSON body, pretty-printed for humans reading it over the wire.
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec_pretty(&self.0) {
            Ok(body) => (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json; charset=utf-8"),
                )],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// 404 with an `{ok: false, msg}` body.
pub fn not_found(message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        PrettyJson(OperationResult::failure(message)),
    )
        .into_response()
}
