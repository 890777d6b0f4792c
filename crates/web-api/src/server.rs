use crate::routes::ROUTES;
use crate::{handlers, state::AppState};
use axum::{
    extract::Request,
    http::{header, HeaderValue},
    Router, ServiceExt,
};
use tower::limit::{ConcurrencyLimit, ConcurrencyLimitLayer};
use tower::{Layer, ServiceBuilder};
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::set_header::{SetResponseHeader, SetResponseHeaderLayer};
use tower_http::trace::TraceLayer;

/// Full HTTP stack: trailing-slash trim, CORS header, one request at a time.
pub type PanelService = NormalizePath<SetResponseHeader<ConcurrencyLimit<Router>, HeaderValue>>;

pub struct ApiServer {
    state: AppState,
}

impl ApiServer {
    #[must_use]
    pub const fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Route table plus per-request tracing and CORS preflight handling.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let mut router = Router::new();
        for &(verb, path, endpoint) in ROUTES {
            router = router.route(path, endpoint.method_router(verb));
        }

        router
            .fallback(handlers::unknown_route)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// The router wrapped in the layers that must see the raw request
    /// (path normalisation) or span all routes (the concurrency limit).
    pub fn service(&self) -> PanelService {
        let stack = ServiceBuilder::new()
            .layer(SetResponseHeaderLayer::if_not_present(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(ConcurrencyLimitLayer::new(1))
            .service(self.router());
        NormalizePathLayer::trim_trailing_slash().layer(stack)
    }

    /// Starts the control server listening on the specified address.
    ///
    /// Runs until SIGINT or SIGTERM.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the address or serve requests.
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Control panel listening on {}", addr);
        for (verb, path, _) in ROUTES {
            tracing::info!("  {:<4} {}", verb, path);
        }

        let app = self.service();
        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Control panel stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT (Ctrl+C), shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
