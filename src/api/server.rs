//! Axum API server for Begrepsbro.

use crate::api::config::ApiConfig;
use crate::gateway::Gateway;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared state for all API handlers.
#[derive(Clone)]
pub struct AppState {
    /// Gateway every `POST /api/generate` goes through.
    pub gateway: Gateway,
}

impl AppState {
    /// Request bodies are two short strings; anything larger is rejected.
    pub const MAX_BODY_BYTES: usize = 64 * 1024;

    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }
}

/// CORS layer allowing only the configured frontend origin.
///
/// An unparseable origin disables cross-origin access instead of failing.
fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([HeaderName::from_static("content-type")]);
    match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(AllowOrigin::exact(origin)),
        Err(e) => {
            warn!("Ignoring invalid CORS origin '{}': {}", allowed_origin, e);
            cors
        }
    }
}

/// Build the axum router with all API routes.
pub fn build_router(state: AppState, allowed_origin: &str) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/api/generate", post(super::routes::generate::generate))
        .route("/api/health", get(super::routes::health::get_health))
        .route(
            "/api/languages",
            get(super::routes::languages::list_languages),
        )
        .layer(DefaultBodyLimit::max(AppState::MAX_BODY_BYTES))
        .layer(cors_layer(allowed_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// Start the API server and run until Ctrl-C.
pub async fn start_server(
    config: &ApiConfig,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = build_router(state, &config.allowed_origin);
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Begrepsbro API listening on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Begrepsbro API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::providers::MockStructuredProvider;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    pub(crate) fn state_with(mock: MockStructuredProvider) -> AppState {
        AppState::new(Gateway::new(Arc::new(mock)))
    }

    #[test]
    fn test_build_router() {
        let _router = build_router(
            state_with(MockStructuredProvider::new()),
            "http://localhost:3000",
        );
    }

    #[test]
    fn test_build_router_with_invalid_origin() {
        let _router = build_router(state_with(MockStructuredProvider::new()), "bad\norigin");
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_configured_origin() {
        let app = build_router(
            state_with(MockStructuredProvider::new()),
            "http://localhost:3000",
        );
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/generate")
                    .header("origin", "http://localhost:3000")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = build_router(
            state_with(MockStructuredProvider::new()),
            "http://localhost:3000",
        );
        let response = app
            .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
