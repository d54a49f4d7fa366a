//! Route definitions and router construction.
//!
//! This module defines the HTTP routes and creates the main router.
//! Handlers delegate to the shared session port and the browser host
//! bridge held in `AxumContext`.

use axum::Router;
use axum::routing::{get, post, put};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Build all API routes without `/api` prefix (for nesting under /api).
///
/// Returns a router typed as `Router<AppState>` but WITHOUT
/// `.with_state()` applied. The caller must apply `.with_state()`
/// before nesting.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        // Session API
        .route("/session/status", get(handlers::session::status))
        .route("/session/play", post(handlers::session::play))
        .route("/session/pause", post(handlers::session::pause))
        .route("/session/resume", post(handlers::session::resume))
        .route("/session/stop", post(handlers::session::stop))
        .route("/session/text", put(handlers::session::set_text))
        .route("/session/rate", put(handlers::session::set_rate))
        .route("/session/pitch", put(handlers::session::set_pitch))
        .route("/session/voice", put(handlers::session::select_voice))
        .route("/session/voices", get(handlers::session::list_voices))
        // Appearance API
        .route("/appearance/init", post(handlers::appearance::init))
        .route("/appearance/toggle", post(handlers::appearance::toggle))
        // Host report API (browser speech shim)
        .route("/host/voices", post(handlers::host::voices))
        .route("/host/started", post(handlers::host::started))
        .route("/host/ended", post(handlers::host::ended))
        .route("/host/error", post(handlers::host::errored))
        // Events (SSE)
        .route("/events", get(handlers::events::stream))
}

/// Create the main Axum router with all API routes.
///
/// This creates the API routes only. For serving static assets,
/// use [`create_spa_router`] which includes both API routes and
/// static file serving with SPA fallback.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes().with_state(state).layer(cors))
}

/// Create a router with API routes and static asset serving.
///
/// This creates a complete router that:
/// 1. Serves API routes under `/api/*` and `/health`
/// 2. Serves static assets from `static_dir` for matching files
/// 3. Falls back to `index.html` for unmatched paths
pub fn create_spa_router<P: AsRef<Path>>(
    ctx: AxumContext,
    static_dir: P,
    cors_config: &CorsConfig,
) -> Router {
    let static_path = static_dir.as_ref();
    let index_path = static_path.join("index.html");

    // Static file serving with fallback to index.html for unmatched paths
    let serve_dir = ServeDir::new(static_path).fallback(ServeFile::new(&index_path));

    // API routes (without fallback - they should 404 on unknown API paths)
    let api = create_router(ctx, cors_config);

    // API routes take priority, then fallback to static serving
    api.fallback_service(serve_dir)
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
