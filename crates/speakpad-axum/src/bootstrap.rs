//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired
//! together for the web adapter: the SSE broadcaster, the browser host
//! bridge, and the speech service are all instantiated here.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use speakpad_core::ports::{AppEventEmitter, SpeechSessionPort};
use speakpad_speech::{SpeechHost, SpeechService};

use crate::browser_host::BrowserHost;
use crate::sse::SseBroadcaster;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Optional path to static assets for serving the UI.
    pub static_dir: Option<PathBuf>,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Create config with defaults: port 8970, UI served from the
    /// bundled `assets` directory when present.
    #[must_use]
    pub fn with_defaults() -> Self {
        let assets = PathBuf::from("crates/speakpad-axum/assets");
        let static_dir = if assets.is_dir() {
            Some(assets)
        } else {
            let local = PathBuf::from("assets");
            local.is_dir().then_some(local)
        };
        Self {
            port: 8970,
            static_dir,
            cors: CorsConfig::default(),
        }
    }

    /// Create config from defaults plus `SPEAKPAD_PORT` and
    /// `SPEAKPAD_STATIC_DIR` environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::with_defaults();
        if let Ok(port) = std::env::var("SPEAKPAD_PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("invalid SPEAKPAD_PORT value: {port}"))?;
        }
        if let Ok(dir) = std::env::var("SPEAKPAD_STATIC_DIR") {
            config.static_dir = Some(PathBuf::from(dir));
        }
        Ok(config)
    }

    /// Set the static directory for UI serving.
    #[must_use]
    pub fn with_static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(path.into());
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
///
/// This struct holds all initialized services for the web server.
pub struct AxumContext {
    /// The speech session as trait object.
    pub session: Arc<dyn SpeechSessionPort>,
    /// Browser host bridge for inbound shim reports.
    pub host: Arc<BrowserHost>,
    /// SSE broadcaster for real-time events.
    pub sse: Arc<SseBroadcaster>,
}

/// Bootstrap the web adapter's services.
///
/// Wiring order matters only in one place: the browser host broadcasts
/// its commands through the same SSE channel the session's events use,
/// so one broadcaster is created first and shared by both.
///
/// Must be called from within a Tokio runtime; the speech service
/// spawns its event bridge and host pump tasks on construction.
#[must_use]
pub fn bootstrap() -> AxumContext {
    let sse = Arc::new(SseBroadcaster::with_defaults());

    let (host, host_rx) = BrowserHost::new(Arc::clone(&sse) as Arc<dyn AppEventEmitter>);

    let service = SpeechService::new(
        Arc::clone(&host) as Arc<dyn SpeechHost>,
        host_rx,
        Arc::clone(&sse) as Arc<dyn AppEventEmitter>,
    );
    let session: Arc<dyn SpeechSessionPort> = Arc::new(service);

    AxumContext { session, host, sse }
}

/// Start the web server on the configured port.
///
/// If `config.static_dir` is set, serves the UI alongside the API.
/// Otherwise, serves only the API endpoints.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap();

    let app = if let Some(ref static_dir) = config.static_dir {
        info!("Serving static assets from: {}", static_dir.display());
        crate::routes::create_spa_router(ctx, static_dir, &config.cors)
    } else {
        crate::routes::create_router(ctx, &config.cors)
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    if config.static_dir.is_some() {
        info!("speakpad server (with UI) listening on http://{}", addr);
    } else {
        info!("speakpad server (API only) listening on http://{}", addr);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
