#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings for integration test infrastructure
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tower as _;

use tracing_subscriber as _; // Used by main.rs binary

pub mod bootstrap;
pub mod browser_host;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod sse;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use browser_host::BrowserHost;
pub use error::HttpError;
pub use routes::{create_router, create_spa_router};
pub use sse::SseBroadcaster;
pub use state::AppState;
