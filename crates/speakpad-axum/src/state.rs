//! Shared application state type.
//!
//! Defines the `AppState` type used across all handlers and routers.

use crate::bootstrap::AxumContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// This is an Arc-wrapped `AxumContext` containing the session port,
/// the browser host bridge, and the SSE broadcaster.
pub type AppState = Arc<AxumContext>;
