//! Axum handlers for the `/api/appearance/*` endpoints.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::error::HttpError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitAppearanceRequest {
    /// The client's `prefers-color-scheme: dark` media query result.
    pub prefers_dark: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceResponse {
    pub dark_mode: bool,
}

/// `POST /api/appearance/init`
///
/// Seeds the appearance flag from the client's environment signal.
/// Only the first report per session applies; a reconnecting client
/// gets the current flag back without clobbering an earlier toggle.
pub async fn init(
    State(state): State<AppState>,
    Json(req): Json<InitAppearanceRequest>,
) -> Result<Json<AppearanceResponse>, HttpError> {
    let dark_mode = state.session.init_appearance(req.prefers_dark).await?;
    Ok(Json(AppearanceResponse { dark_mode }))
}

/// `POST /api/appearance/toggle`
pub async fn toggle(
    State(state): State<AppState>,
) -> Result<Json<AppearanceResponse>, HttpError> {
    let dark_mode = state.session.toggle_appearance().await?;
    Ok(Json(AppearanceResponse { dark_mode }))
}
