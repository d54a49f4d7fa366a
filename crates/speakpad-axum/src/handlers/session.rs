//! Axum handlers for the `/api/session/*` endpoints.
//!
//! Handlers are thin wrappers — each calls exactly one session port
//! method and returns the result as JSON. Request deserialization
//! structs are co-located here rather than in a separate types file to
//! keep the handler surface self-contained.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use speakpad_core::ports::{SessionStatusDto, VoiceDto};

use crate::error::HttpError;
use crate::state::AppState;

// ── Request body shapes ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTextRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRateRequest {
    pub rate: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPitchRequest {
    pub pitch: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectVoiceRequest {
    pub name: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// `GET /api/session/status`
pub async fn status(State(state): State<AppState>) -> Result<Json<SessionStatusDto>, HttpError> {
    Ok(Json(state.session.status().await?))
}

/// `POST /api/session/play`
pub async fn play(State(state): State<AppState>) -> Result<Json<()>, HttpError> {
    state.session.play().await?;
    Ok(Json(()))
}

/// `POST /api/session/pause`
pub async fn pause(State(state): State<AppState>) -> Result<Json<()>, HttpError> {
    state.session.pause().await?;
    Ok(Json(()))
}

/// `POST /api/session/resume`
pub async fn resume(State(state): State<AppState>) -> Result<Json<()>, HttpError> {
    state.session.resume().await?;
    Ok(Json(()))
}

/// `POST /api/session/stop`
pub async fn stop(State(state): State<AppState>) -> Result<Json<()>, HttpError> {
    state.session.stop().await?;
    Ok(Json(()))
}

/// `PUT /api/session/text`
pub async fn set_text(
    State(state): State<AppState>,
    Json(req): Json<SetTextRequest>,
) -> Result<Json<()>, HttpError> {
    state.session.set_text(&req.text).await?;
    Ok(Json(()))
}

/// `PUT /api/session/rate`
pub async fn set_rate(
    State(state): State<AppState>,
    Json(req): Json<SetRateRequest>,
) -> Result<Json<()>, HttpError> {
    state.session.set_rate(req.rate).await?;
    Ok(Json(()))
}

/// `PUT /api/session/pitch`
pub async fn set_pitch(
    State(state): State<AppState>,
    Json(req): Json<SetPitchRequest>,
) -> Result<Json<()>, HttpError> {
    state.session.set_pitch(req.pitch).await?;
    Ok(Json(()))
}

/// `PUT /api/session/voice`
pub async fn select_voice(
    State(state): State<AppState>,
    Json(req): Json<SelectVoiceRequest>,
) -> Result<Json<()>, HttpError> {
    state.session.select_voice(&req.name).await?;
    Ok(Json(()))
}

/// `GET /api/session/voices`
pub async fn list_voices(
    State(state): State<AppState>,
) -> Result<Json<Vec<VoiceDto>>, HttpError> {
    Ok(Json(state.session.list_voices().await?))
}
