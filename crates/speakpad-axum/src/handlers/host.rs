//! Axum handlers for the `/api/host/*` endpoints — the browser shim's
//! report channel.
//!
//! The browser owns the actual `speechSynthesis` engine and reports
//! its effects here: the voice list, and per-utterance lifecycle
//! callbacks echoing the submission id. Reports are accepted
//! unconditionally and fed to the session, which discards anything
//! stale; the shim never gets an error for being late.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use speakpad_core::ports::VoiceDto;

use crate::error::HttpError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportVoicesRequest {
    pub voices: Vec<VoiceDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtteranceCallbackRequest {
    /// Id of the utterance the callback belongs to.
    pub id: u64,
}

/// `POST /api/host/voices`
pub async fn voices(
    State(state): State<AppState>,
    Json(req): Json<ReportVoicesRequest>,
) -> Result<Json<()>, HttpError> {
    state.host.report_voices(req.voices);
    Ok(Json(()))
}

/// `POST /api/host/started`
pub async fn started(
    State(state): State<AppState>,
    Json(req): Json<UtteranceCallbackRequest>,
) -> Result<Json<()>, HttpError> {
    state.host.report_started(req.id);
    Ok(Json(()))
}

/// `POST /api/host/ended`
pub async fn ended(
    State(state): State<AppState>,
    Json(req): Json<UtteranceCallbackRequest>,
) -> Result<Json<()>, HttpError> {
    state.host.report_ended(req.id);
    Ok(Json(()))
}

/// `POST /api/host/error`
pub async fn errored(
    State(state): State<AppState>,
    Json(req): Json<UtteranceCallbackRequest>,
) -> Result<Json<()>, HttpError> {
    state.host.report_errored(req.id);
    Ok(Json(()))
}
