//! Speech session port — trait abstraction for session control and state.
//!
//! # Design Rules
//!
//! - DTOs here are transport-agnostic wire shapes (no `speakpad-speech`
//!   types).
//! - Conversion from domain types happens inside `speakpad-speech`,
//!   never here. This keeps `speakpad-core` free of any dependency on
//!   the domain crate.
//! - `SpeechSessionPort` is the only surface the web adapter needs in
//!   order to serve all session endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── DTOs ─────────────────────────────────────────────────────────────────────

/// Snapshot of the whole session, enough for a client to render from
/// scratch (initial load or SSE reconnect).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusDto {
    /// Playback state label (`"idle"`, `"speaking"`, `"paused"`).
    pub state: String,
    /// Current text buffer.
    pub text: String,
    /// Speech rate in [0.1, 2.0].
    pub rate: f32,
    /// Speech pitch in [0.1, 2.0].
    pub pitch: f32,
    /// Name of the selected voice, if any selection has been made.
    pub selected_voice: Option<String>,
    /// Number of voices currently in the directory.
    pub voice_count: u32,
    /// Whether dark presentation is active.
    pub dark_mode: bool,
}

/// A voice as reported by the host speech capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDto {
    /// Voice name, unique within the list for the session.
    pub name: String,
    /// BCP 47 language tag (e.g. `"en-US"`).
    pub language: String,
}

/// An utterance submission, as handed to the host speech capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtteranceDto {
    /// Submission id; host callbacks echo it back so stale callbacks
    /// from a superseded utterance can be discarded.
    pub id: u64,
    /// Text to synthesize.
    pub text: String,
    /// Selected voice name; `None` falls back to the host default.
    pub voice: Option<String>,
    /// Speech rate in [0.1, 2.0].
    pub rate: f32,
    /// Speech pitch in [0.1, 2.0].
    pub pitch: f32,
}

// ── Error ────────────────────────────────────────────────────────────────────

/// Errors a session port operation can surface to an adapter.
#[derive(Debug, Error)]
pub enum SessionPortError {
    /// The host capability rejected an utterance submission.
    #[error("Host rejected utterance: {0}")]
    Host(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Port ─────────────────────────────────────────────────────────────────────

/// Port for driving the speech session from an adapter.
///
/// All methods are cheap state-synchronisation calls; none blocks on
/// the speech engine itself (submission is fire-and-forget, effects
/// arrive later as host callbacks).
#[async_trait]
pub trait SpeechSessionPort: Send + Sync {
    /// Full session snapshot.
    async fn status(&self) -> Result<SessionStatusDto, SessionPortError>;

    /// Submit the current text/voice/rate/pitch as a fresh utterance,
    /// superseding any in-flight one.
    async fn play(&self) -> Result<(), SessionPortError>;

    /// Pause the active utterance. No-op unless speaking.
    async fn pause(&self) -> Result<(), SessionPortError>;

    /// Resume the paused utterance. No-op unless paused.
    async fn resume(&self) -> Result<(), SessionPortError>;

    /// Cancel playback and return to idle. No-op when already idle.
    async fn stop(&self) -> Result<(), SessionPortError>;

    /// Replace the text buffer.
    async fn set_text(&self, text: &str) -> Result<(), SessionPortError>;

    /// Set the speech rate (clamped to [0.1, 2.0]).
    async fn set_rate(&self, rate: f32) -> Result<(), SessionPortError>;

    /// Set the speech pitch (clamped to [0.1, 2.0]).
    async fn set_pitch(&self, pitch: f32) -> Result<(), SessionPortError>;

    /// Select a voice by name. A name not present in the current list
    /// is not an error; playback falls back to the host default.
    async fn select_voice(&self, name: &str) -> Result<(), SessionPortError>;

    /// The current voice directory, in host order.
    async fn list_voices(&self) -> Result<Vec<VoiceDto>, SessionPortError>;

    /// Seed the appearance flag from the environment signal. Consumed
    /// at most once per session; later calls return the current flag
    /// unchanged.
    async fn init_appearance(&self, prefers_dark: bool) -> Result<bool, SessionPortError>;

    /// Flip the appearance flag unconditionally and return it.
    async fn toggle_appearance(&self) -> Result<bool, SessionPortError>;
}
