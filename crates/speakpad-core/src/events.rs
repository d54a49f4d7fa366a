//! Canonical event union for all cross-adapter events.
//!
//! This module is the single source of truth for events streamed to
//! connected clients (SSE today; any future transport reuses the same
//! shapes). Two kinds of event travel on the one channel:
//!
//! - **Session events** describe observable state: playback state,
//!   the voice directory, the selected voice, the appearance flag.
//! - **Host commands** instruct the browser-side speech shim, which
//!   owns the actual `speechSynthesis` engine: submit this utterance,
//!   pause, resume, cancel.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag for TypeScript compatibility:
//!
//! ```json
//! { "type": "state_changed", "state": "speaking" }
//! ```

use serde::{Deserialize, Serialize};

use crate::ports::{UtteranceDto, VoiceDto};

/// Canonical event types for all adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    // ========== Session Events ==========
    /// The playback state machine moved.
    StateChanged {
        /// State label: `"idle"`, `"speaking"`, or `"paused"`.
        state: String,
    },

    /// The voice directory was replaced (host delivered a voice list).
    VoicesChanged {
        /// The full replacement list, in host order.
        voices: Vec<VoiceDto>,
    },

    /// The selected voice changed (user choice or first-entry default).
    VoiceSelected {
        /// Name of the now-selected voice.
        name: String,
    },

    /// The appearance flag changed.
    AppearanceChanged {
        /// Whether dark presentation is now active.
        #[serde(rename = "darkMode")]
        dark_mode: bool,
    },

    // ========== Host Commands ==========
    /// Submit a fresh utterance to the speech engine.
    SpeakRequested {
        /// The utterance to synthesize.
        utterance: UtteranceDto,
    },

    /// Pause the active utterance.
    PauseRequested,

    /// Resume the paused utterance.
    ResumeRequested,

    /// Cancel any active or paused utterance.
    CancelRequested,
}

impl AppEvent {
    /// Build a `StateChanged` event from a state label.
    pub fn state_changed(state: impl Into<String>) -> Self {
        Self::StateChanged {
            state: state.into(),
        }
    }

    /// Build a `VoiceSelected` event.
    pub fn voice_selected(name: impl Into<String>) -> Self {
        Self::VoiceSelected { name: name.into() }
    }
}
