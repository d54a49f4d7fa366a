//! Host speech capability — the engine-agnostic interface for speech
//! synthesis.
//!
//! This module defines the [`SpeechHost`] trait that abstracts over
//! whatever actually produces audio (a browser's `speechSynthesis`, a
//! platform engine, a mock in tests). The session operates on a trait
//! object (`Arc<dyn SpeechHost>`) so that engines can be swapped
//! without touching the state machine.
//!
//! Outbound commands are fire-and-forget: `speak`, `pause`, `resume`,
//! and `cancel` have no guaranteed synchronous effect. The engine's
//! eventual effects arrive later as [`HostEvent`]s on a channel —
//! inbound messages, never return values.

use serde::{Deserialize, Serialize};

use crate::error::SpeechError;

// ── Shared types ───────────────────────────────────────────────────

/// Identifier for one utterance submission.
///
/// Ids are allocated by the session, monotonically per session, and
/// echoed back in host callbacks so late callbacks from a superseded
/// utterance can be discarded.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UtteranceId(pub u64);

impl std::fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A voice as reported by the host capability.
///
/// The application never mutates descriptors; the list is replaced
/// wholesale whenever the host reports a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    /// Voice name, unique within the list for the session.
    pub name: String,
    /// BCP 47 language tag (e.g. `"en-US"`).
    pub language: String,
}

/// A single utterance submission.
///
/// Constructed fresh from current preferences on every `play()`, never
/// mutated after being handed to the host, and superseded (not queued)
/// by any subsequent submission.
#[derive(Debug, Clone)]
pub struct UtteranceRequest {
    /// Submission id, echoed back by host callbacks.
    pub id: UtteranceId,
    /// Text to synthesize. Empty text is not special-cased; the host
    /// decides what to do with it.
    pub text: String,
    /// Selected voice; `None` (or a name the engine does not know)
    /// falls back to the host default voice.
    pub voice: Option<VoiceDescriptor>,
    /// Speech rate in [0.1, 2.0].
    pub rate: f32,
    /// Speech pitch in [0.1, 2.0].
    pub pitch: f32,
}

// ── Inbound host events ────────────────────────────────────────────

/// Notifications delivered by the host capability.
///
/// Per submission, `Started` fires at most once, then exactly one of
/// `Ended`/`Errored` — except when pre-empted by cancellation, in
/// which case no further callbacks are guaranteed. Events are consumed
/// run-to-completion in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The engine began speaking the identified utterance.
    Started(UtteranceId),
    /// The identified utterance finished naturally.
    Ended(UtteranceId),
    /// Synthesis of the identified utterance failed.
    Errored(UtteranceId),
    /// The host's voice list changed; re-query [`SpeechHost::voices`].
    VoicesChanged,
}

// ── Host trait ─────────────────────────────────────────────────────

/// Engine-agnostic speech synthesis capability.
///
/// Implementations must be `Send + Sync`; the session holds one behind
/// an `Arc` and may issue commands from any task. Commands take `&self`
/// because real engines are handles with interior mutability (a
/// browser bridge, a platform engine handle).
pub trait SpeechHost: Send + Sync {
    /// Current voice list, in host order. May be empty transiently:
    /// hosts can deliver voices asynchronously after startup, so the
    /// first result must not be assumed complete. Re-queried on every
    /// [`HostEvent::VoicesChanged`].
    fn voices(&self) -> Vec<VoiceDescriptor>;

    /// Submit an utterance for synthesis. Asynchronous: success means
    /// the submission was accepted, not that audio played. Effects
    /// arrive later as [`HostEvent`]s.
    fn speak(&self, utterance: &UtteranceRequest) -> Result<(), SpeechError>;

    /// Request pause of the active utterance. Fire-and-forget.
    fn pause(&self);

    /// Request resume of the paused utterance. Fire-and-forget.
    fn resume(&self);

    /// Request cancellation of any active utterance. Best-effort; no
    /// confirmation is awaited.
    fn cancel(&self);

    /// Whether the host currently reports active speech. Polled only
    /// at the moment of a new submission, to decide whether to cancel
    /// first.
    fn is_speaking(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utterance_id_is_transparent_on_the_wire() {
        let json = serde_json::to_string(&UtteranceId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn voice_descriptor_equality_is_by_value() {
        let a = VoiceDescriptor {
            name: "A".to_owned(),
            language: "en-US".to_owned(),
        };
        assert_eq!(a, a.clone());
    }
}
