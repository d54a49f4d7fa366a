//! Speech session error types.

/// Errors that can occur in the speech session.
///
/// The session deliberately has almost no failure modes: preference
/// writes clamp instead of rejecting, unknown voice selections degrade
/// to the host default, and synthesis failures reported by the host
/// arrive as [`HostEvent::Errored`](crate::host::HostEvent) and are
/// absorbed silently rather than surfaced here.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    /// The host capability rejected an utterance submission.
    #[error("Utterance submission failed: {0}")]
    Submission(String),
}
