//! Speech session — the playback state machine over the host capability.
//!
//! The session is a three-state machine driven from two sides: UI
//! commands (`play`/`pause`/`resume`/`stop` and preference writes) and
//! host callbacks ([`HostEvent`]s) that may arrive at arbitrary
//! cooperative-scheduling points:
//!
//! ```text
//!           play()                 pause()
//!    Idle ─────────► Speaking ◄──────────► Paused
//!     ▲                 │    resume()        │
//!     └─────────────────┴────────────────────┘
//!       stop() / Ended / Errored (silent)
//! ```
//!
//! At most one utterance is in flight. A new `play()` cancels any
//! active speech first and allocates a fresh utterance id; callbacks
//! carrying a superseded id are discarded, so a cancelled utterance's
//! late end/error can never move the state owned by its successor.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::appearance::Appearance;
use crate::directory::VoiceDirectory;
use crate::error::SpeechError;
use crate::host::{HostEvent, SpeechHost, UtteranceId, UtteranceRequest, VoiceDescriptor};
use crate::prefs::Preferences;

// ── Playback state machine ─────────────────────────────────────────

/// Current state of the speech session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing playing.
    Idle,

    /// An utterance has been submitted and not yet ended.
    Speaking,

    /// Playback suspended; resumable. Reachable only from Speaking.
    Paused,
}

impl PlaybackState {
    /// Wire label for this state.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Speaking => "speaking",
            Self::Paused => "paused",
        }
    }
}

// ── Events emitted by the session ──────────────────────────────────

/// Events emitted by the session to the UI / adapter layer.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Playback state changed.
    StateChanged(PlaybackState),

    /// The voice directory was replaced with a new host-delivered list.
    VoicesChanged(Vec<VoiceDescriptor>),

    /// The selected voice changed (user choice or first-entry default).
    VoiceSelected(String),

    /// The appearance flag changed.
    AppearanceChanged(bool),
}

// ── Session ────────────────────────────────────────────────────────

/// The speech session: playback state machine, voice directory,
/// preferences, and appearance flag, bound to one [`SpeechHost`].
///
/// Emits [`SessionEvent`]s via a channel for the adapter layer to
/// consume. All methods run to completion on the caller's task; none
/// blocks on the speech engine.
pub struct SpeechSession {
    /// Current playback state.
    state: PlaybackState,

    /// The host speech capability.
    host: Arc<dyn SpeechHost>,

    /// Cached voice list and selection.
    directory: VoiceDirectory,

    /// Text buffer, rate, pitch.
    prefs: Preferences,

    /// Dark/light presentation flag.
    appearance: Appearance,

    /// Id of the in-flight utterance, if any.
    current: Option<UtteranceId>,

    /// Next utterance id to allocate.
    next_id: u64,

    /// Event sender channel.
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SpeechSession {
    /// Create a new session bound to `host`.
    ///
    /// Returns the session and a receiver for [`SessionEvent`]s.
    #[must_use]
    pub fn new(host: Arc<dyn SpeechHost>) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let session = Self {
            state: PlaybackState::Idle,
            host,
            directory: VoiceDirectory::new(),
            prefs: Preferences::default(),
            appearance: Appearance::new(),
            current: None,
            next_id: 0,
            event_tx,
        };

        (session, event_rx)
    }

    /// Current playback state.
    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// The voice directory.
    #[must_use]
    pub const fn directory(&self) -> &VoiceDirectory {
        &self.directory
    }

    /// Current preferences.
    #[must_use]
    pub const fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    /// Whether dark presentation is active.
    #[must_use]
    pub const fn dark_mode(&self) -> bool {
        self.appearance.dark()
    }

    // ── Playback commands ──────────────────────────────────────────

    /// Submit the current text/voice/rate/pitch as a fresh utterance.
    ///
    /// Any active speech is cancelled first (last-write-wins, no
    /// queueing), then the new request is handed to the host and the
    /// state is set to Speaking optimistically — the host's `Started`
    /// callback merely confirms it. Empty text is submitted as-is; the
    /// host decides what an empty utterance means.
    pub fn play(&mut self) -> Result<(), SpeechError> {
        if self.host.is_speaking() {
            self.host.cancel();
        }

        let id = self.allocate_id();
        let request = UtteranceRequest {
            id,
            text: self.prefs.text.clone(),
            voice: self.directory.selected_descriptor().cloned(),
            rate: self.prefs.rate(),
            pitch: self.prefs.pitch(),
        };

        tracing::debug!(%id, rate = request.rate, pitch = request.pitch, "Submitting utterance");
        self.host.speak(&request)?;

        self.current = Some(id);
        self.set_state(PlaybackState::Speaking);
        Ok(())
    }

    /// Pause the active utterance. Meaningful only from Speaking; from
    /// any other state this changes no state and issues no host
    /// command.
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Speaking {
            tracing::debug!(state = ?self.state, "pause ignored");
            return;
        }
        self.host.pause();
        self.set_state(PlaybackState::Paused);
    }

    /// Resume the paused utterance. Meaningful only from Paused; same
    /// no-op guarantee otherwise.
    pub fn resume(&mut self) {
        if self.state != PlaybackState::Paused {
            tracing::debug!(state = ?self.state, "resume ignored");
            return;
        }
        self.host.resume();
        self.set_state(PlaybackState::Speaking);
    }

    /// Cancel playback and return to Idle. No-op when already Idle.
    ///
    /// Cancellation is best-effort: the state is set optimistically
    /// without waiting for host acknowledgement.
    pub fn stop(&mut self) {
        if self.state == PlaybackState::Idle {
            return;
        }
        self.host.cancel();
        self.current = None;
        self.set_state(PlaybackState::Idle);
    }

    // ── Preference commands ────────────────────────────────────────

    /// Replace the text buffer. Does not affect an in-flight utterance.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.prefs.text = text.into();
    }

    /// Set the speech rate (clamped to [0.1, 2.0]).
    pub fn set_rate(&mut self, rate: f32) {
        self.prefs.set_rate(rate);
    }

    /// Set the speech pitch (clamped to [0.1, 2.0]).
    pub fn set_pitch(&mut self, pitch: f32) {
        self.prefs.set_pitch(pitch);
    }

    /// Select a voice by name. Unknown names are accepted and degrade
    /// to the host default voice on the next submission.
    pub fn select_voice(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.directory.select(name.clone());
        self.emit(SessionEvent::VoiceSelected(name));
    }

    // ── Appearance commands ────────────────────────────────────────

    /// Seed the appearance flag from the environment signal (consumed
    /// at most once). Returns the resulting flag.
    pub fn init_appearance(&mut self, prefers_dark: bool) -> bool {
        let before = self.appearance.dark();
        let dark = self.appearance.init(prefers_dark);
        if dark != before {
            self.emit(SessionEvent::AppearanceChanged(dark));
        }
        dark
    }

    /// Flip the appearance flag unconditionally. Returns the new value.
    pub fn toggle_appearance(&mut self) -> bool {
        let dark = self.appearance.toggle();
        self.emit(SessionEvent::AppearanceChanged(dark));
        dark
    }

    // ── Host callbacks ─────────────────────────────────────────────

    /// Process one inbound host notification.
    ///
    /// Callbacks for a superseded utterance id are discarded: once a
    /// newer `play()` has taken over, nothing the old utterance does
    /// can move the state.
    pub fn handle_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Started(id) => {
                if self.current == Some(id) {
                    // Confirms the state set proactively by play(), or
                    // reconciles it if the host started asynchronously
                    // later than expected.
                    self.set_state(PlaybackState::Speaking);
                } else {
                    tracing::debug!(%id, "start callback for superseded utterance");
                }
            }
            HostEvent::Ended(id) => self.finish(id, "ended"),
            // A synthesis error is a silent stop: same transition as a
            // natural end, no retry, nothing surfaced to the user.
            HostEvent::Errored(id) => self.finish(id, "errored"),
            HostEvent::VoicesChanged => self.refresh_voices(),
        }
    }

    fn finish(&mut self, id: UtteranceId, outcome: &str) {
        if self.current == Some(id) {
            tracing::debug!(%id, outcome, "utterance finished");
            self.current = None;
            self.set_state(PlaybackState::Idle);
        } else {
            tracing::debug!(%id, outcome, "callback for superseded utterance");
        }
    }

    /// Re-query the host voice list and replace the directory.
    fn refresh_voices(&mut self) {
        let voices = self.host.voices();
        tracing::debug!(count = voices.len(), "voice list replaced");
        let auto_selected = self.directory.refresh(voices);

        self.emit(SessionEvent::VoicesChanged(
            self.directory.voices().to_vec(),
        ));
        if let Some(name) = auto_selected {
            self.emit(SessionEvent::VoiceSelected(name));
        }
    }

    // ── Internal helpers ───────────────────────────────────────────

    fn allocate_id(&mut self) -> UtteranceId {
        let id = UtteranceId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Transition to a new state and emit a state-change event.
    fn set_state(&mut self, new_state: PlaybackState) {
        if self.state != new_state {
            tracing::debug!(old = ?self.state, new = ?new_state, "playback state transition");
            self.state = new_state;
            self.emit(SessionEvent::StateChanged(new_state));
        }
    }

    /// Emit a session event (best-effort — if the receiver is dropped,
    /// we log and move on).
    fn emit(&self, event: SessionEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::warn!("session event receiver dropped");
        }
    }
}

impl Drop for SpeechSession {
    fn drop(&mut self) {
        // Scoped acquisition discipline: audio must not outlive the UI.
        if self.state != PlaybackState::Idle {
            self.host.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Host that only counts cancels; never reports active speech.
    #[derive(Default)]
    struct InertHost {
        cancels: AtomicUsize,
    }

    impl SpeechHost for InertHost {
        fn voices(&self) -> Vec<VoiceDescriptor> {
            Vec::new()
        }

        fn speak(&self, _utterance: &UtteranceRequest) -> Result<(), SpeechError> {
            Ok(())
        }

        fn pause(&self) {}
        fn resume(&self) {}

        fn cancel(&self) {
            self.cancels.fetch_add(1, Ordering::SeqCst);
        }

        fn is_speaking(&self) -> bool {
            false
        }
    }

    #[test]
    fn session_creates_in_idle_state() {
        let (session, _rx) = SpeechSession::new(Arc::new(InertHost::default()));
        assert_eq!(session.state(), PlaybackState::Idle);
        assert!(!session.dark_mode());
    }

    #[test]
    fn stop_from_idle_is_a_noop() {
        let host = Arc::new(InertHost::default());
        let (mut session, _rx) = SpeechSession::new(Arc::clone(&host) as Arc<dyn SpeechHost>);
        session.stop();
        assert_eq!(session.state(), PlaybackState::Idle);
        assert_eq!(host.cancels.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn drop_while_speaking_cancels() {
        let host = Arc::new(InertHost::default());
        {
            let (mut session, _rx) = SpeechSession::new(Arc::clone(&host) as Arc<dyn SpeechHost>);
            session.play().unwrap();
        }
        assert_eq!(host.cancels.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn state_labels_are_stable() {
        assert_eq!(PlaybackState::Idle.label(), "idle");
        assert_eq!(PlaybackState::Speaking.label(), "speaking");
        assert_eq!(PlaybackState::Paused.label(), "paused");
    }
}
