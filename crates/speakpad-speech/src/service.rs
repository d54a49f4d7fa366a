//! `SpeechService` — the adapter that implements `SpeechSessionPort`.
//!
//! This module is the single place where `speakpad-speech` native types
//! are converted to the transport-agnostic DTOs defined in
//! `speakpad-core`. Nothing outside this file should need to map
//! `VoiceDescriptor` or `UtteranceRequest` to their wire shapes by
//! hand.
//!
//! # Locking discipline
//!
//! All mutations use `session.write().await`; read-only queries use
//! `session.read().await`. No lock is ever held across an `.await`
//! point inside this module — every session method is synchronous and
//! runs to completion, so each port call locks, applies, and releases.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, mpsc};

use speakpad_core::events::AppEvent;
use speakpad_core::ports::{
    AppEventEmitter, SessionPortError, SessionStatusDto, SpeechSessionPort, UtteranceDto, VoiceDto,
};

use crate::host::{HostEvent, SpeechHost, UtteranceRequest, VoiceDescriptor};
use crate::session::{SessionEvent, SpeechSession};

// ── DTO conversions ──────────────────────────────────────────────────────────

/// Convert a host voice descriptor to its wire shape.
#[must_use]
pub fn voice_dto(voice: &VoiceDescriptor) -> VoiceDto {
    VoiceDto {
        name: voice.name.clone(),
        language: voice.language.clone(),
    }
}

/// Convert an utterance request to its wire shape. The optional voice
/// collapses to its name; the engine matches by name or falls back to
/// its default.
#[must_use]
pub fn utterance_dto(request: &UtteranceRequest) -> UtteranceDto {
    UtteranceDto {
        id: request.id.0,
        text: request.text.clone(),
        voice: request.voice.as_ref().map(|v| v.name.clone()),
        rate: request.rate,
        pitch: request.pitch,
    }
}

// ── Service struct ───────────────────────────────────────────────────────────

/// Implements [`SpeechSessionPort`] by wrapping the shared session.
///
/// Construction wires the two event flows: session events are bridged
/// to the supplied emitter, and inbound host events are pumped into the
/// state machine in arrival order.
pub struct SpeechService {
    session: Arc<RwLock<SpeechSession>>,
}

impl SpeechService {
    /// Create a service over a fresh session bound to `host`.
    ///
    /// `host_events` is the inbound notification channel the host
    /// implementation writes to; its events are applied to the session
    /// one at a time, run-to-completion.
    #[must_use]
    pub fn new(
        host: Arc<dyn SpeechHost>,
        host_events: mpsc::UnboundedReceiver<HostEvent>,
        emitter: Arc<dyn AppEventEmitter>,
    ) -> Self {
        let (session, session_rx) = SpeechSession::new(host);
        let session = Arc::new(RwLock::new(session));

        spawn_event_bridge(session_rx, emitter);
        spawn_host_pump(host_events, Arc::clone(&session));

        Self { session }
    }

    /// Shared handle to the session, for tests and embedding.
    #[must_use]
    pub fn session(&self) -> Arc<RwLock<SpeechSession>> {
        Arc::clone(&self.session)
    }
}

// ── Event bridge ─────────────────────────────────────────────────────────────

/// Bridge `SessionEvent` → `AppEvent`, forwarding each event to
/// `emitter`.
///
/// The spawned task self-terminates when the session's sender is
/// dropped: `recv()` returns `None` and the loop exits.
pub fn spawn_event_bridge(
    mut event_rx: mpsc::UnboundedReceiver<SessionEvent>,
    emitter: Arc<dyn AppEventEmitter>,
) {
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            let app_event = match event {
                SessionEvent::StateChanged(state) => AppEvent::state_changed(state.label()),
                SessionEvent::VoicesChanged(voices) => AppEvent::VoicesChanged {
                    voices: voices.iter().map(voice_dto).collect(),
                },
                SessionEvent::VoiceSelected(name) => AppEvent::voice_selected(name),
                SessionEvent::AppearanceChanged(dark_mode) => {
                    AppEvent::AppearanceChanged { dark_mode }
                }
            };
            emitter.emit(app_event);
        }
        // event_rx returned None: session dropped — task exits.
    });
}

/// Pump inbound host events into the session, one at a time.
///
/// Callbacks and "voices changed" notifications are applied in the
/// order the host generated them; no additional ordering or buffering
/// is imposed. The task exits when the host's sender side is dropped.
fn spawn_host_pump(
    mut host_rx: mpsc::UnboundedReceiver<HostEvent>,
    session: Arc<RwLock<SpeechSession>>,
) {
    tokio::spawn(async move {
        while let Some(event) = host_rx.recv().await {
            session.write().await.handle_host_event(event);
        }
        tracing::debug!("host event channel closed");
    });
}

// ── SpeechSessionPort implementation ─────────────────────────────────────────

#[async_trait]
impl SpeechSessionPort for SpeechService {
    async fn status(&self) -> Result<SessionStatusDto, SessionPortError> {
        let session = self.session.read().await;
        let voice_count =
            u32::try_from(session.directory().voices().len()).unwrap_or(u32::MAX);
        Ok(SessionStatusDto {
            state: session.state().label().to_owned(),
            text: session.prefs().text.clone(),
            rate: session.prefs().rate(),
            pitch: session.prefs().pitch(),
            selected_voice: session.directory().selected().map(str::to_owned),
            voice_count,
            dark_mode: session.dark_mode(),
        })
    }

    async fn play(&self) -> Result<(), SessionPortError> {
        self.session
            .write()
            .await
            .play()
            .map_err(|e| SessionPortError::Host(e.to_string()))
    }

    async fn pause(&self) -> Result<(), SessionPortError> {
        self.session.write().await.pause();
        Ok(())
    }

    async fn resume(&self) -> Result<(), SessionPortError> {
        self.session.write().await.resume();
        Ok(())
    }

    async fn stop(&self) -> Result<(), SessionPortError> {
        self.session.write().await.stop();
        Ok(())
    }

    async fn set_text(&self, text: &str) -> Result<(), SessionPortError> {
        self.session.write().await.set_text(text);
        Ok(())
    }

    async fn set_rate(&self, rate: f32) -> Result<(), SessionPortError> {
        self.session.write().await.set_rate(rate);
        Ok(())
    }

    async fn set_pitch(&self, pitch: f32) -> Result<(), SessionPortError> {
        self.session.write().await.set_pitch(pitch);
        Ok(())
    }

    async fn select_voice(&self, name: &str) -> Result<(), SessionPortError> {
        self.session.write().await.select_voice(name);
        Ok(())
    }

    async fn list_voices(&self) -> Result<Vec<VoiceDto>, SessionPortError> {
        let session = self.session.read().await;
        Ok(session.directory().voices().iter().map(voice_dto).collect())
    }

    async fn init_appearance(&self, prefers_dark: bool) -> Result<bool, SessionPortError> {
        Ok(self.session.write().await.init_appearance(prefers_dark))
    }

    async fn toggle_appearance(&self) -> Result<bool, SessionPortError> {
        Ok(self.session.write().await.toggle_appearance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpeechError;
    use crate::host::UtteranceId;
    use speakpad_core::ports::NoopEmitter;

    /// Host with a fixed voice list and no behaviour.
    struct FixedHost {
        voices: Vec<VoiceDescriptor>,
    }

    impl SpeechHost for FixedHost {
        fn voices(&self) -> Vec<VoiceDescriptor> {
            self.voices.clone()
        }

        fn speak(&self, _utterance: &UtteranceRequest) -> Result<(), SpeechError> {
            Ok(())
        }

        fn pause(&self) {}
        fn resume(&self) {}
        fn cancel(&self) {}

        fn is_speaking(&self) -> bool {
            false
        }
    }

    fn service_with_voices(
        voices: Vec<VoiceDescriptor>,
    ) -> (SpeechService, mpsc::UnboundedSender<HostEvent>) {
        let (host_tx, host_rx) = mpsc::unbounded_channel();
        let service = SpeechService::new(
            Arc::new(FixedHost { voices }),
            host_rx,
            Arc::new(NoopEmitter::new()),
        );
        (service, host_tx)
    }

    #[tokio::test]
    async fn status_reflects_a_fresh_session() {
        let (service, _tx) = service_with_voices(vec![]);
        let status = service.status().await.unwrap();
        assert_eq!(status.state, "idle");
        assert!((status.rate - 1.0).abs() < f32::EPSILON);
        assert!(status.selected_voice.is_none());
        assert_eq!(status.voice_count, 0);
        assert!(!status.dark_mode);
    }

    #[tokio::test]
    async fn voices_changed_notification_populates_directory() {
        let (service, tx) = service_with_voices(vec![VoiceDescriptor {
            name: "A".to_owned(),
            language: "en-US".to_owned(),
        }]);

        tx.send(HostEvent::VoicesChanged).unwrap();
        // Let the pump task run.
        tokio::task::yield_now().await;

        let voices = service.list_voices().await.unwrap();
        assert_eq!(voices.len(), 1);
        let status = service.status().await.unwrap();
        assert_eq!(status.selected_voice.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn appearance_round_trip_through_the_port() {
        let (service, _tx) = service_with_voices(vec![]);
        assert!(service.init_appearance(true).await.unwrap());
        assert!(!service.toggle_appearance().await.unwrap());
        // Re-init does not clobber the toggle.
        assert!(!service.init_appearance(true).await.unwrap());
    }

    #[tokio::test]
    async fn stale_host_callback_is_ignored() {
        let (service, tx) = service_with_voices(vec![]);
        service.play().await.unwrap();

        // An ended callback for an id that was never allocated.
        tx.send(HostEvent::Ended(UtteranceId(99))).unwrap();
        tokio::task::yield_now().await;

        let status = service.status().await.unwrap();
        assert_eq!(status.state, "speaking");
    }

    #[test]
    fn utterance_dto_collapses_voice_to_name() {
        let request = UtteranceRequest {
            id: UtteranceId(1),
            text: "hi".to_owned(),
            voice: Some(VoiceDescriptor {
                name: "A".to_owned(),
                language: "en-US".to_owned(),
            }),
            rate: 1.0,
            pitch: 1.0,
        };
        let dto = utterance_dto(&request);
        assert_eq!(dto.voice.as_deref(), Some("A"));
        assert_eq!(dto.id, 1);
    }
}
