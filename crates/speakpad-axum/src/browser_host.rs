//! Browser-backed speech host.
//!
//! The real speech engine is the browser's `speechSynthesis`, reached
//! over two HTTP surfaces: host commands go out as [`AppEvent`]s on the
//! SSE stream, and the browser shim reports effects back via
//! `POST /api/host/*`. This type bridges both directions onto the
//! [`SpeechHost`] trait the session expects.
//!
//! Commands are therefore fire-and-forget by construction: `speak`
//! succeeds as soon as the command is broadcast, whether or not any
//! client is connected to execute it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use speakpad_core::events::AppEvent;
use speakpad_core::ports::{AppEventEmitter, VoiceDto};
use speakpad_speech::service::utterance_dto;
use speakpad_speech::{
    HostEvent, SpeechError, SpeechHost, UtteranceId, UtteranceRequest, VoiceDescriptor,
};

/// [`SpeechHost`] implementation backed by a browser client.
///
/// Holds the last voice list the browser reported and the id of the
/// utterance it believes is active. The speaking flag is an
/// approximation maintained server-side: set on `speak`, cleared on
/// `cancel` and on a matching ended/errored report. That is exactly
/// the granularity the session needs for its cancel-before-replay
/// check.
pub struct BrowserHost {
    emitter: Arc<dyn AppEventEmitter>,
    voices: Mutex<Vec<VoiceDescriptor>>,
    active: Mutex<Option<UtteranceId>>,
    host_tx: mpsc::UnboundedSender<HostEvent>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl BrowserHost {
    /// Create a host that broadcasts commands via `emitter`.
    ///
    /// Returns the host and the receiver end of its inbound host-event
    /// channel, to be handed to the session's event pump.
    #[must_use]
    pub fn new(
        emitter: Arc<dyn AppEventEmitter>,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<HostEvent>) {
        let (host_tx, host_rx) = mpsc::unbounded_channel();
        let host = Arc::new(Self {
            emitter,
            voices: Mutex::new(Vec::new()),
            active: Mutex::new(None),
            host_tx,
        });
        (host, host_rx)
    }

    // ── Inbound reports from the browser shim ──────────────────────

    /// The browser reported its (possibly changed) voice list.
    pub fn report_voices(&self, voices: Vec<VoiceDto>) {
        let descriptors: Vec<VoiceDescriptor> = voices
            .into_iter()
            .map(|v| VoiceDescriptor {
                name: v.name,
                language: v.language,
            })
            .collect();
        tracing::debug!(count = descriptors.len(), "browser reported voices");
        *lock(&self.voices) = descriptors;
        self.forward(HostEvent::VoicesChanged);
    }

    /// The engine began speaking the identified utterance.
    pub fn report_started(&self, id: u64) {
        self.forward(HostEvent::Started(UtteranceId(id)));
    }

    /// The identified utterance finished naturally.
    pub fn report_ended(&self, id: u64) {
        self.clear_active_if(UtteranceId(id));
        self.forward(HostEvent::Ended(UtteranceId(id)));
    }

    /// Synthesis of the identified utterance failed.
    pub fn report_errored(&self, id: u64) {
        self.clear_active_if(UtteranceId(id));
        self.forward(HostEvent::Errored(UtteranceId(id)));
    }

    fn clear_active_if(&self, id: UtteranceId) {
        let mut active = lock(&self.active);
        if *active == Some(id) {
            *active = None;
        }
    }

    /// Forward one host event to the session pump. A closed channel
    /// means the session is gone; nothing left to notify.
    fn forward(&self, event: HostEvent) {
        if self.host_tx.send(event).is_err() {
            tracing::warn!("host event channel closed, dropping event");
        }
    }
}

impl SpeechHost for BrowserHost {
    fn voices(&self) -> Vec<VoiceDescriptor> {
        lock(&self.voices).clone()
    }

    fn speak(&self, utterance: &UtteranceRequest) -> Result<(), SpeechError> {
        *lock(&self.active) = Some(utterance.id);
        self.emitter.emit(AppEvent::SpeakRequested {
            utterance: utterance_dto(utterance),
        });
        Ok(())
    }

    fn pause(&self) {
        self.emitter.emit(AppEvent::PauseRequested);
    }

    fn resume(&self) {
        self.emitter.emit(AppEvent::ResumeRequested);
    }

    fn cancel(&self) {
        *lock(&self.active) = None;
        self.emitter.emit(AppEvent::CancelRequested);
    }

    fn is_speaking(&self) -> bool {
        lock(&self.active).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speakpad_core::ports::NoopEmitter;

    fn host() -> (Arc<BrowserHost>, mpsc::UnboundedReceiver<HostEvent>) {
        BrowserHost::new(Arc::new(NoopEmitter::new()))
    }

    fn request(id: u64) -> UtteranceRequest {
        UtteranceRequest {
            id: UtteranceId(id),
            text: "hi".to_owned(),
            voice: None,
            rate: 1.0,
            pitch: 1.0,
        }
    }

    #[test]
    fn speak_marks_host_speaking_until_matching_end() {
        let (host, mut rx) = host();
        host.speak(&request(1)).unwrap();
        assert!(host.is_speaking());

        // A stale report does not clear the flag.
        host.report_ended(0);
        assert!(host.is_speaking());

        host.report_ended(1);
        assert!(!host.is_speaking());

        // Both reports were forwarded regardless.
        assert_eq!(rx.try_recv().unwrap(), HostEvent::Ended(UtteranceId(0)));
        assert_eq!(rx.try_recv().unwrap(), HostEvent::Ended(UtteranceId(1)));
    }

    #[test]
    fn cancel_clears_the_speaking_flag() {
        let (host, _rx) = host();
        host.speak(&request(1)).unwrap();
        host.cancel();
        assert!(!host.is_speaking());
    }

    #[test]
    fn reported_voices_are_served_back() {
        let (host, mut rx) = host();
        host.report_voices(vec![VoiceDto {
            name: "A".to_owned(),
            language: "en-US".to_owned(),
        }]);

        let voices = host.voices();
        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].name, "A");
        assert_eq!(rx.try_recv().unwrap(), HostEvent::VoicesChanged);
    }
}
