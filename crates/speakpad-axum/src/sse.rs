//! SSE event broadcaster for real-time event streaming.
//!
//! This module provides an SSE broadcaster that implements the core
//! event emitter port, so the speech session can emit events that are
//! streamed to connected web clients. Host commands travel on the same
//! channel; the browser shim filters for them.

use std::convert::Infallible;
use std::sync::Arc;

use axum::response::sse::{Event, Sse};
use futures_util::stream::Stream;
use speakpad_core::events::AppEvent;
use speakpad_core::ports::AppEventEmitter;
use tokio::sync::broadcast;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

/// SSE broadcaster that implements the event emitter port.
///
/// Events are sent via a broadcast channel and streamed to connected clients.
/// Multiple clients can receive the same events simultaneously.
#[derive(Debug, Clone)]
pub struct SseBroadcaster {
    sender: broadcast::Sender<AppEvent>,
}

impl SseBroadcaster {
    /// Create a new SSE broadcaster with the specified channel capacity.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of events that can be buffered.
    ///   Slow clients may miss events if the buffer overflows.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a new SSE broadcaster with default capacity (256 events).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(256)
    }

    /// Create an SSE stream for a new client connection.
    ///
    /// Returns an Axum SSE response that streams events to the client.
    /// Takes `Arc<Self>` to ensure proper ownership for the stream.
    /// Includes a keep-alive ping every 30 seconds to prevent proxy timeouts.
    pub fn subscribe(
        self: Arc<Self>,
    ) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
        let receiver = self.sender.subscribe();
        let stream = BroadcastStream::new(receiver).filter_map(|result| {
            match result {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => Some(Ok(Event::default().data(json))),
                    Err(e) => {
                        tracing::warn!("Failed to serialize event: {}", e);
                        None
                    }
                },
                Err(e) => {
                    // Log lagged or closed errors and continue
                    tracing::debug!("SSE stream error: {}", e);
                    None
                }
            }
        });

        Sse::new(stream).keep_alive(
            axum::response::sse::KeepAlive::new()
                .interval(std::time::Duration::from_secs(30))
                .text("ping"),
        )
    }

    /// Subscribe to the raw event channel, bypassing SSE framing.
    #[must_use]
    pub fn subscribe_raw(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl AppEventEmitter for SseBroadcaster {
    fn emit(&self, event: AppEvent) {
        // Ignore send errors (no subscribers is fine)
        let _ = self.sender.send(event);
    }

    fn clone_box(&self) -> Box<dyn AppEventEmitter> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcaster_creation() {
        let broadcaster = SseBroadcaster::with_defaults();
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[test]
    fn emit_without_subscribers_does_not_panic() {
        let broadcaster = SseBroadcaster::with_defaults();
        AppEventEmitter::emit(&broadcaster, AppEvent::state_changed("idle"));
    }

    #[tokio::test]
    async fn subscriber_receives_events() {
        let broadcaster = SseBroadcaster::with_defaults();
        let mut receiver = broadcaster.subscribe_raw();

        AppEventEmitter::emit(&broadcaster, AppEvent::voice_selected("A"));

        let event = receiver.recv().await.unwrap();
        match event {
            AppEvent::VoiceSelected { name } => assert_eq!(name, "A"),
            other => panic!("Unexpected event type: {other:?}"),
        }
    }
}
