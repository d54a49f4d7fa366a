#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod appearance;
pub mod directory;
pub mod error;
pub mod host;
pub mod prefs;
pub mod service;
pub mod session;

// Re-export key types for convenience
pub use appearance::Appearance;
pub use directory::VoiceDirectory;
pub use error::SpeechError;
pub use host::{HostEvent, SpeechHost, UtteranceId, UtteranceRequest, VoiceDescriptor};
pub use prefs::Preferences;
pub use service::SpeechService;
pub use session::{PlaybackState, SessionEvent, SpeechSession};
