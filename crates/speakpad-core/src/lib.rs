#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod events;
pub mod ports;

// Re-export commonly used types for convenience
pub use events::AppEvent;
pub use ports::{
    AppEventEmitter, NoopEmitter, SessionPortError, SessionStatusDto, SpeechSessionPort,
    UtteranceDto, VoiceDto,
};
