//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no implementation details and use only
//! wire-shape types.
//!
//! # Design Rules
//!
//! - No channel or transport types in any signature
//! - Traits are minimal and intent-based
//! - DTO conversion happens in the implementing crate, never here

pub mod event_emitter;
pub mod session;

pub use event_emitter::{AppEventEmitter, NoopEmitter};
pub use session::{
    SessionPortError, SessionStatusDto, SpeechSessionPort, UtteranceDto, VoiceDto,
};
