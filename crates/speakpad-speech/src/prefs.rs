//! User-adjustable synthesis preferences: text buffer, rate, pitch.

/// Lower bound for rate and pitch.
pub const PARAM_MIN: f32 = 0.1;

/// Upper bound for rate and pitch.
pub const PARAM_MAX: f32 = 2.0;

/// Text the buffer starts with on a fresh session.
pub const DEFAULT_TEXT: &str = "Hello! This is a text-to-speech application \
that works entirely in your browser. No APIs needed!";

/// Pure state holder for the preference panel.
///
/// Each field is independently mutable. Changing a value while speech
/// is active does not affect the in-flight utterance — only the next
/// submission reads these.
#[derive(Debug, Clone)]
pub struct Preferences {
    /// Text buffer, unconstrained length.
    pub text: String,
    rate: f32,
    pitch: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_owned(),
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

impl Preferences {
    /// Current speech rate.
    #[must_use]
    pub const fn rate(&self) -> f32 {
        self.rate
    }

    /// Current speech pitch.
    #[must_use]
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set the rate, clamped to [0.1, 2.0].
    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate.clamp(PARAM_MIN, PARAM_MAX);
    }

    /// Set the pitch, clamped to [0.1, 2.0].
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(PARAM_MIN, PARAM_MAX);
    }
}
