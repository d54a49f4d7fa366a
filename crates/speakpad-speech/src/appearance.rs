//! Appearance flag: dark/light presentation.
//!
//! Seeded once from the environment signal (the host's reported
//! preference for a dark color scheme), thereafter controlled only by
//! explicit toggles. Has no interaction with any other component.

/// The binary appearance preference.
#[derive(Debug, Clone, Copy, Default)]
pub struct Appearance {
    dark: bool,
    seeded: bool,
}

impl Appearance {
    /// Create an appearance flag in the light state, not yet seeded.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dark: false,
            seeded: false,
        }
    }

    /// Whether dark presentation is active.
    #[must_use]
    pub const fn dark(&self) -> bool {
        self.dark
    }

    /// Consume the environment signal. Only the first call applies;
    /// later calls (a reloading client re-reporting its preference)
    /// leave the flag alone so an explicit toggle is never clobbered.
    ///
    /// Returns the resulting flag either way.
    pub const fn init(&mut self, prefers_dark: bool) -> bool {
        if !self.seeded {
            self.seeded = true;
            self.dark = prefers_dark;
        }
        self.dark
    }

    /// Flip the flag unconditionally, independent of the environment
    /// signal. Returns the new value.
    pub const fn toggle(&mut self) -> bool {
        self.dark = !self.dark;
        self.dark
    }
}
