//! Voice directory — the cached host voice list plus the selection.
//!
//! The host may deliver voice data asynchronously after an initial
//! empty or partial result, so the list is replaced wholesale on every
//! "voices changed" notification and the first query is never assumed
//! complete.

use crate::host::VoiceDescriptor;

/// Cached voice list and selected-voice name.
///
/// Selection policy: if nothing is selected and a refresh delivers a
/// non-empty list, the first entry is selected (stable given a fixed
/// host ordering). Selecting a name not present in the current list is
/// not an error — playback falls back to the host default voice.
#[derive(Debug, Default)]
pub struct VoiceDirectory {
    voices: Vec<VoiceDescriptor>,
    selected: Option<String>,
}

impl VoiceDirectory {
    /// Create an empty directory with no selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            voices: Vec::new(),
            selected: None,
        }
    }

    /// The current list, in host order. May be empty transiently.
    #[must_use]
    pub fn voices(&self) -> &[VoiceDescriptor] {
        &self.voices
    }

    /// Name of the selected voice, if a selection has been made.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Descriptor of the selected voice, if the selection matches an
    /// entry in the current list.
    #[must_use]
    pub fn selected_descriptor(&self) -> Option<&VoiceDescriptor> {
        let name = self.selected.as_deref()?;
        self.voices.iter().find(|v| v.name == name)
    }

    /// Replace the cached list wholesale.
    ///
    /// Returns the name of the voice that was auto-selected by the
    /// default-selection policy, if any. An existing selection is kept
    /// as-is even when the refreshed list no longer contains it.
    pub fn refresh(&mut self, voices: Vec<VoiceDescriptor>) -> Option<String> {
        self.voices = voices;

        if self.selected.is_none() {
            if let Some(first) = self.voices.first() {
                let name = first.name.clone();
                self.selected = Some(name.clone());
                return Some(name);
            }
        }
        None
    }

    /// Select a voice by name. Unknown names are accepted; the next
    /// submission simply degrades to the host default voice.
    pub fn select(&mut self, name: impl Into<String>) {
        self.selected = Some(name.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(name: &str, language: &str) -> VoiceDescriptor {
        VoiceDescriptor {
            name: name.to_owned(),
            language: language.to_owned(),
        }
    }

    #[test]
    fn starts_empty_with_no_selection() {
        let dir = VoiceDirectory::new();
        assert!(dir.voices().is_empty());
        assert!(dir.selected().is_none());
    }

    #[test]
    fn first_nonempty_refresh_selects_first_entry() {
        let mut dir = VoiceDirectory::new();
        assert!(dir.refresh(vec![]).is_none());

        let picked = dir.refresh(vec![voice("A", "en-US"), voice("B", "en-GB")]);
        assert_eq!(picked.as_deref(), Some("A"));
        assert_eq!(dir.selected(), Some("A"));
    }

    #[test]
    fn refresh_keeps_existing_selection() {
        let mut dir = VoiceDirectory::new();
        dir.refresh(vec![voice("A", "en-US"), voice("B", "en-GB")]);
        dir.select("B");

        let picked = dir.refresh(vec![voice("C", "de-DE")]);
        assert!(picked.is_none());
        // Selection survives even though "B" is gone from the list.
        assert_eq!(dir.selected(), Some("B"));
        assert!(dir.selected_descriptor().is_none());
    }

    #[test]
    fn unknown_selection_is_not_an_error() {
        let mut dir = VoiceDirectory::new();
        dir.refresh(vec![voice("A", "en-US")]);
        dir.select("Nonexistent");
        assert_eq!(dir.selected(), Some("Nonexistent"));
        assert!(dir.selected_descriptor().is_none());
    }

    #[test]
    fn selected_descriptor_matches_by_name() {
        let mut dir = VoiceDirectory::new();
        dir.refresh(vec![voice("A", "en-US"), voice("B", "en-GB")]);
        dir.select("B");
        assert_eq!(dir.selected_descriptor(), Some(&voice("B", "en-GB")));
    }
}
