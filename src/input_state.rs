//! Composer state: message input, attachment fields, history navigation.
//!
//! This module separates input handling concerns from the main application
//! state so the composer can be exercised without a live UI.

/// Cap on persisted input history entries.
const MAX_HISTORY: usize = 100;

/// Which media attachment form is open, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaAttachment {
    Image,
    Video,
}

/// Manages all input-related state for the composer.
#[derive(Default)]
pub struct ComposerState {
    /// Current message being composed
    pub message_input: String,

    /// Whether the attachment menu is open
    pub show_attachment_menu: bool,

    /// Whether the audio recorder mock overlay is open
    pub show_audio_recorder: bool,

    /// Open media attachment form (path + caption), if any
    pub pending_media: Option<MediaAttachment>,

    /// Path of the media file to attach
    pub media_path: String,

    /// Caption for the media file
    pub media_caption: String,

    /// Sent-message history (for up/down arrow navigation)
    pub history: Vec<String>,

    /// Current position in history (None = not navigating)
    pub history_pos: Option<usize>,

    /// Saved input when entering history mode
    pub history_saved_input: Option<String>,
}

impl ComposerState {
    /// Create a new ComposerState with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sent message in the history, skipping consecutive
    /// duplicates and capping the list.
    pub fn push_history(&mut self, entry: String) {
        if self.history.last() != Some(&entry) {
            self.history.push(entry);
            if self.history.len() > MAX_HISTORY {
                self.history.remove(0);
            }
        }
        self.history_pos = None;
        self.history_saved_input = None;
    }

    /// Navigate up in message history.
    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }

        if self.history_pos.is_none() {
            // Store current text to restore if user navigates back
            self.history_saved_input = Some(self.message_input.clone());
            self.history_pos = Some(self.history.len() - 1);
        } else if let Some(pos) = self.history_pos {
            if pos > 0 {
                self.history_pos = Some(pos - 1);
            }
        }

        if let Some(pos) = self.history_pos {
            if let Some(h) = self.history.get(pos) {
                self.message_input = h.clone();
            }
        }
    }

    /// Navigate down in message history.
    pub fn history_down(&mut self) {
        if let Some(pos) = self.history_pos {
            if pos + 1 < self.history.len() {
                self.history_pos = Some(pos + 1);
                if let Some(h) = self.history.get(pos + 1) {
                    self.message_input = h.clone();
                }
            } else {
                // Exit history navigation
                self.history_pos = None;
                self.message_input = self.history_saved_input.take().unwrap_or_default();
            }
        }
    }

    /// Close every attachment surface (menu, media form, recorder).
    pub fn close_attachments(&mut self) {
        self.show_attachment_menu = false;
        self.show_audio_recorder = false;
        self.pending_media = None;
        self.media_path.clear();
        self.media_caption.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composer_state_new() {
        let input = ComposerState::new();
        assert!(input.message_input.is_empty());
        assert!(input.history.is_empty());
        assert!(input.history_pos.is_none());
        assert!(input.pending_media.is_none());
    }

    #[test]
    fn test_history_navigation() {
        let mut input = ComposerState::new();
        input.history = vec!["first".into(), "second".into(), "third".into()];
        input.message_input = "current".into();

        // Navigate up
        input.history_up();
        assert_eq!(input.message_input, "third");
        assert_eq!(input.history_saved_input, Some("current".into()));

        input.history_up();
        assert_eq!(input.message_input, "second");

        input.history_up();
        assert_eq!(input.message_input, "first");

        // Navigate down
        input.history_down();
        assert_eq!(input.message_input, "second");

        input.history_down();
        assert_eq!(input.message_input, "third");

        // Exit history mode
        input.history_down();
        assert_eq!(input.message_input, "current");
        assert!(input.history_pos.is_none());
    }

    #[test]
    fn test_push_history_dedup_and_cap() {
        let mut input = ComposerState::new();
        input.push_history("same".into());
        input.push_history("same".into());
        assert_eq!(input.history.len(), 1);

        for i in 0..(MAX_HISTORY + 10) {
            input.push_history(format!("msg{}", i));
        }
        assert_eq!(input.history.len(), MAX_HISTORY);
    }

    #[test]
    fn test_close_attachments_resets_fields() {
        let mut input = ComposerState::new();
        input.show_attachment_menu = true;
        input.pending_media = Some(MediaAttachment::Image);
        input.media_path = "/tmp/a.png".into();
        input.media_caption = "cap".into();

        input.close_attachments();

        assert!(!input.show_attachment_menu);
        assert!(input.pending_media.is_none());
        assert!(input.media_path.is_empty());
        assert!(input.media_caption.is_empty());
    }
}
