//! Core application state, separated from UI logic.
//!
//! `ClientState` holds all data that represents the conversation session:
//! the thread, the presence line, carousels, and the system log. UI
//! components receive state as a parameter rather than owning it.

use std::collections::HashMap;
use std::time::Instant;

use crate::buffer::ThreadBuffer;
use crate::pagination::Carousel;

/// Presence line shown under the conversation title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatStatus {
    #[default]
    Online,
    /// A message was sent and the backend has not replied yet.
    Thinking,
    /// A poll returned replies; the typing delay is running.
    Typing,
}

impl ChatStatus {
    pub fn label(self) -> &'static str {
        match self {
            ChatStatus::Online => "online",
            ChatStatus::Thinking => "thinking...",
            ChatStatus::Typing => "typing...",
        }
    }
}

/// Core application state for the chat simulator.
#[derive(Default)]
pub struct ClientState {
    /// The single conversation thread.
    pub thread: ThreadBuffer,

    /// Presence line under the conversation title.
    pub chat_status: ChatStatus,

    /// Live carousels keyed by id; referenced from carousel messages.
    pub carousels: HashMap<u64, Carousel>,

    next_carousel_id: u64,

    /// System log messages (transport diagnostics).
    pub system_log: Vec<String>,

    /// Status toast messages with creation time (auto-expire).
    pub status_messages: Vec<(String, Instant)>,
}

impl ClientState {
    /// Create a new ClientState with default values.
    pub fn new() -> Self {
        Self {
            system_log: vec!["Simulator ready.".into()],
            ..Self::default()
        }
    }

    /// Store a carousel and hand back its id for the owning message.
    pub fn register_carousel(&mut self, carousel: Carousel) -> u64 {
        self.next_carousel_id += 1;
        let id = self.next_carousel_id;
        self.carousels.insert(id, carousel);
        id
    }

    /// Show a transient status toast.
    pub fn push_status(&mut self, msg: impl Into<String>) {
        self.status_messages.push((msg.into(), Instant::now()));
    }

    /// Purge status messages older than the given duration.
    pub fn purge_old_status_messages(&mut self, max_age_secs: u64) {
        self.status_messages
            .retain(|(_, created)| created.elapsed().as_secs() < max_age_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_state_new() {
        let state = ClientState::new();
        assert_eq!(state.chat_status, ChatStatus::Online);
        assert!(state.thread.messages.is_empty());
        assert!(state.carousels.is_empty());
        assert_eq!(state.system_log.len(), 1);
    }

    #[test]
    fn test_register_carousel_assigns_distinct_ids() {
        let mut state = ClientState::new();
        let a = state.register_carousel(Carousel::new(Vec::new(), None));
        let b = state.register_carousel(Carousel::new(Vec::new(), None));
        assert_ne!(a, b);
        assert!(state.carousels.contains_key(&a));
        assert!(state.carousels.contains_key(&b));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ChatStatus::Online.label(), "online");
        assert_eq!(ChatStatus::Thinking.label(), "thinking...");
        assert_eq!(ChatStatus::Typing.label(), "typing...");
    }
}
