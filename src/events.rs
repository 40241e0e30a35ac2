//! Backend event processing (replies, delivery ticks, carousel pages).

use chrono::Local;
use crossbeam_channel::Receiver;

use crate::buffer::{ChatMessage, MessageKind};
use crate::linkify;
use crate::pagination::{self, Carousel};
use crate::protocol::GuiEvent;
use crate::state::{ChatStatus, ClientState};

/// Process all pending events from the backend.
pub fn process_events(event_rx: &Receiver<GuiEvent>, state: &mut ClientState) {
    // Drain all pending events from the backend
    while let Ok(event) = event_rx.try_recv() {
        process_single_event(state, event);
    }
}

/// Apply one backend event to the state.
pub fn process_single_event(state: &mut ClientState, event: GuiEvent) {
    match event {
        GuiEvent::Delivered => {
            state.thread.mark_last_sent_delivered();
        }

        GuiEvent::TypingStarted => {
            state.chat_status = ChatStatus::Typing;
        }

        GuiEvent::TypingStopped => {
            state.chat_status = ChatStatus::Online;
        }

        GuiEvent::ReplyReceived { body } => {
            let ts = Local::now().format("%H:%M").to_string();
            let kind = inbound_kind(state, &body);
            state.thread.push(ChatMessage::received(ts, kind));
            state.chat_status = ChatStatus::Online;
        }

        GuiEvent::PageLoaded { carousel_id, html } => {
            let fragment = pagination::parse_fragment(&html);
            if let Some(carousel) = state.carousels.get_mut(&carousel_id) {
                carousel.apply_fragment(fragment);
            }
        }

        GuiEvent::PageFailed {
            carousel_id,
            reason,
        } => {
            if let Some(carousel) = state.carousels.get_mut(&carousel_id) {
                carousel.fail();
            }
            let ts = Local::now().format("%H:%M:%S").to_string();
            state
                .system_log
                .push(format!("[{}] ⚠ Pagination failed: {}", ts, reason));
        }

        GuiEvent::Error(msg) => {
            let ts = Local::now().format("%H:%M:%S").to_string();
            state.system_log.push(format!("[{}] ⚠ Error: {}", ts, msg));
            state.push_status(format!("Error: {}", msg));
        }

        GuiEvent::RawMessage(msg) => {
            let ts = Local::now().format("%H:%M:%S").to_string();
            state.system_log.push(format!("[{}] {}", ts, msg));
            // Keep log from growing too large
            if state.system_log.len() > 500 {
                state.system_log.remove(0);
            }
        }
    }
}

/// Decide how an inbound body renders: a trusted fragment becomes a card
/// (or a carousel when it carries a loader), everything else is plain text
/// that will be linkified at render time.
fn inbound_kind(state: &mut ClientState, body: &str) -> MessageKind {
    if linkify::is_trusted_fragment(body) {
        let fragment = pagination::parse_fragment(body);
        if fragment.next.is_some() {
            let carousel = Carousel::new(fragment.items, fragment.next);
            let carousel_id = state.register_carousel(carousel);
            MessageKind::Carousel { carousel_id }
        } else {
            MessageKind::TrustedCard {
                html: body.to_string(),
            }
        }
    } else {
        MessageKind::Text {
            body: body.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Delivery, Direction};
    use crate::pagination::SentinelState;

    #[test]
    fn test_reply_appends_one_received_text() {
        let mut state = ClientState::new();
        process_single_event(
            &mut state,
            GuiEvent::ReplyReceived {
                body: "hello".into(),
            },
        );

        assert_eq!(state.thread.messages.len(), 1);
        let msg = &state.thread.messages[0];
        assert_eq!(msg.direction, Direction::Received);
        assert_eq!(
            msg.kind,
            MessageKind::Text {
                body: "hello".into()
            }
        );
    }

    #[test]
    fn test_trusted_fragment_reply_is_kept_verbatim() {
        let mut state = ClientState::new();
        let card = "<div class=\"rich-card\" data-exclude-linkify=\"true\">See http://x.test</div>";
        process_single_event(
            &mut state,
            GuiEvent::ReplyReceived { body: card.into() },
        );

        assert_eq!(
            state.thread.messages[0].kind,
            MessageKind::TrustedCard { html: card.into() }
        );
    }

    #[test]
    fn test_trusted_fragment_with_loader_becomes_carousel() {
        let mut state = ClientState::new();
        let body = "<div class=\"card\" data-exclude-linkify=\"true\">one</div>\
                    <div class=\"carousel-loader\" data-type=\"product\" data-query=\"q\" data-page=\"2\"></div>";
        process_single_event(
            &mut state,
            GuiEvent::ReplyReceived { body: body.into() },
        );

        let MessageKind::Carousel { carousel_id } = &state.thread.messages[0].kind else {
            panic!("expected a carousel message");
        };
        let carousel = &state.carousels[carousel_id];
        assert_eq!(carousel.items.len(), 1);
        assert!(matches!(carousel.sentinel, SentinelState::Armed(ref c) if c.page == 2));
    }

    #[test]
    fn test_delivered_marks_tick() {
        let mut state = ClientState::new();
        state.thread.push(ChatMessage::sent(
            "10:00".into(),
            MessageKind::Text { body: "hi".into() },
        ));
        process_single_event(&mut state, GuiEvent::Delivered);
        assert_eq!(state.thread.messages[0].delivery, Delivery::Delivered);
    }

    #[test]
    fn test_typing_cycle() {
        let mut state = ClientState::new();
        process_single_event(&mut state, GuiEvent::TypingStarted);
        assert_eq!(state.chat_status, ChatStatus::Typing);
        process_single_event(&mut state, GuiEvent::TypingStopped);
        assert_eq!(state.chat_status, ChatStatus::Online);
    }

    #[test]
    fn test_page_failed_marks_carousel() {
        let mut state = ClientState::new();
        let id = state.register_carousel(Carousel::new(
            Vec::new(),
            Some(crate::pagination::PageCursor {
                kind: "t".into(),
                query: "q".into(),
                page: 1,
            }),
        ));
        process_single_event(
            &mut state,
            GuiEvent::PageFailed {
                carousel_id: id,
                reason: "boom".into(),
            },
        );
        assert_eq!(state.carousels[&id].sentinel, SentinelState::Failed);
    }

    #[test]
    fn test_page_loaded_extends_carousel() {
        let mut state = ClientState::new();
        let id = state.register_carousel(Carousel::new(
            vec!["<div class=\"card\">a</div>".into()],
            Some(crate::pagination::PageCursor {
                kind: "t".into(),
                query: "q".into(),
                page: 2,
            }),
        ));
        state.carousels.get_mut(&id).unwrap().take_cursor();

        process_single_event(
            &mut state,
            GuiEvent::PageLoaded {
                carousel_id: id,
                html: "<div class=\"card\">b</div>".into(),
            },
        );
        let carousel = &state.carousels[&id];
        assert_eq!(carousel.items.len(), 2);
        assert_eq!(carousel.sentinel, SentinelState::Exhausted);
    }
}
