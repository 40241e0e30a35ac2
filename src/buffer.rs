/// Maximum messages to keep in the thread before trimming
const MAX_THREAD_MESSAGES: usize = 2000;
/// Number of oldest messages to remove when trimming
const THREAD_TRIM_COUNT: usize = 500;

/// Who produced a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
}

/// Delivery tick state for sent messages (single check until the backend
/// accepts the POST, double check afterwards).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    Pending,
    Delivered,
}

/// What a message bubble contains.
#[derive(Clone, Debug, PartialEq)]
pub enum MessageKind {
    Text { body: String },
    /// Backend-rendered card markup, shown without linkify.
    TrustedCard { html: String },
    Image { source: String, caption: String },
    Video { source: String, caption: String },
    Location { latitude: f64, longitude: f64 },
    Audio { id: String },
    /// A paginated card list; items live in `ClientState::carousels`.
    Carousel { carousel_id: u64 },
}

/// One message bubble. Immutable after creation except the delivery tick.
#[derive(Clone, Debug)]
pub struct ChatMessage {
    pub timestamp: String,
    pub direction: Direction,
    pub delivery: Delivery,
    pub kind: MessageKind,
}

impl ChatMessage {
    pub fn sent(timestamp: String, kind: MessageKind) -> Self {
        Self {
            timestamp,
            direction: Direction::Sent,
            delivery: Delivery::Pending,
            kind,
        }
    }

    pub fn received(timestamp: String, kind: MessageKind) -> Self {
        Self {
            timestamp,
            direction: Direction::Received,
            delivery: Delivery::Delivered,
            kind,
        }
    }
}

/// The single conversation thread.
#[derive(Default, Clone)]
pub struct ThreadBuffer {
    pub messages: Vec<ChatMessage>,
}

impl ThreadBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, msg: ChatMessage) {
        self.messages.push(msg);
        // Trim old messages if the thread gets too large
        if self.messages.len() > MAX_THREAD_MESSAGES {
            self.messages.drain(0..THREAD_TRIM_COUNT);
        }
    }

    /// Flip the most recent still-pending sent message to delivered.
    pub fn mark_last_sent_delivered(&mut self) {
        if let Some(msg) = self
            .messages
            .iter_mut()
            .rev()
            .find(|m| m.direction == Direction::Sent && m.delivery == Delivery::Pending)
        {
            msg.delivery = Delivery::Delivered;
        }
    }
}
