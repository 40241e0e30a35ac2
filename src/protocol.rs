use crate::pagination::PageCursor;
use crate::payload::OutboundContent;

/// Actions sent from the UI to the Backend
#[derive(Debug, Clone)]
pub enum BackendAction {
    /// Point the transport at a simulator endpoint and start the reply poll
    Configure { endpoint: String, phone: String },
    /// Send one message, wrapped in the webhook envelope
    SendMessage(OutboundContent),
    /// Fetch the next carousel page for a consumed cursor
    FetchMore { carousel_id: u64, cursor: PageCursor },
    /// Stop the reply poll
    StopPolling,
}

/// Events sent from the Backend to the UI
#[derive(Debug, Clone)]
pub enum GuiEvent {
    /// The simulator accepted an outbound message
    Delivered,
    /// A poll returned replies; they follow after the typing delay
    TypingStarted,
    /// The typing delay elapsed; replies are being flushed
    TypingStopped,
    /// One inbound reply body
    ReplyReceived { body: String },
    /// A carousel page fragment arrived
    PageLoaded { carousel_id: u64, html: String },
    /// A carousel page fetch failed; pagination for that carousel ends
    PageFailed { carousel_id: u64, reason: String },
    /// Transport error for the system log
    Error(String),
    /// Diagnostic line for the system log
    RawMessage(String),
}
