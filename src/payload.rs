//! Webhook payload construction.
//!
//! Outbound messages are wrapped in the vendor webhook notification shape
//! the simulator backend expects: a `whatsapp_business_account` object with
//! a single entry/change carrying the message. The builder does no
//! validation; whatever data it is handed goes over the wire, and the
//! backend is responsible for rejecting anything malformed.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use serde::Serialize;

/// Fixed id used by the audio recorder mock.
pub const AUDIO_MOCK_ID: &str = "audio_123";

/// Kind-specific message data.
///
/// Externally tagged on purpose: each variant serializes nested under its
/// kind key (`"text": { "body": ... }`), which is exactly the nesting the
/// webhook shape wants.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OutboundContent {
    Text {
        body: String,
    },
    Image {
        id: String,
        caption: String,
        mime_type: String,
        data: String,
    },
    Video {
        id: String,
        caption: String,
        mime_type: String,
        data: String,
    },
    Location {
        latitude: f64,
        longitude: f64,
    },
    Audio {
        id: String,
    },
}

impl OutboundContent {
    /// Wire name of the kind, used for the envelope `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundContent::Text { .. } => "text",
            OutboundContent::Image { .. } => "image",
            OutboundContent::Video { .. } => "video",
            OutboundContent::Location { .. } => "location",
            OutboundContent::Audio { .. } => "audio",
        }
    }
}

/// A single message inside the webhook envelope.
#[derive(Serialize, Debug, Clone)]
pub struct OutboundMessage {
    pub from: String,
    pub id: String,
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(flatten)]
    pub content: OutboundContent,
}

#[derive(Serialize, Debug, Clone)]
pub struct ChangeValue {
    pub messages: Vec<OutboundMessage>,
}

#[derive(Serialize, Debug, Clone)]
pub struct EnvelopeChange {
    pub value: ChangeValue,
}

#[derive(Serialize, Debug, Clone)]
pub struct EnvelopeEntry {
    pub changes: Vec<EnvelopeChange>,
}

/// Outer JSON wrapper mimicking the vendor messaging webhook shape.
#[derive(Serialize, Debug, Clone)]
pub struct WebhookEnvelope {
    pub object: String,
    pub entry: Vec<EnvelopeEntry>,
}

/// Wrap one message in the webhook envelope, stamping a synthetic message
/// id and the current unix timestamp.
pub fn build_envelope(from: &str, content: OutboundContent) -> WebhookEnvelope {
    let now = Utc::now();
    let message = OutboundMessage {
        from: from.to_string(),
        id: format!("wamid.test_{}", now.timestamp_millis()),
        timestamp: now.timestamp(),
        kind: content.kind(),
        content,
    };
    WebhookEnvelope {
        object: "whatsapp_business_account".to_string(),
        entry: vec![EnvelopeEntry {
            changes: vec![EnvelopeChange {
                value: ChangeValue {
                    messages: vec![message],
                },
            }],
        }],
    }
}

/// Synthetic id for attached media.
pub fn media_id() -> String {
    format!("media_{}", Utc::now().timestamp_millis())
}

/// Guess a MIME type from the file extension. Unknown extensions fall back
/// to `application/octet-stream`; the backend validates, not us.
pub fn guess_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("ogg") => "audio/ogg",
        Some("mp3") => "audio/mpeg",
        _ => "application/octet-stream",
    }
}

/// Encode media bytes as a `data:` URL the way the browser upload path did.
pub fn media_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape_text() {
        let envelope = build_envelope(
            "919328552413",
            OutboundContent::Text {
                body: "hello".into(),
            },
        );
        let v = serde_json::to_value(&envelope).unwrap();

        assert_eq!(v["object"], "whatsapp_business_account");
        let msg = &v["entry"][0]["changes"][0]["value"]["messages"][0];
        assert_eq!(msg["from"], "919328552413");
        assert_eq!(msg["type"], "text");
        assert_eq!(msg["text"]["body"], "hello");
        assert!(msg["id"].as_str().unwrap().starts_with("wamid.test_"));
        assert!(msg["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_envelope_kind_keyed_nesting() {
        let envelope = build_envelope(
            "1",
            OutboundContent::Location {
                latitude: 23.0225,
                longitude: 72.5714,
            },
        );
        let v = serde_json::to_value(&envelope).unwrap();
        let msg = &v["entry"][0]["changes"][0]["value"]["messages"][0];
        assert_eq!(msg["type"], "location");
        assert_eq!(msg["location"]["latitude"], 23.0225);
        assert_eq!(msg["location"]["longitude"], 72.5714);
        // The kind key carries the data; no stray "text" key
        assert!(msg.get("text").is_none());
    }

    #[test]
    fn test_envelope_media_fields() {
        let envelope = build_envelope(
            "1",
            OutboundContent::Image {
                id: "media_1".into(),
                caption: "Attached Media".into(),
                mime_type: "image/png".into(),
                data: "data:image/png;base64,AAAA".into(),
            },
        );
        let v = serde_json::to_value(&envelope).unwrap();
        let msg = &v["entry"][0]["changes"][0]["value"]["messages"][0];
        assert_eq!(msg["image"]["mime_type"], "image/png");
        assert_eq!(msg["image"]["caption"], "Attached Media");
    }

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime(Path::new("a.png")), "image/png");
        assert_eq!(guess_mime(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("clip.mp4")), "video/mp4");
        assert_eq!(guess_mime(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_media_data_url() {
        let url = media_data_url("image/png", b"abc");
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(url.ends_with("YWJj"));
    }
}
