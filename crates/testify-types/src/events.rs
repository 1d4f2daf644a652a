use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64URL;
use chrono::{DateTime, Utc};
use serde_json::Value;

pub const FRAME_ADDED: &str = "frame_added";
pub const FRAME_REMOVED: &str = "frame_removed";

/// Lifecycle events delivered by the social platform's mini-app webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventKind {
    /// The user added the mini-app to their client
    FrameAdded,

    /// The user removed the mini-app
    FrameRemoved,

    /// Anything else; kept for logging only
    Other(String),
}

impl WebhookEventKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            FRAME_ADDED => Self::FrameAdded,
            FRAME_REMOVED => Self::FrameRemoved,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WebhookEvent {
    pub kind: WebhookEventKind,
    /// Account id of the sender, when the envelope header carries one.
    pub fid: Option<u64>,
    pub payload: Value,
    pub received_at: DateTime<Utc>,
}

impl WebhookEvent {
    /// Parse a raw webhook body.
    ///
    /// Accepts either a plain JSON object with an `event` (or `type`) field,
    /// or a signed envelope `{header, payload, signature}` whose parts are
    /// base64url-encoded JSON. Signatures are not verified.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: Value = serde_json::from_slice(body)?;

        let (payload, fid) = match raw.get("payload").and_then(Value::as_str) {
            Some(encoded) => {
                let payload = decode_segment(encoded).unwrap_or(Value::Null);
                let fid = raw
                    .get("header")
                    .and_then(Value::as_str)
                    .and_then(decode_segment)
                    .and_then(|h| h.get("fid").and_then(Value::as_u64));
                (payload, fid)
            }
            None => {
                let fid = raw.get("fid").and_then(Value::as_u64);
                (raw, fid)
            }
        };

        let name = payload
            .get("event")
            .or_else(|| payload.get("type"))
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        Ok(Self {
            kind: WebhookEventKind::from_name(name),
            fid,
            payload,
            received_at: Utc::now(),
        })
    }
}

fn decode_segment(segment: &str) -> Option<Value> {
    let bytes = B64URL.decode(segment.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}
