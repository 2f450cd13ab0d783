//! The sequence-numbered wrapper around every channel payload.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Discriminant carried by every envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// A pushed snapshot.
    State,
    /// A controller-issued action request.
    ActionRequest,
    /// The bridge's reply to one action request.
    ActionResult,
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            MessageType::State => "state",
            MessageType::ActionRequest => "action_request",
            MessageType::ActionResult => "action_result",
        };
        f.write_str(tag)
    }
}

/// One stored channel record.
///
/// `sequence_id` is strictly increasing per channel and never reset except
/// at process restart; consumers treat a reset to low values after a restart
/// as a benign anomaly rather than a protocol violation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// UTC wall-clock time of the write, `%Y-%m-%dT%H:%M:%SZ`.
    pub timestamp: String,
    /// Channel-scoped sequence number.
    pub sequence_id: u64,
    /// Payload discriminant.
    pub message_type: MessageType,
    /// Opaque payload; the transport never interprets it.
    pub data: serde_json::Value,
}

impl Envelope {
    /// Wraps a payload with a fresh timestamp.
    pub fn new(sequence_id: u64, message_type: MessageType, data: serde_json::Value) -> Self {
        Self {
            timestamp: now_timestamp(),
            sequence_id,
            message_type,
            data,
        }
    }
}

/// Current UTC time in the wire timestamp format.
pub fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
