//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding protocol messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into wire text).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed. Common causes: malformed JSON, missing
    /// required fields, or an unknown `type` tag.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message parsed but violates a protocol rule — e.g. an action
    /// request arriving before the connection has joined a room.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
