//! Codec for serializing and deserializing protocol messages.
//!
//! The rest of the server doesn't care how messages become text — it
//! goes through the [`Codec`] trait so a binary codec could be swapped
//! in without touching the handler.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes values to wire text and decodes wire text back.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into a wire string.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError>;

    /// Deserializes a wire string back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the text is malformed,
    /// incomplete, or doesn't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &str) -> Result<T, ProtocolError>;
}

/// A [`Codec`] that uses JSON via `serde_json`.
///
/// Human-readable, inspectable in browser DevTools, and the natural fit
/// for a WebSocket text protocol.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &str) -> Result<T, ProtocolError> {
        serde_json::from_str(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientRequest, RoomCode};

    #[test]
    fn test_json_codec_round_trip() {
        let codec = JsonCodec;
        let req = ClientRequest::JoinRoom {
            code: RoomCode("ABC234".into()),
            name: "Alice".into(),
            previous_player_id: None,
        };

        let text = codec.encode(&req).unwrap();
        let back: ClientRequest = codec.decode(&text).unwrap();
        assert_eq!(req, back);
    }

    #[test]
    fn test_json_codec_decode_garbage_fails() {
        let codec = JsonCodec;
        let result: Result<ClientRequest, _> = codec.decode("{{{nope");
        assert!(result.is_err());
    }
}
