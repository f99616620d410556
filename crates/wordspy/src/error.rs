//! Unified error type for the Wordspy server.

use wordspy_protocol::ProtocolError;
use wordspy_registry::RegistryError;
use wordspy_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum WordspyError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A registry-level error (unknown room, no session, rule violation).
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordspy_protocol::RoomCode;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::ReceiveFailed(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "gone",
        ));
        let wordspy_err: WordspyError = err.into();
        assert!(matches!(wordspy_err, WordspyError::Transport(_)));
        assert!(wordspy_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidMessage("bad".into());
        let wordspy_err: WordspyError = err.into();
        assert!(matches!(wordspy_err, WordspyError::Protocol(_)));
    }

    #[test]
    fn test_from_registry_error() {
        let err = RegistryError::RoomNotFound(RoomCode("ABC234".into()));
        let wordspy_err: WordspyError = err.into();
        assert!(matches!(wordspy_err, WordspyError::Registry(_)));
        assert!(wordspy_err.to_string().contains("ABC234"));
    }
}
