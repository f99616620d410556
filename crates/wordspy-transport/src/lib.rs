//! WebSocket transport for the Wordspy server.
//!
//! The transport layer is deliberately thin: it accepts connections,
//! hands out stable [`ConnectionId`]s, and moves text frames in and out.
//! Everything above it (protocol, registry, game) only ever sees a
//! `ConnectionId` and JSON strings.

mod error;
mod websocket;

pub use error::TransportError;
pub use websocket::{WebSocketConnection, WebSocketListener};

use std::fmt;

/// Opaque identifier for a connection.
///
/// This is the "connection-session" identity: the registry maps it to a
/// (room code, player id) pair for as long as the connection lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}
