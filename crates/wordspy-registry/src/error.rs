//! Error types for registry operations.

use wordspy_game::GameError;
use wordspy_protocol::RoomCode;
use wordspy_transport::ConnectionId;

/// A failed registry operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("room {0} not found")]
    RoomNotFound(RoomCode),

    #[error("connection {0} has not joined a room")]
    NotInRoom(ConnectionId),

    /// A rule violation reported by the room itself.
    #[error(transparent)]
    Game(#[from] GameError),
}
