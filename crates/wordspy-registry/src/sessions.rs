//! The connection-to-seat index.

use std::collections::HashMap;

use wordspy_protocol::{PlayerId, RoomCode};
use wordspy_transport::ConnectionId;

/// Maps each live connection to the room and seat it speaks for.
///
/// Requests after the initial join carry no room code; this index is how
/// the registry routes them.
#[derive(Debug, Default)]
pub struct SessionMap {
    inner: HashMap<ConnectionId, (RoomCode, PlayerId)>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a connection to a seat, replacing any previous binding
    /// (a connection that joins twice has switched rooms).
    pub fn bind(&mut self, conn: ConnectionId, code: RoomCode, player: PlayerId) {
        self.inner.insert(conn, (code, player));
    }

    pub fn resolve(&self, conn: ConnectionId) -> Option<(RoomCode, PlayerId)> {
        self.inner.get(&conn).cloned()
    }

    pub fn remove(&mut self, conn: ConnectionId) -> Option<(RoomCode, PlayerId)> {
        self.inner.remove(&conn)
    }

    /// Drops every binding into `code`. Used when a room is deleted.
    pub fn remove_room(&mut self, code: &RoomCode) {
        self.inner.retain(|_, (room, _)| room != code);
    }

    /// Drops any binding that points at the given seat.
    ///
    /// A reconnect supersedes whichever socket held the seat before;
    /// evicting the old binding here means the superseded socket's
    /// eventual close resolves to no session and cannot grey out the
    /// freshly reconnected player.
    pub fn remove_seat(&mut self, code: &RoomCode, player: PlayerId) {
        self.inner
            .retain(|_, (room, seat)| !(room == code && *seat == player));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> RoomCode {
        RoomCode(s.into())
    }

    #[test]
    fn test_bind_and_resolve() {
        let mut sessions = SessionMap::new();
        let conn = ConnectionId::new(1);
        sessions.bind(conn, code("AAAAAA"), PlayerId(0));

        assert_eq!(sessions.resolve(conn), Some((code("AAAAAA"), PlayerId(0))));
        assert_eq!(sessions.resolve(ConnectionId::new(2)), None);
    }

    #[test]
    fn test_rebind_replaces_previous_seat() {
        let mut sessions = SessionMap::new();
        let conn = ConnectionId::new(1);
        sessions.bind(conn, code("AAAAAA"), PlayerId(0));
        sessions.bind(conn, code("BBBBBB"), PlayerId(4));

        assert_eq!(sessions.resolve(conn), Some((code("BBBBBB"), PlayerId(4))));
    }

    #[test]
    fn test_remove_returns_binding() {
        let mut sessions = SessionMap::new();
        let conn = ConnectionId::new(1);
        sessions.bind(conn, code("AAAAAA"), PlayerId(0));

        assert_eq!(sessions.remove(conn), Some((code("AAAAAA"), PlayerId(0))));
        assert_eq!(sessions.remove(conn), None);
    }

    #[test]
    fn test_remove_seat_evicts_superseded_connection() {
        let mut sessions = SessionMap::new();
        sessions.bind(ConnectionId::new(1), code("AAAAAA"), PlayerId(0));
        sessions.bind(ConnectionId::new(2), code("AAAAAA"), PlayerId(1));
        sessions.bind(ConnectionId::new(3), code("BBBBBB"), PlayerId(0));

        sessions.remove_seat(&code("AAAAAA"), PlayerId(0));

        assert_eq!(sessions.resolve(ConnectionId::new(1)), None);
        assert!(sessions.resolve(ConnectionId::new(2)).is_some());
        assert!(sessions.resolve(ConnectionId::new(3)).is_some());
    }

    #[test]
    fn test_remove_room_drops_only_that_room() {
        let mut sessions = SessionMap::new();
        sessions.bind(ConnectionId::new(1), code("AAAAAA"), PlayerId(0));
        sessions.bind(ConnectionId::new(2), code("AAAAAA"), PlayerId(1));
        sessions.bind(ConnectionId::new(3), code("BBBBBB"), PlayerId(0));

        sessions.remove_room(&code("AAAAAA"));

        assert_eq!(sessions.resolve(ConnectionId::new(1)), None);
        assert_eq!(sessions.resolve(ConnectionId::new(2)), None);
        assert!(sessions.resolve(ConnectionId::new(3)).is_some());
    }
}
