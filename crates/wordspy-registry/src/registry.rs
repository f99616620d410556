//! The room registry.
//!
//! One [`Registry`] per server process. It creates rooms, routes joins
//! and actions to the right room task, and tracks which connection holds
//! which seat.

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use wordspy_game::{GameConfig, GameError};
use wordspy_protocol::{PlayerId, RoomCode};
use wordspy_transport::ConnectionId;

use crate::code::random_code;
use crate::config::RoomTiming;
use crate::error::RegistryError;
use crate::room::{self, EventSender, RoomAction, RoomCommand, RoomHandle};
use crate::sessions::SessionMap;

/// Out-of-band notification from a room task to the registry's owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryNotice {
    /// The room's deletion timer elapsed with nobody connected; it has
    /// shut itself down and should be dropped from the registry.
    RoomClosed(RoomCode),
}

/// The set of live rooms and the sessions bound to them.
pub struct Registry {
    rooms: HashMap<RoomCode, RoomHandle>,
    sessions: SessionMap,
    game_config: GameConfig,
    timing: RoomTiming,
    notice_tx: mpsc::UnboundedSender<RegistryNotice>,
    rng: StdRng,
}

impl Registry {
    /// Creates a registry. The returned receiver yields lifecycle
    /// notices; the owner must feed them back via
    /// [`Registry::handle_notice`].
    pub fn new(
        game_config: GameConfig,
        timing: RoomTiming,
    ) -> (Self, mpsc::UnboundedReceiver<RegistryNotice>) {
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let registry = Self {
            rooms: HashMap::new(),
            sessions: SessionMap::new(),
            game_config,
            timing,
            notice_tx,
            rng: StdRng::from_os_rng(),
        };
        (registry, notice_rx)
    }

    /// Creates a room with a fresh unique code and seats the creator.
    pub async fn create_room(
        &mut self,
        conn: ConnectionId,
        name: &str,
        sender: EventSender,
    ) -> Result<(RoomCode, PlayerId), RegistryError> {
        let code = loop {
            let candidate = random_code(&mut self.rng);
            if !self.rooms.contains_key(&candidate) {
                break candidate;
            }
        };
        let handle = room::spawn_room(
            code.clone(),
            self.game_config.clone(),
            self.timing.clone(),
            self.notice_tx.clone(),
        );
        self.rooms.insert(code.clone(), handle);
        info!(%conn, room = %code, "room created");

        self.join_room(conn, code, name, None, sender).await
    }

    /// Seats a connection in an existing room. With `previous` set and a
    /// matching name this reclaims the old seat instead of adding one.
    pub async fn join_room(
        &mut self,
        conn: ConnectionId,
        code: RoomCode,
        name: &str,
        previous: Option<PlayerId>,
        sender: EventSender,
    ) -> Result<(RoomCode, PlayerId), RegistryError> {
        let handle = self
            .rooms
            .get(&code)
            .ok_or_else(|| RegistryError::RoomNotFound(code.clone()))?;

        let (reply_tx, reply_rx) = oneshot::channel();
        let cmd = RoomCommand::Join {
            name: name.to_string(),
            previous,
            sender,
            reply: reply_tx,
        };
        // A closed inbox means the join raced the room's teardown.
        if handle.send(cmd).is_err() {
            return Err(RegistryError::Game(GameError::InvalidJoinState));
        }
        let player = reply_rx
            .await
            .map_err(|_| RegistryError::Game(GameError::InvalidJoinState))??;

        // A reconnect takes the seat over from the old socket; its stale
        // binding must not be able to disconnect the seat later.
        self.sessions.remove_seat(&code, player);
        self.sessions.bind(conn, code.clone(), player);
        debug!(%conn, room = %code, %player, "session bound");
        Ok((code, player))
    }

    /// Routes an in-room action through the connection's session.
    pub async fn perform(
        &mut self,
        conn: ConnectionId,
        action: RoomAction,
    ) -> Result<(), RegistryError> {
        let (code, player) = self
            .sessions
            .resolve(conn)
            .ok_or(RegistryError::NotInRoom(conn))?;
        let handle = self
            .rooms
            .get(&code)
            .ok_or_else(|| RegistryError::RoomNotFound(code.clone()))?;

        let (reply_tx, reply_rx) = oneshot::channel();
        let cmd = RoomCommand::Action {
            player,
            action,
            reply: reply_tx,
        };
        if handle.send(cmd).is_err() {
            return Err(RegistryError::RoomNotFound(code));
        }
        reply_rx
            .await
            .map_err(|_| RegistryError::RoomNotFound(code))??;
        Ok(())
    }

    /// Tears down a connection's session and informs its room, starting
    /// the disconnect grace period for the seat.
    pub fn disconnect(&mut self, conn: ConnectionId) {
        let Some((code, player)) = self.sessions.remove(conn) else {
            return;
        };
        debug!(%conn, room = %code, %player, "connection dropped");
        if let Some(handle) = self.rooms.get(&code) {
            let _ = handle.send(RoomCommand::Disconnect { player });
        }
    }

    /// Applies a lifecycle notice from a room task.
    pub fn handle_notice(&mut self, notice: RegistryNotice) {
        match notice {
            RegistryNotice::RoomClosed(code) => {
                self.rooms.remove(&code);
                self.sessions.remove_room(&code);
                info!(room = %code, "room removed from registry");
            }
        }
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
