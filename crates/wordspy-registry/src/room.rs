//! The per-room actor.
//!
//! Each room runs as one tokio task owning its [`GameRoom`]. Commands
//! arrive through an mpsc inbox and timers fire through a [`TimerQueue`];
//! both are handled in a single `select!` loop, so every mutation of a
//! room is serialized and timer cancellation can never race a firing.

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use wordspy_game::{GameConfig, GameError, GameEvent, GameRoom};
use wordspy_protocol::{
    PlayerId, PlayerStatus, RoomCode, RoomStatus, ServerEvent, VoteTarget,
};
use wordspy_timer::TimerQueue;

use crate::config::RoomTiming;
use crate::registry::RegistryNotice;

/// Outbound channel for one subscribed connection.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Handle held by the registry for sending commands into a room task.
pub(crate) type RoomHandle = mpsc::UnboundedSender<RoomCommand>;

/// An in-room action on behalf of an already-seated player.
#[derive(Debug, Clone)]
pub enum RoomAction {
    StartGame,
    SubmitDescription { text: String },
    SubmitVote { target: VoteTarget },
    SendChat { text: String },
    StartNewGame,
    UpdateName { new_name: String },
}

/// A command delivered to a room task.
pub(crate) enum RoomCommand {
    /// Seat a connection: a fresh join, or a reconnection when
    /// `previous` names a seat whose display name matches.
    Join {
        name: String,
        previous: Option<PlayerId>,
        sender: EventSender,
        reply: oneshot::Sender<Result<PlayerId, GameError>>,
    },
    /// A player action. Errors go back to the requester only.
    Action {
        player: PlayerId,
        action: RoomAction,
        reply: oneshot::Sender<Result<(), GameError>>,
    },
    /// The player's connection dropped.
    Disconnect { player: PlayerId },
}

/// Keys for a room's pending timers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TimerKind {
    /// Reconnection window for one player.
    Grace(PlayerId),
    /// Delay between an inconclusive result and the next round.
    RoundAdvance,
    /// Empty-room countdown to deletion.
    Deletion,
}

/// Spawns a room task and returns its command handle.
pub(crate) fn spawn_room(
    code: RoomCode,
    game_config: GameConfig,
    timing: RoomTiming,
    notice_tx: mpsc::UnboundedSender<RegistryNotice>,
) -> RoomHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let actor = RoomActor {
        game: GameRoom::new(code.clone(), game_config),
        code,
        senders: HashMap::new(),
        timers: TimerQueue::new(),
        timing,
        notice_tx,
        rx,
        rng: StdRng::from_os_rng(),
    };
    tokio::spawn(actor.run());
    tx
}

struct RoomActor {
    code: RoomCode,
    game: GameRoom,
    /// Outbound channels of currently connected players.
    senders: HashMap<PlayerId, EventSender>,
    timers: TimerQueue<TimerKind>,
    timing: RoomTiming,
    notice_tx: mpsc::UnboundedSender<RegistryNotice>,
    rx: mpsc::UnboundedReceiver<RoomCommand>,
    rng: StdRng,
}

impl RoomActor {
    async fn run(mut self) {
        info!(room = %self.code, "room task started");
        loop {
            tokio::select! {
                cmd = self.rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    // The registry dropped the handle; shut down.
                    None => break,
                },
                kind = self.timers.expired() => {
                    if self.handle_timer(kind) {
                        break;
                    }
                }
            }
        }
        info!(room = %self.code, "room task stopped");
    }

    fn handle_command(&mut self, cmd: RoomCommand) {
        match cmd {
            RoomCommand::Join {
                name,
                previous,
                sender,
                reply,
            } => self.handle_join(name, previous, sender, reply),
            RoomCommand::Action {
                player,
                action,
                reply,
            } => self.handle_action(player, action, reply),
            RoomCommand::Disconnect { player } => self.handle_disconnect(player),
        }
    }

    fn handle_join(
        &mut self,
        name: String,
        previous: Option<PlayerId>,
        sender: EventSender,
        reply: oneshot::Sender<Result<PlayerId, GameError>>,
    ) {
        // A returning client reclaims its seat only if it presents the
        // seat's exact display name; anything else is a fresh join.
        let reconnecting =
            previous.filter(|&id| self.game.player_matches(id, &name));

        let result = match reconnecting {
            Some(id) => self.game.reconnect_player(id).map(|events| (id, events)),
            None => self.game.add_player(&name),
        };

        match result {
            Ok((player, events)) => {
                self.timers.cancel(&TimerKind::Grace(player));
                self.timers.cancel(&TimerKind::Deletion);
                self.senders.insert(player, sender);
                let _ = reply.send(Ok(player));
                self.process_events(events);
                self.broadcast_state();
            }
            Err(err) => {
                let _ = reply.send(Err(err));
            }
        }
    }

    fn handle_action(
        &mut self,
        player: PlayerId,
        action: RoomAction,
        reply: oneshot::Sender<Result<(), GameError>>,
    ) {
        debug!(room = %self.code, %player, ?action, "room action");
        let result = match action {
            RoomAction::StartGame => self.game.start_game(player, &mut self.rng),
            RoomAction::SubmitDescription { text } => {
                self.game.submit_description(player, &text)
            }
            RoomAction::SubmitVote { target } => {
                self.game.submit_vote(player, target)
            }
            RoomAction::SendChat { text } => self.game.send_chat(player, &text),
            RoomAction::StartNewGame => {
                self.game.start_new_game(player, &mut self.rng)
            }
            RoomAction::UpdateName { new_name } => {
                self.game.update_player_name(player, &new_name)
            }
        };

        match result {
            Ok(events) => {
                let _ = reply.send(Ok(()));
                self.process_events(events);
                self.broadcast_state();
            }
            Err(err) => {
                // Rejections touch no state, so nobody else needs a new
                // snapshot.
                let _ = reply.send(Err(err));
            }
        }
    }

    fn handle_disconnect(&mut self, player: PlayerId) {
        self.senders.remove(&player);

        if self.game.mark_disconnected(player) {
            self.timers
                .schedule(TimerKind::Grace(player), self.timing.disconnect_grace);
            self.broadcast_state();
        }
        if self.senders.is_empty() {
            debug!(room = %self.code, "room empty, deletion countdown started");
            self.timers
                .schedule(TimerKind::Deletion, self.timing.room_deletion_grace);
        }
    }

    /// Returns `true` when the room should shut down.
    fn handle_timer(&mut self, kind: TimerKind) -> bool {
        match kind {
            TimerKind::Grace(player) => {
                // The timer is cancelled on reconnect, but a player can
                // also come back through an action; only a seat still in
                // the grace state departs.
                let still_gone = self
                    .game
                    .player(player)
                    .is_some_and(|p| p.status == PlayerStatus::Disconnected);
                if still_gone {
                    let events = if self.game.status() == RoomStatus::Lobby {
                        self.game.remove_player(player)
                    } else {
                        self.game.handle_departure(player)
                    };
                    self.process_events(events);
                    self.broadcast_state();
                }
                false
            }
            TimerKind::RoundAdvance => {
                let events = self.game.begin_next_round(&mut self.rng);
                self.process_events(events);
                self.broadcast_state();
                false
            }
            TimerKind::Deletion => {
                if self.senders.is_empty() {
                    info!(room = %self.code, "room deleted after idle timeout");
                    let _ = self
                        .notice_tx
                        .send(RegistryNotice::RoomClosed(self.code.clone()));
                    true
                } else {
                    false
                }
            }
        }
    }

    fn process_events(&mut self, events: Vec<GameEvent>) {
        for event in events {
            match event {
                GameEvent::Chat(entry) => {
                    self.broadcast(ServerEvent::Chat { entry });
                }
                GameEvent::GameStarted => {
                    // A fresh game invalidates any pending continuation.
                    self.timers.cancel(&TimerKind::RoundAdvance);
                    self.broadcast(ServerEvent::GameStarted);
                }
                GameEvent::ScheduleNextRound => {
                    self.timers.schedule(
                        TimerKind::RoundAdvance,
                        self.timing.round_advance_delay,
                    );
                }
            }
        }
    }

    fn broadcast(&self, event: ServerEvent) {
        for sender in self.senders.values() {
            // A dead channel means the disconnect is already in flight.
            let _ = sender.send(event.clone());
        }
    }

    /// Pushes a personalized snapshot to every connected player.
    fn broadcast_state(&self) {
        for (&player, sender) in &self.senders {
            let room = self.game.snapshot_for(Some(player));
            if sender.send(ServerEvent::State { room }).is_err() {
                warn!(room = %self.code, %player, "state push to dead channel");
            }
        }
    }
}
