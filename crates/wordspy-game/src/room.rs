//! The room state machine.
//!
//! [`GameRoom`] owns one room's entire authoritative state: roster, phase,
//! turn rotation, ballot box, chat log, and score sheet. Mutations either
//! succeed and return the [`GameEvent`]s they produced, or fail with a
//! [`GameError`] and leave the room untouched.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use wordspy_protocol::{
    ChatEntry, ChatKind, GamePhase, PlayerId, PlayerStatus, PlayerView, Role,
    RoomCode, RoomSnapshot, RoomStatus, RoundResult, VoteTarget, Winner,
};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::player::Player;
use crate::words::{self, WordPair};

/// A side effect produced by a committed mutation.
///
/// The caller (the room actor) turns these into outbound messages and
/// timer operations. Snapshot broadcasting is implicit: after any
/// successful mutation the actor pushes fresh state to everyone.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A chat entry was appended to the log.
    Chat(ChatEntry),
    /// A game just started (first round of a fresh game).
    GameStarted,
    /// The round resolved without a winner; the next round should begin
    /// after the configured delay.
    ScheduleNextRound,
}

/// One room's authoritative state.
pub struct GameRoom {
    code: RoomCode,
    config: GameConfig,
    status: RoomStatus,
    phase: GamePhase,
    current_round: u32,
    players: Vec<Player>,
    /// Speaking order for the current round, fixed at round start.
    turn_order: Vec<PlayerId>,
    /// Index into `turn_order`, or `None` outside the description phase.
    current_turn: Option<usize>,
    votes: HashMap<PlayerId, VoteTarget>,
    word_pair: Option<WordPair>,
    imposter: Option<PlayerId>,
    last_round_result: Option<RoundResult>,
    chat: Vec<ChatEntry>,
    next_player_id: u64,
}

impl GameRoom {
    /// Creates an empty room in the lobby.
    pub fn new(code: RoomCode, config: GameConfig) -> Self {
        Self {
            code,
            config,
            status: RoomStatus::Lobby,
            phase: GamePhase::Lobby,
            current_round: 0,
            players: Vec::new(),
            turn_order: Vec::new(),
            current_turn: None,
            votes: HashMap::new(),
            word_pair: None,
            imposter: None,
            last_round_result: None,
            chat: Vec::new(),
            next_player_id: 0,
        }
    }

    // =====================================================================
    // Accessors
    // =====================================================================

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn status(&self) -> RoomStatus {
        self.status
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Whose turn it is to describe, or `None` outside the description phase.
    pub fn current_turn_player(&self) -> Option<PlayerId> {
        self.current_turn
            .and_then(|idx| self.turn_order.get(idx).copied())
    }

    /// Players still holding a seat (active or within disconnect grace).
    pub fn present_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_present()).count()
    }

    /// Players that are connected and able to act right now.
    pub fn active_count(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.status == PlayerStatus::Active)
            .count()
    }

    /// Whether `id` holds this seat under exactly this display name.
    /// Reconnection requires both to match; anything else is a fresh join.
    pub fn player_matches(&self, id: PlayerId, name: &str) -> bool {
        self.player(id).is_some_and(|p| p.name == name)
    }

    // =====================================================================
    // Roster
    // =====================================================================

    /// Adds a new player and returns their id.
    ///
    /// The first player to join becomes the host. Joining a running game
    /// seats the player as `Waiting`: they spectate until roles are next
    /// assigned. Duplicate display names get a ` (n)` suffix.
    pub fn add_player(
        &mut self,
        name: &str,
    ) -> Result<(PlayerId, Vec<GameEvent>), GameError> {
        let base = self.normalize_name(name)?;
        let name = self.dedup_name(&base, None);

        let status = match self.status {
            RoomStatus::Lobby | RoomStatus::Ended => PlayerStatus::Active,
            RoomStatus::Playing => PlayerStatus::Waiting,
        };
        let is_creator = self.players.is_empty();
        let id = PlayerId(self.next_player_id);
        self.next_player_id += 1;

        self.players
            .push(Player::new(id, name.clone(), status, is_creator));
        debug!(room = %self.code, player = %id, %name, "player joined");

        let events = vec![self.system_message(format!("{name} joined the room"))];
        Ok((id, events))
    }

    /// Restores a returning player's seat after their connection dropped.
    pub fn reconnect_player(
        &mut self,
        id: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        let room_status = self.status;
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GameError::PlayerNotFound(id))?;

        // Eliminated players come back as spectators; their seat state
        // doesn't change.
        if player.status != PlayerStatus::Eliminated {
            player.status = match room_status {
                RoomStatus::Lobby | RoomStatus::Ended => PlayerStatus::Active,
                // Mid-game returners without a role keep waiting for the
                // next role assignment.
                RoomStatus::Playing if player.role == Role::Unassigned => {
                    PlayerStatus::Waiting
                }
                RoomStatus::Playing => PlayerStatus::Active,
            };
        }
        let name = player.name.clone();
        debug!(room = %self.code, player = %id, "player reconnected");
        Ok(vec![self.system_message(format!("{name} reconnected"))])
    }

    /// Flags a player as disconnected.
    ///
    /// Returns `true` if the player's seat entered the grace state, i.e.
    /// a grace timer should run. Eliminated players keep their status so
    /// vote denominators and win checks stay correct.
    pub fn mark_disconnected(&mut self, id: PlayerId) -> bool {
        match self.players.iter_mut().find(|p| p.id == id) {
            Some(p) if matches!(p.status, PlayerStatus::Active | PlayerStatus::Waiting) => {
                p.status = PlayerStatus::Disconnected;
                true
            }
            _ => false,
        }
    }

    /// Drops a player from the roster entirely. Lobby only: once a game
    /// has started, seats are preserved and departures go through
    /// [`GameRoom::handle_departure`].
    pub fn remove_player(&mut self, id: PlayerId) -> Vec<GameEvent> {
        let Some(idx) = self.players.iter().position(|p| p.id == id) else {
            return Vec::new();
        };
        let removed = self.players.remove(idx);
        self.turn_order.retain(|&tid| tid != id);
        self.votes.remove(&id);

        let mut events =
            vec![self.system_message(format!("{} left the room", removed.name))];
        if removed.is_creator {
            if let Some(next_host) = self.players.first_mut() {
                next_host.is_creator = true;
                let name = next_host.name.clone();
                events.push(self.system_message(format!("{name} is now the host")));
            }
        }
        events
    }

    /// Handles a mid-game or post-game player whose disconnect grace ran
    /// out. The seat stays on the roster; the game reacts as if the
    /// player is gone for good.
    pub fn handle_departure(&mut self, id: PlayerId) -> Vec<GameEvent> {
        let Some(player) = self.player(id) else {
            return Vec::new();
        };
        let name = player.name.clone();
        let role = player.role;
        debug!(room = %self.code, player = %id, "player departed");

        let mut events = vec![self.system_message(format!("{name} left the game"))];
        if self.status != RoomStatus::Playing {
            return events;
        }

        // Retire the seat: the player drops out of turn rotation and out
        // of the vote denominator for the rest of this game. The roster
        // entry itself stays for display and for a rematch.
        if let Some(p) = self.players.iter_mut().find(|p| p.id == id) {
            p.status = PlayerStatus::Eliminated;
        }

        // Don't let the round stall on a seat nobody holds anymore.
        if self.phase == GamePhase::Description && self.current_turn_player() == Some(id)
        {
            events.extend(self.advance_turn());
        }
        if self.phase == GamePhase::Voting && self.votes.len() >= self.active_count() {
            events.extend(self.resolve_votes());
        }
        if self.status != RoomStatus::Playing {
            // The forced resolution already ended the game.
            return events;
        }

        match role {
            Role::Imposter => {
                events.extend(self.finish_game(Winner::Civilians, None));
            }
            Role::Civilian => {
                let remaining = self
                    .players
                    .iter()
                    .filter(|p| p.role == Role::Civilian && p.is_present() && p.id != id)
                    .count();
                if remaining <= 1 {
                    events.extend(self.finish_game(Winner::Imposter, None));
                }
            }
            Role::Unassigned => {}
        }
        events
    }

    // =====================================================================
    // Game flow
    // =====================================================================

    /// Starts the game. Host only, lobby only.
    pub fn start_game(
        &mut self,
        requester: PlayerId,
        rng: &mut impl Rng,
    ) -> Result<Vec<GameEvent>, GameError> {
        let player = self
            .player(requester)
            .ok_or(GameError::PlayerNotFound(requester))?;
        if !player.is_creator {
            return Err(GameError::NotHost);
        }
        if self.status != RoomStatus::Lobby {
            return Err(GameError::WrongPhase);
        }
        let connected = self
            .players
            .iter()
            .filter(|p| p.status != PlayerStatus::Disconnected)
            .count();
        if connected < self.config.min_players {
            return Err(GameError::NotEnoughPlayers {
                needed: self.config.min_players,
                have: connected,
            });
        }

        // Players who dropped during the lobby don't get dealt in.
        self.players
            .retain(|p| p.status != PlayerStatus::Disconnected);

        self.status = RoomStatus::Playing;
        self.current_round = 0;
        self.chat.clear();
        self.last_round_result = None;
        debug!(room = %self.code, players = self.players.len(), "game started");

        let mut events = vec![GameEvent::GameStarted];
        events.extend(self.start_round(rng));
        Ok(events)
    }

    /// Begins the next round after an inconclusive resolution.
    ///
    /// Driven by the round-advance timer; a no-op unless the room is
    /// still sitting in the results phase (a departure may have ended
    /// the game while the timer ran).
    pub fn begin_next_round(&mut self, rng: &mut impl Rng) -> Vec<GameEvent> {
        if self.status != RoomStatus::Playing || self.phase != GamePhase::Results {
            return Vec::new();
        }
        self.start_round(rng)
    }

    /// Starts a rematch with the same roster. Any member may trigger it
    /// once the previous game has ended. Points carry over; everything
    /// else resets.
    pub fn start_new_game(
        &mut self,
        requester: PlayerId,
        rng: &mut impl Rng,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.player(requester)
            .ok_or(GameError::PlayerNotFound(requester))?;
        if self.status != RoomStatus::Ended {
            return Err(GameError::WrongPhase);
        }
        if self.players.len() < self.config.min_players {
            return Err(GameError::NotEnoughPlayers {
                needed: self.config.min_players,
                have: self.players.len(),
            });
        }

        for p in &mut self.players {
            p.status = PlayerStatus::Active;
            p.role = Role::Unassigned;
            p.word = None;
            p.has_described = false;
            p.has_voted = false;
        }
        self.votes.clear();
        self.turn_order.clear();
        self.current_turn = None;
        self.word_pair = None;
        self.imposter = None;
        self.last_round_result = None;
        self.chat.clear();
        self.status = RoomStatus::Playing;
        self.current_round = 0;
        debug!(room = %self.code, "rematch started");

        let mut events = vec![GameEvent::GameStarted];
        events.extend(self.start_round(rng));
        Ok(events)
    }

    fn start_round(&mut self, rng: &mut impl Rng) -> Vec<GameEvent> {
        self.current_round += 1;

        if self.current_round == 1 {
            let pair = words::draw(rng);
            self.word_pair = Some(pair);

            let eligible: Vec<usize> = self
                .players
                .iter()
                .enumerate()
                .filter(|(_, p)| p.status != PlayerStatus::Eliminated)
                .map(|(idx, _)| idx)
                .collect();
            // start_game/start_new_game guarantee a non-empty roster here.
            let imposter_idx = eligible[rng.random_range(0..eligible.len())];
            for &idx in &eligible {
                let p = &mut self.players[idx];
                p.status = PlayerStatus::Active;
                if idx == imposter_idx {
                    p.role = Role::Imposter;
                    p.word = Some(pair.imposter.to_string());
                } else {
                    p.role = Role::Civilian;
                    p.word = Some(pair.civilian.to_string());
                }
            }
            self.imposter = Some(self.players[imposter_idx].id);
        }

        for p in &mut self.players {
            p.has_described = false;
            p.has_voted = false;
        }
        self.votes.clear();
        self.last_round_result = None;

        let mut order: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| p.is_present())
            .map(|p| p.id)
            .collect();
        order.shuffle(rng);
        self.turn_order = order;
        self.current_turn = None;
        self.phase = GamePhase::Description;

        let round = self.current_round;
        let mut events = vec![self.system_message(format!("Round {round} begins"))];
        events.extend(self.advance_turn());
        events
    }

    /// Moves the description turn to the next present player, or to the
    /// voting phase when the rotation is exhausted.
    fn advance_turn(&mut self) -> Vec<GameEvent> {
        let start = self.current_turn.map_or(0, |idx| idx + 1);
        for idx in start..self.turn_order.len() {
            let id = self.turn_order[idx];
            if self.player(id).is_some_and(|p| p.is_present()) {
                self.current_turn = Some(idx);
                self.phase = GamePhase::Description;
                return Vec::new();
            }
        }
        self.current_turn = None;
        self.phase = GamePhase::Voting;
        vec![self.system_message("All descriptions are in. Time to vote!".into())]
    }

    // =====================================================================
    // Player actions
    // =====================================================================

    /// Records the current player's description and advances the turn.
    ///
    /// A disconnected player submitting on their turn is treated as
    /// having reconnected: the action itself proves the client is back.
    pub fn submit_description(
        &mut self,
        player: PlayerId,
        text: &str,
    ) -> Result<Vec<GameEvent>, GameError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player)
            .ok_or(GameError::PlayerNotFound(player))?;
        if self.players[idx].status == PlayerStatus::Disconnected {
            self.players[idx].status = PlayerStatus::Active;
        }
        if self.phase != GamePhase::Description {
            return Err(GameError::WrongPhase);
        }
        if self.current_turn_player() != Some(player) {
            return Err(GameError::NotYourTurn);
        }
        if self.players[idx].has_described {
            return Err(GameError::AlreadyDescribed);
        }

        self.players[idx].has_described = true;
        let entry = ChatEntry {
            sender: Some(player),
            sender_name: self.players[idx].name.clone(),
            text: text.trim().to_string(),
            timestamp_ms: now_ms(),
            kind: ChatKind::Description,
        };
        self.chat.push(entry.clone());

        let mut events = vec![GameEvent::Chat(entry)];
        events.extend(self.advance_turn());
        Ok(events)
    }

    /// Records a ballot. When every present player has voted, the round
    /// resolves immediately.
    pub fn submit_vote(
        &mut self,
        voter: PlayerId,
        target: VoteTarget,
    ) -> Result<Vec<GameEvent>, GameError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == voter)
            .ok_or(GameError::PlayerNotFound(voter))?;
        if self.phase != GamePhase::Voting {
            return Err(GameError::WrongPhase);
        }
        // Voting also counts as proof of life.
        if self.players[idx].status == PlayerStatus::Disconnected {
            self.players[idx].status = PlayerStatus::Active;
        }
        if self.players[idx].status != PlayerStatus::Active {
            return Err(GameError::CannotVote);
        }
        if self.players[idx].has_voted {
            return Err(GameError::AlreadyVoted);
        }
        if let VoteTarget::Player(target_id) = target {
            self.player(target_id)
                .ok_or(GameError::PlayerNotFound(target_id))?;
        }

        self.players[idx].has_voted = true;
        self.votes.insert(voter, target);
        debug!(
            room = %self.code,
            voter = %voter,
            cast = self.votes.len(),
            needed = self.present_count(),
            "vote recorded"
        );

        let mut events = Vec::new();
        if self.votes.len() >= self.present_count() {
            events.extend(self.resolve_votes());
        }
        Ok(events)
    }

    /// Tallies the ballots, applies the plurality rule, and either ends
    /// the game or schedules the next round.
    fn resolve_votes(&mut self) -> Vec<GameEvent> {
        self.phase = GamePhase::Results;
        self.current_turn = None;

        let mut tally: HashMap<VoteTarget, usize> = HashMap::new();
        for target in self.votes.values() {
            *tally.entry(*target).or_insert(0) += 1;
        }
        let top = tally.values().copied().max().unwrap_or(0);
        let leaders: Vec<VoteTarget> = tally
            .iter()
            .filter(|(_, count)| **count == top)
            .map(|(target, _)| *target)
            .collect();

        // Somebody is eliminated only on a unique plurality for a player.
        let mut eliminated: Option<(PlayerId, String, Role)> = None;
        if let [VoteTarget::Player(id)] = leaders.as_slice() {
            let id = *id;
            if let Some(p) = self.players.iter_mut().find(|p| p.id == id) {
                p.status = PlayerStatus::Eliminated;
                eliminated = Some((id, p.name.clone(), p.role));
            }
        }

        let mut events = Vec::new();
        match &eliminated {
            Some((_, name, _)) => {
                events.push(self.system_message(format!("{name} was voted out")));
            }
            None => {
                events.push(self.system_message(
                    "The vote was inconclusive. No one was eliminated.".into(),
                ));
            }
        }

        let winner = if matches!(eliminated, Some((_, _, Role::Imposter))) {
            Some(Winner::Civilians)
        } else if self.civilians_present() <= 1 {
            Some(Winner::Imposter)
        } else if self.current_round >= self.config.max_rounds {
            // The imposter survived every round the game allows.
            Some(Winner::Imposter)
        } else {
            None
        };
        debug!(room = %self.code, round = self.current_round, ?winner, "round resolved");

        match winner {
            Some(winner) => {
                events.extend(self.finish_game(winner, eliminated));
            }
            None => {
                for p in &mut self.players {
                    if p.is_present() {
                        p.points += if p.role == Role::Imposter {
                            self.config.imposter_round_points
                        } else {
                            self.config.civilian_round_points
                        };
                    }
                }
                let (eliminated_id, eliminated_name, eliminated_role) =
                    match eliminated {
                        Some((id, name, role)) => (Some(id), Some(name), Some(role)),
                        None => (None, None, None),
                    };
                self.last_round_result = Some(RoundResult {
                    eliminated_id,
                    eliminated_name,
                    eliminated_role,
                    winner: None,
                    imposter_name: None,
                    civilian_word: None,
                    imposter_word: None,
                });
                events.push(GameEvent::ScheduleNextRound);
            }
        }
        events
    }

    /// Ends the game: pays out win bonuses and reveals the secrets.
    fn finish_game(
        &mut self,
        winner: Winner,
        eliminated: Option<(PlayerId, String, Role)>,
    ) -> Vec<GameEvent> {
        self.status = RoomStatus::Ended;
        self.phase = GamePhase::Ended;
        self.current_turn = None;

        let imposter_name = self
            .imposter
            .and_then(|id| self.player(id))
            .map(|p| p.name.clone());

        match winner {
            Winner::Civilians => {
                for p in &mut self.players {
                    if p.role == Role::Civilian && p.is_present() {
                        p.points += self.config.civilian_win_bonus;
                    }
                }
            }
            Winner::Imposter => {
                if let Some(id) = self.imposter {
                    if let Some(p) = self.players.iter_mut().find(|p| p.id == id) {
                        p.points += self.config.imposter_win_bonus;
                    }
                }
            }
        }

        let (eliminated_id, eliminated_name, eliminated_role) = match eliminated {
            Some((id, name, role)) => (Some(id), Some(name), Some(role)),
            None => (None, None, None),
        };
        self.last_round_result = Some(RoundResult {
            eliminated_id,
            eliminated_name,
            eliminated_role,
            winner: Some(winner),
            imposter_name: imposter_name.clone(),
            civilian_word: self.word_pair.map(|p| p.civilian.to_string()),
            imposter_word: self.word_pair.map(|p| p.imposter.to_string()),
        });
        debug!(room = %self.code, ?winner, "game over");

        let announcement = match (winner, &imposter_name) {
            (Winner::Civilians, Some(name)) => {
                format!("Civilians win! The imposter was {name}")
            }
            (Winner::Civilians, None) => "Civilians win!".to_string(),
            (Winner::Imposter, Some(name)) => {
                format!("The imposter wins! It was {name}")
            }
            (Winner::Imposter, None) => "The imposter wins!".to_string(),
        };
        vec![self.system_message(announcement)]
    }

    // =====================================================================
    // Chat and names
    // =====================================================================

    /// Appends a free-form chat message.
    ///
    /// Chat is muted while a round is live (description and voting) so
    /// players can't smuggle hints outside their turn; muted messages
    /// are silently dropped rather than rejected.
    pub fn send_chat(
        &mut self,
        sender: PlayerId,
        text: &str,
    ) -> Result<Vec<GameEvent>, GameError> {
        let player = self
            .player(sender)
            .ok_or(GameError::PlayerNotFound(sender))?;
        if matches!(self.phase, GamePhase::Description | GamePhase::Voting) {
            return Ok(Vec::new());
        }
        let entry = ChatEntry {
            sender: Some(sender),
            sender_name: player.name.clone(),
            text: text.to_string(),
            timestamp_ms: now_ms(),
            kind: ChatKind::Player,
        };
        self.chat.push(entry.clone());
        Ok(vec![GameEvent::Chat(entry)])
    }

    /// Renames a player, applying the same trim/truncate/dedup rules as
    /// joining.
    pub fn update_player_name(
        &mut self,
        id: PlayerId,
        new_name: &str,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.player(id).ok_or(GameError::PlayerNotFound(id))?;
        let base = self.normalize_name(new_name)?;
        let name = self.dedup_name(&base, Some(id));

        // Index lookup above proved the player exists.
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .expect("player exists");
        let old = std::mem::replace(&mut player.name, name.clone());
        Ok(vec![
            self.system_message(format!("{old} is now known as {name}")),
        ])
    }

    // =====================================================================
    // Snapshots
    // =====================================================================

    /// Builds the room view for one recipient.
    ///
    /// Roles and words are secret: a player sees only their own until the
    /// game ends, at which point everything is revealed to everyone.
    pub fn snapshot_for(&self, viewer: Option<PlayerId>) -> RoomSnapshot {
        let reveal_all = self.status == RoomStatus::Ended;
        RoomSnapshot {
            code: self.code.clone(),
            status: self.status,
            phase: self.phase,
            current_round: self.current_round,
            max_rounds: self.config.max_rounds,
            players: self
                .players
                .iter()
                .map(|p| {
                    let own = viewer == Some(p.id);
                    PlayerView {
                        id: p.id,
                        name: p.name.clone(),
                        status: p.status,
                        points: p.points,
                        has_described: p.has_described,
                        has_voted: p.has_voted,
                        is_creator: p.is_creator,
                        role: (reveal_all || own).then_some(p.role),
                        word: if reveal_all || own { p.word.clone() } else { None },
                    }
                })
                .collect(),
            turn_order: self.turn_order.clone(),
            current_turn: self.current_turn_player(),
            votes_cast: self.votes.len(),
            last_round_result: self.last_round_result.clone(),
            chat: self.chat.clone(),
        }
    }

    // =====================================================================
    // Internals
    // =====================================================================

    fn civilians_present(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.role == Role::Civilian && p.is_present())
            .count()
    }

    fn normalize_name(&self, raw: &str) -> Result<String, GameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GameError::EmptyName);
        }
        Ok(trimmed.chars().take(self.config.max_name_len).collect())
    }

    /// Suffixes ` (n)` until `base` collides with nobody else's name.
    fn dedup_name(&self, base: &str, exclude: Option<PlayerId>) -> String {
        let taken = |candidate: &str| {
            self.players
                .iter()
                .any(|p| Some(p.id) != exclude && p.name == candidate)
        };
        if !taken(base) {
            return base.to_string();
        }
        let mut n = 1;
        loop {
            let candidate = format!("{base} ({n})");
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn system_message(&mut self, text: String) -> GameEvent {
        let entry = ChatEntry {
            sender: None,
            sender_name: "system".into(),
            text,
            timestamp_ms: now_ms(),
            kind: ChatKind::System,
        };
        self.chat.push(entry.clone());
        GameEvent::Chat(entry)
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

// =========================================================================
// Tests
// =========================================================================
