//! Core wire types for the Wordspy protocol.
//!
//! Every structure here is serialized to JSON and crosses the network.
//! Requests and events are internally tagged (`{"type": "...", ...}`),
//! which keeps the client side trivial to dispatch on.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player within a room.
///
/// Newtype over `u64`; `#[serde(transparent)]` makes it serialize as a
/// plain number on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A room's short join code.
///
/// Six characters from a fixed alphabet that excludes easily-confused
/// glyphs (no `I`/`O`/`0`/`1`). Generation lives in the registry; the
/// protocol only carries the code around.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(pub String);

impl RoomCode {
    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Game-state vocabulary
// ---------------------------------------------------------------------------

/// Coarse lifecycle of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Lobby,
    Playing,
    Ended,
}

/// The fine-grained step within a game.
///
/// `Description` and `Voting` are only ever entered while the room
/// status is `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Lobby,
    Description,
    Voting,
    Results,
    Ended,
}

/// A player's connection/participation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    /// Connected and playing.
    Active,
    /// Joined mid-round; becomes active at the next role assignment.
    Waiting,
    /// Connection dropped; slot preserved while the grace period runs.
    Disconnected,
    /// Voted out. Stays on the roster until the room is deleted.
    Eliminated,
}

/// A player's secret role, assigned once per game at round 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Unassigned,
    Civilian,
    Imposter,
}

/// Who won a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Civilians,
    Imposter,
}

/// The target of a vote.
///
/// An explicit tagged type rather than a magic sentinel id: `Abstain`
/// means "nobody should be eliminated this round".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum VoteTarget {
    Player(PlayerId),
    Abstain,
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// What kind of chat entry this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    /// Server-generated announcements (round start, disconnects, ...).
    System,
    /// Free-form player chat.
    Player,
    /// A turn description submitted during the description phase.
    Description,
}

/// One entry in a room's append-only chat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    /// The sending player, or `None` for system messages.
    pub sender: Option<PlayerId>,
    /// Display name at the time the message was sent.
    pub sender_name: String,
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    pub kind: ChatKind,
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// A player as seen in a room snapshot.
///
/// `role` and `word` are populated only for the viewing player while a
/// game is running; everyone's are revealed once the room has ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub status: PlayerStatus,
    pub points: u32,
    pub has_described: bool,
    pub has_voted: bool,
    pub is_creator: bool,
    pub role: Option<Role>,
    pub word: Option<String>,
}

/// Summary of the most recent round resolution.
///
/// For an inconclusive round only the elimination fields are populated
/// (all `None` on a tie); when a winner is determined the secret words
/// and the imposter's name are revealed as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub eliminated_id: Option<PlayerId>,
    pub eliminated_name: Option<String>,
    pub eliminated_role: Option<Role>,
    pub winner: Option<Winner>,
    pub imposter_name: Option<String>,
    pub civilian_word: Option<String>,
    pub imposter_word: Option<String>,
}

/// The full, per-recipient view of a room.
///
/// Pushed to every subscribed connection after each committed mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub code: RoomCode,
    pub status: RoomStatus,
    pub phase: GamePhase,
    pub current_round: u32,
    pub max_rounds: u32,
    pub players: Vec<PlayerView>,
    /// Ids in this round's speaking order.
    pub turn_order: Vec<PlayerId>,
    /// Whose turn it is to describe, or `None` outside the description phase.
    pub current_turn: Option<PlayerId>,
    pub votes_cast: usize,
    pub last_round_result: Option<RoundResult>,
    pub chat: Vec<ChatEntry>,
}

// ---------------------------------------------------------------------------
// Requests and events
// ---------------------------------------------------------------------------

/// Everything a client can ask the server to do.
///
/// The first request on a connection must be `CreateRoom` or `JoinRoom`;
/// all later requests are resolved through the connection's session, so
/// they don't repeat the room code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientRequest {
    CreateRoom {
        name: String,
    },
    JoinRoom {
        code: RoomCode,
        name: String,
        /// Present on reconnection attempts: the player id this client
        /// held before its connection dropped.
        previous_player_id: Option<PlayerId>,
    },
    StartGame,
    SubmitDescription {
        text: String,
    },
    SubmitVote {
        target: VoteTarget,
    },
    SendChat {
        text: String,
    },
    StartNewGame,
    UpdateName {
        new_name: String,
    },
}

/// Everything the server can push to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Acknowledges a successful create/join and tells the client who it is.
    Joined {
        code: RoomCode,
        player_id: PlayerId,
    },
    /// Full room snapshot, personalized for the receiving player.
    State {
        room: RoomSnapshot,
    },
    /// Distinct notification that a game just started.
    GameStarted,
    /// A single chat entry (system, player, or description).
    Chat {
        entry: ChatEntry,
    },
    /// A request from this connection failed validation.
    /// Sent only to the requester; room state is unchanged.
    Error {
        message: String,
    },
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! JSON-shape tests. The client SDK depends on these exact shapes,
    //! so a serde attribute regression here is a wire break.

    use super::*;

    // =====================================================================
    // Identity types
    // =====================================================================

    #[test]
    fn test_player_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&PlayerId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId(7).to_string(), "P-7");
    }

    #[test]
    fn test_room_code_serializes_as_plain_string() {
        let code = RoomCode("ABC234".into());
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"ABC234\"");
        assert_eq!(code.as_str(), "ABC234");
    }

    // =====================================================================
    // Vocabulary enums
    // =====================================================================

    #[test]
    fn test_room_status_serializes_snake_case() {
        let json = serde_json::to_string(&RoomStatus::Playing).unwrap();
        assert_eq!(json, "\"playing\"");
    }

    #[test]
    fn test_game_phase_round_trip() {
        for phase in [
            GamePhase::Lobby,
            GamePhase::Description,
            GamePhase::Voting,
            GamePhase::Results,
            GamePhase::Ended,
        ] {
            let json = serde_json::to_string(&phase).unwrap();
            let back: GamePhase = serde_json::from_str(&json).unwrap();
            assert_eq!(phase, back);
        }
    }

    #[test]
    fn test_vote_target_player_json_format() {
        let target = VoteTarget::Player(PlayerId(3));
        let json: serde_json::Value = serde_json::to_value(&target).unwrap();
        assert_eq!(json["kind"], "player");
        assert_eq!(json["id"], 3);
    }

    #[test]
    fn test_vote_target_abstain_json_format() {
        let json: serde_json::Value =
            serde_json::to_value(&VoteTarget::Abstain).unwrap();
        assert_eq!(json["kind"], "abstain");
    }

    // =====================================================================
    // Requests
    // =====================================================================

    #[test]
    fn test_create_room_request_json_format() {
        let req = ClientRequest::CreateRoom {
            name: "Alice".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "create_room");
        assert_eq!(json["name"], "Alice");
    }

    #[test]
    fn test_join_room_request_with_previous_id() {
        let req = ClientRequest::JoinRoom {
            code: RoomCode("XYZ789".into()),
            name: "Bob".into(),
            previous_player_id: Some(PlayerId(2)),
        };
        let json: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "join_room");
        assert_eq!(json["code"], "XYZ789");
        assert_eq!(json["previous_player_id"], 2);
    }

    #[test]
    fn test_join_room_request_without_previous_id() {
        let json = r#"{"type":"join_room","code":"XYZ789","name":"Bob","previous_player_id":null}"#;
        let req: ClientRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(
            req,
            ClientRequest::JoinRoom {
                previous_player_id: None,
                ..
            }
        ));
    }

    #[test]
    fn test_submit_vote_request_round_trip() {
        let req = ClientRequest::SubmitVote {
            target: VoteTarget::Player(PlayerId(5)),
        };
        let json = serde_json::to_string(&req).unwrap();
        let back: ClientRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req, back);
    }

    #[test]
    fn test_unit_requests_round_trip() {
        for req in [
            ClientRequest::StartGame,
            ClientRequest::StartNewGame,
        ] {
            let json = serde_json::to_string(&req).unwrap();
            let back: ClientRequest = serde_json::from_str(&json).unwrap();
            assert_eq!(req, back);
        }
    }

    // =====================================================================
    // Events
    // =====================================================================

    #[test]
    fn test_joined_event_json_format() {
        let event = ServerEvent::Joined {
            code: RoomCode("ABC234".into()),
            player_id: PlayerId(1),
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "joined");
        assert_eq!(json["code"], "ABC234");
        assert_eq!(json["player_id"], 1);
    }

    #[test]
    fn test_error_event_json_format() {
        let event = ServerEvent::Error {
            message: "not your turn".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "not your turn");
    }

    #[test]
    fn test_state_event_round_trip() {
        let event = ServerEvent::State {
            room: RoomSnapshot {
                code: RoomCode("ABC234".into()),
                status: RoomStatus::Playing,
                phase: GamePhase::Description,
                current_round: 1,
                max_rounds: 8,
                players: vec![PlayerView {
                    id: PlayerId(1),
                    name: "Alice".into(),
                    status: PlayerStatus::Active,
                    points: 10,
                    has_described: false,
                    has_voted: false,
                    is_creator: true,
                    role: Some(Role::Civilian),
                    word: Some("coffee".into()),
                }],
                turn_order: vec![PlayerId(1)],
                current_turn: Some(PlayerId(1)),
                votes_cast: 0,
                last_round_result: None,
                chat: vec![],
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: ServerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_chat_event_round_trip() {
        let event = ServerEvent::Chat {
            entry: ChatEntry {
                sender: None,
                sender_name: "system".into(),
                text: "Round 1 begins".into(),
                timestamp_ms: 1_700_000_000_000,
                kind: ChatKind::System,
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: ServerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    // =====================================================================
    // Malformed input
    // =====================================================================

    #[test]
    fn test_decode_garbage_returns_error() {
        let result: Result<ClientRequest, _> =
            serde_json::from_str("not json at all");
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_unknown_request_type_returns_error() {
        let unknown = r#"{"type": "fly_to_moon", "speed": 9000}"#;
        let result: Result<ClientRequest, _> = serde_json::from_str(unknown);
        assert!(result.is_err());
    }
}
