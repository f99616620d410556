//! Wire protocol for Wordspy.
//!
//! This crate defines everything that travels between a client and the
//! server: identity newtypes, the tagged request/event enums for every
//! player action, the per-player room snapshot, and the codec that turns
//! them into JSON.
//!
//! The protocol layer sits between transport (raw text frames) and the
//! registry (connection context). It doesn't know about connections or
//! rooms — it only knows how to describe and serialize them.

mod codec;
mod error;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use types::{
    ChatEntry, ChatKind, ClientRequest, GamePhase, PlayerId, PlayerStatus,
    PlayerView, Role, RoomCode, RoomSnapshot, RoomStatus, RoundResult,
    ServerEvent, VoteTarget, Winner,
};
