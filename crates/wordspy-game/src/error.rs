//! Error types for game rule violations.

use wordspy_protocol::PlayerId;

/// A rejected action.
///
/// Rule violations never mutate room state: the caller reports the error
/// to the offending player and everyone else sees nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("player {0} is not in this room")]
    PlayerNotFound(PlayerId),

    #[error("only the host can do that")]
    NotHost,

    #[error("need at least {needed} players, have {have}")]
    NotEnoughPlayers { needed: usize, have: usize },

    #[error("that action is not allowed in the current phase")]
    WrongPhase,

    #[error("it is not your turn to describe")]
    NotYourTurn,

    #[error("you already described this round")]
    AlreadyDescribed,

    #[error("you already voted this round")]
    AlreadyVoted,

    #[error("you cannot vote this round")]
    CannotVote,

    #[error("name cannot be empty")]
    EmptyName,

    #[error("the room cannot be joined right now")]
    InvalidJoinState,
}
