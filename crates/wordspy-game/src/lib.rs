//! Authoritative game rules for Wordspy.
//!
//! This crate is the single place where the rules of the game live: the
//! room state machine (lobby → playing → ended), turn rotation through the
//! description phase, vote tallying and plurality elimination, win
//! detection, scoring, and the chat log.
//!
//! It is deliberately synchronous and side-effect free. Every mutation is
//! a plain method on [`GameRoom`] that returns the [`GameEvent`]s it
//! produced; randomness comes in through `&mut impl Rng` parameters. The
//! async world (actors, timers, sockets) lives upstream in the registry,
//! which makes every rule here testable with a seeded generator.

mod config;
mod error;
mod player;
mod room;
mod words;

pub use config::GameConfig;
pub use error::GameError;
pub use player::Player;
pub use room::{GameEvent, GameRoom};
pub use words::WordPair;
