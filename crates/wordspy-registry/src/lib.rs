//! Room registry and per-room actors.
//!
//! This crate owns everything between the connection handler and the game
//! rules: the map of live rooms, the connection-to-player session index,
//! join-code generation, and the actor task that serializes all access to
//! one room's [`wordspy_game::GameRoom`].
//!
//! Concurrency model: every room runs as its own tokio task with an mpsc
//! command inbox. All mutations of a room's state happen inside that task,
//! so the game crate needs no locks, and cross-room operations can't
//! interleave within one room.

mod code;
mod config;
mod error;
mod registry;
mod room;
mod sessions;

pub use config::RoomTiming;
pub use error::RegistryError;
pub use registry::{Registry, RegistryNotice};
pub use room::{EventSender, RoomAction};
