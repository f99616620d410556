//! # Wordspy
//!
//! Real-time server for the Wordspy social deduction party game.
//!
//! Players join a room with a short code, everyone secretly receives a
//! word, and one imposter receives a slightly different one. Rounds of
//! one-line descriptions and votes follow until the imposter is voted
//! out or too few civilians remain.
//!
//! This meta-crate ties the layers together: transport (WebSocket text
//! frames) → protocol (JSON requests/events) → registry (rooms and
//! sessions) → game (the rules). Run it via the `wordspyd` binary or
//! embed it:
//!
//! ```rust,no_run
//! use wordspy::WordspyServer;
//!
//! # async fn run() -> Result<(), wordspy::WordspyError> {
//! let server = WordspyServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::WordspyError;
pub use server::{WordspyServer, WordspyServerBuilder};
