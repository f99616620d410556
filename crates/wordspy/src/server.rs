//! `WordspyServer` builder and accept loop.
//!
//! This is the entry point for running a Wordspy server. It ties together
//! all the layers: transport → protocol → registry → game.

use std::sync::Arc;

use tokio::sync::Mutex;

use wordspy_game::GameConfig;
use wordspy_protocol::JsonCodec;
use wordspy_registry::{Registry, RoomTiming};
use wordspy_transport::WebSocketListener;

use crate::WordspyError;
use crate::handler::handle_connection;

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The
/// registry itself is short-lock-hold: rooms run as their own tasks, so
/// the lock only covers routing, never game processing.
pub(crate) struct ServerState {
    pub(crate) registry: Mutex<Registry>,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a Wordspy server.
pub struct WordspyServerBuilder {
    bind_addr: String,
    game_config: GameConfig,
    timing: RoomTiming,
}

impl WordspyServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            game_config: GameConfig::default(),
            timing: RoomTiming::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Overrides the game rule parameters for all rooms.
    pub fn game_config(mut self, config: GameConfig) -> Self {
        self.game_config = config;
        self
    }

    /// Overrides the room lifecycle timings.
    pub fn timing(mut self, timing: RoomTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Binds the listener and builds the server.
    pub async fn build(self) -> Result<WordspyServer, WordspyError> {
        let listener = WebSocketListener::bind(&self.bind_addr).await?;

        let (registry, mut notice_rx) = Registry::new(self.game_config, self.timing);
        let state = Arc::new(ServerState {
            registry: Mutex::new(registry),
            codec: JsonCodec,
        });

        // Room lifecycle notices (deletions) are applied off to the side
        // so the accept loop never blocks on them.
        let reaper_state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(notice) = notice_rx.recv().await {
                reaper_state.registry.lock().await.handle_notice(notice);
            }
        });

        Ok(WordspyServer { listener, state })
    }
}

impl Default for WordspyServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Wordspy server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct WordspyServer {
    listener: WebSocketListener,
    state: Arc<ServerState>,
}

impl WordspyServer {
    /// Creates a new builder.
    pub fn builder() -> WordspyServerBuilder {
        WordspyServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each.
    /// Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), WordspyError> {
        tracing::info!("Wordspy server running");

        loop {
            match self.listener.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
