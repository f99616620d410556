//! Per-connection handler: request routing and event pumping.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The loop multiplexes two directions:
//!   - inbound: decode a [`ClientRequest`], route it through the registry
//!   - outbound: events pushed by the room task, encoded and sent
//!
//! Validation errors go back to this connection only, as an `Error`
//! event; committed mutations reach everyone through the room's own
//! broadcast.

use std::sync::Arc;

use tokio::sync::mpsc;

use wordspy_protocol::{ClientRequest, Codec, ServerEvent};
use wordspy_registry::{EventSender, RoomAction};
use wordspy_transport::{ConnectionId, WebSocketConnection};

use crate::WordspyError;
use crate::server::ServerState;

/// Drop guard that tears down the connection's session when the handler
/// exits.
///
/// This ensures the room learns about the disconnect even if the handler
/// errors out. Since `Drop` is synchronous, the async lock happens in a
/// fire-and-forget task.
struct ConnectionGuard {
    conn_id: ConnectionId,
    state: Arc<ServerState>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        let conn_id = self.conn_id;
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            state.registry.lock().await.disconnect(conn_id);
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    state: Arc<ServerState>,
) -> Result<(), WordspyError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    // The room task pushes events into this channel once the connection
    // joins; until then it just sits idle.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<ServerEvent>();

    let _guard = ConnectionGuard {
        conn_id,
        state: Arc::clone(&state),
    };

    loop {
        tokio::select! {
            // We hold `event_tx` ourselves, so recv() never yields None.
            Some(event) = event_rx.recv() => {
                let text = state.codec.encode(&event)?;
                conn.send(&text).await?;
            }
            incoming = conn.recv() => {
                match incoming {
                    Ok(Some(text)) => {
                        handle_request(&conn, &state, conn_id, &event_tx, &text)
                            .await?;
                    }
                    Ok(None) => {
                        tracing::debug!(%conn_id, "connection closed cleanly");
                        break;
                    }
                    Err(e) => {
                        tracing::debug!(%conn_id, error = %e, "recv error");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Decodes and routes one request.
///
/// Transport failures bubble up (the connection is done); everything
/// else is answered on this connection, so one player's bad request
/// never kills their session.
async fn handle_request(
    conn: &WebSocketConnection,
    state: &ServerState,
    conn_id: ConnectionId,
    event_tx: &EventSender,
    text: &str,
) -> Result<(), WordspyError> {
    let request: ClientRequest = match state.codec.decode(text) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(%conn_id, error = %e, "malformed request");
            return send_error(conn, state, "malformed request").await;
        }
    };

    // Joins report the assigned seat; everything else is fire-and-check.
    let joined = match request {
        ClientRequest::CreateRoom { name } => {
            let mut registry = state.registry.lock().await;
            Some(
                registry
                    .create_room(conn_id, &name, event_tx.clone())
                    .await,
            )
        }
        ClientRequest::JoinRoom {
            code,
            name,
            previous_player_id,
        } => {
            let mut registry = state.registry.lock().await;
            Some(
                registry
                    .join_room(conn_id, code, &name, previous_player_id, event_tx.clone())
                    .await,
            )
        }
        other => {
            let action = match other {
                ClientRequest::StartGame => RoomAction::StartGame,
                ClientRequest::SubmitDescription { text } => {
                    RoomAction::SubmitDescription { text }
                }
                ClientRequest::SubmitVote { target } => {
                    RoomAction::SubmitVote { target }
                }
                ClientRequest::SendChat { text } => RoomAction::SendChat { text },
                ClientRequest::StartNewGame => RoomAction::StartNewGame,
                ClientRequest::UpdateName { new_name } => {
                    RoomAction::UpdateName { new_name }
                }
                // Join variants were handled above.
                ClientRequest::CreateRoom { .. } | ClientRequest::JoinRoom { .. } => {
                    unreachable!("join requests handled above")
                }
            };
            let mut registry = state.registry.lock().await;
            match registry.perform(conn_id, action).await {
                Ok(()) => None,
                Err(err) => return send_error(conn, state, &err.to_string()).await,
            }
        }
    };

    if let Some(result) = joined {
        match result {
            Ok((code, player_id)) => {
                // The seat confirmation goes out before the state push
                // sitting in the event channel.
                let ack = ServerEvent::Joined { code, player_id };
                let text = state.codec.encode(&ack)?;
                conn.send(&text).await?;
            }
            Err(err) => return send_error(conn, state, &err.to_string()).await,
        }
    }
    Ok(())
}

async fn send_error(
    conn: &WebSocketConnection,
    state: &ServerState,
    message: &str,
) -> Result<(), WordspyError> {
    let event = ServerEvent::Error {
        message: message.to_string(),
    };
    let text = state.codec.encode(&event)?;
    conn.send(&text).await?;
    Ok(())
}
