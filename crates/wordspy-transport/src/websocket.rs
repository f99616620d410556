//! WebSocket listener and connection using `tokio-tungstenite`.
//!
//! The wire format is JSON, so connections exchange text frames.
//! Binary frames are tolerated on receive (decoded as UTF-8 by the
//! protocol layer) to be forgiving towards clients.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;

use crate::{ConnectionId, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

type WsStream = tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>;

/// Listens for incoming WebSocket connections.
pub struct WebSocketListener {
    listener: TcpListener,
}

impl WebSocketListener {
    /// Binds a new listener to the given address.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::AcceptFailed)?;
        tracing::info!(addr, "WebSocket listener bound");
        Ok(Self { listener })
    }

    /// Returns the local address the listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Waits for and accepts the next incoming connection.
    pub async fn accept(&mut self) -> Result<WebSocketConnection, TransportError> {
        let (stream, addr) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        let ws = tokio_tungstenite::accept_async(stream).await.map_err(|e| {
            TransportError::AcceptFailed(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                e,
            ))
        })?;

        let id = ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(%id, %addr, "accepted WebSocket connection");

        Ok(WebSocketConnection {
            id,
            ws: Arc::new(Mutex::new(ws)),
        })
    }
}

/// A single WebSocket connection.
pub struct WebSocketConnection {
    id: ConnectionId,
    ws: Arc<Mutex<WsStream>>,
}

impl WebSocketConnection {
    /// Sends a text frame to the remote peer.
    pub async fn send(&self, text: &str) -> Result<(), TransportError> {
        use futures_util::SinkExt;
        let msg = Message::Text(text.to_string().into());
        self.ws.lock().await.send(msg).await.map_err(|e| {
            TransportError::SendFailed(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                e,
            ))
        })
    }

    /// Receives the next text payload from the remote peer.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    pub async fn recv(&self) -> Result<Option<String>, TransportError> {
        use futures_util::StreamExt;
        loop {
            let msg = self.ws.lock().await.next().await;
            match msg {
                Some(Ok(Message::Text(text))) => return Ok(Some(text.to_string())),
                Some(Ok(Message::Binary(data))) => {
                    match String::from_utf8(data.into()) {
                        Ok(text) => return Ok(Some(text)),
                        Err(_) => continue, // not JSON, drop the frame
                    }
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // skip ping/pong/frame
                Some(Err(e)) => {
                    return Err(TransportError::ReceiveFailed(std::io::Error::new(
                        std::io::ErrorKind::ConnectionReset,
                        e,
                    )));
                }
            }
        }
    }

    /// Closes the connection.
    pub async fn close(&self) -> Result<(), TransportError> {
        self.ws.lock().await.close(None).await.map_err(|e| {
            TransportError::SendFailed(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                e,
            ))
        })
    }

    /// Returns the unique identifier for this connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}
