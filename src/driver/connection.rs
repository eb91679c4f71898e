//! CDP WebSocket connection
//!
//! JSON-RPC transport to a single DevTools target: commands are correlated to
//! responses by id through a pending-command map, a spawned reader task owns
//! the receiving half of the socket, and every command waits with a bounded
//! timeout.

use super::types::{CdpNotification, CdpRequest, CdpResponse};
use crate::Error;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::{oneshot, Mutex};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsStream = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;
type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<CdpResponse>>>>;

/// Per-command response timeout
const COMMAND_TIMEOUT: tokio::time::Duration = tokio::time::Duration::from_secs(30);

/// WebSocket connection to one CDP target
#[derive(Debug)]
pub struct CdpConnection {
    /// Target WebSocket URL
    url: String,
    /// Sending half of the socket
    sink: Mutex<WsSink>,
    /// Pending commands (ID -> response sender)
    pending: PendingMap,
    /// Next command ID
    next_id: AtomicU64,
    /// Is connection active
    is_active: Arc<AtomicBool>,
}

impl CdpConnection {
    /// Connect to a CDP target
    ///
    /// # Arguments
    /// * `url` - target WebSocket URL (e.g. "ws://localhost:9222/devtools/page/ABC123")
    pub async fn connect<S: Into<String>>(url: S) -> Result<Arc<Self>, Error> {
        let url = url.into();
        info!("Connecting to CDP target: {}", url);

        let (ws_stream, _) = connect_async(&url)
            .await
            .map_err(|e| Error::websocket(format!("Failed to connect: {}", e)))?;

        let (sink, stream) = ws_stream.split();

        let connection = Arc::new(Self {
            url,
            sink: Mutex::new(sink),
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(1),
            is_active: Arc::new(AtomicBool::new(true)),
        });

        let pending = Arc::clone(&connection.pending);
        let is_active = Arc::clone(&connection.is_active);
        tokio::spawn(async move {
            Self::read_loop(stream, pending, is_active).await;
        });

        Ok(connection)
    }

    /// Send a CDP command and wait for its result
    ///
    /// CDP-level errors surface as `Error::Cdp`, a missing response within the
    /// command timeout as `Error::Timeout`.
    pub async fn send_command(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, Error> {
        if !self.is_active.load(Ordering::SeqCst) {
            return Err(Error::websocket("Connection is not active"));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);

        let request = CdpRequest {
            id,
            method: method.to_string(),
            params: if params.is_null() { None } else { Some(params) },
        };

        let json = serde_json::to_string(&request)?;
        debug!("Sending CDP command {}: {}", id, method);

        let (sender, receiver) = oneshot::channel();
        self.pending.lock().await.insert(id, sender);

        {
            let mut sink = self.sink.lock().await;
            if let Err(e) = sink.send(Message::Text(json)).await {
                self.pending.lock().await.remove(&id);
                return Err(Error::websocket(format!("Failed to send command: {}", e)));
            }
        }

        match tokio::time::timeout(COMMAND_TIMEOUT, receiver).await {
            Ok(Ok(response)) => {
                if let Some(error) = response.error {
                    return Err(Error::cdp(format!(
                        "{} failed: {} (code {})",
                        method, error.message, error.code
                    )));
                }
                Ok(response.result)
            }
            Ok(Err(_)) => Err(Error::websocket(format!(
                "Response channel closed for command {}",
                id
            ))),
            Err(_) => {
                self.pending.lock().await.remove(&id);
                Err(Error::timeout(format!("Command {} ({}) timed out", id, method)))
            }
        }
    }

    /// Close the connection
    pub async fn close(&self) -> Result<(), Error> {
        info!("Closing CDP connection to {}", self.url);
        self.is_active.store(false, Ordering::SeqCst);

        let mut sink = self.sink.lock().await;
        sink.send(Message::Close(None))
            .await
            .map_err(|e| Error::websocket(format!("Failed to close WebSocket: {}", e)))?;

        Ok(())
    }

    /// Check if connection is active
    pub fn is_active(&self) -> bool {
        self.is_active.load(Ordering::SeqCst)
    }

    /// Receive messages until the socket closes, routing responses to waiters
    async fn read_loop(mut stream: WsStream, pending: PendingMap, is_active: Arc<AtomicBool>) {
        while let Some(message) = stream.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    Self::dispatch_message(&text, &pending).await;
                }
                Ok(Message::Close(_)) => {
                    info!("CDP target closed the connection");
                    break;
                }
                Ok(_) => {
                    // Binary/ping/pong frames carry nothing for us
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
            }

            if !is_active.load(Ordering::SeqCst) {
                break;
            }
        }

        is_active.store(false, Ordering::SeqCst);

        // Fail any commands still waiting so callers do not hang until timeout
        pending.lock().await.clear();
    }

    /// Route one incoming frame to its pending command, or drop event noise
    async fn dispatch_message(text: &str, pending: &PendingMap) {
        if let Ok(response) = serde_json::from_str::<CdpResponse>(text) {
            let waiter = pending.lock().await.remove(&response.id);
            match waiter {
                Some(sender) => {
                    let _ = sender.send(response);
                }
                None => warn!("Response for unknown command ID {}", response.id),
            }
            return;
        }

        if let Ok(notification) = serde_json::from_str::<CdpNotification>(text) {
            debug!("Ignoring CDP event: {}", notification.method);
            return;
        }

        warn!("Unknown CDP message format: {}", text);
    }
}
