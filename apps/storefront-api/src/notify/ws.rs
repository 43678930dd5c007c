//! WebSocket endpoint for `/ws/notifications/`.
//!
//! ## Connection Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  client ──GET /ws/notifications/──► subscribe("user_notifications")     │
//! │                                     │                                   │
//! │                                     ▼ 101 Switching Protocols           │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  forward task:  bus receiver ──► outgoing queue                  │  │
//! │  │  ping task:     every 30s   ──► outgoing queue                   │  │
//! │  │  outgoing task: outgoing queue ──► socket sink                   │  │
//! │  │  receive loop:  Close / error / EOF → tear down, rest ignored    │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The subscription is taken before the upgrade completes, so anything
//! published after the handshake reaches the client.

use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};
use tokio::time::interval;
use tracing::{debug, info, warn};

use storefront_core::{Notification, USER_NOTIFICATIONS_TOPIC};

use crate::AppState;

/// Interval between keep-alive pings.
const PING_INTERVAL: Duration = Duration::from_secs(30);

/// Client frames are ignored, so keep them small.
const MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// WebSocket upgrade handler.
pub async fn notifications(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let rx = state.bus.subscribe(USER_NOTIFICATIONS_TOPIC).await;
    info!("New notification subscriber");

    ws.max_message_size(MAX_MESSAGE_SIZE)
        .on_upgrade(move |socket| handle_socket(socket, rx))
}

/// Handles one subscriber connection until it closes.
async fn handle_socket(socket: WebSocket, mut notifications: broadcast::Receiver<Notification>) {
    let (mut sender, mut receiver) = socket.split();
    let (outgoing_tx, mut outgoing_rx) = mpsc::channel::<Message>(16);

    // Outgoing message task
    let outgoing_handle = tokio::spawn(async move {
        while let Some(msg) = outgoing_rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    // Notification forwarding task
    let forward_tx = outgoing_tx.clone();
    let forward_handle = tokio::spawn(async move {
        loop {
            match notifications.recv().await {
                Ok(notification) => match serde_json::to_string(&notification) {
                    Ok(json) => {
                        if forward_tx.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!(?e, "Failed to encode notification"),
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Notification subscriber lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Ping task
    let ping_tx = outgoing_tx.clone();
    let ping_handle = tokio::spawn(async move {
        let mut ping_interval = interval(PING_INTERVAL);
        // First tick completes immediately
        ping_interval.tick().await;
        loop {
            ping_interval.tick().await;
            if ping_tx.send(Message::Ping(Default::default())).await.is_err() {
                break;
            }
        }
    });

    // Main receive loop
    loop {
        match receiver.next().await {
            Some(Ok(Message::Close(_))) => {
                info!("Subscriber requested close");
                break;
            }
            Some(Ok(Message::Text(_) | Message::Binary(_))) => {
                debug!("Ignoring client frame");
            }
            // Pings are answered by the protocol layer
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
            Some(Err(e)) => {
                warn!(?e, "WebSocket error");
                break;
            }
            None => {
                info!("Subscriber disconnected");
                break;
            }
        }
    }

    // Cleanup
    ping_handle.abort();
    forward_handle.abort();
    outgoing_handle.abort();
}
