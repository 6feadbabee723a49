use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::models::Orientation;

/// Event types for WebSocket messages
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    TopologyRefreshed,
    OrientationChanged,
    RefreshFailed,
}

/// WebSocket event message
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub payload: serde_json::Value,
}

/// Payload for topology refresh events
#[derive(Debug, Clone, Serialize)]
pub struct TopologyRefreshedPayload {
    pub revision: Uuid,
    pub nodes: usize,
    pub edges: usize,
    pub warnings: usize,
}

/// Payload for orientation change events
#[derive(Debug, Clone, Serialize)]
pub struct OrientationChangedPayload {
    pub orientation: Orientation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<Uuid>,
}

/// WebSocket hub manages connections and broadcasts events
pub struct Hub {
    tx: broadcast::Sender<String>,
    client_count: Arc<RwLock<usize>>,
}

impl Hub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self {
            tx,
            client_count: Arc::new(RwLock::new(0)),
        }
    }

    /// Broadcast an event to all connected clients
    pub async fn broadcast_event(&self, event: Event) {
        let data = match serde_json::to_string(&event) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Error serializing WebSocket event: {}", e);
                return;
            }
        };

        let count = *self.client_count.read().await;
        if count > 0 {
            if let Err(e) = self.tx.send(data) {
                tracing::warn!("Error broadcasting WebSocket event: {}", e);
            } else {
                tracing::debug!("Broadcasting {:?} to {} clients", event.event_type, count);
            }
        }
    }

    /// Broadcast a topology refreshed event
    pub async fn broadcast_topology_refreshed(&self, payload: TopologyRefreshedPayload) {
        self.broadcast_event(Event {
            event_type: EventType::TopologyRefreshed,
            payload: serde_json::to_value(payload).unwrap_or_default(),
        })
        .await;
    }

    /// Broadcast an orientation changed event
    pub async fn broadcast_orientation_changed(&self, orientation: Orientation, revision: Option<Uuid>) {
        self.broadcast_event(Event {
            event_type: EventType::OrientationChanged,
            payload: serde_json::to_value(OrientationChangedPayload { orientation, revision })
                .unwrap_or_default(),
        })
        .await;
    }

    /// Broadcast a failed refresh so renderers can offer a retry
    pub async fn broadcast_refresh_failed(&self, error: &str) {
        self.broadcast_event(Event {
            event_type: EventType::RefreshFailed,
            payload: serde_json::json!({ "error": error }),
        })
        .await;
    }

    /// Get the number of connected clients
    #[cfg(test)]
    pub async fn client_count(&self) -> usize {
        *self.client_count.read().await
    }

    /// Subscribe to events
    fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    async fn increment_clients(&self) {
        let mut count = self.client_count.write().await;
        *count += 1;
        tracing::info!("WebSocket client connected. Total clients: {}", *count);
    }

    async fn decrement_clients(&self) {
        let mut count = self.client_count.write().await;
        *count = count.saturating_sub(1);
        tracing::info!("WebSocket client disconnected. Total clients: {}", *count);
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}

/// WebSocket handler for axum
pub async fn ws_handler(ws: WebSocketUpgrade, State(hub): State<Arc<Hub>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

async fn handle_socket(socket: WebSocket, hub: Arc<Hub>) {
    let (mut sender, mut receiver) = socket.split();

    hub.increment_clients().await;

    let mut rx = hub.subscribe();

    let send_task = tokio::spawn(async move {
        while let Ok(msg) = rx.recv().await {
            if sender.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    // Client messages are ignored; reading keeps the connection alive
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            if msg.is_err() {
                break;
            }
        }
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    hub.decrement_clients().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_broadcast_without_clients_is_dropped() {
        let hub = Hub::new();
        let mut rx = hub.subscribe();
        hub.broadcast_refresh_failed("poller unreachable").await;
        assert!(rx.try_recv().is_err());
        assert_eq!(hub.client_count().await, 0);
    }

    #[tokio::test]
    async fn test_broadcast_reaches_subscribers() {
        let hub = Hub::new();
        let mut rx = hub.subscribe();
        hub.increment_clients().await;
        hub.broadcast_orientation_changed(Orientation::LeftRight, None).await;

        let msg: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(msg["type"], "orientation_changed");
        assert_eq!(msg["payload"]["orientation"], "LR");
        assert!(msg["payload"].get("revision").is_none());
    }
}
