use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::*;
use crate::telemetry::DeviceSource;
use crate::topology::{LayoutConfig, Snapshot};
use crate::ws::{Hub, TopologyRefreshedPayload};

/// Typed error for a device id that is not in the current snapshot.
#[derive(Debug)]
pub struct NotFoundError {
    pub resource: String,
    pub id: String,
}

impl NotFoundError {
    pub fn new(resource: &str, id: &str) -> Self {
        Self {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }
}

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} not found: {}", self.resource, self.id)
    }
}

impl std::error::Error for NotFoundError {}

/// Typed error for "no snapshot to show": the first load has not succeeded yet.
#[derive(Debug)]
pub struct TopologyUnavailable {
    pub reason: String,
}

impl std::fmt::Display for TopologyUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "topology not loaded: {}", self.reason)
    }
}

impl std::error::Error for TopologyUnavailable {}

#[derive(Default)]
struct SessionState {
    snapshot: Option<Arc<Snapshot>>,
    orientation: Orientation,
    last_error: Option<String>,
}

/// TopologySession owns the current snapshot and orientation, and implements
/// the refresh, toggle and select controls.
///
/// Snapshots are immutable; a refresh builds a new one and swaps it in.
pub struct TopologySession {
    source: Arc<dyn DeviceSource>,
    layout: LayoutConfig,
    state: RwLock<SessionState>,
    ws_hub: Option<Arc<Hub>>,
}

impl TopologySession {
    pub fn new(
        source: Arc<dyn DeviceSource>,
        layout: LayoutConfig,
        orientation: Orientation,
        ws_hub: Option<Arc<Hub>>,
    ) -> Self {
        Self {
            source,
            layout,
            state: RwLock::new(SessionState {
                orientation,
                ..Default::default()
            }),
            ws_hub,
        }
    }

    /// Re-fetch devices and rebuild graph and layout from scratch.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<RenderedTopology> {
        let devices = match self.source.fetch_devices().await {
            Ok(devices) => devices,
            Err(e) => {
                let message = format!("{:#}", e);
                tracing::warn!("Telemetry fetch from {} failed: {}", self.source.describe(), message);
                self.state.write().await.last_error = Some(message.clone());
                if let Some(hub) = &self.ws_hub {
                    hub.broadcast_refresh_failed(&message).await;
                }
                return Err(e.context("telemetry fetch failed"));
            }
        };

        let snapshot = Arc::new(Snapshot::build(devices, &self.layout));
        tracing::info!(
            "Topology refreshed: {} nodes, {} edges, {} ranks (revision {})",
            snapshot.graph.nodes.len(),
            snapshot.graph.edges.len(),
            snapshot.layering.rank_count(),
            snapshot.revision
        );
        let unresolved = snapshot.unresolved_targets();
        if !unresolved.is_empty() {
            tracing::warn!("Unresolved edge targets: {}", unresolved.join(", "));
        }

        let rendered = {
            let mut state = self.state.write().await;
            state.snapshot = Some(snapshot.clone());
            state.last_error = None;
            snapshot.render(state.orientation, &self.layout)
        };

        if let Some(hub) = &self.ws_hub {
            hub.broadcast_topology_refreshed(TopologyRefreshedPayload {
                revision: snapshot.revision,
                nodes: snapshot.graph.nodes.len(),
                edges: snapshot.graph.edges.len(),
                warnings: snapshot.warnings.len(),
            })
            .await;
        }

        Ok(rendered)
    }

    /// The current snapshot laid out in the current orientation
    pub async fn current(&self) -> Result<RenderedTopology> {
        let state = self.state.read().await;
        match &state.snapshot {
            Some(snapshot) => Ok(snapshot.render(state.orientation, &self.layout)),
            None => Err(TopologyUnavailable {
                reason: state
                    .last_error
                    .clone()
                    .unwrap_or_else(|| "loading".to_string()),
            }
            .into()),
        }
    }

    /// Flip the orientation and re-run coordinate and handle assignment.
    /// Ranks and in-rank order come from the existing snapshot.
    pub async fn toggle_orientation(&self) -> Result<RenderedTopology> {
        let (orientation, revision) = {
            let mut state = self.state.write().await;
            state.orientation = state.orientation.toggled();
            (state.orientation, state.snapshot.as_ref().map(|s| s.revision))
        };
        tracing::info!("Layout orientation set to {}", orientation.as_str());

        if let Some(hub) = &self.ws_hub {
            hub.broadcast_orientation_changed(orientation, revision).await;
        }

        self.current().await
    }

    pub async fn orientation(&self) -> Orientation {
        self.state.read().await.orientation
    }

    /// Resolve a node id to its full device record
    pub async fn select(&self, id: &str) -> Result<Device> {
        let snapshot = self.snapshot().await?;
        snapshot
            .find_device(id)
            .cloned()
            .ok_or_else(|| NotFoundError::new("device", id).into())
    }

    /// The devices behind the current snapshot
    pub async fn devices(&self) -> Result<Vec<Device>> {
        Ok(self.snapshot().await?.devices.clone())
    }

    async fn snapshot(&self) -> Result<Arc<Snapshot>> {
        let state = self.state.read().await;
        state.snapshot.clone().ok_or_else(|| {
            TopologyUnavailable {
                reason: state
                    .last_error
                    .clone()
                    .unwrap_or_else(|| "loading".to_string()),
            }
            .into()
        })
    }
}
