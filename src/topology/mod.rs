//! Topology graph building and layered layout.
//!
//! Pipeline: device snapshot -> [`links::dedupe_links`] + node set
//! ([`assemble::assemble`]) -> [`layout::Layering`] (ranks and in-rank
//! order) -> [`layout::apply_layout`] (coordinates and handles for one
//! orientation).

pub mod adjacency;
pub mod assemble;
pub mod layout;
pub mod links;
pub mod order;
pub mod rank;

#[cfg(test)]
pub(crate) mod testing;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::*;

pub use assemble::TopologyGraph;
pub use layout::{LayoutConfig, Layering};

/// Snapshot is the immutable result of one refresh: the device list it was
/// built from, the graph, and the orientation-independent layering.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub revision: Uuid,
    pub fetched_at: DateTime<Utc>,
    pub devices: Vec<Device>,
    pub graph: TopologyGraph,
    pub layering: Layering,
    pub warnings: Vec<TopologyWarning>,
}

impl Snapshot {
    /// Build graph and layering for a device list
    pub fn build(mut devices: Vec<Device>, config: &LayoutConfig) -> Self {
        let assembly = assemble::assemble(&devices);
        assemble::retain_first_occurrence(&mut devices);
        let layering = Layering::compute(&assembly.graph, config);

        if !assembly.warnings.is_empty() {
            tracing::warn!(
                "Topology built with {} data-integrity warnings",
                assembly.warnings.len()
            );
        }

        Self {
            revision: Uuid::new_v4(),
            fetched_at: Utc::now(),
            devices,
            graph: assembly.graph,
            layering,
            warnings: assembly.warnings,
        }
    }

    /// Find the full device record behind a node id
    pub fn find_device(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// Targets of edges whose neighbor device is not in the snapshot
    pub fn unresolved_targets(&self) -> Vec<&str> {
        self.warnings
            .iter()
            .filter_map(|w| match w {
                TopologyWarning::DanglingNeighbor { target, .. } => Some(target.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Lay the snapshot out for `orientation` and build the renderer payload
    pub fn render(&self, orientation: Orientation, config: &LayoutConfig) -> RenderedTopology {
        let layout = layout::apply_layout(&self.graph, &self.layering, orientation, config);

        let nodes = self
            .graph
            .nodes
            .iter()
            .zip(&layout.positions)
            .enumerate()
            .map(|(index, (node, &position))| RenderNode {
                id: node.id.clone(),
                position,
                data: RenderNodeData {
                    label: node.label.clone(),
                    icon: node.device_class.icon(),
                    device_type: node.device_class,
                    ip: node.ip.clone(),
                    status: node.status,
                    rank: self.layering.rank_at(index),
                    order: self.layering.order_at(index),
                },
            })
            .collect();

        let edges = self
            .graph
            .edges
            .iter()
            .zip(&layout.handles)
            .map(|(edge, handles)| RenderEdge {
                id: edge.id(),
                source: edge.link.source.clone(),
                target: edge.link.target.clone(),
                source_handle: handles.source,
                target_handle: handles.target,
                animated: edge.animated,
                style: EdgeStyle {
                    stroke: if edge.link.oper_status.is_up() {
                        link_color::UP
                    } else {
                        link_color::DOWN
                    },
                    stroke_width: edge.weight.width(),
                },
                data: RenderEdgeData {
                    label: edge.label.clone(),
                    source_interface: edge.link.source_interface.clone(),
                    target_interface: edge.link.target_interface.clone(),
                    link_status: edge.link.oper_status,
                    link_speed: edge.link.speed,
                    weight: edge.weight,
                },
            })
            .collect();

        RenderedTopology {
            revision: self.revision,
            orientation,
            generated_at: Utc::now(),
            nodes,
            edges,
            warnings: self.warnings.clone(),
        }
    }
}
