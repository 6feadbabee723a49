use std::collections::HashSet;

use crate::models::*;

use super::links::dedupe_links;

/// Nodes and annotated edges for one device snapshot
#[derive(Debug, Clone, Default)]
pub struct TopologyGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl TopologyGraph {
    #[cfg(test)]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Graph plus the integrity findings gathered while building it
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub graph: TopologyGraph,
    pub warnings: Vec<TopologyWarning>,
}

impl From<&Device> for Node {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id.clone(),
            label: device.sys_name.clone(),
            device_class: device.device_type,
            device_sub_class: device.device_sub_type,
            ip: device.ip_address.clone(),
            status: device.status,
        }
    }
}

impl From<Link> for Edge {
    fn from(link: Link) -> Self {
        Self {
            label: speed_label(link.speed),
            weight: StrokeWeight::for_speed(link.speed),
            animated: !link.oper_status.is_up(),
            link,
        }
    }
}

/// "10.0 Gbps" style label for a speed in bits/sec
pub fn speed_label(speed: u64) -> String {
    format!("{:.1} Gbps", speed as f64 / 1e9)
}

/// Drop every record whose id already appeared earlier in the list
pub fn retain_first_occurrence(devices: &mut Vec<Device>) {
    let mut ids: HashSet<String> = HashSet::with_capacity(devices.len());
    devices.retain(|d| ids.insert(d.id.clone()));
}

/// Build the node and edge sets for a device snapshot.
///
/// One node per device id in input order. A repeated id keeps its first
/// occurrence and is reported as a warning.
pub fn assemble(devices: &[Device]) -> Assembly {
    let mut warnings = Vec::new();
    let mut ids: HashSet<&str> = HashSet::with_capacity(devices.len());
    let mut nodes = Vec::with_capacity(devices.len());

    for device in devices {
        if !ids.insert(device.id.as_str()) {
            tracing::warn!("Duplicate device id {} in snapshot, keeping first", device.id);
            warnings.push(TopologyWarning::DuplicateDevice { id: device.id.clone() });
            continue;
        }
        nodes.push(Node::from(device));
    }

    let link_set = dedupe_links(devices);
    warnings.extend(link_set.warnings);
    let edges = link_set.links.into_iter().map(Edge::from).collect();

    Assembly {
        graph: TopologyGraph { nodes, edges },
        warnings,
    }
}
