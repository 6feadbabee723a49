use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::devices::{DeviceClass, DeviceSubClass, HealthState, LinkState};

/// Link speed at or above which an edge is drawn bold (10 Gbps)
pub const BOLD_LINK_SPEED: u64 = 10_000_000_000;

/// Stroke colors keyed by link operational state
pub mod link_color {
    pub const UP: &str = "#22c55e";
    pub const DOWN: &str = "#ef4444";
}

/// Global axis mapping for the layered drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    #[serde(rename = "TB")]
    TopBottom,
    #[serde(rename = "LR")]
    LeftRight,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Orientation::TopBottom => Orientation::LeftRight,
            Orientation::LeftRight => Orientation::TopBottom,
        }
    }

    #[cfg(test)]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Orientation::LeftRight)
    }

    /// Parse "TB"/"LR" (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TB" | "TOP-BOTTOM" => Some(Orientation::TopBottom),
            "LR" | "LEFT-RIGHT" => Some(Orientation::LeftRight),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::TopBottom => "TB",
            Orientation::LeftRight => "LR",
        }
    }
}

/// Side of a node where an edge attaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    Top,
    Bottom,
    Left,
    Right,
}

/// Source/target attachment sides of one edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EdgeHandles {
    pub source: HandleSide,
    pub target: HandleSide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeWeight {
    Normal,
    Bold,
}

impl StrokeWeight {
    pub fn for_speed(speed: u64) -> Self {
        if speed >= BOLD_LINK_SPEED {
            StrokeWeight::Bold
        } else {
            StrokeWeight::Normal
        }
    }

    pub fn width(self) -> u32 {
        match self {
            StrokeWeight::Normal => 2,
            StrokeWeight::Bold => 3,
        }
    }
}

/// Node is the graph-layer view of one device
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub device_class: DeviceClass,
    pub device_sub_class: Option<DeviceSubClass>,
    pub ip: String,
    pub status: HealthState,
}

/// Link is one physical connection reconstructed from neighbor declarations.
///
/// `source` is the device whose interface was seen first; `target` is the
/// declared neighbor, which may be absent from the device list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub source_interface: String,
    pub target_interface: String,
    /// Bits/sec, taken from the declaring interface
    pub speed: u64,
    pub oper_status: LinkState,
}

impl Link {
    /// Device-id pair in lexicographic order, the dedup identity of a link
    pub fn canonical_pair(&self) -> (&str, &str) {
        canonical_pair(&self.source, &self.target)
    }

    /// Canonical pair key, e.g. "core-sw-01-dist-sw-01"
    #[cfg(test)]
    pub fn pair_key(&self) -> String {
        let (a, b) = self.canonical_pair();
        format!("{}-{}", a, b)
    }

    /// Renderer-facing edge id.
    ///
    /// The source id is length-prefixed, so ids that contain hyphens cannot
    /// join into the same string ("a-b"->"c" vs "a"->"b-c").
    pub fn id(&self) -> String {
        format!("e-{}-{}-{}", self.source.len(), self.source, self.target)
    }
}

/// Order two device ids lexicographically
pub fn canonical_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Edge is a link annotated with its rendering hints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    #[serde(flatten)]
    pub link: Link,
    pub label: String,
    pub weight: StrokeWeight,
    /// Set for faulted links
    pub animated: bool,
}

impl Edge {
    pub fn id(&self) -> String {
        self.link.id()
    }
}

/// Data-integrity findings produced while building the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopologyWarning {
    /// An interface points at a device id missing from the snapshot
    DanglingNeighbor {
        source: String,
        interface: String,
        target: String,
    },
    /// An interface declares its own device as neighbor
    SelfLink { device: String, interface: String },
    /// The snapshot carries the same device id more than once
    DuplicateDevice { id: String },
}

impl std::fmt::Display for TopologyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyWarning::DanglingNeighbor { source, interface, target } => {
                write!(f, "{} {} references unknown device {}", source, interface, target)
            }
            TopologyWarning::SelfLink { device, interface } => {
                write!(f, "{} {} declares itself as neighbor", device, interface)
            }
            TopologyWarning::DuplicateDevice { id } => write!(f, "duplicate device id {}", id),
        }
    }
}

/// Top-left corner of a node in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// RenderedTopology is the payload handed to the diagram renderer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedTopology {
    pub revision: Uuid,
    pub orientation: Orientation,
    pub generated_at: DateTime<Utc>,
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    pub warnings: Vec<TopologyWarning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderNode {
    pub id: String,
    pub position: Position,
    pub data: RenderNodeData,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNodeData {
    pub label: String,
    pub icon: &'static str,
    pub device_type: DeviceClass,
    pub ip: String,
    pub status: HealthState,
    pub rank: usize,
    pub order: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: HandleSide,
    pub target_handle: HandleSide,
    pub animated: bool,
    pub style: EdgeStyle,
    pub data: RenderEdgeData,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub stroke: &'static str,
    pub stroke_width: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderEdgeData {
    pub label: String,
    pub source_interface: String,
    pub target_interface: String,
    pub link_status: LinkState,
    pub link_speed: u64,
    pub weight: StrokeWeight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_toggle_and_parse() {
        assert_eq!(Orientation::TopBottom.toggled(), Orientation::LeftRight);
        assert_eq!(Orientation::LeftRight.toggled(), Orientation::TopBottom);
        assert_eq!(Orientation::parse("lr"), Some(Orientation::LeftRight));
        assert_eq!(Orientation::parse(" TB "), Some(Orientation::TopBottom));
        assert_eq!(Orientation::parse("diagonal"), None);
        assert_eq!(serde_json::to_string(&Orientation::LeftRight).unwrap(), r#""LR""#);
    }

    #[test]
    fn test_canonical_pair_key() {
        let link = Link {
            source: "dist-sw-01".into(),
            target: "core-sw-01".into(),
            source_interface: "Ten1/0/1".into(),
            target_interface: "Ten1/0/3".into(),
            speed: BOLD_LINK_SPEED,
            oper_status: LinkState::Up,
        };
        assert_eq!(link.canonical_pair(), ("core-sw-01", "dist-sw-01"));
        assert_eq!(link.pair_key(), "core-sw-01-dist-sw-01");
        assert_eq!(link.id(), "e-10-dist-sw-01-core-sw-01");
    }

    #[test]
    fn test_edge_id_is_unambiguous_for_hyphenated_ids() {
        let link = |source: &str, target: &str| Link {
            source: source.into(),
            target: target.into(),
            source_interface: "x".into(),
            target_interface: "y".into(),
            speed: 1_000_000_000,
            oper_status: LinkState::Up,
        };
        assert_eq!(link("a-b", "c").id(), "e-3-a-b-c");
        assert_eq!(link("a", "b-c").id(), "e-1-a-b-c");
    }

    #[test]
    fn test_stroke_weight_threshold() {
        assert_eq!(StrokeWeight::for_speed(1_000_000_000), StrokeWeight::Normal);
        assert_eq!(StrokeWeight::for_speed(BOLD_LINK_SPEED), StrokeWeight::Bold);
        assert_eq!(StrokeWeight::Bold.width(), 3);
    }
}
