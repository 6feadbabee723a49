use crate::models::*;

use super::adjacency::Adjacency;
use super::assemble::TopologyGraph;
use super::order::{count_crossings, order_layers};
use super::rank::assign_ranks;

/// Fixed node footprint used for spacing, regardless of rendered size
pub const NODE_WIDTH: f64 = 150.0;
pub const NODE_HEIGHT: f64 = 60.0;

/// Minimum gap between two nodes of the same rank
pub const MIN_NODE_SEP: f64 = 120.0;
/// Minimum gap between two ranks
pub const MIN_RANK_SEP: f64 = 150.0;
pub const DEFAULT_MARGIN: f64 = 20.0;
pub const DEFAULT_SWEEPS: usize = 4;

/// Spacing and ordering knobs for the layered layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub node_sep: f64,
    pub rank_sep: f64,
    pub margin: f64,
    pub sweeps: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_sep: MIN_NODE_SEP,
            rank_sep: MIN_RANK_SEP,
            margin: DEFAULT_MARGIN,
            sweeps: DEFAULT_SWEEPS,
        }
    }
}

impl LayoutConfig {
    /// Clamp spacing up to the minimums and reject non-finite values
    pub fn sanitized(self) -> Self {
        let clamp = |v: f64, min: f64| if v.is_finite() { v.max(min) } else { min };
        Self {
            node_sep: clamp(self.node_sep, MIN_NODE_SEP),
            rank_sep: clamp(self.rank_sep, MIN_RANK_SEP),
            margin: clamp(self.margin, 0.0),
            sweeps: self.sweeps,
        }
    }
}

/// Rank and in-rank order of every node.
///
/// Computed once per graph; orientation changes reuse it and only redo
/// coordinates and handles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layering {
    ranks: Vec<usize>,
    orders: Vec<usize>,
    layers: Vec<Vec<usize>>,
}

impl Layering {
    pub fn compute(graph: &TopologyGraph, config: &LayoutConfig) -> Self {
        let adj = Adjacency::build(graph);
        let ranking = assign_ranks(graph, &adj);
        let layers = order_layers(&adj, &ranking, config.sweeps);

        let mut orders = vec![0; adj.len()];
        for layer in &layers {
            for (order, &node) in layer.iter().enumerate() {
                orders[node] = order;
            }
        }
        tracing::debug!(
            "layered {} nodes into {} ranks ({} crossings)",
            adj.len(),
            layers.len(),
            count_crossings(&layers, &adj)
        );

        Self {
            ranks: ranking.ranks,
            orders,
            layers,
        }
    }

    /// Rank of `graph.nodes[index]`
    pub fn rank_at(&self, index: usize) -> usize {
        self.ranks[index]
    }

    /// In-rank order of `graph.nodes[index]`
    pub fn order_at(&self, index: usize) -> usize {
        self.orders[index]
    }

    /// Node indices of one rank, in drawing order
    #[cfg(test)]
    pub fn rank_members(&self, rank: usize) -> &[usize] {
        self.layers.get(rank).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn rank_count(&self) -> usize {
        self.layers.len()
    }

    /// Place every node for `orientation`. Entry `i` belongs to `graph.nodes[i]`.
    pub fn place(&self, orientation: Orientation, config: &LayoutConfig) -> Vec<Position> {
        self.ranks
            .iter()
            .zip(&self.orders)
            .map(|(&rank, &order)| position_for(rank, order, orientation, config))
            .collect()
    }
}

/// Top-left corner of the node at (rank, order).
///
/// Top-bottom maps rank to Y and order to X; left-right swaps the axes.
pub fn position_for(rank: usize, order: usize, orientation: Orientation, config: &LayoutConfig) -> Position {
    let (rank, order) = (rank as f64, order as f64);
    match orientation {
        Orientation::TopBottom => Position {
            x: config.margin + order * (NODE_WIDTH + config.node_sep),
            y: config.margin + rank * (NODE_HEIGHT + config.rank_sep),
        },
        Orientation::LeftRight => Position {
            x: config.margin + rank * (NODE_WIDTH + config.rank_sep),
            y: config.margin + order * (NODE_HEIGHT + config.node_sep),
        },
    }
}

/// Handle sides depend only on orientation, never on where the endpoints sit
pub fn handles_for(orientation: Orientation) -> EdgeHandles {
    match orientation {
        Orientation::TopBottom => EdgeHandles {
            source: HandleSide::Bottom,
            target: HandleSide::Top,
        },
        Orientation::LeftRight => EdgeHandles {
            source: HandleSide::Right,
            target: HandleSide::Left,
        },
    }
}

/// Positions and handles for one (graph, orientation) pair
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub orientation: Orientation,
    /// Aligned with `graph.nodes`
    pub positions: Vec<Position>,
    /// Aligned with `graph.edges`
    pub handles: Vec<EdgeHandles>,
}

/// Coordinate and handle assignment over an existing layering
pub fn apply_layout(
    graph: &TopologyGraph,
    layering: &Layering,
    orientation: Orientation,
    config: &LayoutConfig,
) -> LayoutResult {
    let handles = handles_for(orientation);
    LayoutResult {
        orientation,
        positions: layering.place(orientation, config),
        handles: vec![handles; graph.edges.len()],
    }
}
