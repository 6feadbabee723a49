use std::collections::HashMap;

use super::assemble::TopologyGraph;

/// Index-based view of a topology graph used by the layout passes.
///
/// Node `i` is `graph.nodes[i]`. Edges with an endpoint outside the node set
/// are left out.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    neighbors: Vec<Vec<usize>>,
    inbound: Vec<usize>,
}

impl Adjacency {
    pub fn build(graph: &TopologyGraph) -> Self {
        let index: HashMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();
        let mut neighbors = vec![Vec::new(); graph.nodes.len()];
        let mut inbound = vec![0; graph.nodes.len()];

        for edge in &graph.edges {
            let (Some(&src), Some(&tgt)) = (
                index.get(edge.link.source.as_str()),
                index.get(edge.link.target.as_str()),
            ) else {
                continue;
            };
            neighbors[src].push(tgt);
            neighbors[tgt].push(src);
            inbound[tgt] += 1;
        }

        Self { neighbors, inbound }
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Undirected neighbors in edge insertion order
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.neighbors[node]
    }

    /// Number of edges declared towards this node by another device
    pub fn inbound(&self, node: usize) -> usize {
        self.inbound[node]
    }
}
