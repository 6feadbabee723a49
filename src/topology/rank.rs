use std::collections::VecDeque;

use crate::models::DeviceSubClass;

use super::adjacency::Adjacency;
use super::assemble::TopologyGraph;

/// Layer index and connected component for every node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    pub ranks: Vec<usize>,
    pub components: Vec<usize>,
}

impl Ranking {
    pub fn rank_count(&self) -> usize {
        self.ranks.iter().max().map_or(0, |r| r + 1)
    }
}

/// Assign every node a rank: the BFS hop count to the nearest root of its
/// connected component. Each component is ranked on its own from 0.
pub fn assign_ranks(graph: &TopologyGraph, adj: &Adjacency) -> Ranking {
    let n = adj.len();
    let mut components = vec![usize::MAX; n];
    let mut ranks = vec![0; n];
    let mut component_count = 0;

    for start in 0..n {
        if components[start] != usize::MAX {
            continue;
        }
        let members = collect_component(adj, start, component_count, &mut components);
        let roots = select_roots(graph, adj, &members);

        tracing::debug!(
            "component {}: {} nodes, roots {:?}",
            component_count,
            members.len(),
            roots.iter().map(|&r| graph.nodes[r].id.as_str()).collect::<Vec<_>>()
        );

        let mut seen = vec![false; n];
        let mut queue = VecDeque::new();
        for &root in &roots {
            seen[root] = true;
            ranks[root] = 0;
            queue.push_back(root);
        }
        while let Some(node) = queue.pop_front() {
            for &next in adj.neighbors(node) {
                if !seen[next] {
                    seen[next] = true;
                    ranks[next] = ranks[node] + 1;
                    queue.push_back(next);
                }
            }
        }

        component_count += 1;
    }

    Ranking { ranks, components }
}

/// Flood-fill one component, returning its members in input order
fn collect_component(
    adj: &Adjacency,
    start: usize,
    id: usize,
    components: &mut [usize],
) -> Vec<usize> {
    let mut members = vec![start];
    let mut stack = vec![start];
    components[start] = id;
    while let Some(node) = stack.pop() {
        for &next in adj.neighbors(node) {
            if components[next] == usize::MAX {
                components[next] = id;
                members.push(next);
                stack.push(next);
            }
        }
    }
    members.sort_unstable();
    members
}

/// Rank-0 nodes of a component, first non-empty of: external networks,
/// core devices, nodes nobody declared a link towards, the first member.
fn select_roots(graph: &TopologyGraph, adj: &Adjacency, members: &[usize]) -> Vec<usize> {
    let pick = |pred: &dyn Fn(usize) -> bool| -> Vec<usize> {
        members.iter().copied().filter(|&m| pred(m)).collect()
    };

    let external = pick(&|m: usize| graph.nodes[m].device_class.is_external());
    if !external.is_empty() {
        return external;
    }
    let core = pick(&|m: usize| graph.nodes[m].device_sub_class == Some(DeviceSubClass::Core));
    if !core.is_empty() {
        return core;
    }
    let sources = pick(&|m: usize| adj.inbound(m) == 0);
    if !sources.is_empty() {
        return sources;
    }
    vec![members[0]]
}
