use std::cmp::Ordering;
use std::collections::HashMap;

use super::adjacency::Adjacency;
use super::rank::Ranking;

/// Order the nodes of every rank to reduce edge crossings.
///
/// Rank 0 keeps input order. Every lower rank is sorted by the barycenter of
/// its neighbors in the rank above, ties broken by input order. Up to
/// `max_sweeps` extra up/down sweeps follow; a sweep is kept only when it
/// strictly lowers the crossing count. Nodes stay grouped by component.
pub fn order_layers(adj: &Adjacency, ranking: &Ranking, max_sweeps: usize) -> Vec<Vec<usize>> {
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); ranking.rank_count()];
    for (node, &rank) in ranking.ranks.iter().enumerate() {
        layers[rank].push(node);
    }
    for layer in &mut layers {
        layer.sort_by_key(|&n| (ranking.components[n], n));
    }

    for r in 1..layers.len() {
        reorder(&mut layers, r, r - 1, adj, ranking);
    }

    let mut best = count_crossings(&layers, adj);
    for pass in 0..max_sweeps {
        if best == 0 {
            break;
        }
        let mut candidate = layers.clone();
        for r in (0..candidate.len().saturating_sub(1)).rev() {
            reorder(&mut candidate, r, r + 1, adj, ranking);
        }
        for r in 1..candidate.len() {
            reorder(&mut candidate, r, r - 1, adj, ranking);
        }

        let crossings = count_crossings(&candidate, adj);
        tracing::debug!("ordering sweep {}: {} -> {} crossings", pass, best, crossings);
        if crossings >= best {
            break;
        }
        best = crossings;
        layers = candidate;
    }

    layers
}

/// Sort `layers[target]` by barycenter against `layers[fixed]`
fn reorder(layers: &mut [Vec<usize>], target: usize, fixed: usize, adj: &Adjacency, ranking: &Ranking) {
    let fixed_pos: HashMap<usize, f64> = layers[fixed]
        .iter()
        .enumerate()
        .map(|(i, &n)| (n, i as f64))
        .collect();

    let keys: HashMap<usize, f64> = layers[target]
        .iter()
        .enumerate()
        .map(|(current, &n)| {
            let key = barycenter(n, adj, &fixed_pos).unwrap_or(current as f64);
            (n, key)
        })
        .collect();

    layers[target].sort_by(|a, b| {
        ranking.components[*a]
            .cmp(&ranking.components[*b])
            .then_with(|| keys[a].partial_cmp(&keys[b]).unwrap_or(Ordering::Equal))
            .then_with(|| a.cmp(b))
    });
}

/// Mean position of a node's neighbors in the fixed layer
fn barycenter(node: usize, adj: &Adjacency, fixed_pos: &HashMap<usize, f64>) -> Option<f64> {
    let positions: Vec<f64> = adj
        .neighbors(node)
        .iter()
        .filter_map(|nb| fixed_pos.get(nb).copied())
        .collect();
    if positions.is_empty() {
        None
    } else {
        Some(positions.iter().sum::<f64>() / positions.len() as f64)
    }
}

/// Number of pairwise edge crossings between adjacent ranks
pub fn count_crossings(layers: &[Vec<usize>], adj: &Adjacency) -> usize {
    let mut total = 0usize;
    for l_idx in 0..layers.len().saturating_sub(1) {
        let lower_pos: HashMap<usize, usize> = layers[l_idx + 1]
            .iter()
            .enumerate()
            .map(|(i, &n)| (n, i))
            .collect();
        let mut edges: Vec<(usize, usize)> = Vec::new();
        for (sp, &src) in layers[l_idx].iter().enumerate() {
            for nb in adj.neighbors(src) {
                if let Some(&tp) = lower_pos.get(nb) {
                    edges.push((sp, tp));
                }
            }
        }
        for i in 0..edges.len() {
            for j in (i + 1)..edges.len() {
                let (ei0, ei1) = edges[i];
                let (ej0, ej1) = edges[j];
                if (ei0 < ej0 && ei1 > ej1) || (ei0 > ej0 && ei1 < ej1) {
                    total += 1;
                }
            }
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Device;
    use crate::topology::assemble::assemble;
    use crate::topology::rank::assign_ranks;
    use crate::topology::testing::{device, iface};

    fn layers_of(devices: &[Device], sweeps: usize) -> (Vec<Vec<usize>>, Adjacency) {
        let graph = assemble(devices).graph;
        let adj = Adjacency::build(&graph);
        let ranking = assign_ranks(&graph, &adj);
        (order_layers(&adj, &ranking, sweeps), adj)
    }

    /// Two roots whose children are listed in the "wrong" order
    fn crossed() -> Vec<Device> {
        vec![
            device("r1", vec![iface(1, "e0", Some(("c1", "e0")))]),
            device("r2", vec![iface(1, "e0", Some(("c2", "e0")))]),
            device("c2", vec![iface(1, "e0", Some(("r2", "e0")))]),
            device("c1", vec![iface(1, "e0", Some(("r1", "e0")))]),
        ]
    }

    /// core -> a -> x and core -> b -> y, with y listed before x
    fn fanout() -> Vec<Device> {
        vec![
            device(
                "core",
                vec![iface(1, "e1", Some(("a", "e0"))), iface(2, "e2", Some(("b", "e0")))],
            ),
            device("a", vec![iface(1, "e1", Some(("x", "e0")))]),
            device("b", vec![iface(1, "e1", Some(("y", "e0")))]),
            device("y", vec![]),
            device("x", vec![]),
        ]
    }

    #[test]
    fn test_barycenter_untangles_children() {
        let (layers, adj) = layers_of(&fanout(), 0);
        assert_eq!(layers, vec![vec![0], vec![1, 2], vec![4, 3]]);
        assert_eq!(count_crossings(&layers, &adj), 0);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let devices = vec![
            device(
                "hub",
                vec![
                    iface(1, "e1", Some(("leaf-b", "e0"))),
                    iface(2, "e2", Some(("leaf-a", "e0"))),
                ],
            ),
            device("leaf-a", vec![]),
            device("leaf-b", vec![]),
        ];
        let (layers, _) = layers_of(&devices, 4);
        // both leaves share barycenter 0.0, so input order decides
        assert_eq!(layers, vec![vec![0], vec![1, 2]]);
    }

    #[test]
    fn test_components_do_not_interleave() {
        let mut devices = crossed();
        devices.insert(1, device("solo", vec![]));
        let (layers, _) = layers_of(&devices, 4);
        // r1 and its child come before solo's component, r2's after
        assert_eq!(layers[0], vec![0, 1, 2]);
        assert_eq!(layers[1], vec![4, 3]);
    }

    #[test]
    fn test_count_crossings() {
        let (_, adj) = layers_of(&fanout(), 0);
        assert_eq!(count_crossings(&[vec![0], vec![1, 2], vec![3, 4]], &adj), 1);
        assert_eq!(count_crossings(&[vec![0], vec![1, 2], vec![4, 3]], &adj), 0);
        assert_eq!(count_crossings(&[], &adj), 0);
    }

    #[test]
    fn test_ordering_is_deterministic() {
        let devices = crate::telemetry::sample::sample_devices();
        let (first, _) = layers_of(&devices, 4);
        let (second, _) = layers_of(&devices, 4);
        assert_eq!(first, second);
    }
}
