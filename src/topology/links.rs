use std::collections::{HashMap, HashSet};

use crate::models::*;

/// Output of link reconciliation: one link per device pair plus any integrity findings
#[derive(Debug, Clone, Default)]
pub struct LinkSet {
    pub links: Vec<Link>,
    pub warnings: Vec<TopologyWarning>,
}

/// Collapse per-interface neighbor declarations into physical links.
///
/// Devices and interfaces are walked in input order. The first interface that
/// mentions a device pair becomes the link's source side; every later mention
/// of the same pair, from either end, is ignored. A repeated device id only
/// counts once: later records with that id are neither walked nor used as peers.
pub fn dedupe_links(devices: &[Device]) -> LinkSet {
    let mut by_id: HashMap<&str, &Device> = HashMap::with_capacity(devices.len());
    for device in devices {
        by_id.entry(device.id.as_str()).or_insert(device);
    }

    let mut walked: HashSet<&str> = HashSet::with_capacity(devices.len());
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut set = LinkSet::default();

    for device in devices {
        if !walked.insert(device.id.as_str()) {
            continue;
        }
        for iface in &device.interfaces {
            let Some(neighbor) = iface.neighbor() else {
                continue;
            };

            if neighbor.device_id == device.id {
                tracing::warn!("{} {} declares itself as neighbor, skipping", device.id, iface.name);
                set.warnings.push(TopologyWarning::SelfLink {
                    device: device.id.clone(),
                    interface: iface.name.clone(),
                });
                continue;
            }

            if !seen.insert(canonical_pair(&device.id, neighbor.device_id)) {
                continue;
            }

            let reciprocal = by_id
                .get(neighbor.device_id)
                .and_then(|peer| peer.reciprocal_interface(&device.id, &iface.name));

            if !by_id.contains_key(neighbor.device_id) {
                tracing::warn!(
                    "{} {} references unknown device {}",
                    device.id,
                    iface.name,
                    neighbor.device_id
                );
                set.warnings.push(TopologyWarning::DanglingNeighbor {
                    source: device.id.clone(),
                    interface: iface.name.clone(),
                    target: neighbor.device_id.to_string(),
                });
            }

            let (target_interface, oper_status) = match reciprocal {
                Some(peer_iface) => {
                    let both_up = iface.oper_status.is_up() && peer_iface.oper_status.is_up();
                    let state = if both_up { LinkState::Up } else { LinkState::Down };
                    (peer_iface.name.clone(), state)
                }
                None => (neighbor.interface.to_string(), iface.oper_status),
            };

            set.links.push(Link {
                source: device.id.clone(),
                target: neighbor.device_id.to_string(),
                source_interface: iface.name.clone(),
                target_interface,
                speed: iface.speed,
                oper_status,
            });
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::testing::{device, iface};

    #[test]
    fn test_bidirectional_declaration_yields_one_link() {
        let devices = vec![
            device("A", vec![iface(1, "eth0", Some(("B", "eth0")))]),
            device("B", vec![iface(1, "eth0", Some(("A", "eth0")))]),
        ];
        let set = dedupe_links(&devices);
        assert_eq!(set.links.len(), 1);
        assert!(set.warnings.is_empty());

        let link = &set.links[0];
        assert_eq!(link.canonical_pair(), ("A", "B"));
        assert_eq!(link.source_interface, "eth0");
        assert_eq!(link.target_interface, "eth0");
        assert_eq!(link.oper_status, LinkState::Up);
    }

    #[test]
    fn test_first_declaration_wins() {
        let mut fast = iface(1, "Ten1/0/1", Some(("B", "Ten0/1")));
        fast.speed = 10_000_000_000;
        let devices = vec![
            device("A", vec![fast, iface(2, "Gi1/0/2", Some(("B", "Gi0/2")))]),
            device("B", vec![iface(1, "Gi0/2", Some(("A", "Gi1/0/2")))]),
        ];
        let set = dedupe_links(&devices);
        assert_eq!(set.links.len(), 1);
        assert_eq!(set.links[0].source_interface, "Ten1/0/1");
        assert_eq!(set.links[0].speed, 10_000_000_000);
        // no reciprocal points at Ten1/0/1, so the declared label is kept
        assert_eq!(set.links[0].target_interface, "Ten0/1");
    }

    #[test]
    fn test_reciprocal_name_overrides_declared_label() {
        let devices = vec![
            device("A", vec![iface(1, "eth0", Some(("B", "stale-name")))]),
            device("B", vec![iface(1, "port7", Some(("A", "eth0")))]),
        ];
        let set = dedupe_links(&devices);
        assert_eq!(set.links[0].target_interface, "port7");
    }

    #[test]
    fn test_oper_state_requires_both_sides_up() {
        let mut down = iface(1, "eth0", Some(("A", "eth0")));
        down.oper_status = LinkState::Down;
        let devices = vec![
            device("A", vec![iface(1, "eth0", Some(("B", "eth0")))]),
            device("B", vec![down]),
        ];
        let set = dedupe_links(&devices);
        assert_eq!(set.links[0].oper_status, LinkState::Down);
    }

    #[test]
    fn test_dangling_neighbor_still_links_and_warns() {
        let devices = vec![device("A", vec![iface(1, "eth0", Some(("ghost", "eth9")))])];
        let set = dedupe_links(&devices);
        assert_eq!(set.links.len(), 1);
        assert_eq!(set.links[0].target, "ghost");
        assert_eq!(set.links[0].target_interface, "eth9");
        assert_eq!(
            set.warnings,
            vec![TopologyWarning::DanglingNeighbor {
                source: "A".into(),
                interface: "eth0".into(),
                target: "ghost".into(),
            }]
        );
    }

    #[test]
    fn test_self_link_is_skipped() {
        let devices = vec![device("A", vec![iface(1, "lo", Some(("A", "lo")))])];
        let set = dedupe_links(&devices);
        assert!(set.links.is_empty());
        assert_eq!(set.warnings.len(), 1);
    }

    #[test]
    fn test_dedupe_is_idempotent_and_bounded() {
        let devices = crate::telemetry::sample::sample_devices();
        let first = dedupe_links(&devices);
        let second = dedupe_links(&devices);
        assert_eq!(first.links, second.links);

        let pairs: HashSet<(String, String)> = devices
            .iter()
            .flat_map(|d| {
                d.interfaces.iter().filter_map(move |i| {
                    let n = i.neighbor()?;
                    let (a, b) = canonical_pair(&d.id, n.device_id);
                    Some((a.to_string(), b.to_string()))
                })
            })
            .collect();
        assert_eq!(first.links.len(), pairs.len());
    }

    #[test]
    fn test_hyphenated_ids_do_not_collide() {
        // "a-b"+"c" and "a"+"b-c" join to the same string but are different pairs
        let devices = vec![
            device("a-b", vec![iface(1, "x", Some(("c", "y")))]),
            device("a", vec![iface(1, "x", Some(("b-c", "y")))]),
            device("c", vec![]),
            device("b-c", vec![]),
        ];
        assert_eq!(dedupe_links(&devices).links.len(), 2);
    }

    #[test]
    fn test_repeated_device_id_uses_first_record() {
        let mut kept = iface(1, "from-kept", Some(("A", "eth0")));
        kept.oper_status = LinkState::Down;
        let devices = vec![
            device("A", vec![iface(1, "eth0", Some(("B", "eth0")))]),
            device("B", vec![kept]),
            device(
                "B",
                vec![
                    iface(1, "from-dropped", Some(("A", "eth0"))),
                    iface(2, "p2", Some(("C", "p1"))),
                ],
            ),
            device("C", vec![]),
        ];
        let set = dedupe_links(&devices);
        assert_eq!(set.links.len(), 1);
        assert_eq!(set.links[0].target_interface, "from-kept");
        assert_eq!(set.links[0].oper_status, LinkState::Down);
        assert!(set.warnings.is_empty());
    }
}
