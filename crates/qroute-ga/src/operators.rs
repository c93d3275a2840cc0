//! Genetic operators over candidate paths
//!
//! Both operators preserve path validity: a result that would introduce a
//! cycle, or that cannot be built at all, silently falls back to the
//! unmodified input. The fallback is never retried with fresh randomness,
//! which keeps runs replayable under a fixed seed.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use qroute_core::{Network, NodeId, Path};

/// Single-point crossover at a node interior to both parents.
///
/// Takes the first parent's prefix up to the splice point and the second
/// parent's suffix from it onward. Returns the first parent unchanged when
/// the parents share no interior node or the splice would repeat a node.
pub fn crossover(parent1: &[NodeId], parent2: &[NodeId], rng: &mut impl Rng) -> Path {
    let interior2 = interior(parent2);
    let common: Vec<NodeId> = interior(parent1)
        .iter()
        .filter(|n| interior2.contains(n))
        .copied()
        .collect();

    let Some(&splice) = common.choose(rng) else {
        return parent1.to_vec();
    };
    let (Some(i1), Some(i2)) = (
        parent1.iter().position(|&n| n == splice),
        parent2.iter().position(|&n| n == splice),
    ) else {
        return parent1.to_vec();
    };

    let mut child = parent1[..i1].to_vec();
    child.extend_from_slice(&parent2[i2..]);
    if has_duplicates(&child) {
        return parent1.to_vec();
    }
    child
}

/// Suffix-replacement mutation.
///
/// Picks a random interior index and reroutes from there to the destination
/// along the shortest path by hop count. The hop-count splice deliberately
/// ignores the QoS weights. Returns the input unchanged when the path is too
/// short to mutate, no reroute exists, or the splice would repeat a node.
pub fn mutate(network: &Network, path: &[NodeId], destination: NodeId, rng: &mut impl Rng) -> Path {
    if path.len() < 3 {
        return path.to_vec();
    }

    let idx = rng.gen_range(1..=path.len() - 2);
    let Some(tail) = network.shortest_hop_path(path[idx], destination) else {
        return path.to_vec();
    };

    let mut mutated = path[..idx].to_vec();
    mutated.extend_from_slice(&tail);
    if has_duplicates(&mutated) {
        return path.to_vec();
    }
    mutated
}

fn interior(path: &[NodeId]) -> &[NodeId] {
    if path.len() < 3 {
        &[]
    } else {
        &path[1..path.len() - 1]
    }
}

fn has_duplicates(path: &[NodeId]) -> bool {
    let mut seen = HashSet::with_capacity(path.len());
    path.iter().any(|n| !seen.insert(*n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qroute_core::generator::seeded_rng;
    use qroute_core::{LinkAttrs, NodeAttrs};

    fn ids(raw: &[u32]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId).collect()
    }

    fn attrs() -> (NodeAttrs, LinkAttrs) {
        (
            NodeAttrs {
                processing_delay: 1.0,
                reliability: 0.99,
            },
            LinkAttrs {
                delay: 5.0,
                bandwidth: 500.0,
                reliability: 0.99,
            },
        )
    }

    fn network(nodes: u32, links: &[(u32, u32)]) -> Network {
        let (node_attrs, link_attrs) = attrs();
        let mut net = Network::new();
        for i in 0..nodes {
            net.add_node(NodeId(i), node_attrs);
        }
        for &(a, b) in links {
            net.add_link(NodeId(a), NodeId(b), link_attrs).unwrap();
        }
        net
    }

    #[test]
    fn test_crossover_without_common_interior_returns_first_parent() {
        let mut rng = seeded_rng(Some(1));
        let p1 = ids(&[0, 1, 5]);
        let p2 = ids(&[0, 2, 5]);
        assert_eq!(crossover(&p1, &p2, &mut rng), p1);
    }

    #[test]
    fn test_crossover_splices_prefix_and_suffix() {
        let mut rng = seeded_rng(Some(1));
        // The only common interior node is 1.
        let p1 = ids(&[0, 1, 2, 5]);
        let p2 = ids(&[0, 3, 1, 4, 5]);
        assert_eq!(crossover(&p1, &p2, &mut rng), ids(&[0, 1, 4, 5]));
    }

    #[test]
    fn test_crossover_falls_back_on_cycle() {
        let mut rng = seeded_rng(Some(1));
        // Splicing at 1 would re-introduce node 0 from parent2's suffix.
        let p1 = ids(&[0, 1, 9]);
        let p2 = ids(&[5, 1, 0, 9]);
        assert_eq!(crossover(&p1, &p2, &mut rng), p1);
    }

    #[test]
    fn test_crossover_output_never_repeats_nodes() {
        let mut rng = seeded_rng(Some(7));
        let p1 = ids(&[0, 1, 2, 3, 9]);
        let p2 = ids(&[0, 4, 2, 5, 9]);
        for _ in 0..50 {
            let child = crossover(&p1, &p2, &mut rng);
            let unique: HashSet<NodeId> = child.iter().copied().collect();
            assert_eq!(child.len(), unique.len());
        }
    }

    #[test]
    fn test_mutate_short_path_unchanged() {
        let net = network(2, &[(0, 1)]);
        let mut rng = seeded_rng(Some(1));
        let path = ids(&[0, 1]);
        assert_eq!(mutate(&net, &path, NodeId(1), &mut rng), path);
    }

    #[test]
    fn test_mutate_unreachable_destination_unchanged() {
        // Node 9 exists but is isolated.
        let mut net = network(3, &[(0, 1), (1, 2)]);
        net.add_node(NodeId(9), attrs().0);
        let mut rng = seeded_rng(Some(1));
        let path = ids(&[0, 1, 2]);
        assert_eq!(mutate(&net, &path, NodeId(9), &mut rng), path);
    }

    #[test]
    fn test_mutate_reroutes_through_shortcut() {
        // Line 0-1-2-3 plus shortcut 1-3; splicing at index 1 shortens the
        // path, splicing at index 2 reproduces it.
        let net = network(4, &[(0, 1), (1, 2), (2, 3), (1, 3)]);
        let mut rng = seeded_rng(Some(3));
        let path = ids(&[0, 1, 2, 3]);

        let mut saw_shortcut = false;
        for _ in 0..50 {
            let mutated = mutate(&net, &path, NodeId(3), &mut rng);
            assert_eq!(mutated.first(), Some(&NodeId(0)));
            assert_eq!(mutated.last(), Some(&NodeId(3)));
            let unique: HashSet<NodeId> = mutated.iter().copied().collect();
            assert_eq!(mutated.len(), unique.len());
            for pair in mutated.windows(2) {
                assert!(net.link(pair[0], pair[1]).is_some());
            }
            if mutated == ids(&[0, 1, 3]) {
                saw_shortcut = true;
            }
        }
        assert!(saw_shortcut);
    }
}
