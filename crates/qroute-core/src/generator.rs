//! Synthetic topology generation
//!
//! In-memory Erdős–Rényi topologies with QoS attributes drawn uniformly
//! from configurable ranges, plus random traffic demands. Used by tests,
//! benchmarks, and example harnesses; production graphs come from the
//! hosting application.

use std::collections::{HashSet, VecDeque};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::network::{LinkAttrs, Network, NodeAttrs};
use crate::types::NodeId;

/// Build a [`StdRng`], seeded for replayable runs when a seed is given.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Parameters for the Erdős–Rényi topology generator.
///
/// All attribute ranges are inclusive. Defaults reproduce the reference
/// scenario: a dense 250-node network.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    pub nodes: u32,
    /// Probability that any node pair is linked.
    pub edge_probability: f64,
    /// Node processing delay range, ms.
    pub processing_delay_ms: (f64, f64),
    pub node_reliability: (f64, f64),
    /// Link propagation delay range, ms (integral draws).
    pub link_delay_ms: (u32, u32),
    /// Link capacity range, Mbps (integral draws).
    pub bandwidth_mbps: (u32, u32),
    pub link_reliability: (f64, f64),
    pub seed: Option<u64>,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            nodes: 250,
            edge_probability: 0.4,
            processing_delay_ms: (0.5, 2.0),
            node_reliability: (0.95, 0.999),
            link_delay_ms: (3, 15),
            bandwidth_mbps: (100, 1000),
            link_reliability: (0.95, 0.999),
            seed: None,
        }
    }
}

impl TopologyConfig {
    /// Generate a network. When the raw draw is disconnected, only the
    /// largest connected component is kept (node ids are preserved).
    pub fn generate(&self) -> Network {
        let mut rng = seeded_rng(self.seed);
        let mut net = Network::new();

        for i in 0..self.nodes {
            let (lo, hi) = self.processing_delay_ms;
            let processing_delay = round_dp(rng.gen_range(lo..=hi), 2);
            let (lo, hi) = self.node_reliability;
            let reliability = round_dp(rng.gen_range(lo..=hi), 4);
            net.add_node(
                NodeId(i),
                NodeAttrs {
                    processing_delay,
                    reliability,
                },
            );
        }

        for a in 0..self.nodes {
            for b in (a + 1)..self.nodes {
                if rng.gen::<f64>() >= self.edge_probability {
                    continue;
                }
                let bandwidth =
                    rng.gen_range(self.bandwidth_mbps.0..=self.bandwidth_mbps.1) as f64;
                let delay = rng.gen_range(self.link_delay_ms.0..=self.link_delay_ms.1) as f64;
                let (lo, hi) = self.link_reliability;
                let reliability = round_dp(rng.gen_range(lo..=hi), 4);
                let _ = net.add_link(
                    NodeId(a),
                    NodeId(b),
                    LinkAttrs {
                        delay,
                        bandwidth,
                        reliability,
                    },
                );
            }
        }

        let connected = largest_component(&net);
        if connected.node_count() < net.node_count() {
            warn!(
                kept = connected.node_count(),
                drawn = net.node_count(),
                "generated graph was disconnected; keeping largest component"
            );
        }
        debug!(
            nodes = connected.node_count(),
            links = connected.link_count(),
            "topology generated"
        );
        connected
    }
}

/// A traffic demand between two distinct nodes with a minimum bandwidth
/// requirement, Mbps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Demand {
    pub src: NodeId,
    pub dst: NodeId,
    pub bandwidth: f64,
}

/// Draw `count` random demands over distinct node pairs. Bandwidth demands
/// are drawn from the reference tiers {50, 100, 200, 500} Mbps. Empty when
/// the network has fewer than 2 nodes.
pub fn random_demands(net: &Network, count: usize, rng: &mut StdRng) -> Vec<Demand> {
    const TIERS: [f64; 4] = [50.0, 100.0, 200.0, 500.0];

    let ids = net.node_ids();
    if ids.len() < 2 {
        return Vec::new();
    }

    let mut demands = Vec::with_capacity(count);
    while demands.len() < count {
        let Some(&src) = ids.choose(rng) else { break };
        let Some(&dst) = ids.choose(rng) else { break };
        if src == dst {
            continue;
        }
        let Some(&bandwidth) = TIERS.choose(rng) else { break };
        demands.push(Demand {
            src,
            dst,
            bandwidth,
        });
    }
    demands
}

fn round_dp(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}

fn largest_component(net: &Network) -> Network {
    let ids = net.node_ids();
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut best: Vec<NodeId> = Vec::new();

    for &start in &ids {
        if seen.contains(&start) {
            continue;
        }
        let mut component = vec![start];
        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(u) = queue.pop_front() {
            for v in net.neighbors(u) {
                if seen.insert(v) {
                    component.push(v);
                    queue.push_back(v);
                }
            }
        }
        if component.len() > best.len() {
            best = component;
        }
    }

    if best.len() == ids.len() {
        return net.clone();
    }

    let keep: HashSet<NodeId> = best.iter().copied().collect();
    let mut out = Network::new();
    for &id in &best {
        if let Some(attrs) = net.node(id) {
            out.add_node(id, *attrs);
        }
    }
    for (a, b, attrs) in net.links() {
        if keep.contains(&a) && keep.contains(&b) {
            let _ = out.add_link(a, b, attrs);
        }
    }
    out
}
