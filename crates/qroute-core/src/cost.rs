//! Multi-criteria QoS cost model
//!
//! Pure path-level accumulation over the network's per-link and per-node
//! attributes under an explicit weight triple:
//!
//! - delay: sum of link delays plus the processing delay of every
//!   intermediate node (endpoints are not "processed"),
//! - reliability: `-ln r` summed over links and intermediate nodes, turning
//!   the multiplicative reliability into an additive cost term,
//! - resource: `1000 / bandwidth` per link, with the bottleneck bandwidth
//!   tracked alongside.
//!
//! `score = w_delay * delay + w_reliability * relCost + w_resource * resCost`

use crate::network::Network;
use crate::types::{CostReport, NodeId, PathMetrics, Weights};

fn round_dp(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}

impl Network {
    /// Weighted cost and breakdown of a path.
    ///
    /// A degenerate path (fewer than 2 nodes, or consecutive nodes with no
    /// edge between them) yields [`CostReport::NO_PATH`].
    pub fn path_cost(&self, path: &[NodeId], weights: &Weights) -> CostReport {
        if path.len() < 2 {
            return CostReport::NO_PATH;
        }

        let mut total_delay = 0.0;
        let mut rel_cost = 0.0;
        let mut res_cost = 0.0;
        let mut reliability = 1.0;
        let mut min_bandwidth = f64::INFINITY;

        for i in 0..path.len() - 1 {
            let (u, v) = (path[i], path[i + 1]);
            let Some(link) = self.link(u, v).copied() else {
                return CostReport::NO_PATH;
            };

            total_delay += link.delay;
            if link.reliability > 0.0 {
                rel_cost -= link.reliability.ln();
                reliability *= link.reliability;
            }
            if link.bandwidth > 0.0 {
                res_cost += 1000.0 / link.bandwidth;
                if link.bandwidth < min_bandwidth {
                    min_bandwidth = link.bandwidth;
                }
            }

            // Intermediate nodes only: the source (i == 0) and the
            // destination never contribute processing terms.
            if i > 0 {
                if let Some(hop) = self.node(u) {
                    total_delay += hop.processing_delay;
                    if hop.reliability > 0.0 {
                        rel_cost -= hop.reliability.ln();
                        reliability *= hop.reliability;
                    }
                }
            }
        }

        let score = weights.delay * total_delay
            + weights.reliability * rel_cost
            + weights.resource * res_cost;

        CostReport {
            score: round_dp(score, 4),
            delay: round_dp(total_delay, 2),
            bandwidth: if min_bandwidth.is_finite() {
                min_bandwidth as u32
            } else {
                0
            },
            reliability: round_dp(reliability, 5),
        }
    }

    /// Raw metrics of a path for reporting: weighted score, delay,
    /// multiplicative reliability, and hop count.
    ///
    /// `None` for an empty path or a path referencing a missing edge.
    pub fn path_metrics(&self, path: &[NodeId], weights: &Weights) -> Option<PathMetrics> {
        if path.is_empty() {
            return None;
        }

        let mut total_delay = 0.0;
        let mut reliability = 1.0;

        for i in 0..path.len() - 1 {
            let (u, v) = (path[i], path[i + 1]);
            let link = self.link(u, v).copied()?;

            total_delay += link.delay;
            reliability *= link.reliability;
            if i > 0 {
                if let Some(hop) = self.node(u) {
                    total_delay += hop.processing_delay;
                    reliability *= hop.reliability;
                }
            }
        }

        Some(PathMetrics {
            cost: self.path_cost(path, weights).score,
            delay: round_dp(total_delay, 2),
            reliability: round_dp(reliability, 5),
            hops: path.len() - 1,
        })
    }

    /// Bottleneck bandwidth of a path, Mbps. `None` for a degenerate path.
    pub fn min_bandwidth(&self, path: &[NodeId]) -> Option<u32> {
        if path.len() < 2 {
            return None;
        }

        let mut min_bw = f64::INFINITY;
        for i in 0..path.len() - 1 {
            let link = self.link(path[i], path[i + 1])?;
            if link.bandwidth < min_bw {
                min_bw = link.bandwidth;
            }
        }

        min_bw.is_finite().then(|| min_bw as u32)
    }

    /// Weighted cost of traversing the single edge `from -> to`, as
    /// accumulated by the learning agent while it steps.
    ///
    /// The departing node's processing delay is charged on every step (the
    /// source included), and only the link's reliability enters the log-cost
    /// term. `None` when `(from, to)` is not an edge.
    pub fn step_cost(&self, from: NodeId, to: NodeId, weights: &Weights) -> Option<f64> {
        let link = self.link(from, to).copied()?;
        let node = self.node(from)?;

        let delay = link.delay + node.processing_delay;
        let rel_cost = if link.reliability > 0.0 {
            -link.reliability.ln()
        } else {
            0.0
        };
        let res_cost = if link.bandwidth > 0.0 {
            1000.0 / link.bandwidth
        } else {
            0.0
        };

        Some(weights.delay * delay + weights.reliability * rel_cost + weights.resource * res_cost)
    }
}
