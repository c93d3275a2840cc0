//! Common types used throughout qroute

use serde::{Deserialize, Serialize};

/// Node identifier within a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// An ordered sequence of distinct nodes joined by edges.
///
/// A path with fewer than 2 nodes means "no path".
pub type Path = Vec<NodeId>;

/// Optimization weights for the three QoS criteria.
///
/// Each component lies in [0, 1] and the triple conventionally sums to 1.0
/// (not enforced). Scores computed under different weights are not
/// comparable. Weights are always passed explicitly per call; the cost model
/// keeps no ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    /// Weight of the accumulated delay term (ms).
    pub delay: f64,
    /// Weight of the additive -ln(reliability) cost term.
    pub reliability: f64,
    /// Weight of the inverse-bandwidth resource term.
    pub resource: f64,
}

impl Weights {
    pub fn new(delay: f64, reliability: f64, resource: f64) -> Self {
        Self {
            delay,
            reliability,
            resource,
        }
    }

    /// Scale the triple so it sums to 1.0. A zero-sum triple falls back to
    /// the balanced default.
    pub fn normalized(delay: f64, reliability: f64, resource: f64) -> Self {
        let total = delay + reliability + resource;
        if total == 0.0 {
            return Self::default();
        }
        Self {
            delay: delay / total,
            reliability: reliability / total,
            resource: resource / total,
        }
    }
}

impl Default for Weights {
    /// Balanced profile: delay 0.33, reliability 0.33, resource 0.34.
    fn default() -> Self {
        Self {
            delay: 0.33,
            reliability: 0.33,
            resource: 0.34,
        }
    }
}

/// Cost breakdown for a path under a given weight triple.
///
/// Derived on demand, never stored. `score` is rounded to 4 decimal places,
/// `delay` to 2, `reliability` to 5; `bandwidth` is the integral bottleneck
/// capacity in Mbps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    /// Weighted total cost. Lower is better.
    pub score: f64,
    /// Accumulated delay in ms (links plus intermediate-node processing).
    pub delay: f64,
    /// Bottleneck bandwidth along the path, Mbps.
    pub bandwidth: u32,
    /// Multiplicative end-to-end reliability, in (0, 1].
    pub reliability: f64,
}

impl CostReport {
    /// Sentinel report for a degenerate path (fewer than 2 nodes, or a node
    /// pair with no edge between them).
    pub const NO_PATH: CostReport = CostReport {
        score: f64::INFINITY,
        delay: f64::INFINITY,
        bandwidth: 0,
        reliability: 0.0,
    };

    pub fn is_no_path(&self) -> bool {
        self.score.is_infinite()
    }
}

/// Raw per-path metrics for reporting and Pareto-style inspection.
///
/// Unlike [`CostReport`], `reliability` here is the plain multiplicative
/// product, not the log-cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathMetrics {
    /// Weighted score under the weights supplied at computation time.
    pub cost: f64,
    /// Accumulated delay in ms.
    pub delay: f64,
    /// Multiplicative end-to-end reliability.
    pub reliability: f64,
    /// Number of edges traversed.
    pub hops: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(42).to_string(), "42");
    }

    #[test]
    fn test_weights_normalized() {
        let w = Weights::normalized(2.0, 1.0, 1.0);
        assert!((w.delay - 0.5).abs() < 1e-12);
        assert!((w.reliability - 0.25).abs() < 1e-12);
        assert!((w.resource - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_weights_normalized_zero_sum_falls_back() {
        let w = Weights::normalized(0.0, 0.0, 0.0);
        assert_eq!(w, Weights::default());
    }

    #[test]
    fn test_no_path_sentinel() {
        let report = CostReport::NO_PATH;
        assert!(report.is_no_path());
        assert!(report.score.is_infinite());
        assert!(report.delay.is_infinite());
        assert_eq!(report.bandwidth, 0);
        assert_eq!(report.reliability, 0.0);
    }

    #[test]
    fn test_weights_serialization() {
        let w = Weights::new(0.8, 0.1, 0.1);
        let json = serde_json::to_string(&w).unwrap();
        let parsed: Weights = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, w);
    }
}
