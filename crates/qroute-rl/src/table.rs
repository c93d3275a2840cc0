//! Sparse state-action value table

use std::collections::HashMap;

use qroute_core::NodeId;

/// Q-table mapping `(state, action)` node pairs to learned values.
///
/// The state-action space is large and mostly unvisited, so the table is a
/// sparse map: looking up a pair that was never written yields 0.0. One
/// table is owned exclusively by one solver instance; it is mutated during
/// training and read-only during extraction.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    values: HashMap<(NodeId, NodeId), f64>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learned value for taking `action` in `state`; 0.0 when unvisited.
    pub fn get(&self, state: NodeId, action: NodeId) -> f64 {
        self.values.get(&(state, action)).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, state: NodeId, action: NodeId, value: f64) {
        self.values.insert((state, action), value);
    }

    /// Highest value over the given actions from `state`; 0.0 when the
    /// action set is empty (the one-step lookahead of the TD update).
    pub fn max_over(&self, state: NodeId, actions: &[NodeId]) -> f64 {
        if actions.is_empty() {
            return 0.0;
        }
        actions
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Number of state-action pairs ever written.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
