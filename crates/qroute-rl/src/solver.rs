//! Q-learning path solver
//!
//! Training walks the network episodically under an epsilon-greedy policy,
//! accumulating per-step weighted cost and paying a sparse inverse-cost
//! reward on arrival. Extraction replays the learned table greedily with
//! revisits forbidden. All randomness comes from the solver-owned seedable
//! RNG, so runs with the same seed replay exactly.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use qroute_core::generator::seeded_rng;
use qroute_core::{Network, NodeId, Path, Result, RouteError, Weights};

use crate::config::QLearningConfig;
use crate::table::QTable;

/// Terminal reward numerator: reaching the destination pays
/// `1000 / accumulated_cost`, so cheaper completed paths pay more.
const GOAL_REWARD: f64 = 1000.0;

/// Fixed penalty per non-terminal step, discouraging long episodes.
const STEP_PENALTY: f64 = -0.1;

/// Single-agent Q-learning over one source/destination query.
pub struct QLearningSolver<'a> {
    network: &'a Network,
    /// Bandwidth-admitted learning graph, present when the configuration
    /// sets a threshold. Training and extraction walk this graph; the full
    /// network is only used to price evaluation paths.
    filtered: Option<Network>,
    src: NodeId,
    dst: NodeId,
    weights: Weights,
    config: QLearningConfig,
    table: QTable,
    rng: StdRng,
}

impl<'a> QLearningSolver<'a> {
    /// Create a solver for one query. The endpoints must be distinct nodes
    /// of the network and the configuration must validate.
    pub fn new(
        network: &'a Network,
        src: NodeId,
        dst: NodeId,
        weights: Weights,
        config: QLearningConfig,
    ) -> Result<Self> {
        config.validate()?;
        if !network.contains(src) {
            return Err(RouteError::NodeNotFound(src));
        }
        if !network.contains(dst) {
            return Err(RouteError::NodeNotFound(dst));
        }
        if src == dst {
            return Err(RouteError::InvalidQuery(format!(
                "source and destination are both {src}"
            )));
        }

        let filtered = config.min_bandwidth.map(|threshold| network.filtered(threshold));
        let rng = seeded_rng(config.seed);
        Ok(Self {
            network,
            filtered,
            src,
            dst,
            weights,
            config,
            table: QTable::new(),
            rng,
        })
    }

    /// The learned state-action values.
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Train the agent for the configured number of episodes.
    ///
    /// Returns the convergence history: every `eval_interval` episodes the
    /// current greedy path is extracted and its true weighted cost recorded.
    /// A failed extraction records 0.0, keeping the series plottable.
    pub fn train(&mut self) -> Vec<f64> {
        let weights = self.weights;
        let (src, dst) = (self.src, self.dst);
        let episodes = self.config.episodes;
        let max_steps = self.config.max_steps;
        let eval_interval = self.config.eval_interval;
        let (alpha, gamma, epsilon) = (self.config.alpha, self.config.gamma, self.config.epsilon);

        info!(%src, %dst, episodes, "q-learning training started");

        let mut history = Vec::new();

        for episode in 0..episodes {
            let mut state = src;
            let mut accumulated = 0.0;
            let mut steps = 0;

            // Revisits are allowed while learning; only the step cap bounds
            // a cycling policy.
            while state != dst && steps < max_steps {
                let graph = match &self.filtered {
                    Some(g) => g,
                    None => self.network,
                };
                let neighbors = graph.neighbors(state);
                if neighbors.is_empty() {
                    break;
                }

                let action = if self.rng.gen::<f64>() < epsilon {
                    let Some(&choice) = neighbors.choose(&mut self.rng) else {
                        break;
                    };
                    choice
                } else {
                    let max_q = neighbors
                        .iter()
                        .map(|&n| self.table.get(state, n))
                        .fold(f64::NEG_INFINITY, f64::max);
                    let ties: Vec<NodeId> = neighbors
                        .iter()
                        .copied()
                        .filter(|&n| self.table.get(state, n) == max_q)
                        .collect();
                    let Some(&choice) = ties.choose(&mut self.rng) else {
                        break;
                    };
                    choice
                };

                accumulated += graph.step_cost(state, action, &weights).unwrap_or(0.0);

                let reward = if action == dst {
                    if accumulated > 0.0 {
                        GOAL_REWARD / accumulated
                    } else {
                        GOAL_REWARD
                    }
                } else {
                    STEP_PENALTY
                };

                let old_q = self.table.get(state, action);
                let next_max = self.table.max_over(action, &graph.neighbors(action));
                let new_q = old_q + alpha * (reward + gamma * next_max - old_q);
                self.table.set(state, action, new_q);

                state = action;
                steps += 1;
            }

            if episode % eval_interval == 0 {
                let path = self.extract_path();
                let score = self.network.path_cost(&path, &weights).score;
                debug!(episode, score, "greedy path evaluated");
                history.push(if score.is_finite() { score } else { 0.0 });
            }
        }

        info!(entries = self.table.len(), "q-learning training finished");
        history
    }

    /// Greedy path extraction from the current table, no exploration.
    ///
    /// Walks from the source choosing the unvisited neighbor with the
    /// highest learned value (first maximum wins), stopping at the
    /// destination, at a dead end, or at the extraction step cap. The
    /// returned path may end short of the destination; see [`best_path`]
    /// for the checked variant.
    ///
    /// [`best_path`]: QLearningSolver::best_path
    pub fn extract_path(&self) -> Path {
        let graph = match &self.filtered {
            Some(g) => g,
            None => self.network,
        };

        let mut path = vec![self.src];
        let mut visited = HashSet::from([self.src]);
        let mut state = self.src;
        let mut steps = 0;

        while state != self.dst && steps < self.config.max_extraction_steps {
            let neighbors: Vec<NodeId> = graph
                .neighbors(state)
                .into_iter()
                .filter(|n| !visited.contains(n))
                .collect();
            let Some(&first) = neighbors.first() else {
                break;
            };

            let mut action = first;
            let mut best_q = self.table.get(state, first);
            for &candidate in &neighbors[1..] {
                let q = self.table.get(state, candidate);
                if q > best_q {
                    best_q = q;
                    action = candidate;
                }
            }

            state = action;
            path.push(state);
            visited.insert(state);
            steps += 1;
        }

        path
    }

    /// The extracted greedy path, or `None` when it fails to reach the
    /// destination.
    pub fn best_path(&self) -> Option<Path> {
        let path = self.extract_path();
        (path.len() >= 2 && path.last() == Some(&self.dst)).then_some(path)
    }
}
