//! Q-learning solver configuration

use serde::{Deserialize, Serialize};

use qroute_core::{Result, RouteError};

/// Parameters of a Q-learning run. Defaults match the reference tuning for
/// dense 250-node networks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    /// Number of training episodes.
    pub episodes: usize,
    /// Learning rate: how strongly new information overwrites old values.
    pub alpha: f64,
    /// Discount factor for future rewards.
    pub gamma: f64,
    /// Exploration rate of the epsilon-greedy policy.
    pub epsilon: f64,
    /// Step cap per training episode; bounds cycling policies.
    pub max_steps: usize,
    /// Step cap for greedy path extraction.
    pub max_extraction_steps: usize,
    /// Greedy-path evaluation interval (episodes) for the convergence
    /// history.
    pub eval_interval: usize,
    /// Bandwidth admission threshold, Mbps: links below it are removed from
    /// the learning graph before training starts.
    pub min_bandwidth: Option<f64>,
    /// Fixed seed for replayable runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            episodes: 3000,
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
            max_steps: 50,
            max_extraction_steps: 100,
            eval_interval: 100,
            min_bandwidth: None,
            seed: None,
        }
    }
}

impl QLearningConfig {
    pub fn validate(&self) -> Result<()> {
        if self.episodes == 0 {
            return Err(RouteError::Config("episodes must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.alpha) || self.alpha == 0.0 {
            return Err(RouteError::Config("alpha must lie in (0, 1]".into()));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(RouteError::Config("gamma must lie in [0, 1]".into()));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(RouteError::Config("epsilon must lie in [0, 1]".into()));
        }
        if self.max_steps == 0 || self.max_extraction_steps == 0 {
            return Err(RouteError::Config("step caps must be positive".into()));
        }
        if self.eval_interval == 0 {
            return Err(RouteError::Config("eval_interval must be positive".into()));
        }
        Ok(())
    }
}
