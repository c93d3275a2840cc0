//! Genetic solver configuration

use serde::{Deserialize, Serialize};

use qroute_core::{Result, RouteError};

/// Parameters of a genetic search. Defaults match the reference tuning for
/// dense 250-node networks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of individuals per generation.
    pub population_size: usize,
    /// Number of generations to evolve.
    pub generations: usize,
    /// Probability that a freshly bred child is mutated.
    pub mutation_rate: f64,
    /// Random walks longer than this are abandoned during initialization.
    pub max_path_len: usize,
    /// Fixed seed for replayable runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            generations: 50,
            mutation_rate: 0.1,
            max_path_len: 50,
            seed: None,
        }
    }
}

impl GaConfig {
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(RouteError::Config(
                "population_size must be positive".into(),
            ));
        }
        if self.generations == 0 {
            return Err(RouteError::Config("generations must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(RouteError::Config(
                "mutation_rate must lie in [0, 1]".into(),
            ));
        }
        if self.max_path_len < 2 {
            return Err(RouteError::Config(
                "max_path_len must allow at least one hop".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = GaConfig::default();
        config.population_size = 0;
        assert!(config.validate().is_err());

        let mut config = GaConfig::default();
        config.mutation_rate = 1.5;
        assert!(config.validate().is_err());

        let mut config = GaConfig::default();
        config.generations = 0;
        assert!(config.validate().is_err());

        let mut config = GaConfig::default();
        config.max_path_len = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: GaConfig = serde_json::from_str(r#"{"population_size": 10}"#).unwrap();
        assert_eq!(config.population_size, 10);
        assert_eq!(config.generations, 50);
        assert_eq!(config.mutation_rate, 0.1);
    }
}
