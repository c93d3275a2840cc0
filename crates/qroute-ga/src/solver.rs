//! Genetic path solver
//!
//! One `solve()` call runs the full Initialize -> Evaluate -> Select ->
//! Reproduce loop for the configured generation count, then finalizes.
//! Every stochastic choice is drawn from the solver-owned seedable RNG, so
//! runs with the same seed replay exactly.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use qroute_core::generator::seeded_rng;
use qroute_core::{
    CostReport, Network, NodeId, Path, PathMetrics, Result, RouteError, Weights,
};

use crate::config::GaConfig;
use crate::operators::{crossover, mutate};

/// Best individual of a finished search.
#[derive(Debug, Clone, Serialize)]
pub struct BestPath {
    pub path: Path,
    pub report: CostReport,
}

/// Result of a full genetic search.
///
/// "No path found" is the `best: None` state; the search never signals
/// failure through errors.
#[derive(Debug, Clone, Serialize)]
pub struct GaOutcome {
    /// Lowest-cost individual ever seen across all generations. The final
    /// population is not guaranteed to still contain it.
    pub best: Option<BestPath>,
    /// Best score of each generation, for convergence inspection.
    pub history: Vec<f64>,
    /// Metric breakdown of the final population, for Pareto-style analysis.
    pub population: Vec<PathMetrics>,
}

/// Population-based path search between one source/destination pair.
pub struct GeneticSolver<'a> {
    network: &'a Network,
    src: NodeId,
    dst: NodeId,
    weights: Weights,
    config: GaConfig,
    rng: StdRng,
    population: Vec<Path>,
}

impl<'a> GeneticSolver<'a> {
    /// Create a solver for one query. The endpoints must be distinct nodes
    /// of the network and the configuration must validate.
    pub fn new(
        network: &'a Network,
        src: NodeId,
        dst: NodeId,
        weights: Weights,
        config: GaConfig,
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

        let rng = seeded_rng(config.seed);
        Ok(Self {
            network,
            src,
            dst,
            weights,
            config,
            rng,
            population: Vec::new(),
        })
    }

    /// Construct one random source-to-destination walk, never revisiting a
    /// node. `None` when the walk dead-ends or exceeds the length bound.
    fn random_path(&mut self) -> Option<Path> {
        let mut path = vec![self.src];
        let mut visited = HashSet::from([self.src]);
        let mut current = self.src;

        while current != self.dst {
            let choices: Vec<NodeId> = self
                .network
                .neighbors(current)
                .into_iter()
                .filter(|n| !visited.contains(n))
                .collect();
            if choices.is_empty() || path.len() > self.config.max_path_len {
                return None;
            }
            current = *choices.choose(&mut self.rng)?;
            path.push(current);
            visited.insert(current);
        }

        Some(path)
    }

    /// Run the evolutionary search to completion.
    pub fn solve(&mut self) -> GaOutcome {
        let network = self.network;
        let weights = self.weights;
        let target = self.config.population_size;

        info!(src = %self.src, dst = %self.dst, population = target, "genetic search started");

        self.population.clear();
        let mut attempts = 0;
        while self.population.len() < target && attempts < target * 50 {
            if let Some(path) = self.random_path() {
                self.population.push(path);
            }
            attempts += 1;
        }

        if self.population.is_empty() {
            info!(attempts, "no valid initial path could be constructed");
            return GaOutcome {
                best: None,
                history: Vec::new(),
                population: Vec::new(),
            };
        }
        debug!(size = self.population.len(), attempts, "initial population seeded");

        let mut best: Option<(Path, f64)> = None;
        let mut history = Vec::with_capacity(self.config.generations);

        for generation in 0..self.config.generations {
            if self.population.is_empty() {
                break;
            }

            // Evaluate and sort ascending: lower score is better.
            let mut scored: Vec<(f64, Path)> = self
                .population
                .drain(..)
                .map(|path| (network.path_cost(&path, &weights).score, path))
                .collect();
            scored.sort_by(|a, b| a.0.total_cmp(&b.0));

            // The per-generation best can regress after reproduction, so the
            // global best is tracked independently of the final population.
            let generation_best = scored[0].0;
            if best.as_ref().map_or(true, |(_, score)| generation_best < *score) {
                best = Some((scored[0].1.clone(), generation_best));
            }
            history.push(generation_best);
            debug!(generation, best_score = generation_best, "generation evaluated");

            // Elitism: the best half survives unmodified.
            let elite_len = scored.len() / 2;
            let elite: Vec<Path> = scored
                .into_iter()
                .take(elite_len)
                .map(|(_, path)| path)
                .collect();

            let mut next = elite.clone();
            while next.len() < target {
                if elite.len() < 2 {
                    break;
                }
                let (Some(p1), Some(p2)) = (
                    elite.choose(&mut self.rng),
                    elite.choose(&mut self.rng),
                ) else {
                    break;
                };
                let mut child = crossover(p1, p2, &mut self.rng);
                if self.rng.gen::<f64>() < self.config.mutation_rate {
                    child = mutate(network, &child, self.dst, &mut self.rng);
                }
                next.push(child);
            }
            self.population = next;
        }

        let population: Vec<PathMetrics> = self
            .population
            .iter()
            .filter_map(|path| network.path_metrics(path, &weights))
            .collect();
        let best = best.map(|(path, _)| {
            let report = network.path_cost(&path, &weights);
            BestPath { path, report }
        });

        match &best {
            Some(found) => info!(
                score = found.report.score,
                hops = found.path.len() - 1,
                "genetic search finished"
            ),
            None => info!("genetic search finished without a path"),
        }

        GaOutcome {
            best,
            history,
            population,
        }
    }
}
