//! qroute GA - genetic path solver
//!
//! Population-based search that evolves candidate source-to-destination
//! paths with validity-preserving crossover and mutation, scored by the
//! qroute-core cost model.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod operators;
pub mod solver;

pub use config::GaConfig;
pub use solver::{BestPath, GaOutcome, GeneticSolver};
