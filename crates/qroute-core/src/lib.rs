//! qroute Core - network model, QoS cost model, and shared types
//!
//! This crate provides the weighted network graph and the multi-criteria
//! cost model consumed by the qroute solvers.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::module_name_repetitions)]

pub mod cost;
pub mod error;
pub mod generator;
pub mod network;
pub mod types;

pub use error::{Result, RouteError};
pub use generator::{Demand, TopologyConfig};
pub use network::{LinkAttrs, Network, NodeAttrs};
pub use types::{CostReport, NodeId, Path, PathMetrics, Weights};
