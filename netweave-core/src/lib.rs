//! Netweave core library.
//!
//! The engine selects a minimum-cost spanning structure over a set of sites
//! and candidate links, optionally re-optimises that structure against a
//! blended cost/bandwidth objective, and answers shortest-latency routing
//! queries over the chosen structure.
//!
//! All entry points consume an immutable, pre-validated [`Network`]; nothing
//! in the engine performs I/O or holds state across calls.

mod builder;
mod network;
mod optimizer;
mod report;

pub mod objective;
pub mod refine;
pub mod routing;
pub mod spanning;

pub use crate::{
    builder::{OptimizerBuilder, Strategy},
    network::{Link, LinkId, Network, NetworkError, NetworkErrorCode, NodeKind},
    objective::ObjectiveWeights,
    optimizer::{OptimizeError, OptimizeErrorCode, Optimizer},
    refine::RefineConfig,
    report::OptimizationReport,
    routing::{Route, RouteError, RouteErrorCode},
    spanning::TreeSelection,
};
