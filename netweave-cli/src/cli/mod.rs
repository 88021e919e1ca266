//! Command-line interface orchestration for the netweave optimizer.
//!
//! The CLI offers an `optimize` command that selects a spanning topology for
//! an edge-list network description, and a `route` command that answers
//! shortest-latency queries over the optimised topology.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, OptimizeCommand, RouteCommand, StrategyArg,
    render_summary, run_cli,
};
