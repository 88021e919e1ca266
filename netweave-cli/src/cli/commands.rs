//! Command implementations and argument parsing for the netweave CLI.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use netweave_core::{
    OptimizeError, Optimizer, OptimizerBuilder, RouteError, Strategy, routing,
};
use netweave_providers_edgelist::{EdgeListError, EdgeListNetwork};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "netweave", about = "Optimise and query network topologies.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Select a spanning topology for an edge-list network description.
    Optimize(OptimizeCommand),
    /// Compute the shortest-latency route over the optimised topology.
    Route(RouteCommand),
}

/// Options accepted by the `optimize` command.
#[derive(Debug, Args, Clone)]
pub struct OptimizeCommand {
    /// Path to the edge-list network description.
    pub path: PathBuf,

    /// Construction strategy to run.
    #[arg(long, value_enum, default_value = "sorted-edge-growth")]
    pub strategy: StrategyArg,

    /// Multi-objective cost weight.
    #[arg(long, default_value_t = 0.5)]
    pub cost_weight: f64,

    /// Multi-objective bandwidth weight.
    #[arg(long, default_value_t = 0.5)]
    pub bandwidth_weight: f64,

    /// Maximum number of hill-climbing passes.
    #[arg(long, default_value_t = 100)]
    pub iteration_cap: usize,

    /// Override name for the network (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Options accepted by the `route` command.
#[derive(Debug, Args, Clone)]
pub struct RouteCommand {
    /// Path to the edge-list network description.
    pub path: PathBuf,

    /// Label of the node the route starts at.
    #[arg(long)]
    pub from: String,

    /// Label of the node the route ends at.
    #[arg(long)]
    pub to: String,

    /// Construction strategy used to build the routed topology.
    #[arg(long, value_enum, default_value = "sorted-edge-growth")]
    pub strategy: StrategyArg,

    /// Override name for the network (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Construction strategies selectable on the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum StrategyArg {
    /// Grow a priority frontier outward from node 0.
    FrontierGrowth,
    /// Sweep the cost-sorted link table through a union-find.
    SortedEdgeGrowth,
    /// Rank links by the blended cost/bandwidth score, then sweep.
    MultiObjective,
    /// Seed with sorted-edge growth, then refine by hill climbing.
    HillClimbing,
}

impl StrategyArg {
    pub(super) fn to_strategy(self) -> Strategy {
        match self {
            Self::FrontierGrowth => Strategy::FrontierGrowth,
            Self::SortedEdgeGrowth => Strategy::SortedEdgeGrowth,
            Self::MultiObjective => Strategy::MultiObjective,
            Self::HillClimbing => Strategy::HillClimbing,
        }
    }

    pub(super) fn label(self) -> &'static str {
        match self {
            Self::FrontierGrowth => "frontier-growth",
            Self::SortedEdgeGrowth => "sorted-edge-growth",
            Self::MultiObjective => "multi-objective",
            Self::HillClimbing => "hill-climbing",
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input source.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Edge-list parsing failed.
    #[error(transparent)]
    Parse(#[from] EdgeListError),
    /// Optimisation failed.
    #[error(transparent)]
    Optimize(#[from] OptimizeError),
    /// Routing failed.
    #[error(transparent)]
    Route(#[from] RouteError),
    /// A route endpoint label was not declared in the network description.
    #[error("node label `{label}` is not declared in the network")]
    UnknownEndpoint {
        /// The unresolved label.
        label: String,
    },
}

impl CliError {
    /// Returns the stable error code of the wrapped failure, when one exists.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Io { .. } => None,
            Self::Parse(err) => Some(err.code().as_str()),
            Self::Optimize(err) => Some(err.code().as_str()),
            Self::Route(err) => Some(err.code().as_str()),
            Self::UnknownEndpoint { .. } => Some("UNKNOWN_ENDPOINT"),
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionSummary {
    /// Outcome of an `optimize` run.
    Optimize {
        /// Name reported for the network description.
        network: String,
        /// Strategy label that produced the selection.
        strategy: &'static str,
        /// One rendered `source -- target  cost  bandwidth` line per link.
        links: Vec<String>,
        /// Total installation cost of the selection.
        total_cost: f64,
        /// Average bandwidth across the selected links.
        average_bandwidth: f64,
    },
    /// Outcome of a `route` query.
    Route {
        /// Name reported for the network description.
        network: String,
        /// Node labels along the route, or `None` when no path exists.
        path: Option<Vec<String>>,
        /// Accumulated latency along the route.
        total_latency: Option<f64>,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, parsing, or execution fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use netweave_cli::cli::{Cli, Command, OptimizeCommand, StrategyArg, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(
///     file.path(),
///     "node a\nnode b\nlink a b 2.0 4.0\n",
/// )?;
/// let cli = Cli {
///     command: Command::Optimize(OptimizeCommand {
///         path: file.path().to_path_buf(),
///         strategy: StrategyArg::SortedEdgeGrowth,
///         cost_weight: 0.5,
///         bandwidth_weight: 0.5,
///         iteration_cap: 100,
///         name: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert!(matches!(summary, netweave_cli::cli::ExecutionSummary::Optimize { .. }));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Optimize(command) => {
            Span::current().record("command", field::display("optimize"));
            optimize_command(command)
        }
        Command::Route(command) => {
            Span::current().record("command", field::display("route"));
            route_command(command)
        }
    }
}

#[instrument(
    name = "cli.optimize",
    err,
    skip(command),
    fields(path = field::Empty, strategy = field::Empty),
)]
pub(super) fn optimize_command(command: OptimizeCommand) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    span.record("path", field::display(command.path.display()));
    span.record("strategy", field::display(command.strategy.label()));

    let parsed = load_network(&command.path, command.name.as_deref())?;
    let optimizer = build_optimizer(&command)?;
    let report = optimizer.optimize(parsed.network())?;

    let links = report
        .selection()
        .links()
        .iter()
        .map(|&id| {
            let link = parsed.network().link(id);
            format!(
                "{} -- {}\tcost {}\tbandwidth {}",
                parsed.label(link.source()).unwrap_or("?"),
                parsed.label(link.target()).unwrap_or("?"),
                link.cost(),
                link.bandwidth(),
            )
        })
        .collect::<Vec<_>>();

    info!(
        network = parsed.name(),
        links = links.len(),
        total_cost = report.total_cost(),
        "optimisation completed"
    );
    Ok(ExecutionSummary::Optimize {
        network: parsed.name().to_owned(),
        strategy: command.strategy.label(),
        links,
        total_cost: report.total_cost(),
        average_bandwidth: report.average_bandwidth(),
    })
}

#[instrument(
    name = "cli.route",
    err,
    skip(command),
    fields(path = field::Empty, from = field::Empty, to = field::Empty),
)]
pub(super) fn route_command(command: RouteCommand) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    span.record("path", field::display(command.path.display()));
    span.record("from", field::display(&command.from));
    span.record("to", field::display(&command.to));

    let parsed = load_network(&command.path, command.name.as_deref())?;
    let optimizer = OptimizerBuilder::new()
        .with_strategy(command.strategy.to_strategy())
        .build()?;
    let report = optimizer.optimize(parsed.network())?;

    let source = resolve_endpoint(&parsed, &command.from)?;
    let target = resolve_endpoint(&parsed, &command.to)?;
    let route = routing::shortest_path(parsed.network(), report.selection(), source, target)?;

    let (path, total_latency) = match route {
        Some(route) => {
            let labels = route
                .path()
                .iter()
                .map(|&node| parsed.label(node).unwrap_or("?").to_owned())
                .collect();
            (Some(labels), Some(route.total_latency()))
        }
        None => (None, None),
    };

    info!(
        network = parsed.name(),
        reachable = path.is_some(),
        "route query completed"
    );
    Ok(ExecutionSummary::Route {
        network: parsed.name().to_owned(),
        path,
        total_latency,
    })
}

fn build_optimizer(command: &OptimizeCommand) -> Result<Optimizer, OptimizeError> {
    OptimizerBuilder::new()
        .with_strategy(command.strategy.to_strategy())
        .with_cost_weight(command.cost_weight)
        .with_bandwidth_weight(command.bandwidth_weight)
        .with_iteration_cap(command.iteration_cap)
        .build()
}

fn resolve_endpoint(parsed: &EdgeListNetwork, label: &str) -> Result<usize, CliError> {
    parsed
        .node_id(label)
        .ok_or_else(|| CliError::UnknownEndpoint {
            label: label.to_owned(),
        })
}

#[instrument(name = "cli.load_network", err, fields(path = field::Empty))]
pub(super) fn load_network(
    path: &Path,
    override_name: Option<&str>,
) -> Result<EdgeListNetwork, CliError> {
    Span::current().record("path", field::display(path.display()));
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = derive_network_name(path, override_name);
    Ok(EdgeListNetwork::parse(name, &text)?)
}

pub(super) fn derive_network_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "network".to_owned())
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use netweave_cli::cli::{ExecutionSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Route {
///     network: "demo".into(),
///     path: Some(vec!["a".into(), "b".into()]),
///     total_latency: Some(0.5),
/// };
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer.into_inner())?;
/// assert!(text.contains("a -> b"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Optimize {
            network,
            strategy,
            links,
            total_cost,
            average_bandwidth,
        } => {
            writeln!(writer, "network: {network}")?;
            writeln!(writer, "strategy: {strategy}")?;
            for line in links {
                writeln!(writer, "{line}")?;
            }
            writeln!(writer, "total cost: {total_cost}")?;
            writeln!(writer, "average bandwidth: {average_bandwidth}")?;
        }
        ExecutionSummary::Route {
            network,
            path,
            total_latency,
        } => {
            writeln!(writer, "network: {network}")?;
            match (path, total_latency) {
                (Some(path), Some(latency)) => {
                    writeln!(writer, "route: {}", path.join(" -> "))?;
                    writeln!(writer, "total latency: {latency}")?;
                }
                _ => writeln!(writer, "route: unreachable")?,
            }
        }
    }
    Ok(())
}
