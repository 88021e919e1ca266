//! Optimisation orchestration.
//!
//! Runs the configured construction strategy over a validated [`Network`],
//! refuses to pass a spanning forest off as a complete tree, and summarises
//! the outcome in an [`OptimizationReport`].

use thiserror::Error;
use tracing::{instrument, warn};

use crate::{
    builder::Strategy,
    network::Network,
    objective::{self, ObjectiveWeights},
    refine::{self, RefineConfig},
    report::OptimizationReport,
    spanning,
};

/// Errors raised while configuring or running an [`Optimizer`].
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum OptimizeError {
    /// An objective weight was negative or non-finite.
    #[error("{axis} weight {value} must be finite and non-negative")]
    InvalidWeight {
        /// Which weight axis carried the invalid value.
        axis: &'static str,
        /// The invalid weight value.
        value: f64,
    },
    /// The hill-climbing iteration cap was zero.
    #[error("iteration cap must be at least 1")]
    ZeroIterationCap,
    /// The input graph is disconnected: the strategy produced a spanning
    /// forest, so no complete spanning tree exists.
    #[error("network is disconnected: selection spans {component_count} components")]
    Disconnected {
        /// Number of components the best selection could reach.
        component_count: usize,
    },
}

impl OptimizeError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> OptimizeErrorCode {
        match self {
            Self::InvalidWeight { .. } => OptimizeErrorCode::InvalidWeight,
            Self::ZeroIterationCap => OptimizeErrorCode::ZeroIterationCap,
            Self::Disconnected { .. } => OptimizeErrorCode::Disconnected,
        }
    }
}

/// Machine-readable error codes for [`OptimizeError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OptimizeErrorCode {
    /// An objective weight was negative or non-finite.
    InvalidWeight,
    /// The hill-climbing iteration cap was zero.
    ZeroIterationCap,
    /// The input graph is disconnected.
    Disconnected,
}

impl OptimizeErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidWeight => "INVALID_WEIGHT",
            Self::ZeroIterationCap => "ZERO_ITERATION_CAP",
            Self::Disconnected => "DISCONNECTED",
        }
    }
}

/// Entry point for running a configured optimisation.
///
/// # Examples
/// ```
/// use netweave_core::{Link, Network, OptimizerBuilder, Strategy};
///
/// let network = Network::new(
///     3,
///     vec![
///         Link::new(0, 1, 1.0, 4.0),
///         Link::new(1, 2, 2.0, 4.0),
///         Link::new(0, 2, 9.0, 4.0),
///     ],
/// )
/// .expect("links are valid");
/// let optimizer = OptimizerBuilder::new()
///     .with_strategy(Strategy::FrontierGrowth)
///     .build()
///     .expect("configuration is valid");
/// let report = optimizer.optimize(&network).expect("network is connected");
/// assert_eq!(report.total_cost(), 3.0);
/// ```
#[derive(Clone, Debug)]
pub struct Optimizer {
    strategy: Strategy,
    objective_weights: ObjectiveWeights,
    refine: RefineConfig,
}

impl Optimizer {
    pub(crate) fn new(
        strategy: Strategy,
        objective_weights: ObjectiveWeights,
        refine: RefineConfig,
    ) -> Self {
        Self {
            strategy,
            objective_weights,
            refine,
        }
    }

    /// Returns the configured construction strategy.
    #[rustfmt::skip]
    #[must_use]
    pub fn strategy(&self) -> Strategy { self.strategy }

    /// Returns the multi-objective blend weights.
    #[rustfmt::skip]
    #[must_use]
    pub fn objective_weights(&self) -> ObjectiveWeights { self.objective_weights }

    /// Returns the refinement configuration.
    #[rustfmt::skip]
    #[must_use]
    pub fn refine(&self) -> &RefineConfig { &self.refine }

    /// Runs the configured strategy and summarises the selected topology.
    ///
    /// Networks with fewer than two nodes yield a report with an empty
    /// selection; no spanning tree is meaningful there.
    ///
    /// # Errors
    /// Returns [`OptimizeError::Disconnected`] when the network has two or
    /// more nodes but the strategy could only assemble a spanning forest.
    #[instrument(
        name = "core.optimize",
        err,
        skip(self, network),
        fields(
            strategy = ?self.strategy,
            nodes = network.node_count(),
            links = network.link_count(),
        ),
    )]
    pub fn optimize(&self, network: &Network) -> Result<OptimizationReport, OptimizeError> {
        let selection = match self.strategy {
            Strategy::FrontierGrowth => spanning::frontier_growth(network),
            Strategy::SortedEdgeGrowth => spanning::sorted_edge_growth(network),
            Strategy::MultiObjective => {
                objective::multi_objective(network, self.objective_weights)
            }
            Strategy::HillClimbing => {
                let seed = spanning::sorted_edge_growth(network);
                refine::local_search(network, &seed, &self.refine)
            }
        };

        if network.node_count() >= 2 && !selection.is_spanning(network) {
            warn!(
                components = selection.component_count(),
                "selection is a forest; no complete spanning tree exists"
            );
            return Err(OptimizeError::Disconnected {
                component_count: selection.component_count(),
            });
        }

        Ok(OptimizationReport::from_selection(
            network,
            self.strategy,
            selection,
        ))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{OptimizerBuilder, network::Link};

    fn network(node_count: usize, links: &[(usize, usize, f64, f64)]) -> Network {
        let links = links
            .iter()
            .map(|&(source, target, cost, bandwidth)| Link::new(source, target, cost, bandwidth))
            .collect();
        Network::new(node_count, links).expect("test links are valid")
    }

    fn diamond() -> Network {
        network(
            4,
            &[
                (0, 1, 2.0, 4.0),
                (1, 2, 3.0, 2.0),
                (2, 3, 1.0, 8.0),
                (0, 3, 4.0, 1.0),
            ],
        )
    }

    #[rstest]
    #[case::frontier(Strategy::FrontierGrowth)]
    #[case::sorted(Strategy::SortedEdgeGrowth)]
    #[case::multi_objective(Strategy::MultiObjective)]
    #[case::hill_climbing(Strategy::HillClimbing)]
    fn every_strategy_spans_a_connected_network(#[case] strategy: Strategy) {
        let net = diamond();
        let optimizer = OptimizerBuilder::new()
            .with_strategy(strategy)
            .build()
            .expect("configuration is valid");
        let report = optimizer.optimize(&net).expect("network is connected");
        assert!(report.selection().is_spanning(&net));
        assert_eq!(report.strategy(), strategy);
    }

    #[test]
    fn frontier_and_sorted_growth_agree_on_cost() {
        let net = diamond();
        let frontier = OptimizerBuilder::new()
            .with_strategy(Strategy::FrontierGrowth)
            .build()
            .expect("configuration is valid")
            .optimize(&net)
            .expect("network is connected");
        let sorted = OptimizerBuilder::new()
            .build()
            .expect("configuration is valid")
            .optimize(&net)
            .expect("network is connected");
        assert_eq!(frontier.total_cost(), sorted.total_cost());
        assert_eq!(sorted.total_cost(), 6.0);
    }

    #[test]
    fn disconnected_network_is_rejected() {
        let net = network(3, &[(0, 1, 1.0, 1.0)]);
        let optimizer = OptimizerBuilder::new().build().expect("configuration is valid");
        let err = optimizer.optimize(&net).expect_err("graph is disconnected");
        assert_eq!(
            err,
            OptimizeError::Disconnected { component_count: 2 }
        );
        assert_eq!(err.code(), OptimizeErrorCode::Disconnected);
    }

    #[rstest]
    #[case::no_nodes(0)]
    #[case::single_node(1)]
    fn tiny_networks_yield_empty_reports(#[case] node_count: usize) {
        let net = network(node_count, &[]);
        let optimizer = OptimizerBuilder::new().build().expect("configuration is valid");
        let report = optimizer.optimize(&net).expect("tiny networks are not errors");
        assert!(report.selection().is_empty());
        assert_eq!(report.total_cost(), 0.0);
    }

    #[test]
    fn hill_climbing_never_scores_worse_than_its_seed() {
        let net = network(
            3,
            &[(0, 1, 1.0, 1.0), (1, 2, 1.0, 1.0), (0, 2, 1.5, 100.0)],
        );
        let optimizer = OptimizerBuilder::new()
            .with_strategy(Strategy::HillClimbing)
            .build()
            .expect("configuration is valid");
        let refined = optimizer.optimize(&net).expect("network is connected");

        let seed = crate::spanning::sorted_edge_growth(&net);
        let weights = optimizer.refine().weights();
        let seed_score = crate::refine::evaluate(&net, &seed, weights);
        let refined_score = crate::refine::evaluate(&net, refined.selection(), weights);
        assert!(refined_score <= seed_score);
    }
}
