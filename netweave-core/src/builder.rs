//! Builder utilities for configuring the optimizer.
//!
//! Exposes the construction-strategy selection surface and the validation
//! applied before an [`Optimizer`] instance is handed out.

use std::num::NonZeroUsize;

use crate::{
    objective::ObjectiveWeights,
    optimizer::{OptimizeError, Optimizer},
    refine::RefineConfig,
};

/// Selects which construction strategy [`Optimizer::optimize`] runs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strategy {
    /// Grow a priority frontier outward from node 0 (node-centric).
    FrontierGrowth,
    /// Sweep the cost-sorted link table through a union-find (edge-centric).
    SortedEdgeGrowth,
    /// Rank links by the blended cost/bandwidth score, then sweep.
    MultiObjective,
    /// Seed with sorted-edge growth, then refine by hill climbing.
    HillClimbing,
}

/// Configures and constructs [`Optimizer`] instances.
///
/// # Examples
/// ```
/// use netweave_core::{OptimizerBuilder, Strategy};
///
/// let optimizer = OptimizerBuilder::new()
///     .with_strategy(Strategy::MultiObjective)
///     .with_cost_weight(0.6)
///     .with_bandwidth_weight(0.4)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(optimizer.strategy(), Strategy::MultiObjective);
/// ```
#[derive(Clone, Debug)]
pub struct OptimizerBuilder {
    strategy: Strategy,
    cost_weight: f64,
    bandwidth_weight: f64,
    refine_cost_weight: f64,
    refine_bandwidth_weight: f64,
    iteration_cap: usize,
}

impl Default for OptimizerBuilder {
    fn default() -> Self {
        let objective = ObjectiveWeights::balanced();
        let refine = RefineConfig::default();
        Self {
            strategy: Strategy::SortedEdgeGrowth,
            cost_weight: objective.cost(),
            bandwidth_weight: objective.bandwidth(),
            refine_cost_weight: refine.weights().cost(),
            refine_bandwidth_weight: refine.weights().bandwidth(),
            iteration_cap: refine.iteration_cap().get(),
        }
    }
}

impl OptimizerBuilder {
    /// Creates a builder populated with default parameters: sorted-edge
    /// growth, balanced multi-objective weights, 0.7/0.3 refinement weights,
    /// and an iteration cap of 100.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the construction strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Overrides the multi-objective cost weight.
    #[must_use]
    pub fn with_cost_weight(mut self, weight: f64) -> Self {
        self.cost_weight = weight;
        self
    }

    /// Overrides the multi-objective bandwidth weight.
    #[must_use]
    pub fn with_bandwidth_weight(mut self, weight: f64) -> Self {
        self.bandwidth_weight = weight;
        self
    }

    /// Overrides the refinement objective weights.
    #[must_use]
    pub fn with_refine_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.refine_cost_weight = weights.cost();
        self.refine_bandwidth_weight = weights.bandwidth();
        self
    }

    /// Overrides the hill-climbing iteration cap.
    #[must_use]
    pub fn with_iteration_cap(mut self, cap: usize) -> Self {
        self.iteration_cap = cap;
        self
    }

    /// Returns the currently selected strategy.
    #[rustfmt::skip]
    #[must_use]
    pub fn strategy(&self) -> Strategy { self.strategy }

    /// Validates the configuration and constructs an [`Optimizer`].
    ///
    /// # Errors
    /// Returns [`OptimizeError::InvalidWeight`] when any weight is negative
    /// or non-finite, and [`OptimizeError::ZeroIterationCap`] when the
    /// iteration cap is zero.
    pub fn build(self) -> Result<Optimizer, OptimizeError> {
        for (axis, value) in [
            ("cost", self.cost_weight),
            ("bandwidth", self.bandwidth_weight),
            ("refine cost", self.refine_cost_weight),
            ("refine bandwidth", self.refine_bandwidth_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(OptimizeError::InvalidWeight { axis, value });
            }
        }

        let iteration_cap =
            NonZeroUsize::new(self.iteration_cap).ok_or(OptimizeError::ZeroIterationCap)?;

        Ok(Optimizer::new(
            self.strategy,
            ObjectiveWeights::new(self.cost_weight, self.bandwidth_weight),
            RefineConfig::new(
                ObjectiveWeights::new(self.refine_cost_weight, self.refine_bandwidth_weight),
                iteration_cap,
            ),
        ))
    }
}
