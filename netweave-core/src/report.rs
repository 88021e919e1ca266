//! Result types for optimisation runs.

use crate::{builder::Strategy, network::Network, spanning::TreeSelection};

/// Summarises the outcome of an [`crate::Optimizer::optimize`] invocation:
/// the selected links plus the aggregate figures the presentation layer
/// reports (total installation cost and average bandwidth).
#[derive(Clone, Debug, PartialEq)]
pub struct OptimizationReport {
    strategy: Strategy,
    selection: TreeSelection,
    total_cost: f64,
    average_bandwidth: f64,
}

impl OptimizationReport {
    pub(crate) fn from_selection(
        network: &Network,
        strategy: Strategy,
        selection: TreeSelection,
    ) -> Self {
        let total_cost = selection.total_cost(network);
        let average_bandwidth = selection.average_bandwidth(network).unwrap_or(0.0);
        Self {
            strategy,
            selection,
            total_cost,
            average_bandwidth,
        }
    }

    /// Returns the strategy that produced the selection.
    #[rustfmt::skip]
    #[must_use]
    pub fn strategy(&self) -> Strategy { self.strategy }

    /// Returns the selected topology.
    #[rustfmt::skip]
    #[must_use]
    pub fn selection(&self) -> &TreeSelection { &self.selection }

    /// Returns the total installation cost of the selection.
    #[rustfmt::skip]
    #[must_use]
    pub fn total_cost(&self) -> f64 { self.total_cost }

    /// Returns the average bandwidth across the selected links, or 0.0 for
    /// an empty selection.
    #[rustfmt::skip]
    #[must_use]
    pub fn average_bandwidth(&self) -> f64 { self.average_bandwidth }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{network::Link, spanning::sorted_edge_growth};

    #[test]
    fn aggregates_cost_and_bandwidth() {
        let network = Network::new(
            3,
            vec![Link::new(0, 1, 2.0, 4.0), Link::new(1, 2, 4.0, 8.0)],
        )
        .expect("links are valid");
        let selection = sorted_edge_growth(&network);
        let report =
            OptimizationReport::from_selection(&network, Strategy::SortedEdgeGrowth, selection);
        assert_eq!(report.total_cost(), 6.0);
        assert_eq!(report.average_bandwidth(), 6.0);
    }

    #[test]
    fn empty_selection_reports_zero_bandwidth() {
        let network = Network::new(1, vec![]).expect("no links to validate");
        let selection = sorted_edge_growth(&network);
        let report =
            OptimizationReport::from_selection(&network, Strategy::SortedEdgeGrowth, selection);
        assert_eq!(report.total_cost(), 0.0);
        assert_eq!(report.average_bandwidth(), 0.0);
    }
}
