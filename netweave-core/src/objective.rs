//! Multi-objective link scoring and tree construction.
//!
//! Re-ranks the link table by a normalised blend of cost and bandwidth and
//! reuses the sorted-edge union-find sweep over that ranking. The result
//! carries the same structural guarantee as pure sorted-edge growth (a
//! spanning tree whenever the graph is connected) but is a Pareto-style
//! compromise: it is not necessarily cost-optimal or bandwidth-optimal
//! individually.

use crate::{
    network::{Link, Network},
    spanning::{self, TreeSelection},
};

/// Blend weights for the two objective axes.
///
/// Applied to normalised per-link factors, so the weights themselves need no
/// normalisation; callers guarantee finite, non-negative values (the
/// [`crate::OptimizerBuilder`] validates them).
///
/// # Examples
/// ```
/// use netweave_core::ObjectiveWeights;
///
/// let weights = ObjectiveWeights::balanced();
/// assert_eq!(weights.cost(), 0.5);
/// assert_eq!(weights.bandwidth(), 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectiveWeights {
    cost: f64,
    bandwidth: f64,
}

impl ObjectiveWeights {
    /// Creates weights for the cost and bandwidth axes.
    #[must_use]
    pub fn new(cost: f64, bandwidth: f64) -> Self {
        Self { cost, bandwidth }
    }

    /// Returns the equal-blend default used by multi-objective selection.
    #[must_use]
    pub fn balanced() -> Self {
        Self::new(0.5, 0.5)
    }

    /// Returns the weight applied to normalised cost.
    #[rustfmt::skip]
    #[must_use]
    pub fn cost(&self) -> f64 { self.cost }

    /// Returns the weight applied to normalised bandwidth scarcity.
    #[rustfmt::skip]
    #[must_use]
    pub fn bandwidth(&self) -> f64 { self.bandwidth }
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Builds a spanning tree over the blended-score ranking of the link table.
///
/// Each link scores `w_cost * (cost / max_cost) +
/// w_bandwidth * (1 - bandwidth / max_bandwidth)`; the bandwidth factor is
/// inverted because higher bandwidth is preferable, so when two links tie
/// exactly on cost the higher-bandwidth link scores strictly lower and is
/// considered first. Normalisation divisors fall back to 1.0 when the link
/// table is empty.
///
/// Networks with fewer than two nodes yield an empty selection; disconnected
/// inputs yield a forest, detectable via [`TreeSelection::is_spanning`].
#[must_use]
pub fn multi_objective(network: &Network, weights: ObjectiveWeights) -> TreeSelection {
    let max_cost = axis_maximum(network, Link::cost);
    let max_bandwidth = axis_maximum(network, Link::bandwidth);

    let order = spanning::rank_links(network, |link| {
        let normalised_cost = link.cost() / max_cost;
        let normalised_bandwidth = 1.0 - link.bandwidth() / max_bandwidth;
        weights.cost() * normalised_cost + weights.bandwidth() * normalised_bandwidth
    });

    spanning::admit_in_order(network, &order)
}

/// Largest value of `axis` over the link table, defaulting to 1.0 for an
/// empty table so normalisation never divides by a missing maximum.
fn axis_maximum(network: &Network, axis: impl Fn(&Link) -> f64) -> f64 {
    network
        .links()
        .iter()
        .map(axis)
        .fold(None, |best: Option<f64>, value| {
            Some(best.map_or(value, |current| current.max(value)))
        })
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::LinkId;

    fn network(node_count: usize, links: &[(usize, usize, f64, f64)]) -> Network {
        let links = links
            .iter()
            .map(|&(source, target, cost, bandwidth)| Link::new(source, target, cost, bandwidth))
            .collect();
        Network::new(node_count, links).expect("test links are valid")
    }

    #[test]
    fn empty_network_yields_empty_selection() {
        let network = network(0, &[]);
        let selection = multi_objective(&network, ObjectiveWeights::balanced());
        assert!(selection.is_empty());
    }

    #[test]
    fn cost_tie_prefers_higher_bandwidth() {
        // Two parallel links with identical cost; the higher-bandwidth one
        // has the strictly lower normalised-bandwidth term.
        let network = network(2, &[(0, 1, 3.0, 1.0), (0, 1, 3.0, 10.0)]);
        let selection = multi_objective(&network, ObjectiveWeights::balanced());
        assert_eq!(selection.links(), &[LinkId::new(1)]);
    }

    #[test]
    fn produces_a_spanning_tree_on_connected_input() {
        let network = network(
            4,
            &[
                (0, 1, 1.0, 1.0),
                (1, 2, 1.0, 8.0),
                (2, 3, 2.0, 2.0),
                (0, 3, 2.0, 9.0),
                (0, 2, 5.0, 1.0),
            ],
        );
        let selection = multi_objective(&network, ObjectiveWeights::balanced());
        assert!(selection.is_spanning(&network));
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn cost_only_weights_reduce_to_cost_ordering() {
        let network = network(
            3,
            &[(0, 1, 5.0, 100.0), (0, 1, 1.0, 1.0), (1, 2, 2.0, 1.0)],
        );
        let selection = multi_objective(&network, ObjectiveWeights::new(1.0, 0.0));
        let by_cost = crate::spanning::sorted_edge_growth(&network);
        assert_eq!(selection.total_cost(&network), by_cost.total_cost(&network));
        assert!(selection.contains(LinkId::new(1)));
    }

    #[test]
    fn disconnected_input_yields_forest() {
        let network = network(4, &[(0, 1, 1.0, 1.0), (2, 3, 1.0, 2.0)]);
        let selection = multi_objective(&network, ObjectiveWeights::balanced());
        assert!(!selection.is_spanning(&network));
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.component_count(), 2);
    }
}
