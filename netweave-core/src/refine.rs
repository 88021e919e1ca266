//! Hill-climbing refinement of spanning-tree selections.
//!
//! Takes any valid spanning tree plus the full link universe and repeatedly
//! swaps a tree link for an unused one whenever the swap keeps the tree
//! feasible and strictly improves the composite score. The loop is
//! first-improvement with a restart after every accepted swap, capped at a
//! fixed number of passes. It is a local-search heuristic: the result is a
//! local optimum reachable by single-link swaps, not a global one, and that
//! behaviour is part of the contract.

use std::num::NonZeroUsize;

use tracing::debug;

use crate::{
    network::{LinkId, Network},
    objective::ObjectiveWeights,
    spanning::{TreeSelection, union_find::DisjointSet},
};

/// Fixed scale applied to the bandwidth-scarcity penalty term.
const SCARCITY_SCALE: f64 = 1000.0;

/// Default number of full improvement passes before the search gives up.
const DEFAULT_ITERATION_CAP: usize = 100;

/// Configuration for one refinement call.
///
/// Replaces the original design's shared mutable settings with an explicit
/// per-call structure.
///
/// # Examples
/// ```
/// use netweave_core::RefineConfig;
///
/// let config = RefineConfig::default();
/// assert_eq!(config.weights().cost(), 0.7);
/// assert_eq!(config.iteration_cap().get(), 100);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefineConfig {
    weights: ObjectiveWeights,
    iteration_cap: NonZeroUsize,
}

impl RefineConfig {
    /// Creates a refinement configuration.
    #[must_use]
    pub fn new(weights: ObjectiveWeights, iteration_cap: NonZeroUsize) -> Self {
        Self {
            weights,
            iteration_cap,
        }
    }

    /// Returns the objective weights used by [`evaluate`].
    #[rustfmt::skip]
    #[must_use]
    pub fn weights(&self) -> ObjectiveWeights { self.weights }

    /// Returns the maximum number of improvement passes.
    #[rustfmt::skip]
    #[must_use]
    pub fn iteration_cap(&self) -> NonZeroUsize { self.iteration_cap }
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            weights: ObjectiveWeights::new(0.7, 0.3),
            iteration_cap: NonZeroUsize::new(DEFAULT_ITERATION_CAP)
                .unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// Scores a selection: weighted total installation cost plus a
/// bandwidth-scarcity penalty. Lower is better.
///
/// The penalty term is `(1 / average_bandwidth) * 1000`; empty selections
/// use an average bandwidth of 1.0 so the score stays defined.
#[must_use]
pub fn evaluate(network: &Network, selection: &TreeSelection, weights: ObjectiveWeights) -> f64 {
    evaluate_links(network, selection.links(), weights)
}

fn evaluate_links(network: &Network, links: &[LinkId], weights: ObjectiveWeights) -> f64 {
    let total_cost: f64 = links.iter().map(|&id| network.link(id).cost()).sum();
    let average_bandwidth = if links.is_empty() {
        1.0
    } else {
        let total: f64 = links.iter().map(|&id| network.link(id).bandwidth()).sum();
        #[expect(
            clippy::cast_precision_loss,
            reason = "selection sizes are far below 2^52"
        )]
        let count = links.len() as f64;
        total / count
    };
    weights.cost() * total_cost + weights.bandwidth() * (1.0 / average_bandwidth) * SCARCITY_SCALE
}

/// Refines `initial` by first-improvement single-link swaps.
///
/// Every candidate is re-validated for spanning-tree feasibility with a
/// fresh union-find before its score is even consulted, so an accepted swap
/// can never produce an infeasible tree. After an accepted swap the scan
/// restarts from the new current tree; the search stops when a full pass
/// yields no improving feasible swap or `iteration_cap` passes have run.
///
/// The evaluated score of the result is never higher than that of
/// `initial`.
#[must_use]
pub fn local_search(
    network: &Network,
    initial: &TreeSelection,
    config: &RefineConfig,
) -> TreeSelection {
    let weights = config.weights();
    let mut current: Vec<LinkId> = initial.links().to_vec();
    let mut current_score = evaluate_links(network, &current, weights);

    let mut improved = true;
    let mut iterations = 0;
    while improved && iterations < config.iteration_cap().get() {
        improved = false;
        iterations += 1;

        'pass: for position in 0..current.len() {
            for (candidate_id, _) in network.link_entries() {
                if current.contains(&candidate_id) {
                    continue;
                }

                let mut candidate = current.clone();
                candidate.remove(position);
                candidate.push(candidate_id);

                if !is_valid_spanning_tree(network, &candidate) {
                    continue;
                }

                let candidate_score = evaluate_links(network, &candidate, weights);
                if candidate_score < current_score {
                    current = candidate;
                    current_score = candidate_score;
                    improved = true;
                    break 'pass;
                }
            }
        }
    }

    debug!(iterations, score = current_score, "local search finished");
    TreeSelection::from_links(network, current)
}

/// Structural feasibility: exactly `node_count - 1` links forming a single
/// connected component, verified by rebuilding a union-find over the
/// candidate.
fn is_valid_spanning_tree(network: &Network, links: &[LinkId]) -> bool {
    if links.len() != network.expected_tree_size() {
        return false;
    }

    let mut set = DisjointSet::new(network.node_count());
    for &id in links {
        let link = network.link(id);
        set.union(link.source(), link.target());
    }
    set.components() == 1
}
