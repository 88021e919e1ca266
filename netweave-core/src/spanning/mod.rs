//! Spanning-structure construction.
//!
//! Two interchangeable strategies produce a minimum-cost spanning tree from
//! the same candidate link table: [`frontier_growth`] grows a priority
//! frontier outward from node 0 (node-centric), while [`sorted_edge_growth`]
//! sweeps the globally sorted link table through a union-find (edge-centric).
//! Both resolve cost ties deterministically via
//! `(cost, source, target, LinkId)` so repeated runs select the same links.
//!
//! When the input graph is disconnected both strategies terminate with fewer
//! than `node_count - 1` links; [`TreeSelection::is_spanning`] exposes the
//! check callers must make before treating a selection as a complete tree.

mod frontier;
mod sorted;
pub(crate) mod union_find;

pub use frontier::frontier_growth;
pub use sorted::sorted_edge_growth;

pub(crate) use sorted::rank_links;

use crate::network::{LinkId, Network};

use self::union_find::DisjointSet;

/// The output contract of every construction strategy and of refinement.
///
/// Holds the selected link identifiers in admission order together with the
/// number of connected components the selection induces over the network's
/// node universe. A complete spanning tree has exactly
/// `node_count - 1` links in a single component.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeSelection {
    links: Vec<LinkId>,
    component_count: usize,
}

impl TreeSelection {
    /// Builds a selection from explicit link identifiers, computing the
    /// induced component count with a fresh union-find pass.
    ///
    /// The links need not be acyclic; the router accepts arbitrary
    /// sub-graphs, so neither does this constructor.
    #[must_use]
    pub fn from_links(network: &Network, links: Vec<LinkId>) -> Self {
        let mut set = DisjointSet::new(network.node_count());
        for &id in &links {
            let link = network.link(id);
            set.union(link.source(), link.target());
        }
        Self {
            links,
            component_count: set.components(),
        }
    }

    /// Returns the selected link identifiers in admission order.
    #[rustfmt::skip]
    #[must_use]
    pub fn links(&self) -> &[LinkId] { &self.links }

    /// Returns the number of selected links.
    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.links.len() }

    /// Returns `true` when no links are selected.
    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.links.is_empty() }

    /// Returns the number of connected components the selection induces.
    #[rustfmt::skip]
    #[must_use]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Returns `true` when `id` is part of the selection.
    #[must_use]
    pub fn contains(&self, id: LinkId) -> bool {
        self.links.contains(&id)
    }

    /// Returns `true` when the selection is a complete spanning tree:
    /// exactly `node_count - 1` links forming a single component.
    ///
    /// A `false` result on a construction output means the input graph was
    /// disconnected and only a spanning forest exists.
    #[must_use]
    pub fn is_spanning(&self, network: &Network) -> bool {
        self.component_count == 1 && self.links.len() == network.expected_tree_size()
    }

    /// Sums the installation cost of the selected links.
    #[must_use]
    pub fn total_cost(&self, network: &Network) -> f64 {
        self.links
            .iter()
            .map(|&id| network.link(id).cost())
            .sum()
    }

    /// Averages the bandwidth of the selected links, or `None` when the
    /// selection is empty.
    #[must_use]
    pub fn average_bandwidth(&self, network: &Network) -> Option<f64> {
        if self.links.is_empty() {
            return None;
        }
        let total: f64 = self
            .links
            .iter()
            .map(|&id| network.link(id).bandwidth())
            .sum();
        #[expect(
            clippy::cast_precision_loss,
            reason = "selection sizes are far below 2^52"
        )]
        Some(total / self.links.len() as f64)
    }
}

/// Sweeps `order` through a union-find, admitting each link whose endpoints
/// are still in different components, and stops as soon as a complete tree
/// has been assembled. Shared by sorted-edge growth and the multi-objective
/// selector, which differ only in how they order the link table.
pub(crate) fn admit_in_order(network: &Network, order: &[LinkId]) -> TreeSelection {
    let node_count = network.node_count();
    if node_count < 2 {
        return TreeSelection::from_links(network, Vec::new());
    }

    let expected = network.expected_tree_size();
    let mut set = DisjointSet::new(node_count);
    let mut selected = Vec::with_capacity(expected);
    for &id in order {
        let link = network.link(id);
        if set.union(link.source(), link.target()) {
            selected.push(id);
            if selected.len() == expected {
                break;
            }
        }
    }

    TreeSelection {
        links: selected,
        component_count: set.components(),
    }
}
