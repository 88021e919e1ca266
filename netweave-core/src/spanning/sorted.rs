//! Edge-centric (sorted-edge growth) spanning-tree construction.

use crate::network::{Link, LinkId, Network};

use super::TreeSelection;

/// Orders the whole link table ascending by `key`, breaking ties on
/// `(source, target, LinkId)` so equal keys rank deterministically.
pub(crate) fn rank_links(network: &Network, key: impl Fn(&Link) -> f64) -> Vec<LinkId> {
    let mut order: Vec<LinkId> = (0..network.link_count()).map(LinkId::new).collect();
    order.sort_by(|&left, &right| {
        let left_link = network.link(left);
        let right_link = network.link(right);
        key(left_link)
            .total_cmp(&key(right_link))
            .then_with(|| left_link.source().cmp(&right_link.source()))
            .then_with(|| left_link.target().cmp(&right_link.target()))
            .then_with(|| left.cmp(&right))
    });
    order
}

/// Builds a minimum-cost spanning tree by scanning the cost-sorted link
/// table through a union-find.
///
/// This is the canonical minimum-spanning-tree construction: whenever the
/// input graph is connected the result has minimum total cost. On a
/// disconnected input the sweep terminates with a minimum spanning forest
/// holding fewer than `node_count - 1` links; callers detect this through
/// [`TreeSelection::is_spanning`].
///
/// Networks with fewer than two nodes yield an empty selection.
///
/// # Examples
/// ```
/// use netweave_core::{Link, Network, spanning};
///
/// let network = Network::new(
///     4,
///     vec![
///         Link::new(0, 1, 2.0, 1.0),
///         Link::new(1, 2, 3.0, 1.0),
///         Link::new(2, 3, 1.0, 1.0),
///         Link::new(0, 3, 4.0, 1.0),
///     ],
/// )
/// .expect("links are valid");
/// let tree = spanning::sorted_edge_growth(&network);
/// assert!(tree.is_spanning(&network));
/// assert_eq!(tree.total_cost(&network), 6.0);
/// ```
#[must_use]
pub fn sorted_edge_growth(network: &Network) -> TreeSelection {
    let order = rank_links(network, Link::cost);
    super::admit_in_order(network, &order)
}
