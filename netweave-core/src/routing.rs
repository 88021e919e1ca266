//! Shortest-latency routing over a selected topology.
//!
//! The router treats inverse bandwidth as edge latency and answers
//! single-source shortest-path queries over whichever selection is supplied.
//! The adjacency view is rebuilt fresh per query from the selection; it is
//! never incrementally updated. The selection does not have to be a tree;
//! any sub-graph of the network routes correctly.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use thiserror::Error;

use crate::{network::Network, spanning::TreeSelection};

/// Errors raised by routing queries.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum RouteError {
    /// A query endpoint was outside the network's node universe.
    #[error("node {node} is out of range, node_count is {node_count}")]
    UnknownNode {
        /// The out-of-range node id.
        node: usize,
        /// The number of nodes in the network.
        node_count: usize,
    },
}

impl RouteError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> RouteErrorCode {
        match self {
            Self::UnknownNode { .. } => RouteErrorCode::UnknownNode,
        }
    }
}

/// Machine-readable error codes for [`RouteError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RouteErrorCode {
    /// A query endpoint was outside the network's node universe.
    UnknownNode,
}

impl RouteErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownNode => "UNKNOWN_NODE",
        }
    }
}

/// A resolved shortest-latency route.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    path: Vec<usize>,
    total_latency: f64,
}

impl Route {
    /// Returns the node sequence from source to target inclusive.
    #[rustfmt::skip]
    #[must_use]
    pub fn path(&self) -> &[usize] { &self.path }

    /// Returns the accumulated latency along the path.
    #[rustfmt::skip]
    #[must_use]
    pub fn total_latency(&self) -> f64 { self.total_latency }
}

/// A frontier entry keyed by accumulated distance, with the node id as a
/// deterministic tie-break.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FrontierNode {
    distance: f64,
    node: usize,
}

impl Eq for FrontierNode {}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Computes the shortest-latency route from `source` to `target` over the
/// links in `selection`, using `latency = 1 / bandwidth` as the edge weight.
///
/// Runs Dijkstra with a priority frontier: each node is finalised at most
/// once and only not-yet-finalised neighbours are relaxed. Unreached nodes
/// keep an explicit sentinel rather than any finite distance, so an
/// unreachable target reports as `Ok(None)` — "no path" is a result, not an
/// error.
///
/// # Errors
/// Returns [`RouteError::UnknownNode`] when either endpoint is outside
/// `0..node_count`.
///
/// # Examples
/// ```
/// use netweave_core::{Link, Network, TreeSelection, routing, spanning};
///
/// let network = Network::new(2, vec![Link::new(0, 1, 1.0, 2.0)])
///     .expect("link is valid");
/// let tree = spanning::sorted_edge_growth(&network);
/// let route = routing::shortest_path(&network, &tree, 0, 1)
///     .expect("endpoints are in range")
///     .expect("target is reachable");
/// assert_eq!(route.path(), &[0, 1]);
/// assert_eq!(route.total_latency(), 0.5);
/// ```
pub fn shortest_path(
    network: &Network,
    selection: &TreeSelection,
    source: usize,
    target: usize,
) -> Result<Option<Route>, RouteError> {
    let node_count = network.node_count();
    for node in [source, target] {
        if node >= node_count {
            return Err(RouteError::UnknownNode { node, node_count });
        }
    }

    // Symmetric adjacency view over the selection only.
    let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); node_count];
    for &id in selection.links() {
        let link = network.link(id);
        let latency = 1.0 / link.bandwidth();
        adjacency[link.source()].push((link.target(), latency));
        adjacency[link.target()].push((link.source(), latency));
    }

    let mut distance: Vec<Option<f64>> = vec![None; node_count];
    let mut previous: Vec<Option<usize>> = vec![None; node_count];
    let mut finalised = vec![false; node_count];

    let mut frontier = BinaryHeap::new();
    distance[source] = Some(0.0);
    frontier.push(Reverse(FrontierNode {
        distance: 0.0,
        node: source,
    }));

    while let Some(Reverse(entry)) = frontier.pop() {
        if finalised[entry.node] {
            continue;
        }
        finalised[entry.node] = true;

        for &(neighbour, latency) in &adjacency[entry.node] {
            if finalised[neighbour] {
                continue;
            }
            let relaxed = entry.distance + latency;
            if distance[neighbour].is_none_or(|known| relaxed < known) {
                distance[neighbour] = Some(relaxed);
                previous[neighbour] = Some(entry.node);
                frontier.push(Reverse(FrontierNode {
                    distance: relaxed,
                    node: neighbour,
                }));
            }
        }
    }

    let Some(total_latency) = distance[target] else {
        return Ok(None);
    };

    let mut path = vec![target];
    let mut cursor = target;
    while let Some(step) = previous[cursor] {
        path.push(step);
        cursor = step;
    }
    path.reverse();

    Ok(Some(Route {
        path,
        total_latency,
    }))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{network::Link, spanning::sorted_edge_growth};

    fn network(node_count: usize, links: &[(usize, usize, f64, f64)]) -> Network {
        let links = links
            .iter()
            .map(|&(source, target, cost, bandwidth)| Link::new(source, target, cost, bandwidth))
            .collect();
        Network::new(node_count, links).expect("test links are valid")
    }

    fn full_selection(net: &Network) -> TreeSelection {
        let all = net.link_entries().map(|(id, _)| id).collect();
        TreeSelection::from_links(net, all)
    }

    #[test]
    fn single_link_round_trip() {
        let net = network(2, &[(0, 1, 1.0, 2.0)]);
        let tree = sorted_edge_growth(&net);
        let route = shortest_path(&net, &tree, 0, 1)
            .expect("endpoints in range")
            .expect("target reachable");
        assert_eq!(route.path(), &[0, 1]);
        assert_eq!(route.total_latency(), 0.5);
    }

    #[test]
    fn multi_hop_path_reconstructs_in_order() {
        let net = network(3, &[(0, 1, 1.0, 2.0), (1, 2, 1.0, 2.0)]);
        let tree = sorted_edge_growth(&net);
        let route = shortest_path(&net, &tree, 0, 2)
            .expect("endpoints in range")
            .expect("target reachable");
        assert_eq!(route.path(), &[0, 1, 2]);
        assert!((route.total_latency() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unreachable_target_reports_no_path() {
        let net = network(3, &[(0, 1, 1.0, 1.0)]);
        let forest = sorted_edge_growth(&net);
        let outcome = shortest_path(&net, &forest, 0, 2).expect("endpoints in range");
        assert_eq!(outcome, None);
    }

    #[rstest]
    #[case::source(9, 0)]
    #[case::target(0, 9)]
    fn out_of_range_endpoint_is_an_error(#[case] source: usize, #[case] target: usize) {
        let net = network(2, &[(0, 1, 1.0, 1.0)]);
        let tree = sorted_edge_growth(&net);
        let err = shortest_path(&net, &tree, source, target).expect_err("endpoint out of range");
        assert_eq!(err.code(), RouteErrorCode::UnknownNode);
    }

    #[test]
    fn source_equals_target_yields_trivial_route() {
        let net = network(2, &[(0, 1, 1.0, 1.0)]);
        let tree = sorted_edge_growth(&net);
        let route = shortest_path(&net, &tree, 1, 1)
            .expect("endpoints in range")
            .expect("source reaches itself");
        assert_eq!(route.path(), &[1]);
        assert_eq!(route.total_latency(), 0.0);
    }

    #[test]
    fn prefers_lower_latency_over_fewer_hops() {
        // Direct link has bandwidth 1 (latency 1.0); the two-hop detour over
        // bandwidth-4 links accumulates only 0.5.
        let net = network(
            3,
            &[(0, 2, 1.0, 1.0), (0, 1, 1.0, 4.0), (1, 2, 1.0, 4.0)],
        );
        let selection = full_selection(&net);
        let route = shortest_path(&net, &selection, 0, 2)
            .expect("endpoints in range")
            .expect("target reachable");
        assert_eq!(route.path(), &[0, 1, 2]);
        assert!((route.total_latency() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn routes_only_over_the_selection() {
        // The network knows a direct 0-2 link, but the queried tree omits it.
        let net = network(
            3,
            &[(0, 1, 1.0, 1.0), (1, 2, 1.0, 1.0), (0, 2, 9.0, 100.0)],
        );
        let tree = sorted_edge_growth(&net);
        assert!(!tree.contains(crate::LinkId::new(2)));
        let route = shortest_path(&net, &tree, 0, 2)
            .expect("endpoints in range")
            .expect("target reachable");
        assert_eq!(route.path(), &[0, 1, 2]);
    }
}
