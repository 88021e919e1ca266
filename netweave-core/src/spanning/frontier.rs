//! Node-centric (frontier-growth) spanning-tree construction.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use crate::network::{LinkId, Network};

use super::TreeSelection;

/// A frontier entry ordered by ascending cost with deterministic tie-breaks.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FrontierLink {
    cost: f64,
    source: usize,
    target: usize,
    id: LinkId,
}

impl Eq for FrontierLink {}

impl Ord for FrontierLink {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.target.cmp(&other.target))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for FrontierLink {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Grows a minimum-cost spanning tree outward from node 0.
///
/// Maintains a priority frontier of links touching the visited set, ordered
/// by ascending cost. The cheapest frontier link is admitted when it reaches
/// an unvisited node and discarded when both endpoints are already visited
/// (admitting it would close a cycle). Terminates when every node is visited
/// or the frontier is exhausted; on a disconnected input only node 0's
/// component is spanned and the result is not a complete tree.
///
/// Networks with fewer than two nodes yield an empty selection.
///
/// # Examples
/// ```
/// use netweave_core::{Link, Network, spanning};
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
/// let tree = spanning::frontier_growth(&network);
/// assert!(tree.is_spanning(&network));
/// assert_eq!(tree.total_cost(&network), 3.0);
/// ```
#[must_use]
pub fn frontier_growth(network: &Network) -> TreeSelection {
    let node_count = network.node_count();
    if node_count < 2 || network.links().is_empty() {
        return TreeSelection::from_links(network, Vec::new());
    }

    let mut incident: Vec<Vec<LinkId>> = vec![Vec::new(); node_count];
    for (id, link) in network.link_entries() {
        incident[link.source()].push(id);
        if link.target() != link.source() {
            incident[link.target()].push(id);
        }
    }

    let mut visited = vec![false; node_count];
    let mut visited_count = 1;
    visited[0] = true;

    let mut frontier = BinaryHeap::new();
    push_incident(network, &incident, 0, &visited, &mut frontier);

    let mut selected = Vec::with_capacity(node_count - 1);
    while visited_count < node_count {
        let Some(Reverse(entry)) = frontier.pop() else {
            break;
        };
        let link = network.link(entry.id);
        let next = match (visited[link.source()], visited[link.target()]) {
            (true, false) => link.target(),
            (false, true) => link.source(),
            // Both endpoints already reached; the link would close a cycle.
            _ => continue,
        };

        visited[next] = true;
        visited_count += 1;
        selected.push(entry.id);
        push_incident(network, &incident, next, &visited, &mut frontier);
    }

    TreeSelection::from_links(network, selected)
}

fn push_incident(
    network: &Network,
    incident: &[Vec<LinkId>],
    node: usize,
    visited: &[bool],
    frontier: &mut BinaryHeap<Reverse<FrontierLink>>,
) {
    for &id in &incident[node] {
        let link = network.link(id);
        let leads_outward = link
            .opposite(node)
            .is_some_and(|other| !visited[other]);
        if leads_outward {
            frontier.push(Reverse(FrontierLink {
                cost: link.cost(),
                source: link.source(),
                target: link.target(),
                id,
            }));
        }
    }
}
