//! Network data model: sites, candidate links, and the input-validation gate.
//!
//! A [`Network`] is immutable for the duration of an optimisation request.
//! Construction validates every link once; the algorithm entry points accept
//! only an already-validated network and never re-check value domains.

use thiserror::Error;

/// Category tag for a site.
///
/// Carried for presentation layers only; no algorithm consults it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodeKind {
    /// A server site.
    Server,
    /// A client site.
    Client,
}

/// Identifier of a candidate link within a [`Network`].
///
/// Link identity is the index into the network's link table, never the
/// endpoint pair: parallel links between the same pair of sites are permitted
/// and must stay distinguishable.
///
/// # Examples
/// ```
/// use netweave_core::LinkId;
///
/// let id = LinkId::new(3);
/// assert_eq!(id.get(), 3);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LinkId(usize);

impl LinkId {
    /// Creates a new link identifier.
    #[rustfmt::skip]
    #[must_use]
    pub fn new(id: usize) -> Self { Self(id) }

    /// Returns the underlying index.
    #[rustfmt::skip]
    #[must_use]
    pub fn get(self) -> usize { self.0 }
}

/// An undirected candidate link between two sites.
///
/// A link and its reverse traversal are the same entity; the stored
/// orientation is whatever the caller supplied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    source: usize,
    target: usize,
    cost: f64,
    bandwidth: f64,
}

impl Link {
    /// Creates a candidate link. Value domains are checked by
    /// [`Network::new`], not here.
    #[must_use]
    pub fn new(source: usize, target: usize, cost: f64, bandwidth: f64) -> Self {
        Self {
            source,
            target,
            cost,
            bandwidth,
        }
    }

    /// Returns the first endpoint as supplied.
    #[rustfmt::skip]
    #[must_use]
    pub fn source(&self) -> usize { self.source }

    /// Returns the second endpoint as supplied.
    #[rustfmt::skip]
    #[must_use]
    pub fn target(&self) -> usize { self.target }

    /// Returns the installation cost.
    #[rustfmt::skip]
    #[must_use]
    pub fn cost(&self) -> f64 { self.cost }

    /// Returns the bandwidth capacity.
    #[rustfmt::skip]
    #[must_use]
    pub fn bandwidth(&self) -> f64 { self.bandwidth }

    /// Returns the endpoint opposite `node`, or `None` when `node` is not an
    /// endpoint of this link.
    #[must_use]
    pub fn opposite(&self, node: usize) -> Option<usize> {
        if node == self.source {
            Some(self.target)
        } else if node == self.target {
            Some(self.source)
        } else {
            None
        }
    }
}

/// Errors raised while validating a [`Network`].
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum NetworkError {
    /// A link referenced a node id outside `0..node_count`.
    #[error("link {link} references node {node}, but node_count is {node_count}")]
    InvalidEndpoint {
        /// Index of the offending link.
        link: usize,
        /// The out-of-range node id.
        node: usize,
        /// The number of nodes in the network.
        node_count: usize,
    },
    /// A link carried a non-finite installation cost.
    #[error("link {link} has non-finite cost {cost}")]
    NonFiniteCost {
        /// Index of the offending link.
        link: usize,
        /// The invalid cost value.
        cost: f64,
    },
    /// A link carried a negative installation cost.
    #[error("link {link} has negative cost {cost}")]
    NegativeCost {
        /// Index of the offending link.
        link: usize,
        /// The invalid cost value.
        cost: f64,
    },
    /// A link carried a bandwidth that is zero, negative, or non-finite.
    ///
    /// Bandwidth feeds `latency = 1 / bandwidth` and the refinement penalty
    /// term, both undefined for non-positive values.
    #[error("link {link} has non-positive bandwidth {bandwidth}")]
    NonPositiveBandwidth {
        /// Index of the offending link.
        link: usize,
        /// The invalid bandwidth value.
        bandwidth: f64,
    },
}

impl NetworkError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> NetworkErrorCode {
        match self {
            Self::InvalidEndpoint { .. } => NetworkErrorCode::InvalidEndpoint,
            Self::NonFiniteCost { .. } => NetworkErrorCode::NonFiniteCost,
            Self::NegativeCost { .. } => NetworkErrorCode::NegativeCost,
            Self::NonPositiveBandwidth { .. } => NetworkErrorCode::NonPositiveBandwidth,
        }
    }
}

/// Machine-readable error codes for [`NetworkError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NetworkErrorCode {
    /// A link referenced a node id outside the network.
    InvalidEndpoint,
    /// A link carried a non-finite cost.
    NonFiniteCost,
    /// A link carried a negative cost.
    NegativeCost,
    /// A link carried a non-positive bandwidth.
    NonPositiveBandwidth,
}

impl NetworkErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidEndpoint => "INVALID_ENDPOINT",
            Self::NonFiniteCost => "NON_FINITE_COST",
            Self::NegativeCost => "NEGATIVE_COST",
            Self::NonPositiveBandwidth => "NON_POSITIVE_BANDWIDTH",
        }
    }
}

/// A validated set of sites and candidate links.
///
/// Nodes are dense indices in `0..node_count`; human-readable labels and
/// positions belong to the presentation layer.
///
/// # Examples
/// ```
/// use netweave_core::{Link, Network};
///
/// let network = Network::new(2, vec![Link::new(0, 1, 4.0, 10.0)])
///     .expect("link is valid");
/// assert_eq!(network.node_count(), 2);
/// assert_eq!(network.link_count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    node_count: usize,
    links: Vec<Link>,
}

impl Network {
    /// Validates the supplied links and constructs a network.
    ///
    /// # Errors
    /// Returns [`NetworkError`] when a link references a node outside
    /// `0..node_count`, carries a negative or non-finite cost, or carries a
    /// bandwidth that is not strictly positive and finite.
    pub fn new(node_count: usize, links: Vec<Link>) -> Result<Self, NetworkError> {
        for (index, link) in links.iter().enumerate() {
            for node in [link.source, link.target] {
                if node >= node_count {
                    return Err(NetworkError::InvalidEndpoint {
                        link: index,
                        node,
                        node_count,
                    });
                }
            }
            if !link.cost.is_finite() {
                return Err(NetworkError::NonFiniteCost {
                    link: index,
                    cost: link.cost,
                });
            }
            if link.cost < 0.0 {
                return Err(NetworkError::NegativeCost {
                    link: index,
                    cost: link.cost,
                });
            }
            if !link.bandwidth.is_finite() || link.bandwidth <= 0.0 {
                return Err(NetworkError::NonPositiveBandwidth {
                    link: index,
                    bandwidth: link.bandwidth,
                });
            }
        }

        Ok(Self { node_count, links })
    }

    /// Returns the number of sites.
    #[rustfmt::skip]
    #[must_use]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the candidate link table in identifier order.
    #[rustfmt::skip]
    #[must_use]
    pub fn links(&self) -> &[Link] { &self.links }

    /// Returns the number of candidate links.
    #[rustfmt::skip]
    #[must_use]
    pub fn link_count(&self) -> usize { self.links.len() }

    /// Resolves a link identifier.
    ///
    /// # Panics
    /// Panics when `id` was not issued for this network.
    #[must_use]
    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.get()]
    }

    /// Returns the number of links a complete spanning tree must contain.
    #[must_use]
    pub fn expected_tree_size(&self) -> usize {
        self.node_count.saturating_sub(1)
    }

    /// Iterates over `(LinkId, &Link)` pairs in identifier order.
    pub fn link_entries(&self) -> impl Iterator<Item = (LinkId, &Link)> {
        self.links
            .iter()
            .enumerate()
            .map(|(index, link)| (LinkId::new(index), link))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_links() {
        let network = Network::new(
            3,
            vec![Link::new(0, 1, 2.0, 4.0), Link::new(1, 2, 0.0, 0.5)],
        )
        .expect("links are valid");
        assert_eq!(network.link_count(), 2);
        assert_eq!(network.expected_tree_size(), 2);
    }

    #[test]
    fn accepts_parallel_links() {
        let network = Network::new(
            2,
            vec![Link::new(0, 1, 1.0, 1.0), Link::new(0, 1, 2.0, 9.0)],
        )
        .expect("parallel links are distinct entities");
        assert_eq!(network.link_count(), 2);
        assert_ne!(LinkId::new(0), LinkId::new(1));
    }

    #[test]
    fn rejects_out_of_range_endpoint() {
        let result = Network::new(2, vec![Link::new(0, 2, 1.0, 1.0)]);
        assert!(matches!(
            result,
            Err(NetworkError::InvalidEndpoint {
                link: 0,
                node: 2,
                node_count: 2
            })
        ));
    }

    #[test]
    fn rejects_negative_cost() {
        let result = Network::new(2, vec![Link::new(0, 1, -1.0, 1.0)]);
        let err = result.expect_err("negative cost must be rejected");
        assert_eq!(err.code(), NetworkErrorCode::NegativeCost);
    }

    #[test]
    fn rejects_non_finite_cost() {
        let result = Network::new(2, vec![Link::new(0, 1, f64::NAN, 1.0)]);
        let err = result.expect_err("NaN cost must be rejected");
        assert_eq!(err.code(), NetworkErrorCode::NonFiniteCost);
    }

    #[test]
    fn rejects_non_positive_bandwidth() {
        for bandwidth in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let result = Network::new(2, vec![Link::new(0, 1, 1.0, bandwidth)]);
            let err = result.expect_err("bandwidth must be strictly positive");
            assert_eq!(err.code(), NetworkErrorCode::NonPositiveBandwidth);
        }
    }

    #[test]
    fn opposite_resolves_either_orientation() {
        let link = Link::new(4, 7, 1.0, 1.0);
        assert_eq!(link.opposite(4), Some(7));
        assert_eq!(link.opposite(7), Some(4));
        assert_eq!(link.opposite(5), None);
    }
}
