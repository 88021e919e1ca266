//! Edge-list provider for plain-text network descriptions.
//!
//! The format is line oriented. Blank lines and lines starting with `#` are
//! ignored. Two directives exist:
//!
//! ```text
//! node <label> [server|client]
//! link <from-label> <to-label> <cost> <bandwidth>
//! ```
//!
//! Nodes default to `client` when no kind is given. Links must reference
//! labels declared earlier in the file. Numeric validation beyond parsing
//! (finite, non-negative cost, positive bandwidth) is left to
//! [`Network::new`], whose rejection is surfaced unchanged.

use std::collections::HashMap;

use thiserror::Error;

use netweave_core::{Link, Network, NetworkError, NodeKind};

/// Errors raised while parsing an edge-list description.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum EdgeListError {
    /// A line started with something other than `node` or `link`.
    #[error("line {line}: unknown directive `{directive}`")]
    UnknownDirective {
        /// 1-based source line number.
        line: usize,
        /// The offending first token.
        directive: String,
    },
    /// A directive was missing a required field.
    #[error("line {line}: expected {expected}")]
    MissingField {
        /// 1-based source line number.
        line: usize,
        /// Description of the missing field.
        expected: &'static str,
    },
    /// A node label was declared twice.
    #[error("line {line}: duplicate node label `{label}`")]
    DuplicateLabel {
        /// 1-based source line number.
        line: usize,
        /// The repeated label.
        label: String,
    },
    /// A link referenced a label no `node` directive declared.
    #[error("line {line}: unknown node label `{label}`")]
    UnknownLabel {
        /// 1-based source line number.
        line: usize,
        /// The unresolved label.
        label: String,
    },
    /// A node kind was neither `server` nor `client`.
    #[error("line {line}: unknown node kind `{value}`, expected server or client")]
    UnknownKind {
        /// 1-based source line number.
        line: usize,
        /// The offending kind token.
        value: String,
    },
    /// A numeric field failed to parse.
    #[error("line {line}: invalid {field} `{value}`")]
    InvalidNumber {
        /// 1-based source line number.
        line: usize,
        /// Which field failed to parse.
        field: &'static str,
        /// The offending token.
        value: String,
    },
    /// The assembled links failed network validation.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

impl EdgeListError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> EdgeListErrorCode {
        match self {
            Self::UnknownDirective { .. } => EdgeListErrorCode::UnknownDirective,
            Self::MissingField { .. } => EdgeListErrorCode::MissingField,
            Self::DuplicateLabel { .. } => EdgeListErrorCode::DuplicateLabel,
            Self::UnknownLabel { .. } => EdgeListErrorCode::UnknownLabel,
            Self::UnknownKind { .. } => EdgeListErrorCode::UnknownKind,
            Self::InvalidNumber { .. } => EdgeListErrorCode::InvalidNumber,
            Self::Network(_) => EdgeListErrorCode::Network,
        }
    }
}

/// Machine-readable error codes for [`EdgeListError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EdgeListErrorCode {
    /// A line started with an unrecognised directive.
    UnknownDirective,
    /// A directive was missing a required field.
    MissingField,
    /// A node label was declared twice.
    DuplicateLabel,
    /// A link referenced an undeclared label.
    UnknownLabel,
    /// A node kind was neither `server` nor `client`.
    UnknownKind,
    /// A numeric field failed to parse.
    InvalidNumber,
    /// The assembled links failed network validation.
    Network,
}

impl EdgeListErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownDirective => "UNKNOWN_DIRECTIVE",
            Self::MissingField => "MISSING_FIELD",
            Self::DuplicateLabel => "DUPLICATE_LABEL",
            Self::UnknownLabel => "UNKNOWN_LABEL",
            Self::UnknownKind => "UNKNOWN_KIND",
            Self::InvalidNumber => "INVALID_NUMBER",
            Self::Network => "NETWORK",
        }
    }
}

/// A network parsed from an edge-list description, together with the label
/// table needed to translate between user-facing names and dense node ids.
///
/// # Examples
/// ```
/// use netweave_providers_edgelist::EdgeListNetwork;
///
/// let text = "\
/// ## two offices and a data centre
/// node dc server
/// node east
/// node west
/// link dc east 4.0 10.0
/// link dc west 6.0 8.0
/// ";
/// let parsed = EdgeListNetwork::parse("offices", text).expect("text is valid");
/// assert_eq!(parsed.network().node_count(), 3);
/// assert_eq!(parsed.network().link_count(), 2);
/// assert_eq!(parsed.node_id("west"), Some(2));
/// ```
#[derive(Clone, Debug)]
pub struct EdgeListNetwork {
    name: String,
    network: Network,
    labels: Vec<String>,
    kinds: Vec<NodeKind>,
    index: HashMap<String, usize>,
}

impl EdgeListNetwork {
    /// Parses an edge-list description into a validated network.
    ///
    /// # Errors
    /// Returns an [`EdgeListError`] naming the offending line for malformed
    /// directives, and [`EdgeListError::Network`] when a link's numeric
    /// values fail validation.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, EdgeListError> {
        let mut labels: Vec<String> = Vec::new();
        let mut kinds: Vec<NodeKind> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut links: Vec<Link> = Vec::new();

        for (offset, raw) in text.lines().enumerate() {
            let line = offset + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut tokens = trimmed.split_whitespace();
            let directive = tokens.next().unwrap_or_default();
            match directive {
                "node" => {
                    let label = tokens.next().ok_or(EdgeListError::MissingField {
                        line,
                        expected: "a node label",
                    })?;
                    let kind = match tokens.next() {
                        None => NodeKind::Client,
                        Some("server") => NodeKind::Server,
                        Some("client") => NodeKind::Client,
                        Some(other) => {
                            return Err(EdgeListError::UnknownKind {
                                line,
                                value: other.to_owned(),
                            });
                        }
                    };
                    if index.contains_key(label) {
                        return Err(EdgeListError::DuplicateLabel {
                            line,
                            label: label.to_owned(),
                        });
                    }
                    index.insert(label.to_owned(), labels.len());
                    labels.push(label.to_owned());
                    kinds.push(kind);
                }
                "link" => {
                    let source = resolve(&index, &mut tokens, line, "a source label")?;
                    let target = resolve(&index, &mut tokens, line, "a target label")?;
                    let cost = number(&mut tokens, line, "cost")?;
                    let bandwidth = number(&mut tokens, line, "bandwidth")?;
                    links.push(Link::new(source, target, cost, bandwidth));
                }
                other => {
                    return Err(EdgeListError::UnknownDirective {
                        line,
                        directive: other.to_owned(),
                    });
                }
            }
        }

        let network = Network::new(labels.len(), links)?;
        Ok(Self {
            name: name.into(),
            network,
            labels,
            kinds,
            index,
        })
    }

    /// Returns the human-readable name of the source.
    #[rustfmt::skip]
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    /// Returns the validated network.
    #[rustfmt::skip]
    #[must_use]
    pub fn network(&self) -> &Network { &self.network }

    /// Returns the node labels in declaration order.
    #[rustfmt::skip]
    #[must_use]
    pub fn labels(&self) -> &[String] { &self.labels }

    /// Returns the label for a node id, if the id is in range.
    #[must_use]
    pub fn label(&self, node: usize) -> Option<&str> {
        self.labels.get(node).map(String::as_str)
    }

    /// Returns the kind declared for a node id, if the id is in range.
    #[must_use]
    pub fn kind(&self, node: usize) -> Option<NodeKind> {
        self.kinds.get(node).copied()
    }

    /// Resolves a label to its dense node id.
    #[must_use]
    pub fn node_id(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }
}

fn resolve<'a>(
    index: &HashMap<String, usize>,
    tokens: &mut impl Iterator<Item = &'a str>,
    line: usize,
    expected: &'static str,
) -> Result<usize, EdgeListError> {
    let label = tokens
        .next()
        .ok_or(EdgeListError::MissingField { line, expected })?;
    index
        .get(label)
        .copied()
        .ok_or_else(|| EdgeListError::UnknownLabel {
            line,
            label: label.to_owned(),
        })
}

fn number<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line: usize,
    field: &'static str,
) -> Result<f64, EdgeListError> {
    let token = tokens.next().ok_or(EdgeListError::MissingField {
        line,
        expected: field,
    })?;
    token.parse().map_err(|_| EdgeListError::InvalidNumber {
        line,
        field,
        value: token.to_owned(),
    })
}

#[cfg(test)]
mod tests;
