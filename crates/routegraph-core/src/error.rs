//! Error types for Routegraph Core

use crate::graph::{NodeId, NodeKind};
use thiserror::Error;

/// Result type alias using Routegraph's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Routegraph error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Edge not found: {from} -> {to}")]
    MissingEdge { from: NodeId, to: NodeId },

    #[error("Graph node {node} has no neighbor with data {key}")]
    NoSuchNeighbor { node: NodeId, key: String },

    #[error("Graph node {node} ({index} index) has no neighbor with data {key}")]
    BrokenPath {
        index: usize,
        node: NodeId,
        key: String,
    },

    #[error("Node not found: {0}")]
    UnknownNode(NodeId),

    /// An edge operation of the other kind was applied to `node`; `kind` is
    /// the storage the node actually has
    #[error("Node {node} stores {kind} edges")]
    EdgeKindMismatch { node: NodeId, kind: NodeKind },

    #[error("Work queue is empty")]
    EmptyQueue,

    #[error("Traversal limit exceeded: {limit} reached {value} (max {max})")]
    LimitExceeded {
        limit: &'static str,
        value: usize,
        max: usize,
    },
}

impl Error {
    /// Whether this error describes the shape of the graph itself
    /// (a missing edge, an unresolved neighbor or a broken path).
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MissingEdge { .. } | Self::NoSuchNeighbor { .. } | Self::BrokenPath { .. }
        )
    }
}
