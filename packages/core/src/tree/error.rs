//! Tree Model Error Types
//!
//! Errors raised by a model when asked to apply a structurally invalid
//! mutation. The service layer validates requests first, so these only
//! surface when validation and model disagree.

use crate::models::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No node with this id
    #[error("Node not found: {0}")]
    UnknownNode(NodeId),

    /// Operation needs a folder
    #[error("Node {0} is not a folder")]
    NotAFolder(NodeId),

    /// Operation needs a URL leaf
    #[error("Node {0} is not a URL bookmark")]
    NotAUrl(NodeId),

    /// Insert or move position outside `0..=child_count`
    #[error("Index {index} out of bounds for folder {parent} with {child_count} children")]
    IndexOutOfBounds {
        parent: NodeId,
        index: usize,
        child_count: usize,
    },

    /// Root, bookmark bar and "other" folder cannot be moved or removed, and
    /// the root cannot gain children
    #[error("Permanent node {0} cannot be modified")]
    PermanentNode(NodeId),

    /// Target parent lies inside the subtree being moved
    #[error("Cannot move node {node} into its own subtree (target {parent})")]
    Cycle { node: NodeId, parent: NodeId },

    /// Non-root node without a parent
    #[error("Node {0} has no parent")]
    Orphan(NodeId),
}

impl TreeError {
    /// Create an index out of bounds error
    pub fn index_out_of_bounds(parent: NodeId, index: usize, child_count: usize) -> Self {
        Self::IndexOutOfBounds {
            parent,
            index,
            child_count,
        }
    }

    /// Create a cycle error
    pub fn cycle(node: NodeId, parent: NodeId) -> Self {
        Self::Cycle { node, parent }
    }
}
