//! Service Layer Error Types
//!
//! Every rejected request maps to one [`BookmarkApiError`]. Each variant has a
//! stable [`ErrorKind`] and the fixed message callers see, so a rejection can
//! be surfaced as a structured `{kind, message}` pair.

use crate::models::NodeId;
use crate::tree::TreeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable classification of a rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NoNodeError,
    NoParentError,
    FolderNotEmptyError,
    InvalidIndexError,
    InvalidUrlError,
    ModifySpecialError,
    InvalidMoveError,
    InvalidArgumentsError,
    TreeModelError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NoNodeError => "NoNodeError",
            ErrorKind::NoParentError => "NoParentError",
            ErrorKind::FolderNotEmptyError => "FolderNotEmptyError",
            ErrorKind::InvalidIndexError => "InvalidIndexError",
            ErrorKind::InvalidUrlError => "InvalidUrlError",
            ErrorKind::ModifySpecialError => "ModifySpecialError",
            ErrorKind::InvalidMoveError => "InvalidMoveError",
            ErrorKind::InvalidArgumentsError => "InvalidArgumentsError",
            ErrorKind::TreeModelError => "TreeModelError",
        }
    }
}

/// Request rejection errors
///
/// All validation variants are raised before the model is touched, so a
/// rejected request never leaves a partial mutation behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookmarkApiError {
    /// Target id does not resolve
    #[error("Can't find bookmark for id.")]
    NoNode { id: NodeId },

    /// Parent id does not resolve, or names a node that cannot hold children
    #[error("Can't find parent bookmark for id.")]
    NoParent { id: NodeId },

    /// Non-recursive removal of a folder with children
    #[error("Can't remove non-empty folder (use recursive to force).")]
    FolderNotEmpty { id: NodeId },

    /// Index outside `0..=child_count`
    #[error("Index out of bounds.")]
    InvalidIndex { index: i64, child_count: usize },

    /// Non-empty URL that does not parse
    #[error("Invalid URL.")]
    InvalidUrl { url: String },

    /// Mutation of root, bookmark bar or "other" folder, or root used as a
    /// move target
    #[error("Can't modify the root bookmark folders.")]
    ModifySpecial { id: NodeId },

    /// Move target lies inside the moved subtree
    #[error("Can't move a folder into itself or its descendants.")]
    InvalidMove { id: NodeId, parent_id: NodeId },

    /// Request record has the wrong shape
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The model refused a mutation that passed validation
    #[error("Tree model rejected the operation: {0}")]
    TreeModel(#[from] TreeError),
}

/// Structured rejection handed back to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
}

impl BookmarkApiError {
    /// Create a missing node error
    pub fn no_node(id: NodeId) -> Self {
        Self::NoNode { id }
    }

    /// Create a missing parent error
    pub fn no_parent(id: NodeId) -> Self {
        Self::NoParent { id }
    }

    /// Create a non-empty folder error
    pub fn folder_not_empty(id: NodeId) -> Self {
        Self::FolderNotEmpty { id }
    }

    /// Create an invalid index error
    pub fn invalid_index(index: i64, child_count: usize) -> Self {
        Self::InvalidIndex { index, child_count }
    }

    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Create a special node modification error
    pub fn modify_special(id: NodeId) -> Self {
        Self::ModifySpecial { id }
    }

    /// Create an invalid move error
    pub fn invalid_move(id: NodeId, parent_id: NodeId) -> Self {
        Self::InvalidMove { id, parent_id }
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoNode { .. } => ErrorKind::NoNodeError,
            Self::NoParent { .. } => ErrorKind::NoParentError,
            Self::FolderNotEmpty { .. } => ErrorKind::FolderNotEmptyError,
            Self::InvalidIndex { .. } => ErrorKind::InvalidIndexError,
            Self::InvalidUrl { .. } => ErrorKind::InvalidUrlError,
            Self::ModifySpecial { .. } => ErrorKind::ModifySpecialError,
            Self::InvalidMove { .. } => ErrorKind::InvalidMoveError,
            Self::InvalidArguments(_) => ErrorKind::InvalidArgumentsError,
            Self::TreeModel(_) => ErrorKind::TreeModelError,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, BookmarkApiError>;
