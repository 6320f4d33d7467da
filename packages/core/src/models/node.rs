//! Bookmark Node Model
//!
//! A bookmark tree is made of folders and URL leaves. The folder/leaf split is
//! encoded in [`NodeKind`] so a folder can never carry a URL and a leaf can
//! never carry children.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Identifier of a node, unique within one model instance.
///
/// Identifiers are assigned by the model and never reused while the node
/// exists, so a missing id is indistinguishable from one that never existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        NodeId(id)
    }
}

/// Folder or URL leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A folder with an ordered list of children. Order defines display
    /// order and is the order used for index validation.
    Folder { children: Vec<NodeId> },

    /// A bookmark pointing at a URL. Leaves never have children.
    Url { url: Url },
}

/// A node of the bookmark tree.
///
/// # Fields
///
/// - `id`: Unique identifier assigned by the model
/// - `title`: Display title (may be empty)
/// - `parent`: Owning folder, `None` only for the root
/// - `kind`: Folder with children, or URL leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkNode {
    pub id: NodeId,
    pub title: String,
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

impl BookmarkNode {
    /// Create an empty folder node
    pub fn folder(id: NodeId, parent: Option<NodeId>, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            parent,
            kind: NodeKind::Folder {
                children: Vec::new(),
            },
        }
    }

    /// Create a URL leaf node
    pub fn url(id: NodeId, parent: Option<NodeId>, title: impl Into<String>, url: Url) -> Self {
        Self {
            id,
            title: title.into(),
            parent,
            kind: NodeKind::Url { url },
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    pub fn is_url(&self) -> bool {
        matches!(self.kind, NodeKind::Url { .. })
    }

    /// URL of a leaf, `None` for folders
    pub fn url_value(&self) -> Option<&Url> {
        match &self.kind {
            NodeKind::Url { url } => Some(url),
            NodeKind::Folder { .. } => None,
        }
    }

    /// Ordered child ids. Always empty for leaves.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Folder { children } => children,
            NodeKind::Url { .. } => &[],
        }
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Position of `child` among this node's children
    pub fn index_of_child(&self, child: NodeId) -> Option<usize> {
        self.children().iter().position(|id| *id == child)
    }
}
