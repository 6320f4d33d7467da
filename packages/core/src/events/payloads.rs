//! Named Bookmark Events
//!
//! Each raw model callback becomes one [`BookmarkEvent`]. The event name and
//! the JSON argument list are the wire contract seen by listening contexts.

use crate::models::NodeId;
use crate::tree::BookmarkModel;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const BOOKMARK_ADDED: &str = "bookmark-added";
pub const BOOKMARK_REMOVED: &str = "bookmark-removed";
pub const BOOKMARK_MOVED: &str = "bookmark-moved";
pub const BOOKMARK_CHANGED: &str = "bookmark-changed";
pub const BOOKMARK_CHILDREN_REORDERED: &str = "bookmark-children-reordered";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAddedPayload {
    pub id: NodeId,
    pub title: String,
    /// Absent for folders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub parent_id: NodeId,
    pub index: usize,
}

/// Former location of a removed node. The node itself is not described.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRemovedPayload {
    pub parent_id: NodeId,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMovedPayload {
    pub id: NodeId,
    pub parent_id: NodeId,
    pub index: usize,
    pub old_parent_id: NodeId,
    pub old_index: usize,
}

/// Changed attributes. Only the title is reported, whatever changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedAttributes {
    pub title: String,
}

/// A named event ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkEvent {
    Added(NodeAddedPayload),
    Removed(NodeRemovedPayload),
    Moved(NodeMovedPayload),
    Changed {
        id: NodeId,
        changes: ChangedAttributes,
    },
    ChildrenReordered {
        id: NodeId,
        children: Vec<NodeId>,
    },
}

impl BookmarkEvent {
    /// Build the added event from the post-insert tree
    pub fn added(model: &dyn BookmarkModel, parent: NodeId, index: usize) -> Option<Self> {
        let id = *model.node(parent)?.children().get(index)?;
        let node = model.node(id)?;
        Some(BookmarkEvent::Added(NodeAddedPayload {
            id,
            title: node.title.clone(),
            url: node.url_value().map(|url| url.to_string()),
            parent_id: parent,
            index,
        }))
    }

    pub fn removed(parent: NodeId, index: usize) -> Self {
        BookmarkEvent::Removed(NodeRemovedPayload {
            parent_id: parent,
            index,
        })
    }

    /// Build the moved event from the post-move tree
    pub fn moved(
        model: &dyn BookmarkModel,
        old_parent: NodeId,
        old_index: usize,
        new_parent: NodeId,
        new_index: usize,
    ) -> Option<Self> {
        let id = *model.node(new_parent)?.children().get(new_index)?;
        Some(BookmarkEvent::Moved(NodeMovedPayload {
            id,
            parent_id: new_parent,
            index: new_index,
            old_parent_id: old_parent,
            old_index,
        }))
    }

    pub fn changed(model: &dyn BookmarkModel, id: NodeId) -> Option<Self> {
        let node = model.node(id)?;
        Some(BookmarkEvent::Changed {
            id,
            changes: ChangedAttributes {
                title: node.title.clone(),
            },
        })
    }

    pub fn children_reordered(model: &dyn BookmarkModel, id: NodeId) -> Option<Self> {
        let node = model.node(id)?;
        Some(BookmarkEvent::ChildrenReordered {
            id,
            children: node.children().to_vec(),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            BookmarkEvent::Added(_) => BOOKMARK_ADDED,
            BookmarkEvent::Removed(_) => BOOKMARK_REMOVED,
            BookmarkEvent::Moved(_) => BOOKMARK_MOVED,
            BookmarkEvent::Changed { .. } => BOOKMARK_CHANGED,
            BookmarkEvent::ChildrenReordered { .. } => BOOKMARK_CHILDREN_REORDERED,
        }
    }

    /// Argument list as a JSON array
    pub fn args(&self) -> serde_json::Result<Value> {
        Ok(match self {
            BookmarkEvent::Added(payload) => json!([serde_json::to_value(payload)?]),
            BookmarkEvent::Removed(payload) => json!([serde_json::to_value(payload)?]),
            BookmarkEvent::Moved(payload) => json!([serde_json::to_value(payload)?]),
            BookmarkEvent::Changed { id, changes } => {
                json!([id, serde_json::to_value(changes)?])
            }
            BookmarkEvent::ChildrenReordered { id, children } => json!([id, children]),
        })
    }

    /// Argument list as compact JSON text
    pub fn to_json_args(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.args()?)
    }
}
