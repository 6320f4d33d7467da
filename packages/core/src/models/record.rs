//! Transport Records
//!
//! The JSON-serializable form of a node handed back to API callers. The
//! record carries either the ids of the direct children or the fully nested
//! children, never both.

use super::NodeId;
use serde::{Deserialize, Serialize};

/// Children of a serialized node.
///
/// Flattened into [`TransportRecord`], so the variant name becomes the key:
/// `"childrenIds": [..]` or `"children": [..]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Descendants {
    /// Non-recursive form: ordered ids of the direct children
    #[serde(rename = "childrenIds")]
    ChildrenIds(Vec<NodeId>),

    /// Recursive form: ordered, fully serialized children
    #[serde(rename = "children")]
    Children(Vec<TransportRecord>),
}

/// Serialized bookmark node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportRecord {
    pub id: NodeId,

    /// Absent only for the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,

    /// Present only for URL leaves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    pub title: String,

    #[serde(flatten)]
    pub descendants: Descendants,
}

impl TransportRecord {
    /// Ids of the direct children, whichever form the record is in
    pub fn child_ids(&self) -> Vec<NodeId> {
        match &self.descendants {
            Descendants::ChildrenIds(ids) => ids.clone(),
            Descendants::Children(children) => children.iter().map(|c| c.id).collect(),
        }
    }
}
