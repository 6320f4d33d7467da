//! Node serialization into transport records.

use crate::models::{BookmarkNode, Descendants, TransportRecord};
use crate::tree::BookmarkModel;

/// Serialize `node` into a [`TransportRecord`].
///
/// Non-recursive records list the direct children's ids. Recursive records
/// nest every descendant; depth is bounded by the tree since a node never
/// appears twice.
pub fn serialize_node<M>(model: &M, node: &BookmarkNode, recursive: bool) -> TransportRecord
where
    M: BookmarkModel + ?Sized,
{
    let descendants = if recursive {
        Descendants::Children(
            node.children()
                .iter()
                .filter_map(|id| model.node(*id))
                .map(|child| serialize_node(model, child, true))
                .collect(),
        )
    } else {
        Descendants::ChildrenIds(node.children().to_vec())
    };

    TransportRecord {
        id: node.id,
        parent_id: node.parent,
        url: node.url_value().map(|url| url.to_string()),
        title: node.title.clone(),
        descendants,
    }
}
