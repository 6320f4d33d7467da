//! Raw mutation callbacks emitted by a [`BookmarkModel`].

use super::BookmarkModel;
use crate::models::{BookmarkNode, NodeId};

/// Receives the raw mutation callbacks of a model.
///
/// Every callback runs synchronously inside the mutating call, after the
/// change is applied. `model` reflects the post-mutation state.
pub trait BookmarkModelObserver: Send + Sync {
    /// The model finished loading its contents
    fn loaded(&self, model: &dyn BookmarkModel);

    /// A node was inserted at `index` of `parent`
    fn node_added(&self, model: &dyn BookmarkModel, parent: NodeId, index: usize);

    /// The node previously at `old_index` of `parent` was removed with its
    /// subtree. `node` is the detached node; its id no longer resolves.
    fn node_removed(
        &self,
        model: &dyn BookmarkModel,
        parent: NodeId,
        old_index: usize,
        node: &BookmarkNode,
    );

    /// A node moved from `old_parent[old_index]` to `new_parent[new_index]`
    fn node_moved(
        &self,
        model: &dyn BookmarkModel,
        old_parent: NodeId,
        old_index: usize,
        new_parent: NodeId,
        new_index: usize,
    );

    /// Title or URL of `node` changed. The callback does not say which.
    fn node_changed(&self, model: &dyn BookmarkModel, node: NodeId);

    /// The children of `node` were reordered
    fn node_children_reordered(&self, model: &dyn BookmarkModel, node: NodeId);

    /// A favicon finished loading for `node`
    fn node_favicon_loaded(&self, _model: &dyn BookmarkModel, _node: NodeId) {}
}
