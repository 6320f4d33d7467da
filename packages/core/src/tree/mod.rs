//! Tree Model Layer
//!
//! The bookmark tree itself is owned by a [`BookmarkModel`] implementation:
//! it holds the nodes, assigns identifiers and reports every mutation to its
//! registered [`BookmarkModelObserver`]s through synchronous callbacks.
//!
//! # Callback Ordering
//!
//! A callback fires after the mutation is applied in memory and before the
//! mutating call returns. Observers receive the model by shared reference, so
//! they can read the post-mutation state but never mutate it from inside a
//! callback.
//!
//! # Implementations
//!
//! - [`InMemoryBookmarkModel`]: Reference model without persistence, used by
//!   the dev server and the test suites

mod error;
mod memory;
mod observer;

pub use error::TreeError;
pub use memory::InMemoryBookmarkModel;
pub use observer::BookmarkModelObserver;

use crate::models::{BookmarkNode, NodeId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use url::Url;

static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a model instance, used to key observer registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelId(u64);

impl ModelId {
    /// Allocate a process-unique identity
    pub fn next() -> Self {
        ModelId(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Abstract interface for a bookmark tree.
///
/// Implementations must keep the tree invariants (single parent, unique ids,
/// folder/leaf split) and notify observers exactly once per applied mutation.
pub trait BookmarkModel {
    /// Identity of this instance
    fn model_id(&self) -> ModelId;

    /// Application scope whose listening contexts receive this model's events
    fn scope(&self) -> &str;

    /// Look up a node by id
    fn node(&self, id: NodeId) -> Option<&BookmarkNode>;

    fn root_node_id(&self) -> NodeId;

    fn bookmark_bar_node_id(&self) -> NodeId;

    fn other_node_id(&self) -> NodeId;

    /// Register an observer. Registering twice delivers callbacks twice;
    /// deduplication is the caller's job.
    fn add_observer(&mut self, observer: Arc<dyn BookmarkModelObserver>);

    /// Unregister every registration of `observer`. Returns false when it
    /// was not registered.
    fn remove_observer(&mut self, observer: &Arc<dyn BookmarkModelObserver>) -> bool;

    /// Insert an empty folder at `index` under `parent`
    fn add_folder(&mut self, parent: NodeId, index: usize, title: &str)
        -> Result<NodeId, TreeError>;

    /// Insert a URL leaf at `index` under `parent`
    fn add_url(
        &mut self,
        parent: NodeId,
        index: usize,
        title: &str,
        url: Url,
    ) -> Result<NodeId, TreeError>;

    /// Remove the child at `index` of `parent` together with its subtree
    fn remove(&mut self, parent: NodeId, index: usize) -> Result<(), TreeError>;

    /// Move `node` to `index` under `new_parent`. `index` is interpreted
    /// against the target's children before the node is detached.
    fn move_node(&mut self, node: NodeId, new_parent: NodeId, index: usize)
        -> Result<(), TreeError>;

    fn set_title(&mut self, node: NodeId, title: &str) -> Result<(), TreeError>;

    fn root_node(&self) -> Option<&BookmarkNode> {
        self.node(self.root_node_id())
    }

    /// Root, bookmark bar and "other" folder
    fn is_permanent_node(&self, id: NodeId) -> bool {
        id == self.root_node_id() || id == self.bookmark_bar_node_id() || id == self.other_node_id()
    }

    /// True if `ancestor` is `node` itself or lies on its parent chain
    fn has_ancestor(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }
}
