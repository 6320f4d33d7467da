use super::{BookmarkModel, BookmarkModelObserver, ModelId, TreeError};
use crate::models::{BookmarkNode, NodeId, NodeKind};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use url::Url;

const ROOT_ID: NodeId = NodeId(0);
const BOOKMARK_BAR_ID: NodeId = NodeId(1);
const OTHER_ID: NodeId = NodeId(2);
const FIRST_USER_ID: i64 = 3;

pub const BOOKMARK_BAR_TITLE: &str = "Bookmarks Bar";
pub const OTHER_BOOKMARKS_TITLE: &str = "Other Bookmarks";

/// In-memory bookmark tree for development and testing.
/// Does NOT persist data.
///
/// Starts with the three permanent folders: the root (id 0) holding the
/// bookmark bar (id 1) and the "other" folder (id 2). Ids of new nodes are
/// allocated monotonically and never reused.
pub struct InMemoryBookmarkModel {
    id: ModelId,
    scope: String,
    nodes: HashMap<NodeId, BookmarkNode>,
    next_id: i64,
    loaded: bool,
    observers: Vec<Arc<dyn BookmarkModelObserver>>,
}

impl InMemoryBookmarkModel {
    pub fn new(scope: impl Into<String>) -> Self {
        let mut root = BookmarkNode::folder(ROOT_ID, None, "");
        if let NodeKind::Folder { children } = &mut root.kind {
            children.extend([BOOKMARK_BAR_ID, OTHER_ID]);
        }

        let nodes = HashMap::from([
            (ROOT_ID, root),
            (
                BOOKMARK_BAR_ID,
                BookmarkNode::folder(BOOKMARK_BAR_ID, Some(ROOT_ID), BOOKMARK_BAR_TITLE),
            ),
            (
                OTHER_ID,
                BookmarkNode::folder(OTHER_ID, Some(ROOT_ID), OTHER_BOOKMARKS_TITLE),
            ),
        ]);

        Self {
            id: ModelId::next(),
            scope: scope.into(),
            nodes,
            next_id: FIRST_USER_ID,
            loaded: false,
            observers: Vec::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Mark the model as loaded and notify observers
    pub fn mark_loaded(&mut self) {
        self.loaded = true;
        self.notify(|observer, model| observer.loaded(model));
    }

    /// Total number of nodes, permanent folders included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Change the URL of a leaf
    pub fn set_url(&mut self, node: NodeId, url: Url) -> Result<(), TreeError> {
        let target = self
            .nodes
            .get_mut(&node)
            .ok_or(TreeError::UnknownNode(node))?;
        match &mut target.kind {
            NodeKind::Url { url: current } => *current = url,
            NodeKind::Folder { .. } => return Err(TreeError::NotAUrl(node)),
        }
        self.notify(|observer, model| observer.node_changed(model, node));
        Ok(())
    }

    /// Sort the children of a folder: folders first, then by title,
    /// case-insensitively. Ties keep their current order.
    pub fn sort_children(&mut self, parent: NodeId) -> Result<(), TreeError> {
        let mut children = self.folder_children(parent)?.to_vec();
        children.sort_by(|a, b| self.compare_for_sort(*a, *b));
        *self.folder_children_mut(parent)? = children;
        self.notify(|observer, model| observer.node_children_reordered(model, parent));
        Ok(())
    }

    /// Report that the favicon of `node` finished loading
    pub fn favicon_loaded(&mut self, node: NodeId) -> Result<(), TreeError> {
        if !self.nodes.contains_key(&node) {
            return Err(TreeError::UnknownNode(node));
        }
        self.notify(|observer, model| observer.node_favicon_loaded(model, node));
        Ok(())
    }

    fn compare_for_sort(&self, a: NodeId, b: NodeId) -> Ordering {
        match (self.nodes.get(&a), self.nodes.get(&b)) {
            (Some(a), Some(b)) => b
                .is_folder()
                .cmp(&a.is_folder())
                .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
            _ => Ordering::Equal,
        }
    }

    fn notify(&self, callback: impl Fn(&dyn BookmarkModelObserver, &dyn BookmarkModel)) {
        let model: &dyn BookmarkModel = self;
        for observer in &self.observers {
            callback(observer.as_ref(), model);
        }
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn folder_children(&self, id: NodeId) -> Result<&[NodeId], TreeError> {
        match &self.nodes.get(&id).ok_or(TreeError::UnknownNode(id))?.kind {
            NodeKind::Folder { children } => Ok(children),
            NodeKind::Url { .. } => Err(TreeError::NotAFolder(id)),
        }
    }

    fn folder_children_mut(&mut self, id: NodeId) -> Result<&mut Vec<NodeId>, TreeError> {
        match &mut self
            .nodes
            .get_mut(&id)
            .ok_or(TreeError::UnknownNode(id))?
            .kind
        {
            NodeKind::Folder { children } => Ok(children),
            NodeKind::Url { .. } => Err(TreeError::NotAFolder(id)),
        }
    }

    fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        make_node: impl FnOnce(NodeId) -> BookmarkNode,
    ) -> Result<NodeId, TreeError> {
        if parent == ROOT_ID {
            return Err(TreeError::PermanentNode(parent));
        }
        let child_count = self.folder_children(parent)?.len();
        if index > child_count {
            return Err(TreeError::index_out_of_bounds(parent, index, child_count));
        }

        let id = self.allocate_id();
        self.nodes.insert(id, make_node(id));
        self.folder_children_mut(parent)?.insert(index, id);
        debug!("Added node {} at {}[{}]", id, parent, index);

        self.notify(|observer, model| observer.node_added(model, parent, index));
        Ok(id)
    }

    /// Drop `id` and every descendant from the node map, returning `id`'s node
    fn detach_subtree(&mut self, id: NodeId) -> Result<BookmarkNode, TreeError> {
        let top = self.nodes.remove(&id).ok_or(TreeError::UnknownNode(id))?;
        let mut pending: Vec<NodeId> = top.children().to_vec();
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                pending.extend_from_slice(node.children());
            }
        }
        Ok(top)
    }
}

impl BookmarkModel for InMemoryBookmarkModel {
    fn model_id(&self) -> ModelId {
        self.id
    }

    fn scope(&self) -> &str {
        &self.scope
    }

    fn node(&self, id: NodeId) -> Option<&BookmarkNode> {
        self.nodes.get(&id)
    }

    fn root_node_id(&self) -> NodeId {
        ROOT_ID
    }

    fn bookmark_bar_node_id(&self) -> NodeId {
        BOOKMARK_BAR_ID
    }

    fn other_node_id(&self) -> NodeId {
        OTHER_ID
    }

    fn add_observer(&mut self, observer: Arc<dyn BookmarkModelObserver>) {
        self.observers.push(observer);
    }

    fn remove_observer(&mut self, observer: &Arc<dyn BookmarkModelObserver>) -> bool {
        let before = self.observers.len();
        self.observers
            .retain(|registered| !Arc::ptr_eq(registered, observer));
        self.observers.len() != before
    }

    fn add_folder(
        &mut self,
        parent: NodeId,
        index: usize,
        title: &str,
    ) -> Result<NodeId, TreeError> {
        self.insert_child(parent, index, |id| {
            BookmarkNode::folder(id, Some(parent), title)
        })
    }

    fn add_url(
        &mut self,
        parent: NodeId,
        index: usize,
        title: &str,
        url: Url,
    ) -> Result<NodeId, TreeError> {
        self.insert_child(parent, index, |id| {
            BookmarkNode::url(id, Some(parent), title, url)
        })
    }

    fn remove(&mut self, parent: NodeId, index: usize) -> Result<(), TreeError> {
        if parent == ROOT_ID {
            return Err(TreeError::PermanentNode(parent));
        }
        let children = self.folder_children(parent)?;
        let child = *children
            .get(index)
            .ok_or_else(|| TreeError::index_out_of_bounds(parent, index, children.len()))?;
        if self.is_permanent_node(child) {
            return Err(TreeError::PermanentNode(child));
        }

        self.folder_children_mut(parent)?.remove(index);
        let removed = self.detach_subtree(child)?;
        debug!("Removed node {} from {}[{}]", child, parent, index);

        self.notify(|observer, model| observer.node_removed(model, parent, index, &removed));
        Ok(())
    }

    fn move_node(
        &mut self,
        node: NodeId,
        new_parent: NodeId,
        index: usize,
    ) -> Result<(), TreeError> {
        let old_parent = self
            .nodes
            .get(&node)
            .ok_or(TreeError::UnknownNode(node))?
            .parent
            .ok_or(TreeError::Orphan(node))?;
        if self.is_permanent_node(node) {
            return Err(TreeError::PermanentNode(node));
        }
        if new_parent == ROOT_ID {
            return Err(TreeError::PermanentNode(new_parent));
        }
        let target_count = self.folder_children(new_parent)?.len();
        if index > target_count {
            return Err(TreeError::index_out_of_bounds(new_parent, index, target_count));
        }
        if self.has_ancestor(new_parent, node) {
            return Err(TreeError::cycle(node, new_parent));
        }

        let old_index = self
            .folder_children(old_parent)?
            .iter()
            .position(|id| *id == node)
            .ok_or(TreeError::Orphan(node))?;

        // Positions at or after the node shift down once it is detached.
        let new_index = if old_parent == new_parent && index > old_index {
            index - 1
        } else {
            index
        };

        self.folder_children_mut(old_parent)?.remove(old_index);
        self.folder_children_mut(new_parent)?.insert(new_index, node);
        if let Some(moved) = self.nodes.get_mut(&node) {
            moved.parent = Some(new_parent);
        }
        debug!(
            "Moved node {} from {}[{}] to {}[{}]",
            node, old_parent, old_index, new_parent, new_index
        );

        self.notify(|observer, model| {
            observer.node_moved(model, old_parent, old_index, new_parent, new_index)
        });
        Ok(())
    }

    fn set_title(&mut self, node: NodeId, title: &str) -> Result<(), TreeError> {
        let target = self
            .nodes
            .get_mut(&node)
            .ok_or(TreeError::UnknownNode(node))?;
        target.title = title.to_string();
        self.notify(|observer, model| observer.node_changed(model, node));
        Ok(())
    }
}
