//! Read-only bookmark queries.

use super::error::{ApiResult, BookmarkApiError};
use super::search::TextMatcher;
use super::serializer::serialize_node;
use super::validation::require_exists;
use crate::models::{NodeId, TransportRecord};
use crate::tree::BookmarkModel;
use tracing::debug;

/// Maximum number of search results when no limit is configured
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Query service over a borrowed model
///
/// Never mutates the model, so reads emit no events.
pub struct QueryService<'a, M: BookmarkModel + ?Sized> {
    model: &'a M,
}

impl<'a, M: BookmarkModel + ?Sized> QueryService<'a, M> {
    pub fn new(model: &'a M) -> Self {
        Self { model }
    }

    /// Fetch one node, non-recursive
    pub fn get_node(&self, id: NodeId) -> ApiResult<TransportRecord> {
        let node = require_exists(self.model, id)?;
        Ok(serialize_node(self.model, node, false))
    }

    /// Fetch several nodes in request order. An empty list yields the root.
    /// The first unknown id fails the whole batch.
    pub fn get_nodes(&self, ids: &[NodeId]) -> ApiResult<Vec<TransportRecord>> {
        if ids.is_empty() {
            return Ok(vec![self.get_node(self.model.root_node_id())?]);
        }
        ids.iter().map(|id| self.get_node(*id)).collect()
    }

    /// Direct children of `id`, non-recursive, in order
    pub fn get_children(&self, id: NodeId) -> ApiResult<Vec<TransportRecord>> {
        let node = require_exists(self.model, id)?;
        Ok(node
            .children()
            .iter()
            .filter_map(|child| self.model.node(*child))
            .map(|child| serialize_node(self.model, child, false))
            .collect())
    }

    /// The whole tree, serialized recursively from the root
    pub fn get_tree(&self) -> ApiResult<TransportRecord> {
        let root_id = self.model.root_node_id();
        let root = self
            .model
            .node(root_id)
            .ok_or_else(|| BookmarkApiError::no_node(root_id))?;
        Ok(serialize_node(self.model, root, true))
    }

    /// Up to `limit` matches for `query`, in matcher order
    pub fn search(
        &self,
        matcher: &dyn TextMatcher,
        query: &str,
        limit: usize,
    ) -> Vec<TransportRecord>
    where
        M: Sized,
    {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let matches = matcher.find_matches(self.model, query, limit);
        debug!("Search {:?} matched {} nodes", query, matches.len());

        matches
            .into_iter()
            .take(limit)
            .filter_map(|id| self.model.node(id))
            .map(|node| serialize_node(self.model, node, false))
            .collect()
    }
}
