//! Mutation Service
//!
//! Validates mutation requests and applies them through the model's own
//! primitives. Every check runs against the current tree before the first
//! model call, so a rejected request leaves the tree untouched and emits no
//! event. A successful request triggers exactly one model callback.

use super::error::{ApiResult, BookmarkApiError};
use super::requests::{CreateRequest, MoveRequest, RemoveRequest, SetTitleRequest};
use super::serializer::serialize_node;
use super::validation::{
    require_empty_or_recursive, require_exists, require_index_in_bounds, require_not_ancestor,
    require_not_special, require_parent_exists, require_valid_url,
};
use crate::models::TransportRecord;
use crate::tree::BookmarkModel;
use tracing::debug;

pub struct MutationService<'a, M: BookmarkModel + ?Sized> {
    model: &'a mut M,
}

impl<'a, M: BookmarkModel + ?Sized> MutationService<'a, M> {
    pub fn new(model: &'a mut M) -> Self {
        Self { model }
    }

    /// Create a folder, or a URL leaf when `url` is non-empty.
    ///
    /// Returns the new node's record, non-recursive.
    pub fn create(&mut self, request: CreateRequest) -> ApiResult<TransportRecord> {
        let parent_id = request
            .parent_id
            .unwrap_or_else(|| self.model.other_node_id());
        let parent = require_parent_exists(&*self.model, parent_id)?;
        // The root takes no direct children and a leaf takes none at all
        if parent.parent.is_none() || !parent.is_folder() {
            return Err(BookmarkApiError::no_parent(parent_id));
        }

        let child_count = parent.child_count();
        let index = match request.index {
            Some(index) => require_index_in_bounds(index, child_count)?,
            None => child_count,
        };
        let title = request.title.unwrap_or_default();
        let url = require_valid_url(request.url.as_deref().unwrap_or_default())?;

        let id = match url {
            Some(url) => self.model.add_url(parent_id, index, &title, url)?,
            None => self.model.add_folder(parent_id, index, &title)?,
        };
        debug!("Created node {} at {}[{}]", id, parent_id, index);

        let node = require_exists(&*self.model, id)?;
        Ok(serialize_node(&*self.model, node, false))
    }

    /// Remove a node. Folders with children need `recursive`.
    pub fn remove(&mut self, request: RemoveRequest) -> ApiResult<()> {
        let id = request.id;
        let node = require_exists(&*self.model, id)?;
        let node = require_not_special(&*self.model, node)?;
        require_empty_or_recursive(node, request.recursive.unwrap_or(false))?;

        let parent_id = node.parent.ok_or_else(|| BookmarkApiError::no_parent(id))?;
        let index = require_parent_exists(&*self.model, parent_id)?
            .index_of_child(id)
            .ok_or_else(|| BookmarkApiError::no_parent(id))?;

        self.model.remove(parent_id, index)?;
        debug!("Removed node {} from {}[{}]", id, parent_id, index);
        Ok(())
    }

    /// Move a node. The target defaults to the current parent and the index
    /// to the end of the target's children.
    pub fn move_node(&mut self, request: MoveRequest) -> ApiResult<()> {
        let id = request.id;
        let node = require_exists(&*self.model, id)?;
        let node = require_not_special(&*self.model, node)?;

        let parent_id = match request.parent_id {
            Some(parent_id) => parent_id,
            None => node.parent.ok_or_else(|| BookmarkApiError::no_parent(id))?,
        };
        let parent = require_parent_exists(&*self.model, parent_id)?;
        if parent_id == self.model.root_node_id() {
            return Err(BookmarkApiError::modify_special(parent_id));
        }
        if !parent.is_folder() {
            return Err(BookmarkApiError::no_parent(parent_id));
        }
        require_not_ancestor(&*self.model, id, parent_id)?;

        let child_count = parent.child_count();
        let index = match request.index {
            Some(index) => require_index_in_bounds(index, child_count)?,
            None => child_count,
        };

        self.model.move_node(id, parent_id, index)?;
        debug!("Moved node {} to {}[{}]", id, parent_id, index);
        Ok(())
    }

    /// Set a node's title. An omitted title clears it.
    pub fn set_title(&mut self, request: SetTitleRequest) -> ApiResult<()> {
        let id = request.id;
        let node = require_exists(&*self.model, id)?;
        require_not_special(&*self.model, node)?;

        let title = request.title.unwrap_or_default();
        self.model.set_title(id, &title)?;
        debug!("Set title of node {}", id);
        Ok(())
    }
}
