//! Validation Rules
//!
//! Pure predicates guarding every mutation. Each returns the validated value
//! or the rejection; none of them touches the model mutably.

use super::error::{ApiResult, BookmarkApiError};
use crate::models::{BookmarkNode, NodeId};
use crate::tree::BookmarkModel;
use url::Url;

/// Resolve `id` or fail with `NoNodeError`
pub fn require_exists<M>(model: &M, id: NodeId) -> ApiResult<&BookmarkNode>
where
    M: BookmarkModel + ?Sized,
{
    model.node(id).ok_or_else(|| BookmarkApiError::no_node(id))
}

/// Reject the root, the bookmark bar and the "other" folder
pub fn require_not_special<'a, M>(model: &M, node: &'a BookmarkNode) -> ApiResult<&'a BookmarkNode>
where
    M: BookmarkModel + ?Sized,
{
    if model.is_permanent_node(node.id) {
        return Err(BookmarkApiError::modify_special(node.id));
    }
    Ok(node)
}

/// Accept `0 <= index <= child_count`
pub fn require_index_in_bounds(index: i64, child_count: usize) -> ApiResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i <= child_count)
        .ok_or_else(|| BookmarkApiError::invalid_index(index, child_count))
}

/// Parse a URL. Empty text means "no URL" and yields `None`.
pub fn require_valid_url(text: &str) -> ApiResult<Option<Url>> {
    if text.is_empty() {
        return Ok(None);
    }
    Url::parse(text)
        .map(Some)
        .map_err(|_| BookmarkApiError::invalid_url(text))
}

/// Reject non-recursive removal of a folder that still has children
pub fn require_empty_or_recursive(node: &BookmarkNode, recursive: bool) -> ApiResult<()> {
    if node.is_folder() && node.child_count() > 0 && !recursive {
        return Err(BookmarkApiError::folder_not_empty(node.id));
    }
    Ok(())
}

/// Resolve a parent reference or fail with `NoParentError`
pub fn require_parent_exists<M>(model: &M, id: NodeId) -> ApiResult<&BookmarkNode>
where
    M: BookmarkModel + ?Sized,
{
    model.node(id).ok_or_else(|| BookmarkApiError::no_parent(id))
}

/// Reject moving `node` under itself or one of its descendants
pub fn require_not_ancestor<M>(model: &M, node: NodeId, new_parent: NodeId) -> ApiResult<()>
where
    M: BookmarkModel + ?Sized,
{
    if model.has_ancestor(new_parent, node) {
        return Err(BookmarkApiError::invalid_move(node, new_parent));
    }
    Ok(())
}
