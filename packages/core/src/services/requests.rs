//! Request Records
//!
//! Typed forms of the loosely-typed JSON arguments each operation accepts.
//! Optional fields treat an explicit `null` the same as an absent key.

use super::error::{ApiResult, BookmarkApiError};
use crate::models::NodeId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Argument of `getNode`: nothing, one id, or a list of ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GetNodesRequest {
    /// `null` or no argument: the root
    #[default]
    Root,
    Single(NodeId),
    Many(Vec<NodeId>),
}

impl GetNodesRequest {
    /// Requested ids; empty means "the root"
    pub fn ids(&self) -> Vec<NodeId> {
        match self {
            GetNodesRequest::Root => Vec::new(),
            GetNodesRequest::Single(id) => vec![*id],
            GetNodesRequest::Many(ids) => ids.clone(),
        }
    }
}

/// Arguments of `create`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    /// Defaults to the "other" folder
    #[serde(default)]
    pub parent_id: Option<NodeId>,

    /// Defaults to the end of the parent's children
    #[serde(default)]
    pub index: Option<i64>,

    #[serde(default)]
    pub title: Option<String>,

    /// Empty or absent creates a folder
    #[serde(default)]
    pub url: Option<String>,
}

impl CreateRequest {
    /// Folder under the default parent
    pub fn folder(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// URL leaf under the default parent
    pub fn bookmark(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent_id: NodeId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn at_index(mut self, index: i64) -> Self {
        self.index = Some(index);
        self
    }
}

/// Arguments of `remove`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    pub id: NodeId,

    #[serde(default)]
    pub recursive: Option<bool>,
}

/// Arguments of `move`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub id: NodeId,

    /// Defaults to the node's current parent
    #[serde(default)]
    pub parent_id: Option<NodeId>,

    /// Defaults to the end of the target's children
    #[serde(default)]
    pub index: Option<i64>,
}

/// Arguments of `setTitle`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTitleRequest {
    pub id: NodeId,

    /// Omitted clears the title
    #[serde(default)]
    pub title: Option<String>,
}

/// Decode a request record, mapping shape errors to `InvalidArgumentsError`
pub fn parse_request<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| BookmarkApiError::invalid_arguments(e.to_string()))
}
