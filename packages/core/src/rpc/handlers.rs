//! RPC Method Handlers
//!
//! Decodes each method's params into its request record and runs it against
//! the facade. Results are records, record lists, or `null` for operations
//! without a result.

use crate::models::NodeId;
use crate::rpc::types::RpcError;
use crate::services::{
    parse_request, BookmarksApi, CreateRequest, GetNodesRequest, MoveRequest, RemoveRequest,
    SetTitleRequest,
};
use crate::tree::BookmarkModel;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

pub const GET_NODE: &str = "getNode";
pub const GET_CHILDREN: &str = "getChildren";
pub const GET_TREE: &str = "getTree";
pub const SEARCH: &str = "search";
pub const REMOVE: &str = "remove";
pub const CREATE: &str = "create";
pub const MOVE: &str = "move";
pub const SET_TITLE: &str = "setTitle";

/// Every method the server answers
pub const METHODS: &[&str] = &[
    GET_NODE,
    GET_CHILDREN,
    GET_TREE,
    SEARCH,
    REMOVE,
    CREATE,
    MOVE,
    SET_TITLE,
];

/// Run `method` with `params` against `api`
pub fn handle_request<M: BookmarkModel>(
    api: &mut BookmarksApi<M>,
    method: &str,
    params: Value,
) -> Result<Value, RpcError> {
    match method {
        GET_NODE => {
            let request: GetNodesRequest = parse_request(params)?;
            to_result(api.get_nodes(request)?)
        }
        GET_CHILDREN => {
            let id: NodeId = parse_request(params)?;
            to_result(api.get_children(id)?)
        }
        GET_TREE => to_result(api.get_tree()?),
        SEARCH => {
            let query: String = parse_request(params)?;
            to_result(api.search(&query)?)
        }
        REMOVE => {
            let request: RemoveRequest = parse_request(params)?;
            api.remove(request)?;
            Ok(Value::Null)
        }
        CREATE => {
            // A bare `null` creates an untitled folder under the default parent
            let request: CreateRequest = if params.is_null() {
                CreateRequest::default()
            } else {
                parse_request(params)?
            };
            to_result(api.create(request)?)
        }
        MOVE => {
            let request: MoveRequest = parse_request(params)?;
            api.move_node(request)?;
            Ok(Value::Null)
        }
        SET_TITLE => {
            let request: SetTitleRequest = parse_request(params)?;
            api.set_title(request)?;
            Ok(Value::Null)
        }
        _ => {
            warn!("Unknown method: {}", method);
            Err(RpcError::method_not_found(method))
        }
    }
}

fn to_result<T: Serialize>(value: T) -> Result<Value, RpcError> {
    serde_json::to_value(value)
        .map_err(|e| RpcError::internal_error(format!("Failed to serialize result: {}", e)))
}
