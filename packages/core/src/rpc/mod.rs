//! JSON-RPC Protocol Layer
//!
//! Stdio JSON-RPC 2.0 access to a [`BookmarksApi`](crate::services::BookmarksApi).
//!
//! # Usage
//!
//! Clients send one request per line:
//!
//! ```json
//! {"jsonrpc": "2.0", "id": 1, "method": "create", "params": {"title": "Example", "url": "http://example.com"}}
//! ```
//!
//! The server answers with any resulting event notifications followed by
//! the response:
//!
//! ```json
//! {"jsonrpc": "2.0", "method": "bookmark-added", "params": [{"id": 3, "title": "Example", "url": "http://example.com/", "parentId": 2, "index": 0}]}
//! {"jsonrpc": "2.0", "id": 1, "result": {"id": 3, "parentId": 2, "url": "http://example.com/", "title": "Example", "childrenIds": []}}
//! ```

pub mod handlers;
pub mod server;
pub mod types;


pub use handlers::handle_request;
pub use server::{run_stdio_server, serve};
pub use types::{RpcError, RpcNotification, RpcRequest, RpcResponse};
