//! Business Services
//!
//! This module contains the request-handling logic of the API:
//!
//! - `BookmarksApi` - Facade owning a model; entry point for every operation
//! - `QueryService` - Node lookup, children, whole tree and text search
//! - `MutationService` - Create, remove, move and rename
//! - `validation` - Pure predicates guarding every mutation
//! - `serializer` - Node to transport record conversion
//! - `requests` - Typed request records decoded from loose JSON
//!
//! Services read the tree through the `BookmarkModel` trait and mutate it
//! only through the model's own primitives.

pub mod bookmarks_api;
pub mod error;
pub mod mutation_service;
pub mod query_service;
pub mod requests;
pub mod search;
pub mod serializer;
pub mod validation;

pub use bookmarks_api::BookmarksApi;
pub use error::{ApiResult, BookmarkApiError, ErrorKind, ErrorResponse};
pub use mutation_service::MutationService;
pub use query_service::{QueryService, DEFAULT_SEARCH_LIMIT};
pub use requests::{
    parse_request, CreateRequest, GetNodesRequest, MoveRequest, RemoveRequest, SetTitleRequest,
};
pub use search::{TextMatcher, WordMatcher};
pub use serializer::serialize_node;
