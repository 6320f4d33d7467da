//! Bookmarks Core API Layer
//!
//! This crate re-exposes a hierarchical bookmark tree through loosely-typed
//! request records and turns the tree's mutation callbacks into named events
//! for external listeners.
//!
//! # Architecture
//!
//! - **Trait-backed collaborators**: The tree, the text matcher and the event
//!   transport are traits; reference implementations ship with the crate
//! - **Validate first**: Every mutation is checked against the current tree
//!   before the model is touched
//! - **Synchronous events**: A mutation's event is dispatched before the
//!   mutating call returns
//! - **One observer per model**: The router keeps an explicit registry of
//!   observed model instances
//!
//! # Modules
//!
//! - [`models`] - Data structures (BookmarkNode, TransportRecord)
//! - [`tree`] - Tree model trait, observer trait and in-memory model
//! - [`services`] - Query, mutation, validation and the `BookmarksApi` facade
//! - [`events`] - Event router, payloads and dispatchers
//! - [`rpc`] - JSON-RPC stdio server
//! - [`config`] - Runtime configuration

pub mod config;
pub mod events;
pub mod models;
pub mod rpc;
pub mod services;
pub mod tree;

// Re-export commonly used types
pub use config::ApiConfig;
pub use events::{BookmarkEvent, BroadcastDispatcher, EventDispatcher, EventRouter};
pub use models::*;
pub use services::*;
pub use tree::{BookmarkModel, BookmarkModelObserver, InMemoryBookmarkModel, ModelId, TreeError};
