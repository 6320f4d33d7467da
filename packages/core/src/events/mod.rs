//! Event Layer
//!
//! Raw model callbacks flow through the [`EventRouter`], which names and
//! serializes them as [`BookmarkEvent`]s and hands them to an
//! [`EventDispatcher`] for the owning scope.
//!
//! # Event Flow
//!
//! 1. A model applies a mutation in memory
//! 2. The model calls the router synchronously with the raw callback
//! 3. The router builds the named event from the post-mutation tree
//! 4. The dispatcher delivers it to the scope's listening contexts
//!
//! All of this happens before the mutating call returns.

mod dispatch;
mod payloads;
mod router;

pub use dispatch::{BroadcastDispatcher, DispatchedEvent, EventDispatcher, RecordingDispatcher};
pub use payloads::{
    BookmarkEvent, ChangedAttributes, NodeAddedPayload, NodeMovedPayload, NodeRemovedPayload,
    BOOKMARK_ADDED, BOOKMARK_CHANGED, BOOKMARK_CHILDREN_REORDERED, BOOKMARK_MOVED,
    BOOKMARK_REMOVED,
};
pub use router::EventRouter;
