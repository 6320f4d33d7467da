//! Data Models
//!
//! This module contains the core data structures shared by every layer:
//!
//! - `BookmarkNode` - A node of the bookmark tree (folder or URL leaf)
//! - `NodeKind` - Tagged folder/leaf variant
//! - `TransportRecord` - Transport-neutral serialized form of a node
//!
//! Nodes are owned and mutated by a `BookmarkModel` implementation; the
//! service layer only reads them.

mod node;
mod record;

pub use node::{BookmarkNode, NodeId, NodeKind};
pub use record::{Descendants, TransportRecord};
