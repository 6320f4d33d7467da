//! Development stdio Server
//!
//! Serves an in-memory bookmark tree over line-delimited JSON-RPC 2.0 on
//! stdin/stdout. Bookmark events are written as notifications ahead of the
//! response of the request that caused them.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin bookmarks-stdio
//!
//! # With debug logging (written to stderr)
//! RUST_LOG=bookmarks_core=debug cargo run --bin bookmarks-stdio
//! ```
//!
//! # Configuration
//!
//! - `BOOKMARKS_SCOPE` - Scope of the served model (default: `default`)
//! - `BOOKMARKS_SEARCH_LIMIT` - Maximum search results (default: 50)
//! - `BOOKMARKS_EVENT_CAPACITY` - Event channel capacity (default: 128)

use anyhow::anyhow;
use bookmarks_core::{
    ApiConfig, BookmarksApi, BroadcastDispatcher, EventRouter, InMemoryBookmarkModel,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "bookmarks_core=info,bookmarks_stdio=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ApiConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;
    info!(
        "Starting bookmarks-stdio (scope={}, search limit={})",
        config.scope, config.search_result_limit
    );

    let dispatcher = Arc::new(BroadcastDispatcher::new(config.event_channel_capacity));
    let mut events = dispatcher.subscribe(&config.scope);
    let router = Arc::new(EventRouter::new(dispatcher));

    let model = InMemoryBookmarkModel::new(config.scope.clone());
    let mut api = BookmarksApi::new(model, router, config);
    api.ensure_observed();
    api.model_mut().mark_loaded();

    bookmarks_core::rpc::run_stdio_server(&mut api, &mut events).await
}
