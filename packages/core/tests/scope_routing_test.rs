//! Scope Routing Tests
//!
//! One router shared by several facades: each model is observed once, and
//! its events reach only the listening contexts of its own scope.

#[cfg(test)]
mod scope_routing_tests {
    use anyhow::Result;
    use bookmarks_core::events::{BroadcastDispatcher, EventRouter};
    use bookmarks_core::services::{BookmarksApi, CreateRequest};
    use bookmarks_core::{ApiConfig, InMemoryBookmarkModel};
    use std::sync::Arc;
    use tokio::sync::broadcast::error::TryRecvError;
    use tokio::time::{timeout, Duration};

    fn api_for(scope: &str, router: &Arc<EventRouter>) -> BookmarksApi<InMemoryBookmarkModel> {
        let config = ApiConfig {
            scope: scope.to_string(),
            ..ApiConfig::default()
        };
        BookmarksApi::new(
            InMemoryBookmarkModel::new(scope),
            router.clone(),
            config,
        )
    }

    #[tokio::test]
    async fn test_events_reach_only_their_scope() -> Result<()> {
        let dispatcher = Arc::new(BroadcastDispatcher::new(16));
        let mut work_rx = dispatcher.subscribe("work");
        let mut home_rx = dispatcher.subscribe("home");
        let router = Arc::new(EventRouter::new(dispatcher.clone()));

        let mut work = api_for("work", &router);
        let mut home = api_for("home", &router);

        work.create(CreateRequest::folder("reports"))?;
        home.create(CreateRequest::folder("recipes"))?;
        home.create(CreateRequest::folder("travel"))?;

        let event = timeout(Duration::from_secs(1), work_rx.recv())
            .await
            .expect("Event should be delivered within 1 second")?;
        assert_eq!(event.name, "bookmark-added");
        assert_eq!(event.args()?[0]["title"], "reports");
        assert_eq!(work_rx.try_recv().unwrap_err(), TryRecvError::Empty);

        let first = home_rx.recv().await?;
        let second = home_rx.recv().await?;
        assert_eq!(first.args()?[0]["title"], "recipes");
        assert_eq!(second.args()?[0]["title"], "travel");
        assert!(home_rx.try_recv().is_err());

        assert_eq!(router.observed_count(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_every_listener_of_a_scope_receives_the_event() -> Result<()> {
        let dispatcher = Arc::new(BroadcastDispatcher::new(16));
        let mut first_rx = dispatcher.subscribe("default");
        let mut second_rx = dispatcher.subscribe("default");
        let router = Arc::new(EventRouter::new(dispatcher.clone()));
        let mut api = api_for("default", &router);

        api.create(CreateRequest::folder("shared"))?;

        assert_eq!(first_rx.recv().await?, second_rx.recv().await?);
        Ok(())
    }

    #[test]
    fn test_repeated_requests_observe_once() -> Result<()> {
        let dispatcher = Arc::new(BroadcastDispatcher::new(16));
        let mut rx = dispatcher.subscribe("default");
        let router = Arc::new(EventRouter::new(dispatcher.clone()));
        let mut api = api_for("default", &router);

        for _ in 0..5 {
            api.get_tree()?;
            api.ensure_observed();
        }
        api.create(CreateRequest::folder("once"))?;

        assert!(rx.try_recv().is_ok());
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
        assert_eq!(router.observed_count(), 1);
        Ok(())
    }
}
