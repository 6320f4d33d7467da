//! Event Emission Tests
//!
//! Verifies that every successful mutation emits exactly one correctly-shaped
//! event, that rejected mutations emit none, and that each event is
//! dispatched before the mutating call returns.

#[cfg(test)]
mod event_emission_tests {
    use anyhow::Result;
    use bookmarks_core::events::{DispatchedEvent, EventRouter, RecordingDispatcher};
    use bookmarks_core::services::{
        BookmarksApi, CreateRequest, MoveRequest, RemoveRequest, SetTitleRequest,
    };
    use bookmarks_core::{ApiConfig, InMemoryBookmarkModel, NodeId};
    use serde_json::{json, Value};
    use std::sync::Arc;

    /// Helper to create an API recording its events
    fn create_test_api() -> (BookmarksApi<InMemoryBookmarkModel>, Arc<RecordingDispatcher>) {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let router = Arc::new(EventRouter::new(dispatcher.clone()));
        let api = BookmarksApi::new(
            InMemoryBookmarkModel::new("profile"),
            router,
            ApiConfig::default(),
        );
        (api, dispatcher)
    }

    /// Take the single recorded event, failing if there is not exactly one
    fn single_event(dispatcher: &RecordingDispatcher) -> Result<(String, Value)> {
        let events: Vec<DispatchedEvent> = dispatcher.take();
        assert_eq!(events.len(), 1, "expected exactly one event, got {:?}", events);
        let event = &events[0];
        assert_eq!(event.scope, "profile");
        Ok((event.name.clone(), event.args()?))
    }

    #[test]
    fn test_create_emits_bookmark_added() -> Result<()> {
        let (mut api, dispatcher) = create_test_api();
        api.create(CreateRequest::folder("first"))?;
        dispatcher.take();

        let record = api.create(CreateRequest::bookmark("Example", "http://example.com"))?;

        let (name, args) = single_event(&dispatcher)?;
        assert_eq!(name, "bookmark-added");
        assert_eq!(
            args,
            json!([{
                "id": record.id,
                "title": "Example",
                "url": "http://example.com/",
                "parentId": 2,
                "index": 1
            }])
        );
        Ok(())
    }

    #[test]
    fn test_remove_emits_bookmark_removed_with_location_only() -> Result<()> {
        let (mut api, dispatcher) = create_test_api();
        let folder = api.create(CreateRequest::folder("f").with_parent(NodeId(1)))?;
        api.create(CreateRequest::bookmark("x", "https://x.example").with_parent(folder.id))?;
        dispatcher.take();

        api.remove(RemoveRequest {
            id: folder.id,
            recursive: Some(true),
        })?;

        let (name, args) = single_event(&dispatcher)?;
        assert_eq!(name, "bookmark-removed");
        assert_eq!(args, json!([{"parentId": 1, "index": 0}]));
        Ok(())
    }

    #[test]
    fn test_move_emits_bookmark_moved() -> Result<()> {
        let (mut api, dispatcher) = create_test_api();
        let a = api.create(CreateRequest::folder("a").with_parent(NodeId(1)))?;
        dispatcher.take();

        api.move_node(MoveRequest {
            id: a.id,
            parent_id: Some(NodeId(2)),
            index: Some(0),
        })?;

        let (name, args) = single_event(&dispatcher)?;
        assert_eq!(name, "bookmark-moved");
        assert_eq!(
            args,
            json!([{"id": a.id, "parentId": 2, "index": 0, "oldParentId": 1, "oldIndex": 0}])
        );
        Ok(())
    }

    #[test]
    fn test_set_title_emits_bookmark_changed() -> Result<()> {
        let (mut api, dispatcher) = create_test_api();
        let a = api.create(CreateRequest::folder("a"))?;
        dispatcher.take();

        api.set_title(SetTitleRequest {
            id: a.id,
            title: Some("renamed".to_string()),
        })?;

        let (name, args) = single_event(&dispatcher)?;
        assert_eq!(name, "bookmark-changed");
        assert_eq!(args, json!([a.id, {"title": "renamed"}]));
        Ok(())
    }

    #[test]
    fn test_sort_emits_children_reordered() -> Result<()> {
        let (mut api, dispatcher) = create_test_api();
        let b = api.create(CreateRequest::bookmark("b", "https://b.example"))?;
        let a = api.create(CreateRequest::bookmark("a", "https://a.example"))?;
        dispatcher.take();

        api.model_mut().sort_children(NodeId(2))?;

        let (name, args) = single_event(&dispatcher)?;
        assert_eq!(name, "bookmark-children-reordered");
        assert_eq!(args, json!([2, [a.id, b.id]]));
        Ok(())
    }

    #[test]
    fn test_rejected_mutations_emit_nothing() {
        let (mut api, dispatcher) = create_test_api();

        assert!(api.create(CreateRequest::bookmark("x", "nope")).is_err());
        assert!(api
            .remove(RemoveRequest {
                id: NodeId(2),
                recursive: None
            })
            .is_err());
        assert!(api
            .move_node(MoveRequest {
                id: NodeId(42),
                parent_id: None,
                index: None
            })
            .is_err());
        assert!(api
            .set_title(SetTitleRequest {
                id: NodeId(0),
                title: None
            })
            .is_err());

        assert!(dispatcher.events().is_empty());
    }

    #[test]
    fn test_queries_emit_nothing() -> Result<()> {
        let (mut api, dispatcher) = create_test_api();
        api.get_tree()?;
        api.get_children(NodeId(1))?;
        api.search("anything")?;
        assert!(dispatcher.events().is_empty());
        Ok(())
    }

    #[test]
    fn test_loaded_emits_nothing() {
        let (mut api, dispatcher) = create_test_api();
        api.ensure_observed();
        api.model_mut().mark_loaded();
        assert!(dispatcher.events().is_empty());
    }

    #[test]
    fn test_event_is_dispatched_before_call_returns() -> Result<()> {
        let (mut api, dispatcher) = create_test_api();
        api.create(CreateRequest::folder("sync"))?;
        // No await point, no yielding: the event must already be recorded
        assert_eq!(dispatcher.names(), vec!["bookmark-added"]);
        Ok(())
    }
}
