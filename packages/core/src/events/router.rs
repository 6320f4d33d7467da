//! Event Router
//!
//! Observes bookmark models and turns their raw callbacks into named events
//! for the model's scope. A model is observed at most once no matter how
//! often [`EventRouter::observe`] is called, so every mutation produces
//! exactly one event.
//!
//! The router remembers every model it observes until that model is passed
//! to [`EventRouter::unobserve`]. Unobserve a model before dropping it when
//! the router outlives it.

use super::dispatch::EventDispatcher;
use super::payloads::BookmarkEvent;
use crate::models::{BookmarkNode, NodeId};
use crate::tree::{BookmarkModel, BookmarkModelObserver, ModelId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, warn};

pub struct EventRouter {
    observed: Mutex<HashSet<ModelId>>,
    dispatcher: Arc<dyn EventDispatcher>,
}

impl EventRouter {
    pub fn new(dispatcher: Arc<dyn EventDispatcher>) -> Self {
        Self {
            observed: Mutex::new(HashSet::new()),
            dispatcher,
        }
    }

    /// Start observing `model` unless already observing it.
    ///
    /// Returns true when this call registered the observer.
    pub fn observe<M>(self: &Arc<Self>, model: &mut M) -> bool
    where
        M: BookmarkModel + ?Sized,
    {
        let newly_observed = self.observed_set().insert(model.model_id());
        if newly_observed {
            debug!("Observing model {:?} in scope {}", model.model_id(), model.scope());
            model.add_observer(self.clone());
        }
        newly_observed
    }

    /// Stop observing `model` and forget its id.
    ///
    /// Returns true when the model was being observed.
    pub fn unobserve<M>(self: &Arc<Self>, model: &mut M) -> bool
    where
        M: BookmarkModel + ?Sized,
    {
        let was_observed = self.observed_set().remove(&model.model_id());
        if was_observed {
            debug!("No longer observing model {:?}", model.model_id());
            let observer: Arc<dyn BookmarkModelObserver> = self.clone();
            model.remove_observer(&observer);
        }
        was_observed
    }

    pub fn is_observing(&self, model: &dyn BookmarkModel) -> bool {
        self.observed_set().contains(&model.model_id())
    }

    /// Number of distinct models observed
    pub fn observed_count(&self) -> usize {
        self.observed_set().len()
    }

    fn observed_set(&self) -> std::sync::MutexGuard<'_, HashSet<ModelId>> {
        self.observed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn route(&self, model: &dyn BookmarkModel, event: Option<BookmarkEvent>) {
        let Some(event) = event else {
            warn!("Callback does not match the tree in scope {}", model.scope());
            return;
        };
        match event.to_json_args() {
            Ok(json_args) => {
                debug!("Dispatching {} to scope {}", event.name(), model.scope());
                self.dispatcher
                    .dispatch_event(model.scope(), event.name(), &json_args);
            }
            Err(e) => error!("Failed to serialize {} arguments: {}", event.name(), e),
        }
    }
}

impl BookmarkModelObserver for EventRouter {
    fn loaded(&self, model: &dyn BookmarkModel) {
        debug!("Model in scope {} loaded", model.scope());
    }

    fn node_added(&self, model: &dyn BookmarkModel, parent: NodeId, index: usize) {
        self.route(model, BookmarkEvent::added(model, parent, index));
    }

    fn node_removed(
        &self,
        model: &dyn BookmarkModel,
        parent: NodeId,
        old_index: usize,
        _node: &BookmarkNode,
    ) {
        self.route(model, Some(BookmarkEvent::removed(parent, old_index)));
    }

    fn node_moved(
        &self,
        model: &dyn BookmarkModel,
        old_parent: NodeId,
        old_index: usize,
        new_parent: NodeId,
        new_index: usize,
    ) {
        self.route(
            model,
            BookmarkEvent::moved(model, old_parent, old_index, new_parent, new_index),
        );
    }

    fn node_changed(&self, model: &dyn BookmarkModel, node: NodeId) {
        self.route(model, BookmarkEvent::changed(model, node));
    }

    fn node_children_reordered(&self, model: &dyn BookmarkModel, node: NodeId) {
        self.route(model, BookmarkEvent::children_reordered(model, node));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::dispatch::RecordingDispatcher;
    use crate::tree::InMemoryBookmarkModel;

    fn router() -> (Arc<EventRouter>, Arc<RecordingDispatcher>) {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        (Arc::new(EventRouter::new(dispatcher.clone())), dispatcher)
    }

    #[test]
    fn test_observe_is_idempotent() {
        let (router, dispatcher) = router();
        let mut model = InMemoryBookmarkModel::new("test");

        assert!(router.observe(&mut model));
        assert!(!router.observe(&mut model));
        assert!(router.is_observing(&model));
        assert_eq!(router.observed_count(), 1);

        model.add_folder(NodeId(1), 0, "f").unwrap();
        assert_eq!(dispatcher.names(), vec!["bookmark-added"]);
    }

    #[test]
    fn test_unobserve_forgets_model() {
        let (router, dispatcher) = router();
        let mut model = InMemoryBookmarkModel::new("test");
        router.observe(&mut model);

        assert!(router.unobserve(&mut model));
        assert!(!router.unobserve(&mut model));
        assert!(!router.is_observing(&model));
        assert_eq!(router.observed_count(), 0);

        model.add_folder(NodeId(1), 0, "quiet").unwrap();
        assert!(dispatcher.events().is_empty());

        // Observing again registers exactly once
        assert!(router.observe(&mut model));
        model.add_folder(NodeId(1), 0, "heard").unwrap();
        assert_eq!(dispatcher.names(), vec!["bookmark-added"]);
    }

    #[test]
    fn test_loaded_and_favicon_emit_nothing() {
        let (router, dispatcher) = router();
        let mut model = InMemoryBookmarkModel::new("test");
        router.observe(&mut model);

        model.mark_loaded();
        model.favicon_loaded(NodeId(1)).unwrap();
        assert!(dispatcher.events().is_empty());
    }

    #[test]
    fn test_events_carry_model_scope() {
        let (router, dispatcher) = router();
        let mut first = InMemoryBookmarkModel::new("first");
        let mut second = InMemoryBookmarkModel::new("second");
        router.observe(&mut first);
        router.observe(&mut second);

        first.add_folder(NodeId(1), 0, "a").unwrap();
        second.add_folder(NodeId(2), 0, "b").unwrap();

        let scopes: Vec<String> = dispatcher.take().into_iter().map(|e| e.scope).collect();
        assert_eq!(scopes, vec!["first", "second"]);
    }

    #[test]
    fn test_reorder_and_url_change_are_routed() {
        let (router, dispatcher) = router();
        let mut model = InMemoryBookmarkModel::new("test");
        router.observe(&mut model);
        let leaf = model
            .add_url(NodeId(1), 0, "x", url::Url::parse("https://x.example").unwrap())
            .unwrap();
        dispatcher.take();

        model
            .set_url(leaf, url::Url::parse("https://y.example").unwrap())
            .unwrap();
        model.sort_children(NodeId(1)).unwrap();

        assert_eq!(
            dispatcher.names(),
            vec!["bookmark-changed", "bookmark-children-reordered"]
        );
    }
}
