//! Bookmarks API Facade
//!
//! Owns one model and shares one [`EventRouter`]. Before serving any request
//! the facade makes sure the router observes the model, so events flow from
//! the very first mutation no matter how the model was obtained.

use super::error::ApiResult;
use super::mutation_service::MutationService;
use super::query_service::{QueryService, DEFAULT_SEARCH_LIMIT};
use super::requests::{CreateRequest, GetNodesRequest, MoveRequest, RemoveRequest, SetTitleRequest};
use super::search::{TextMatcher, WordMatcher};
use crate::config::ApiConfig;
use crate::events::EventRouter;
use crate::models::{NodeId, TransportRecord};
use crate::tree::BookmarkModel;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct BookmarksApi<M: BookmarkModel> {
    model: M,
    router: Arc<EventRouter>,
    matcher: Arc<dyn TextMatcher>,
    config: ApiConfig,
}

impl<M: BookmarkModel> BookmarksApi<M> {
    /// Facade using the default [`WordMatcher`]
    pub fn new(model: M, router: Arc<EventRouter>, config: ApiConfig) -> Self {
        Self::with_matcher(model, router, Arc::new(WordMatcher), config)
    }

    pub fn with_matcher(
        model: M,
        router: Arc<EventRouter>,
        matcher: Arc<dyn TextMatcher>,
        config: ApiConfig,
    ) -> Self {
        Self {
            model,
            router,
            matcher,
            config,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Direct model access, e.g. to load contents. Mutations made here are
    /// observed too once the model has served a request.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Register the router on the model if not done yet
    pub fn ensure_observed(&mut self) {
        self.router.observe(&mut self.model);
    }

    pub fn get_nodes(&mut self, request: GetNodesRequest) -> ApiResult<Vec<TransportRecord>> {
        self.ensure_observed();
        QueryService::new(&self.model).get_nodes(&request.ids())
    }

    pub fn get_children(&mut self, id: NodeId) -> ApiResult<Vec<TransportRecord>> {
        self.ensure_observed();
        QueryService::new(&self.model).get_children(id)
    }

    pub fn get_tree(&mut self) -> ApiResult<TransportRecord> {
        self.ensure_observed();
        QueryService::new(&self.model).get_tree()
    }

    /// Never returns more than [`DEFAULT_SEARCH_LIMIT`] records, whatever
    /// the configured limit.
    pub fn search(&mut self, query: &str) -> ApiResult<Vec<TransportRecord>> {
        self.ensure_observed();
        let limit = self.config.search_result_limit.min(DEFAULT_SEARCH_LIMIT);
        Ok(QueryService::new(&self.model).search(self.matcher.as_ref(), query, limit))
    }

    pub fn create(&mut self, request: CreateRequest) -> ApiResult<TransportRecord> {
        self.ensure_observed();
        debug!("create {:?}", request);
        MutationService::new(&mut self.model)
            .create(request)
            .inspect_err(|e| warn!("create rejected: {}", e))
    }

    pub fn remove(&mut self, request: RemoveRequest) -> ApiResult<()> {
        self.ensure_observed();
        debug!("remove {:?}", request);
        MutationService::new(&mut self.model)
            .remove(request)
            .inspect_err(|e| warn!("remove rejected: {}", e))
    }

    pub fn move_node(&mut self, request: MoveRequest) -> ApiResult<()> {
        self.ensure_observed();
        debug!("move {:?}", request);
        MutationService::new(&mut self.model)
            .move_node(request)
            .inspect_err(|e| warn!("move rejected: {}", e))
    }

    pub fn set_title(&mut self, request: SetTitleRequest) -> ApiResult<()> {
        self.ensure_observed();
        debug!("setTitle {:?}", request);
        MutationService::new(&mut self.model)
            .set_title(request)
            .inspect_err(|e| warn!("setTitle rejected: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingDispatcher;
    use crate::services::error::ErrorKind;
    use crate::tree::InMemoryBookmarkModel;

    fn api() -> (BookmarksApi<InMemoryBookmarkModel>, Arc<RecordingDispatcher>) {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let router = Arc::new(EventRouter::new(dispatcher.clone()));
        let api = BookmarksApi::new(
            InMemoryBookmarkModel::new("test"),
            router,
            ApiConfig::default(),
        );
        (api, dispatcher)
    }

    #[test]
    fn test_first_request_observes_model() {
        let (mut api, dispatcher) = api();
        api.get_tree().unwrap();

        api.model_mut().add_folder(NodeId(1), 0, "direct").unwrap();
        assert_eq!(dispatcher.names(), vec!["bookmark-added"]);
    }

    #[test]
    fn test_rejected_mutation_emits_nothing() {
        let (mut api, dispatcher) = api();
        let err = api
            .remove(RemoveRequest {
                id: NodeId(0),
                recursive: Some(true),
            })
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ModifySpecialError);
        assert!(dispatcher.events().is_empty());
    }

    #[test]
    fn test_search_uses_configured_limit() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let config = ApiConfig {
            search_result_limit: 2,
            ..ApiConfig::default()
        };
        let mut api = BookmarksApi::new(
            InMemoryBookmarkModel::new("test"),
            Arc::new(EventRouter::new(dispatcher)),
            config,
        );
        for i in 0..4 {
            api.create(CreateRequest::bookmark(format!("doc {}", i), "https://docs.example"))
                .unwrap();
        }

        assert_eq!(api.search("doc").unwrap().len(), 2);
    }

    #[test]
    fn test_search_never_exceeds_maximum() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let config = ApiConfig {
            search_result_limit: 100,
            ..ApiConfig::default()
        };
        let mut api = BookmarksApi::new(
            InMemoryBookmarkModel::new("test"),
            Arc::new(EventRouter::new(dispatcher)),
            config,
        );
        for i in 0..60 {
            api.create(CreateRequest::bookmark(format!("doc {}", i), "https://docs.example"))
                .unwrap();
        }

        assert_eq!(api.search("doc").unwrap().len(), DEFAULT_SEARCH_LIMIT);
    }
}
