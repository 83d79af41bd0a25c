//! Search module - unified channel/video search and suggestions / 搜索模块
//!
//! Architecture / 架构：
//! - filter: builds the case-insensitive substring predicate
//! - store: read-only lookups behind the `SearchStore` trait
//! - planner: trims the query and fans out the channel and video lookups
//! - ranker: stable partition putting matched-channel videos first
//! - suggest: concurrent title / channel-name lookups for autocomplete
//!
//! Nothing here keeps state between calls. The store handle is injected by
//! the caller, so every operation is a read-only single-shot query.

pub mod filter;
pub mod planner;
pub mod ranker;
pub mod store;
pub mod suggest;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

pub use planner::{run_search, SearchResults};
pub use ranker::rank_videos;
pub use store::{SearchStore, SqliteSearchStore, StoreResult};
pub use suggest::{lookup_suggestions, Suggestion, SuggestionKind};

use crate::config::SearchConfig;

/// Search entry point shared by the HTTP handlers / 搜索服务
#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn SearchStore>,
    limits: SearchConfig,
}

impl SearchService {
    pub fn new(store: Arc<dyn SearchStore>, limits: SearchConfig) -> Self {
        Self { store, limits }
    }

    pub async fn search(&self, query: &str) -> StoreResult<SearchResults> {
        run_search(self.store.as_ref(), &self.limits, query).await
    }

    pub async fn suggestions(&self, query: &str) -> StoreResult<Vec<Suggestion>> {
        lookup_suggestions(self.store.as_ref(), &self.limits, query).await
    }
}
