//! Autocomplete suggestions / 搜索联想
//!
//! Title and channel-name lookups run concurrently; the call only succeeds
//! when both do. Video titles are listed before channel names.

use serde::{Deserialize, Serialize};

use super::store::{SearchStore, StoreResult};
use crate::config::SearchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Video,
    Channel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
}

/// Look up suggestions for a partial query / 查询联想词
///
/// The query is used untrimmed. Queries shorter than
/// `suggestion_min_chars` characters return nothing.
pub async fn lookup_suggestions(
    store: &dyn SearchStore,
    limits: &SearchConfig,
    query: &str,
) -> StoreResult<Vec<Suggestion>> {
    // Counted in chars (Unicode scalar values), not UTF-16 units, so a
    // single emoji stays below a threshold of 2 / 按字符计数而非UTF-16单元
    if query.chars().count() < limits.suggestion_min_chars {
        return Ok(Vec::new());
    }

    let (titles, names) = tokio::try_join!(
        store.ready_video_titles(query, limits.suggestion_video_limit),
        store.channel_names(query, limits.suggestion_channel_limit),
    )?;

    let suggestions: Vec<Suggestion> = titles
        .into_iter()
        .map(|text| Suggestion { text, kind: SuggestionKind::Video })
        .chain(names.into_iter().map(|text| Suggestion { text, kind: SuggestionKind::Channel }))
        .collect();

    tracing::debug!("suggestions '{}': {} results", query, suggestions.len());
    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::search::store::SqliteSearchStore;
    use crate::search::testing::{CountingStore, FailingStore};
    use crate::seed::seed_demo_data;

    #[tokio::test]
    async fn test_short_query_returns_nothing() {
        let store = CountingStore::default();
        let limits = SearchConfig::default();

        // One emoji is a single char even though it spans two UTF-16 units
        for query in ["", "a", "é", "😀"] {
            assert!(lookup_suggestions(&store, &limits, query).await.unwrap().is_empty());
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_query_not_trimmed() {
        let store = CountingStore::default();
        lookup_suggestions(&store, &SearchConfig::default(), " a").await.unwrap();
        assert_eq!(store.terms(), vec![" a".to_string(), " a".to_string()]);
        assert_eq!(store.limits(), vec![3, 5]);
    }

    #[tokio::test]
    async fn test_videos_listed_before_channels() {
        let pool = memory_pool().await;
        seed_demo_data(&pool).await.unwrap();
        let store = SqliteSearchStore::new(pool);

        let suggestions = lookup_suggestions(&store, &SearchConfig::default(), "e").await;
        // Single character is below the threshold
        assert!(suggestions.unwrap().is_empty());

        let suggestions = lookup_suggestions(&store, &SearchConfig::default(), "er").await.unwrap();
        let first_channel = suggestions
            .iter()
            .position(|s| s.kind == SuggestionKind::Channel)
            .unwrap_or(suggestions.len());
        assert!(suggestions[..first_channel].iter().all(|s| s.kind == SuggestionKind::Video));
        assert!(suggestions[first_channel..].iter().all(|s| s.kind == SuggestionKind::Channel));
    }

    #[tokio::test]
    async fn test_suggestion_caps() {
        let pool = memory_pool().await;
        seed_demo_data(&pool).await.unwrap();
        let store = SqliteSearchStore::new(pool);

        // Every seeded title and channel name contains a space
        let limits = SearchConfig { suggestion_min_chars: 1, ..SearchConfig::default() };
        let suggestions = lookup_suggestions(&store, &limits, " ").await.unwrap();
        let videos = suggestions.iter().filter(|s| s.kind == SuggestionKind::Video).count();
        let channels = suggestions.iter().filter(|s| s.kind == SuggestionKind::Channel).count();
        assert_eq!(videos, 5);
        assert_eq!(channels, 3);
    }

    #[tokio::test]
    async fn test_tagged_results() {
        let pool = memory_pool().await;
        seed_demo_data(&pool).await.unwrap();
        let store = SqliteSearchStore::new(pool);

        let suggestions = lookup_suggestions(&store, &SearchConfig::default(), "Tech").await.unwrap();
        assert_eq!(
            suggestions,
            vec![Suggestion { text: "Tech Visionary".to_string(), kind: SuggestionKind::Channel }]
        );

        let suggestions = lookup_suggestions(&store, &SearchConfig::default(), "quantum").await.unwrap();
        assert_eq!(
            suggestions,
            vec![Suggestion { text: "Understanding Quantum Computing".to_string(), kind: SuggestionKind::Video }]
        );
    }

    #[tokio::test]
    async fn test_half_failure_fails_call() {
        let limits = SearchConfig::default();
        let store = FailingStore { fail_channels: true, fail_videos: false };
        assert!(lookup_suggestions(&store, &limits, "tech").await.is_err());

        let store = FailingStore { fail_channels: false, fail_videos: true };
        assert!(lookup_suggestions(&store, &limits, "tech").await.is_err());
    }

    #[test]
    fn test_suggestion_json_shape() {
        let s = Suggestion { text: "Tech Visionary".to_string(), kind: SuggestionKind::Channel };
        assert_eq!(
            serde_json::to_value(&s).unwrap(),
            serde_json::json!({ "text": "Tech Visionary", "type": "channel" })
        );
    }
}
