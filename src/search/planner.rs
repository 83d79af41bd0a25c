//! Query planner / 查询规划
//!
//! Runs the channel lookup and the video lookup concurrently, then hands
//! both result sets to the ranker. Either lookup failing fails the search.

use serde::Serialize;

use super::ranker::{matched_owner_ids, rank_videos};
use super::store::{SearchStore, StoreResult};
use crate::config::SearchConfig;
use crate::models::{Channel, VideoWithOwner};

/// Unified search result / 统一搜索结果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    pub videos: Vec<VideoWithOwner>,
    pub channels: Vec<Channel>,
}

/// Search channels and ready videos / 搜索频道与视频
///
/// The query is trimmed first; an empty query returns empty results
/// without touching the store.
pub async fn run_search(
    store: &dyn SearchStore,
    limits: &SearchConfig,
    query: &str,
) -> StoreResult<SearchResults> {
    let term = query.trim();
    if term.is_empty() {
        return Ok(SearchResults::default());
    }

    let (channels, videos) = tokio::try_join!(
        store.find_channels(term, limits.channel_limit),
        store.find_ready_videos(term, limits.video_limit),
    )?;

    let owners = matched_owner_ids(&channels);
    let videos = rank_videos(videos, &owners);

    tracing::debug!(
        "search '{}': {} channels, {} videos ({} channel owners matched)",
        term,
        channels.len(),
        videos.len(),
        owners.len()
    );

    Ok(SearchResults { videos, channels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::search::store::SqliteSearchStore;
    use crate::search::testing::{CountingStore, FailingStore};
    use crate::seed::seed_demo_data;

    async fn seeded_store() -> SqliteSearchStore {
        let pool = memory_pool().await;
        seed_demo_data(&pool).await.unwrap();
        SqliteSearchStore::new(pool)
    }

    #[tokio::test]
    async fn test_blank_query_skips_store() {
        let store = CountingStore::default();
        let limits = SearchConfig::default();

        for query in ["", "   ", "\t\n"] {
            let results = run_search(&store, &limits, query).await.unwrap();
            assert!(results.videos.is_empty());
            assert!(results.channels.is_empty());
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_query_is_trimmed() {
        let store = CountingStore::default();
        run_search(&store, &SearchConfig::default(), "  tech  ").await.unwrap();
        assert_eq!(store.terms(), vec!["tech".to_string(), "tech".to_string()]);
    }

    #[tokio::test]
    async fn test_limits_passed_to_store() {
        let store = CountingStore::default();
        run_search(&store, &SearchConfig::default(), "tech").await.unwrap();
        assert_eq!(store.limits(), vec![5, 30]);
    }

    #[tokio::test]
    async fn test_either_lookup_failing_fails_search() {
        let limits = SearchConfig::default();

        let store = FailingStore { fail_channels: true, fail_videos: false };
        assert!(run_search(&store, &limits, "tech").await.is_err());

        let store = FailingStore { fail_channels: false, fail_videos: true };
        assert!(run_search(&store, &limits, "tech").await.is_err());
    }

    #[tokio::test]
    async fn test_tech_scenario() {
        let store = seeded_store().await;
        let results = run_search(&store, &SearchConfig::default(), "Tech").await.unwrap();

        let channel_names: Vec<&str> = results.channels.iter().map(|c| c.name.as_str()).collect();
        assert!(channel_names.contains(&"Tech Visionary"));

        let tech_owner = &results.channels.iter().find(|c| c.name == "Tech Visionary").unwrap().user_id;
        let owned: Vec<_> = results.videos.iter().take_while(|v| &v.video.user_id == tech_owner).collect();
        assert_eq!(owned.len(), 2);
        assert!(owned[0].video.views >= owned[1].video.views);
        assert!(results.videos[owned.len()..].iter().all(|v| &v.video.user_id != tech_owner));
    }

    #[tokio::test]
    async fn test_channel_videos_outrank_more_viewed_title_matches() {
        let store = seeded_store().await;
        // "Gaming" matches the Pixel Gaming channel and a more viewed video from another creator
        let results = run_search(&store, &SearchConfig::default(), "gaming").await.unwrap();

        assert_eq!(results.channels.len(), 1);
        let owner = results.channels[0].user_id.clone();
        assert!(results.videos.len() >= 2);
        assert_eq!(results.videos[0].video.user_id, owner);

        let last = results.videos.last().unwrap();
        assert_ne!(last.video.user_id, owner);
        assert!(last.video.views > results.videos[0].video.views);
    }

    #[tokio::test]
    async fn test_quantum_scenario() {
        let store = seeded_store().await;
        let results = run_search(&store, &SearchConfig::default(), "Quantum").await.unwrap();

        assert!(results.channels.is_empty());
        assert_eq!(results.videos.len(), 1);
        assert_eq!(results.videos[0].video.title, "Understanding Quantum Computing");
    }

    #[tokio::test]
    async fn test_non_ascii_case_insensitive() {
        let pool = memory_pool().await;
        sqlx::query("INSERT INTO users (id, username, email, password_hash, created_at, updated_at) VALUES ('u1', 'ecole', 'e@x', 'h', 't', 't')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO channels (id, user_id, name, handle, created_at, updated_at) VALUES ('c1', 'u1', 'École Française', '@ecolefrancaise', 't', 't')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO videos (id, user_id, title, status, views, created_at, updated_at) VALUES ('v1', 'u1', 'Über Straße', 'ready', 7, 't', 't')")
            .execute(&pool)
            .await
            .unwrap();
        crate::db::fill_folded_columns(&pool).await.unwrap();

        let store = SqliteSearchStore::new(pool);
        let limits = SearchConfig::default();

        for query in ["école", "ÉCOLE", "École"] {
            let results = run_search(&store, &limits, query).await.unwrap();
            assert_eq!(results.channels.len(), 1, "query {}", query);
            assert_eq!(results.channels[0].name, "École Française");
            // Matched through the channel name / 通过频道名命中
            assert_eq!(results.videos.len(), 1, "query {}", query);
        }

        for query in ["über", "ÜBER", "straße"] {
            let results = run_search(&store, &limits, query).await.unwrap();
            assert!(results.channels.is_empty(), "query {}", query);
            assert_eq!(results.videos.len(), 1, "query {}", query);
            assert_eq!(results.videos[0].video.title, "Über Straße");
        }
    }

    #[tokio::test]
    async fn test_search_is_idempotent() {
        let store = seeded_store().await;
        let limits = SearchConfig::default();
        let first = run_search(&store, &limits, "e").await.unwrap();
        let second = run_search(&store, &limits, "e").await.unwrap();
        assert_eq!(first, second);
        assert!(!first.videos.is_empty());
    }

    #[tokio::test]
    async fn test_result_caps() {
        let store = seeded_store().await;
        let limits = SearchConfig {
            channel_limit: 1,
            video_limit: 2,
            ..SearchConfig::default()
        };
        let results = run_search(&store, &limits, "e").await.unwrap();
        assert_eq!(results.channels.len(), 1);
        assert_eq!(results.videos.len(), 2);
    }
}
