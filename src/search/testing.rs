//! Store doubles for planner and handler tests / 测试用存储替身

use async_trait::async_trait;
use parking_lot::Mutex;

use super::store::{SearchStore, StoreResult};
use crate::models::{Channel, VideoWithOwner};

/// Records every lookup and returns empty results / 记录调用并返回空结果
#[derive(Default)]
pub struct CountingStore {
    calls: Mutex<Vec<(String, u32)>>,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = self.calls.lock().iter().map(|(t, _)| t.clone()).collect();
        terms.sort();
        terms
    }

    pub fn limits(&self) -> Vec<u32> {
        let mut limits: Vec<u32> = self.calls.lock().iter().map(|(_, l)| *l).collect();
        limits.sort_unstable();
        limits
    }

    fn record(&self, term: &str, limit: u32) {
        self.calls.lock().push((term.to_string(), limit));
    }
}

#[async_trait]
impl SearchStore for CountingStore {
    async fn find_channels(&self, term: &str, limit: u32) -> StoreResult<Vec<Channel>> {
        self.record(term, limit);
        Ok(Vec::new())
    }

    async fn find_ready_videos(&self, term: &str, limit: u32) -> StoreResult<Vec<VideoWithOwner>> {
        self.record(term, limit);
        Ok(Vec::new())
    }

    async fn ready_video_titles(&self, term: &str, limit: u32) -> StoreResult<Vec<String>> {
        self.record(term, limit);
        Ok(Vec::new())
    }

    async fn channel_names(&self, term: &str, limit: u32) -> StoreResult<Vec<String>> {
        self.record(term, limit);
        Ok(Vec::new())
    }
}

/// Fails the channel-side or video-side lookups / 模拟单侧查询失败
pub struct FailingStore {
    pub fail_channels: bool,
    pub fail_videos: bool,
}

impl FailingStore {
    fn outcome<T: Default>(&self, fail: bool) -> StoreResult<T> {
        if fail {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(T::default())
        }
    }
}

#[async_trait]
impl SearchStore for FailingStore {
    async fn find_channels(&self, _term: &str, _limit: u32) -> StoreResult<Vec<Channel>> {
        self.outcome(self.fail_channels)
    }

    async fn find_ready_videos(&self, _term: &str, _limit: u32) -> StoreResult<Vec<VideoWithOwner>> {
        self.outcome(self.fail_videos)
    }

    async fn ready_video_titles(&self, _term: &str, _limit: u32) -> StoreResult<Vec<String>> {
        self.outcome(self.fail_videos)
    }

    async fn channel_names(&self, _term: &str, _limit: u32) -> StoreResult<Vec<String>> {
        self.outcome(self.fail_channels)
    }
}
