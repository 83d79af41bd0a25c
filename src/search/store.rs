//! Read-only store access for search / 搜索的只读数据访问
//!
//! `SearchStore` is the seam between the planner and the database. The
//! SQLite implementation wraps a pool handed in by the process entry point.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::filter::push_contains_any;
use crate::models::{Channel, Owner, Video, VideoStatus, VideoWithOwner};

pub type StoreResult<T> = Result<T, sqlx::Error>;

/// Folded channel columns matched by search / 频道搜索字段
pub const CHANNEL_SEARCH_FIELDS: &[&str] = &["name_lower", "handle_lower", "description_lower"];

/// Folded video columns matched by search, including the owner's channel / 视频搜索字段（含所属频道）
pub const VIDEO_SEARCH_FIELDS: &[&str] = &[
    "v.title_lower",
    "v.description_lower",
    "c.name_lower",
    "c.handle_lower",
];

#[async_trait]
pub trait SearchStore: Send + Sync {
    /// Channels whose name, handle or description contains `term`
    async fn find_channels(&self, term: &str, limit: u32) -> StoreResult<Vec<Channel>>;

    /// Ready videos matching `term` on their own text or their channel's name/handle,
    /// most viewed first
    async fn find_ready_videos(&self, term: &str, limit: u32) -> StoreResult<Vec<VideoWithOwner>>;

    async fn ready_video_titles(&self, term: &str, limit: u32) -> StoreResult<Vec<String>>;

    async fn channel_names(&self, term: &str, limit: u32) -> StoreResult<Vec<String>>;
}

/// SQLite-backed search store / SQLite搜索存储
#[derive(Clone)]
pub struct SqliteSearchStore {
    db: SqlitePool,
}

impl SqliteSearchStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Flat row of the video/owner/channel join / 视频联表查询行
#[derive(sqlx::FromRow)]
struct VideoRow {
    #[sqlx(flatten)]
    video: Video,
    owner_username: String,
    owner_avatar_url: Option<String>,
    channel_id: Option<String>,
    channel_name: Option<String>,
    channel_handle: Option<String>,
    channel_description: Option<String>,
    channel_avatar_url: Option<String>,
    channel_banner_url: Option<String>,
    channel_subscriber_count: Option<i64>,
    channel_created_at: Option<String>,
    channel_updated_at: Option<String>,
}

impl From<VideoRow> for VideoWithOwner {
    fn from(row: VideoRow) -> Self {
        let VideoRow {
            video,
            owner_username,
            owner_avatar_url,
            channel_id,
            channel_name,
            channel_handle,
            channel_description,
            channel_avatar_url,
            channel_banner_url,
            channel_subscriber_count,
            channel_created_at,
            channel_updated_at,
        } = row;

        // LEFT JOIN: all channel columns are NULL when the owner has no channel
        let channel = match (channel_id, channel_name, channel_handle, channel_created_at, channel_updated_at) {
            (Some(id), Some(name), Some(handle), Some(created_at), Some(updated_at)) => Some(Channel {
                id,
                user_id: video.user_id.clone(),
                name,
                handle,
                description: channel_description,
                avatar_url: channel_avatar_url,
                banner_url: channel_banner_url,
                subscriber_count: channel_subscriber_count.unwrap_or(0),
                created_at,
                updated_at,
            }),
            _ => None,
        };

        let user = Owner {
            id: video.user_id.clone(),
            username: owner_username,
            avatar_url: owner_avatar_url,
            channel,
        };

        VideoWithOwner { video, user }
    }
}

#[async_trait]
impl SearchStore for SqliteSearchStore {
    async fn find_channels(&self, term: &str, limit: u32) -> StoreResult<Vec<Channel>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, user_id, name, handle, description, avatar_url, banner_url, \
             subscriber_count, created_at, updated_at FROM channels WHERE ",
        );
        push_contains_any(&mut qb, CHANNEL_SEARCH_FIELDS, term);
        qb.push(" LIMIT ").push_bind(i64::from(limit));

        qb.build_query_as::<Channel>().fetch_all(&self.db).await
    }

    async fn find_ready_videos(&self, term: &str, limit: u32) -> StoreResult<Vec<VideoWithOwner>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT v.id, v.user_id, v.title, v.description, v.status, v.views, \
             v.duration_seconds, v.thumbnail_url, v.hls_url, v.created_at, v.updated_at, \
             u.username AS owner_username, u.avatar_url AS owner_avatar_url, \
             c.id AS channel_id, c.name AS channel_name, c.handle AS channel_handle, \
             c.description AS channel_description, c.avatar_url AS channel_avatar_url, \
             c.banner_url AS channel_banner_url, c.subscriber_count AS channel_subscriber_count, \
             c.created_at AS channel_created_at, c.updated_at AS channel_updated_at \
             FROM videos v \
             JOIN users u ON u.id = v.user_id \
             LEFT JOIN channels c ON c.user_id = u.id \
             WHERE v.status = ",
        );
        qb.push_bind(VideoStatus::Ready.as_str()).push(" AND ");
        push_contains_any(&mut qb, VIDEO_SEARCH_FIELDS, term);
        // Ties broken by recency then id so repeated searches return the same order
        qb.push(" ORDER BY v.views DESC, v.created_at DESC, v.id ASC LIMIT ")
            .push_bind(i64::from(limit));

        let rows = qb.build_query_as::<VideoRow>().fetch_all(&self.db).await?;
        Ok(rows.into_iter().map(VideoWithOwner::from).collect())
    }

    async fn ready_video_titles(&self, term: &str, limit: u32) -> StoreResult<Vec<String>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT title FROM videos WHERE status = ");
        qb.push_bind(VideoStatus::Ready.as_str()).push(" AND ");
        push_contains_any(&mut qb, &["title_lower"], term);
        qb.push(" LIMIT ").push_bind(i64::from(limit));

        let rows: Vec<(String,)> = qb.build_query_as().fetch_all(&self.db).await?;
        Ok(rows.into_iter().map(|(title,)| title).collect())
    }

    async fn channel_names(&self, term: &str, limit: u32) -> StoreResult<Vec<String>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT name FROM channels WHERE ");
        push_contains_any(&mut qb, &["name_lower"], term);
        qb.push(" LIMIT ").push_bind(i64::from(limit));

        let rows: Vec<(String,)> = qb.build_query_as().fetch_all(&self.db).await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}
