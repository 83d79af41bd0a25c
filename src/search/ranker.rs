//! Result ranking / 结果排序
//!
//! Videos owned by a matched channel's user go first. Within each side of
//! the partition the planner's order (views descending) is kept as-is.

use std::collections::HashSet;

use crate::models::{Channel, VideoWithOwner};

/// Owner ids of the matched channels / 匹配频道的所有者
pub fn matched_owner_ids(channels: &[Channel]) -> HashSet<&str> {
    channels.iter().map(|c| c.user_id.as_str()).collect()
}

/// Stable two-way partition by channel-owner match / 按频道匹配稳定分区
pub fn rank_videos(
    videos: Vec<VideoWithOwner>,
    matched_owners: &HashSet<&str>,
) -> Vec<VideoWithOwner> {
    if matched_owners.is_empty() {
        return videos;
    }

    let (mut ranked, rest): (Vec<_>, Vec<_>) = videos
        .into_iter()
        .partition(|v| matched_owners.contains(v.owner_id()));
    ranked.extend(rest);
    ranked
}
