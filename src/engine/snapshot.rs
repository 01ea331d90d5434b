//! Read-only views returned by engine operations.

use serde::Serialize;

use crate::history::PlaybackEvent;
use crate::media::{ReactionKind, VideoId, ViewerId};

/// State after a successful play.
#[derive(Debug, Clone, Serialize)]
pub struct HistorySnapshot {
    pub now_playing: VideoId,
    pub views: u64,
    /// Most recent first.
    pub entries: Vec<PlaybackEvent>,
    pub capacity: usize,
}

/// State after a like or dislike toggle, including the recomputed liked view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngagementSnapshot {
    pub video: VideoId,
    pub viewer: ViewerId,
    pub likes: u64,
    pub dislikes: u64,
    pub reaction: Option<ReactionKind>,
    pub liked_videos: Vec<VideoId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub total_videos: usize,
    pub pending_uploads: usize,
    pub playlists: usize,
    pub history_items: usize,
    pub total_likes: u64,
    pub total_comments: usize,
    pub owner_liked: usize,
}
