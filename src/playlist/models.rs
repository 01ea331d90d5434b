//! Playlist data models

use std::time::SystemTime;

use serde::Serialize;

use crate::media::VideoId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "videos", rename_all = "snake_case")]
pub enum PlaylistKind {
    /// Ordered, duplicate-free list of videos.
    Custom(Vec<VideoId>),
    /// System playlist whose content is derived from the viewer's likes.
    Liked,
}

#[derive(Debug, Clone, Serialize)]
pub struct Playlist {
    pub name: String,
    pub created: SystemTime,
    pub kind: PlaylistKind,
}

impl Playlist {
    pub(crate) fn custom(name: String) -> Self {
        Self {
            name,
            created: SystemTime::now(),
            kind: PlaylistKind::Custom(Vec::new()),
        }
    }

    pub(crate) fn liked(name: String) -> Self {
        Self {
            name,
            created: SystemTime::now(),
            kind: PlaylistKind::Liked,
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self.kind, PlaylistKind::Liked)
    }

    /// Stored videos; empty for the derived playlist.
    pub fn videos(&self) -> &[VideoId] {
        match &self.kind {
            PlaylistKind::Custom(videos) => videos,
            PlaylistKind::Liked => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistSummary {
    pub name: String,
    pub count: usize,
    pub system: bool,
}
