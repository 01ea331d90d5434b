use std::collections::BTreeMap;

use tracing::debug;

use super::comment::{Comment, CommentId};
use super::video::{NewVideo, PublishState, ReactionKind, Video, VideoId};
use super::ViewerId;
use crate::error::{require_non_blank, EngineError, EngineResult, Entity};

/// Owns every video (and, through them, every comment) and hands out ids.
#[derive(Debug, Default)]
pub struct VideoLibrary {
    videos: BTreeMap<VideoId, Video>,
    next_video_id: u64,
    next_comment_id: u64,
    reaction_clock: u64,
}

impl VideoLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, new_video: NewVideo, state: PublishState) -> EngineResult<VideoId> {
        let title = require_non_blank(&new_video.title, "Video title")?.to_string();
        self.next_video_id += 1;
        let id = VideoId(self.next_video_id);
        let new_video = NewVideo { title, ..new_video };
        debug!("Created video {} '{}' ({:?})", id, new_video.title, state);
        self.videos.insert(id, Video::new(id, new_video, state));
        Ok(id)
    }

    pub fn get(&self, id: VideoId) -> EngineResult<&Video> {
        self.videos
            .get(&id)
            .ok_or_else(|| EngineError::not_found(Entity::Video, id))
    }

    pub(crate) fn get_mut(&mut self, id: VideoId) -> EngineResult<&mut Video> {
        self.videos
            .get_mut(&id)
            .ok_or_else(|| EngineError::not_found(Entity::Video, id))
    }

    pub fn contains(&self, id: VideoId) -> bool {
        self.videos.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    /// All videos in id order, pending ones included.
    pub fn iter(&self) -> impl Iterator<Item = &Video> + '_ {
        self.videos.values()
    }

    pub(crate) fn remove(&mut self, id: VideoId) -> EngineResult<Video> {
        self.videos
            .remove(&id)
            .ok_or_else(|| EngineError::not_found(Entity::Video, id))
    }

    pub fn add_comment(&mut self, video: VideoId, author: &str, text: &str) -> EngineResult<CommentId> {
        let author = require_non_blank(author, "Comment author")?.to_string();
        let text = require_non_blank(text, "Comment text")?.to_string();
        let next_id = CommentId(self.next_comment_id + 1);
        self.get_mut(video)?
            .push_comment(Comment::new(next_id, author, text));
        self.next_comment_id = next_id.0;
        debug!("Added comment {} to video {}", next_id, video);
        Ok(next_id)
    }

    pub fn toggle_comment_like(
        &mut self,
        video: VideoId,
        comment: CommentId,
        viewer: &ViewerId,
    ) -> EngineResult<u32> {
        require_non_blank(viewer.as_str(), "Viewer")?;
        let video = self.get_mut(video)?;
        let comment = video
            .comment_mut(comment)
            .ok_or_else(|| EngineError::not_found(Entity::Comment, comment))?;
        Ok(comment.toggle_like(viewer))
    }

    pub fn toggle_like(
        &mut self,
        video: VideoId,
        viewer: &ViewerId,
    ) -> EngineResult<Option<ReactionKind>> {
        self.toggle_reaction(video, viewer, ReactionKind::Like)
    }

    pub fn toggle_dislike(
        &mut self,
        video: VideoId,
        viewer: &ViewerId,
    ) -> EngineResult<Option<ReactionKind>> {
        self.toggle_reaction(video, viewer, ReactionKind::Dislike)
    }

    fn toggle_reaction(
        &mut self,
        video: VideoId,
        viewer: &ViewerId,
        kind: ReactionKind,
    ) -> EngineResult<Option<ReactionKind>> {
        require_non_blank(viewer.as_str(), "Viewer")?;
        let stamp = self.reaction_clock + 1;
        let reaction = self.get_mut(video)?.toggle_reaction(viewer, kind, stamp);
        self.reaction_clock = stamp;
        debug!(
            "Viewer {} toggled {:?} on video {}: now {:?}",
            viewer, kind, video, reaction
        );
        Ok(reaction)
    }

    /// Videos the viewer currently likes, oldest like first.
    pub fn liked_by(&self, viewer: &ViewerId) -> Vec<VideoId> {
        let mut liked: Vec<(u64, VideoId)> = self
            .videos
            .values()
            .filter_map(|video| {
                video
                    .reaction_entry(viewer)
                    .filter(|r| r.kind == ReactionKind::Like)
                    .map(|r| (r.stamp, video.id))
            })
            .collect();
        liked.sort_unstable();
        liked.into_iter().map(|(_, id)| id).collect()
    }

    pub fn liked_count(&self, viewer: &ViewerId) -> usize {
        self.videos
            .values()
            .filter(|video| video.reaction_of(viewer) == Some(ReactionKind::Like))
            .count()
    }
}
