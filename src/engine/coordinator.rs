use rand::Rng;
use tracing::{debug, info};

use super::snapshot::{EngagementSnapshot, EngineStats, HistorySnapshot};
use crate::category::{CategoryOutlineEntry, CategoryPath, CategoryTree};
use crate::config::EngineSettings;
use crate::error::{require_non_blank, EngineError, EngineResult, Entity};
use crate::history::{HistoryStack, PlaybackEvent};
use crate::media::{CommentId, NewVideo, PublishState, ReactionKind, Video, VideoId, VideoLibrary, ViewerId};
use crate::playlist::{Playlist, PlaylistCollection, PlaylistKind, PlaylistSummary};
use crate::suggestion::SuggestionList;
use crate::upload::UploadQueue;

/// Owns the video library and every structure built on top of it.
///
/// Composite operations check all of their preconditions before the first
/// mutation, so an operation that returns an error leaves the engine as it was.
#[derive(Debug)]
pub struct Engine {
    settings: EngineSettings,
    owner: ViewerId,
    library: VideoLibrary,
    playlists: PlaylistCollection,
    history: HistoryStack<PlaybackEvent>,
    uploads: UploadQueue<VideoId>,
    suggestions: SuggestionList<VideoId>,
    categories: CategoryTree,
    now_playing: Option<VideoId>,
}

impl Engine {
    pub fn new(settings: EngineSettings) -> EngineResult<Self> {
        let owner = ViewerId::from(require_non_blank(&settings.owner, "Owner")?);
        let history = HistoryStack::new(settings.history_capacity)?;

        let mut playlists = PlaylistCollection::new(settings.playlists.max_size);
        for name in &settings.playlists.defaults {
            playlists.create(name)?;
        }
        playlists.create_liked(&settings.playlists.liked_name)?;

        Ok(Self {
            owner,
            library: VideoLibrary::new(),
            playlists,
            history,
            uploads: UploadQueue::new(),
            suggestions: SuggestionList::new(settings.suggestion_end),
            categories: CategoryTree::new(settings.root_category.clone()),
            now_playing: None,
            settings,
        })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn owner(&self) -> &ViewerId {
        &self.owner
    }

    pub fn categories(&self) -> &CategoryTree {
        &self.categories
    }

    // Videos and categories

    /// Any video, pending ones included.
    pub fn video(&self, id: VideoId) -> EngineResult<&Video> {
        self.library.get(id)
    }

    /// Published videos in id order.
    pub fn videos(&self) -> impl Iterator<Item = &Video> + '_ {
        self.library.iter().filter(|v| v.is_published())
    }

    fn published(&self, id: VideoId) -> EngineResult<&Video> {
        let video = self.library.get(id)?;
        if !video.is_published() {
            return Err(EngineError::NotPublished(id));
        }
        Ok(video)
    }

    pub fn add_category(&mut self, parent: &CategoryPath, name: &str) -> EngineResult<CategoryPath> {
        self.categories.add_category(parent, name)
    }

    pub fn create_video(&mut self, title: &str, category: &CategoryPath) -> EngineResult<VideoId> {
        self.create_video_with(NewVideo::new(title, category.clone()))
    }

    pub fn create_video_with(&mut self, new_video: NewVideo) -> EngineResult<VideoId> {
        self.insert_video(new_video, PublishState::Published)
    }

    fn insert_video(&mut self, new_video: NewVideo, state: PublishState) -> EngineResult<VideoId> {
        if !self.categories.contains(&new_video.category) {
            return Err(EngineError::not_found(Entity::Category, &new_video.category));
        }
        let category = new_video.category.clone();
        let id = self.library.create(new_video, state)?;
        self.categories.attach_video(&category, id)?;
        Ok(id)
    }

    /// Published videos under `path`, optionally including every descendant
    /// category in depth-first order.
    pub fn list_category(
        &self,
        path: &CategoryPath,
        include_descendants: bool,
    ) -> EngineResult<impl Iterator<Item = &Video> + '_> {
        let ids = self.categories.list_videos(path, include_descendants)?;
        let library = &self.library;
        Ok(ids
            .filter_map(move |id| library.get(id).ok())
            .filter(|video| video.is_published()))
    }

    pub fn category_outline(&self) -> Vec<CategoryOutlineEntry> {
        self.categories.outline()
    }

    pub fn find_category(&self, name: &str) -> Option<CategoryPath> {
        self.categories.find_by_name(name)
    }

    /// Case-insensitive match on the title or any category segment.
    pub fn search(&self, query: &str) -> Vec<&Video> {
        let query = query.trim().to_lowercase();
        let Ok(all) = self.list_category(&CategoryPath::root(), true) else {
            return Vec::new();
        };
        all.filter(|video| {
            video.title.to_lowercase().contains(&query)
                || video
                    .category
                    .segments()
                    .iter()
                    .any(|segment| segment.to_lowercase().contains(&query))
        })
        .collect()
    }

    /// Removes the video and every reference to it.
    pub fn remove_video(&mut self, id: VideoId) -> EngineResult<Video> {
        let video = self.library.remove(id)?;
        self.categories.detach_video(id);
        self.playlists.forget_video(id);
        self.history.retain(|event| event.video != id);
        self.uploads.retain(|queued| *queued != id);
        self.suggestions.retain(|suggested| *suggested != id);
        if self.now_playing == Some(id) {
            self.now_playing = None;
        }
        info!("Removed video {} '{}'", id, video.title);
        Ok(video)
    }

    // Uploads

    /// Creates a pending video and queues it for publication.
    pub fn enqueue_upload(&mut self, new_video: NewVideo) -> EngineResult<VideoId> {
        let id = self.insert_video(new_video, PublishState::Pending)?;
        self.uploads.enqueue(id);
        debug!("Queued upload {} ({} pending)", id, self.uploads.len());
        Ok(id)
    }

    pub fn publish_next(&mut self) -> EngineResult<VideoId> {
        let id = self.uploads.process_next()?;
        let video = self.library.get_mut(id)?;
        video.state = PublishState::Published;
        info!("Published video {} '{}'", id, video.title);
        Ok(id)
    }

    pub fn peek_upload(&self) -> Option<&Video> {
        self.uploads
            .peek_next()
            .and_then(|id| self.library.get(*id).ok())
    }

    /// Queued videos, next to publish first.
    pub fn pending_uploads(&self) -> impl Iterator<Item = &Video> + '_ {
        self.uploads
            .iter()
            .filter_map(move |id| self.library.get(*id).ok())
    }

    // Playback and history

    pub fn play(&mut self, id: VideoId, viewer: &ViewerId) -> EngineResult<HistorySnapshot> {
        require_non_blank(viewer.as_str(), "Viewer")?;
        self.published(id)?;

        self.history.push(PlaybackEvent::new(id, viewer.clone()));
        let video = self.library.get_mut(id)?;
        video.views += 1;
        let views = video.views;
        self.now_playing = Some(id);
        debug!("Viewer {} played video {} ({} views)", viewer, id, views);

        Ok(HistorySnapshot {
            now_playing: id,
            views,
            entries: self.history.iter().cloned().collect(),
            capacity: self.history.capacity(),
        })
    }

    /// Playback events, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &PlaybackEvent> + '_ {
        self.history.iter()
    }

    pub fn last_played(&self) -> EngineResult<&PlaybackEvent> {
        self.history.peek()
    }

    pub fn now_playing(&self) -> Option<&Video> {
        self.now_playing.and_then(|id| self.library.get(id).ok())
    }

    // Engagement

    pub fn like(&mut self, id: VideoId, viewer: &ViewerId) -> EngineResult<EngagementSnapshot> {
        self.react(id, viewer, ReactionKind::Like)
    }

    pub fn dislike(&mut self, id: VideoId, viewer: &ViewerId) -> EngineResult<EngagementSnapshot> {
        self.react(id, viewer, ReactionKind::Dislike)
    }

    fn react(
        &mut self,
        id: VideoId,
        viewer: &ViewerId,
        kind: ReactionKind,
    ) -> EngineResult<EngagementSnapshot> {
        self.published(id)?;
        let reaction = match kind {
            ReactionKind::Like => self.library.toggle_like(id, viewer)?,
            ReactionKind::Dislike => self.library.toggle_dislike(id, viewer)?,
        };
        let video = self.library.get(id)?;
        Ok(EngagementSnapshot {
            video: id,
            viewer: viewer.clone(),
            likes: video.likes(),
            dislikes: video.dislikes(),
            reaction,
            liked_videos: self.library.liked_by(viewer),
        })
    }

    pub fn add_comment(&mut self, id: VideoId, author: &str, text: &str) -> EngineResult<CommentId> {
        self.published(id)?;
        self.library.add_comment(id, author, text)
    }

    pub fn toggle_comment_like(
        &mut self,
        id: VideoId,
        comment: CommentId,
        viewer: &ViewerId,
    ) -> EngineResult<u32> {
        self.published(id)?;
        self.library.toggle_comment_like(id, comment, viewer)
    }

    /// Videos the viewer likes, oldest like first.
    pub fn liked_videos(&self, viewer: &ViewerId) -> Vec<VideoId> {
        self.library.liked_by(viewer)
    }

    // Suggestions

    pub fn build_suggestions<I>(&mut self, videos: I) -> EngineResult<()>
    where
        I: IntoIterator<Item = VideoId>,
    {
        let videos: Vec<VideoId> = videos.into_iter().collect();
        for id in &videos {
            self.published(*id)?;
        }
        debug!("Rebuilt suggestions with {} videos", videos.len());
        self.suggestions.build(videos);
        Ok(())
    }

    pub fn suggest(&mut self, id: VideoId) -> EngineResult<()> {
        self.published(id)?;
        self.suggestions.push(id);
        Ok(())
    }

    pub fn advance_suggestion(&mut self) -> EngineResult<VideoId> {
        self.suggestions.next().copied()
    }

    pub fn reset_suggestions(&mut self) {
        self.suggestions.reset();
    }

    pub fn current_suggestion(&self) -> EngineResult<VideoId> {
        self.suggestions.current().copied()
    }

    pub fn suggestions(&self) -> impl Iterator<Item = &Video> + '_ {
        self.suggestions
            .iter()
            .filter_map(move |id| self.library.get(*id).ok())
    }

    // Playlists

    pub fn create_playlist(&mut self, name: &str) -> EngineResult<()> {
        self.playlists.create(name)
    }

    pub fn add_to_playlist(&mut self, name: &str, id: VideoId) -> EngineResult<bool> {
        self.playlists.check_add(name, id)?;
        self.published(id)?;
        self.playlists.add_video(name, id)
    }

    pub fn remove_from_playlist(&mut self, name: &str, id: VideoId) -> EngineResult<bool> {
        self.playlists.remove_video(name, id)
    }

    pub fn delete_playlist(&mut self, name: &str) -> EngineResult<Playlist> {
        self.playlists.delete(name)
    }

    pub fn shuffle_playlist(&mut self, name: &str) -> EngineResult<()> {
        self.shuffle_playlist_with(name, &mut rand::rng())
    }

    pub fn shuffle_playlist_with<R: Rng + ?Sized>(&mut self, name: &str, rng: &mut R) -> EngineResult<()> {
        self.playlists.shuffle(name, rng)
    }

    /// Contents of a playlist. The liked playlist resolves to the owner's likes.
    pub fn playlist_videos(&self, name: &str) -> EngineResult<Vec<VideoId>> {
        let playlist = self.playlists.get(name)?;
        Ok(match &playlist.kind {
            PlaylistKind::Custom(videos) => videos.clone(),
            PlaylistKind::Liked => self.library.liked_by(&self.owner),
        })
    }

    /// Summaries in creation order.
    pub fn list_playlists(&self) -> impl Iterator<Item = PlaylistSummary> + '_ {
        self.playlists.iter().map(move |playlist| PlaylistSummary {
            name: playlist.name.clone(),
            count: match &playlist.kind {
                PlaylistKind::Custom(videos) => videos.len(),
                PlaylistKind::Liked => self.library.liked_count(&self.owner),
            },
            system: playlist.is_system(),
        })
    }

    // Stats

    pub fn stats(&self) -> EngineStats {
        let mut stats = EngineStats {
            total_videos: 0,
            pending_uploads: self.uploads.len(),
            playlists: self.playlists.len(),
            history_items: self.history.len(),
            total_likes: 0,
            total_comments: 0,
            owner_liked: self.library.liked_count(&self.owner),
        };
        for video in self.videos() {
            stats.total_videos += 1;
            stats.total_likes += video.likes();
            stats.total_comments += video.comments().len();
        }
        stats
    }
}
