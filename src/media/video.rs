use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime};

use serde::Serialize;

use super::comment::{Comment, CommentId};
use super::ViewerId;
use crate::category::CategoryPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(pub u64);

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VideoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(VideoId)
    }
}

/// Publication state of a video. Pending videos sit in the upload queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishState {
    Pending,
    Published,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    Like,
    Dislike,
}

/// A viewer's reaction to a video. `stamp` comes from the library's reaction
/// clock and orders the liked-videos view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reaction {
    pub kind: ReactionKind,
    pub stamp: u64,
}

/// Input for creating a video.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub category: CategoryPath,
    pub duration: Option<Duration>,
}

impl NewVideo {
    pub fn new(title: impl Into<String>, category: CategoryPath) -> Self {
        Self {
            title: title.into(),
            category,
            duration: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub category: CategoryPath,
    pub duration: Option<Duration>,
    pub uploaded: SystemTime,
    pub(crate) views: u64,
    pub(crate) state: PublishState,
    likes: u64,
    dislikes: u64,
    reactions: HashMap<ViewerId, Reaction>,
    comments: Vec<Comment>,
}

impl Video {
    pub(crate) fn new(id: VideoId, new_video: NewVideo, state: PublishState) -> Self {
        Self {
            id,
            title: new_video.title,
            category: new_video.category,
            duration: new_video.duration,
            uploaded: SystemTime::now(),
            views: 0,
            state,
            likes: 0,
            dislikes: 0,
            reactions: HashMap::new(),
            comments: Vec::new(),
        }
    }

    pub fn state(&self) -> PublishState {
        self.state
    }

    pub fn is_published(&self) -> bool {
        self.state == PublishState::Published
    }

    pub fn views(&self) -> u64 {
        self.views
    }

    pub fn likes(&self) -> u64 {
        self.likes
    }

    pub fn dislikes(&self) -> u64 {
        self.dislikes
    }

    /// Likes as a percentage of all reactions, 0 when nobody reacted.
    pub fn like_ratio(&self) -> f64 {
        let total = self.likes + self.dislikes;
        if total == 0 {
            return 0.0;
        }
        self.likes as f64 / total as f64 * 100.0
    }

    pub fn reaction_of(&self, viewer: &ViewerId) -> Option<ReactionKind> {
        self.reactions.get(viewer).map(|r| r.kind)
    }

    pub(crate) fn reaction_entry(&self, viewer: &ViewerId) -> Option<&Reaction> {
        self.reactions.get(viewer)
    }

    pub fn liked_by(&self) -> impl Iterator<Item = &ViewerId> + '_ {
        self.viewers_with(ReactionKind::Like)
    }

    pub fn disliked_by(&self) -> impl Iterator<Item = &ViewerId> + '_ {
        self.viewers_with(ReactionKind::Dislike)
    }

    fn viewers_with(&self, kind: ReactionKind) -> impl Iterator<Item = &ViewerId> + '_ {
        self.reactions
            .iter()
            .filter(move |(_, r)| r.kind == kind)
            .map(|(viewer, _)| viewer)
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    pub(crate) fn comment_mut(&mut self, id: CommentId) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| c.id == id)
    }

    pub(crate) fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Toggles `kind` for `viewer`. An opposite reaction is dropped first, so a
    /// viewer never holds both. Returns the viewer's reaction afterwards.
    pub(crate) fn toggle_reaction(
        &mut self,
        viewer: &ViewerId,
        kind: ReactionKind,
        stamp: u64,
    ) -> Option<ReactionKind> {
        let current = self.reactions.remove(viewer);
        let result = match current {
            Some(reaction) if reaction.kind == kind => None,
            _ => {
                self.reactions
                    .insert(viewer.clone(), Reaction { kind, stamp });
                Some(kind)
            }
        };
        self.recount();
        result
    }

    fn recount(&mut self) {
        self.likes = self.liked_by().count() as u64;
        self.dislikes = self.disliked_by().count() as u64;
    }
}

impl fmt::Display for Video {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.duration {
            Some(duration) => write!(f, "{} ({})", self.title, format_clock_duration(duration)),
            None => write!(f, "{}", self.title),
        }
    }
}

/// Parses `m:ss` or `h:mm:ss` into a duration.
pub fn parse_clock_duration(s: &str) -> Option<Duration> {
    let parts: Vec<&str> = s.trim().split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }
    let mut values = Vec::with_capacity(parts.len());
    for part in &parts {
        if part.is_empty() {
            return None;
        }
        values.push(part.parse::<u64>().ok()?);
    }
    let (hours, minutes, seconds) = match values.as_slice() {
        [m, s] => (0, *m, *s),
        [h, m, s] => {
            if *m >= 60 {
                return None;
            }
            (*h, *m, *s)
        }
        _ => return None,
    };
    if seconds >= 60 {
        return None;
    }
    let total = hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)?;
    Some(Duration::from_secs(total))
}

pub fn format_clock_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
