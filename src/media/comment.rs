use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde::Serialize;

use super::ViewerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CommentId(pub u64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CommentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(CommentId)
    }
}

/// A comment left on a video. Ids grow monotonically, so id order is creation order.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: String,
    pub text: String,
    pub created: SystemTime,
    likes: u32,
    #[serde(skip)]
    liked_by: HashSet<ViewerId>,
}

impl Comment {
    pub(crate) fn new(id: CommentId, author: String, text: String) -> Self {
        Self {
            id,
            author,
            text,
            created: SystemTime::now(),
            likes: 0,
            liked_by: HashSet::new(),
        }
    }

    pub fn likes(&self) -> u32 {
        self.likes
    }

    pub fn is_liked_by(&self, viewer: &ViewerId) -> bool {
        self.liked_by.contains(viewer)
    }

    /// Toggles the viewer's like and returns the new like count.
    pub(crate) fn toggle_like(&mut self, viewer: &ViewerId) -> u32 {
        if !self.liked_by.remove(viewer) {
            self.liked_by.insert(viewer.clone());
        }
        self.likes = self.liked_by.len() as u32;
        self.likes
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.author, self.text)
    }
}
