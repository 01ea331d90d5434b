//! Entity model: videos, comments and the library that owns them.

mod comment;
mod library;
mod video;

use std::fmt;

use serde::Serialize;

pub use comment::{Comment, CommentId};
pub use library::VideoLibrary;
pub use video::{
    format_clock_duration, parse_clock_duration, NewVideo, PublishState, Reaction, ReactionKind,
    Video, VideoId,
};

/// Identity of whoever is watching, liking or commenting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ViewerId(String);

impl ViewerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ViewerId {
    fn from(value: &str) -> Self {
        ViewerId(value.to_string())
    }
}

impl From<String> for ViewerId {
    fn from(value: String) -> Self {
        ViewerId(value)
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
