//! Engine error type.
//!
//! Every fallible engine operation returns [`EngineResult`]. Errors are raised at the
//! operation boundary and never leave partial state behind.

use std::fmt;

use thiserror::Error;

use crate::media::VideoId;

/// Kind of entity an id or name failed to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Video,
    Comment,
    Playlist,
    Category,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Video => "Video",
            Entity::Comment => "Comment",
            Entity::Playlist => "Playlist",
            Entity::Category => "Category",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: Entity, key: String },

    #[error("{entity} already exists: {key}")]
    Duplicate { entity: Entity, key: String },

    #[error("{0} is empty")]
    Empty(&'static str),

    #[error("Reached the end of the suggestion list")]
    EndOfList,

    #[error("Suggestion list was never advanced")]
    NotStarted,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Video {0} is not published yet")]
    NotPublished(VideoId),

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Playlist {name} is full (max {limit} videos)")]
    CapacityExceeded { name: String, limit: usize },
}

impl EngineError {
    pub fn not_found(entity: Entity, key: impl fmt::Display) -> Self {
        EngineError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn duplicate(entity: Entity, key: impl fmt::Display) -> Self {
        EngineError::Duplicate {
            entity,
            key: key.to_string(),
        }
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Rejects blank strings, returning the trimmed value.
pub(crate) fn require_non_blank<'a>(value: &'a str, what: &str) -> EngineResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Invalid(format!("{} cannot be empty", what)));
    }
    Ok(trimmed)
}
