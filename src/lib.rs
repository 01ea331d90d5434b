//! MiniTube media engine library
//!
//! In-memory state engine for a small video-sharing application: videos and
//! comments, playlists with a derived liked view, a bounded watch history, an
//! upload queue, a suggestion cursor and a category tree, all coordinated by
//! [`engine::Engine`].

pub mod category;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod media;
pub mod playlist;
pub mod suggestion;
pub mod upload;

// Re-export commonly used types for convenience
pub use category::CategoryPath;
pub use engine::{Engine, SharedEngine};
pub use error::{EngineError, EngineResult};
pub use media::{CommentId, NewVideo, VideoId, ViewerId};
