//! Shared constants for end-to-end tests
//!
//! When the sample catalog changes, update only this file.

// ============================================================================
// Viewers
// ============================================================================

/// Owner of the playlists in every fixture engine
pub const OWNER: &str = "owner";

pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";

// ============================================================================
// Sample catalog
// ============================================================================

pub const SEEDED_VIDEO_COUNT: usize = 11;
pub const SEEDED_PENDING_COUNT: usize = 2;
pub const SEEDED_SUGGESTION_COUNT: usize = 4;

pub const PYTHON_TUTORIAL: &str = "Python Tutorial";
pub const SCIENCE_FACTS: &str = "Science Facts";

pub const FAVORITES: &str = "Favorites";
pub const WATCH_LATER: &str = "Watch Later";
pub const EDUCATIONAL: &str = "Educational";
pub const LIKED_VIDEOS: &str = "Liked Videos";

/// History capacity used by [`super::empty_engine`]
pub const SMALL_HISTORY: usize = 3;
