mod collection;
mod models;

pub use collection::{PlaylistCollection, MAX_PLAYLIST_SIZE};
pub use models::{Playlist, PlaylistKind, PlaylistSummary};
