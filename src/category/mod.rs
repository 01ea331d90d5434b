//! Category hierarchy: paths, the arena-backed tree and its lazy listings.

mod path;
mod tree;

pub use path::CategoryPath;
pub use tree::{CategoryOutlineEntry, CategoryTree, CategoryVideos};
