use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub history_capacity: Option<usize>,
    pub suggestion_end: Option<String>,
    pub owner: Option<String>,
    pub root_category: Option<String>,
    pub seed_sample_data: Option<bool>,

    pub playlists: Option<PlaylistsConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct PlaylistsConfig {
    /// Name of the system playlist derived from likes.
    pub liked_name: Option<String>,
    /// Playlists created empty on startup, in order.
    pub defaults: Option<Vec<String>>,
    pub max_size: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
