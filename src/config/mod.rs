mod file_config;

pub use file_config::{FileConfig, PlaylistsConfig};

use crate::playlist::MAX_PLAYLIST_SIZE;
use crate::suggestion::SuggestionEndPolicy;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::collections::HashSet;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
pub const DEFAULT_OWNER: &str = "you";
pub const DEFAULT_LIKED_PLAYLIST: &str = "Liked Videos";
pub const DEFAULT_ROOT_CATEGORY: &str = "All Videos";
pub const DEFAULT_PLAYLISTS: [&str; 3] = ["Favorites", "Watch Later", "Educational"];

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub history_capacity: usize,
    pub suggestion_end: SuggestionEndPolicy,
    pub owner: String,
    pub seed_sample_data: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            suggestion_end: SuggestionEndPolicy::Hold,
            owner: DEFAULT_OWNER.to_string(),
            seed_sample_data: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub history_capacity: usize,
    pub suggestion_end: SuggestionEndPolicy,
    /// Viewer that owns the playlists, including the liked one.
    pub owner: String,
    pub root_category: String,
    pub seed_sample_data: bool,
    pub playlists: PlaylistSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSettings {
    pub liked_name: String,
    pub defaults: Vec<String>,
    pub max_size: usize,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            liked_name: DEFAULT_LIKED_PLAYLIST.to_string(),
            defaults: DEFAULT_PLAYLISTS.iter().map(|s| s.to_string()).collect(),
            max_size: MAX_PLAYLIST_SIZE,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            suggestion_end: SuggestionEndPolicy::Hold,
            owner: DEFAULT_OWNER.to_string(),
            root_category: DEFAULT_ROOT_CATEGORY.to_string(),
            seed_sample_data: true,
            playlists: PlaylistSettings::default(),
        }
    }
}

impl EngineSettings {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let history_capacity = file.history_capacity.unwrap_or(cli.history_capacity);
        if history_capacity == 0 {
            bail!("history_capacity must be at least 1");
        }

        let suggestion_end = match file.suggestion_end {
            Some(value) => match parse_end_policy(&value) {
                Some(policy) => policy,
                None => bail!(
                    "Invalid suggestion_end '{}', expected 'hold' or 'wrap'",
                    value
                ),
            },
            None => cli.suggestion_end,
        };

        let owner = file.owner.unwrap_or_else(|| cli.owner.clone());
        let owner = non_blank(owner, "owner")?;

        let root_category = non_blank(
            file.root_category
                .unwrap_or_else(|| DEFAULT_ROOT_CATEGORY.to_string()),
            "root_category",
        )?;

        let seed_sample_data = file.seed_sample_data.unwrap_or(cli.seed_sample_data);

        // Playlist settings - merge file config with defaults
        let pl_file = file.playlists.unwrap_or_default();
        let defaults = PlaylistSettings::default();
        let liked_name = non_blank(
            pl_file.liked_name.unwrap_or(defaults.liked_name),
            "playlists.liked_name",
        )?;
        let mut seen = HashSet::new();
        let mut default_playlists = Vec::new();
        for name in pl_file.defaults.unwrap_or(defaults.defaults) {
            let name = non_blank(name, "playlists.defaults entry")?;
            if name == liked_name {
                bail!(
                    "Default playlist '{}' clashes with the liked playlist name",
                    name
                );
            }
            if !seen.insert(name.clone()) {
                bail!("Default playlist '{}' is listed twice", name);
            }
            default_playlists.push(name);
        }
        let max_size = pl_file.max_size.unwrap_or(defaults.max_size);
        if max_size == 0 {
            bail!("playlists.max_size must be at least 1");
        }

        Ok(Self {
            history_capacity,
            suggestion_end,
            owner,
            root_category,
            seed_sample_data,
            playlists: PlaylistSettings {
                liked_name,
                defaults: default_playlists,
                max_size,
            },
        })
    }
}

fn non_blank(value: String, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        bail!("{} cannot be empty", field);
    }
    Ok(trimmed.to_string())
}

/// Parses a suggestion end policy string into SuggestionEndPolicy.
/// Uses clap's ValueEnum trait for parsing.
pub fn parse_end_policy(s: &str) -> Option<SuggestionEndPolicy> {
    SuggestionEndPolicy::from_str(s, true).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_end_policy() {
        assert_eq!(parse_end_policy("hold"), Some(SuggestionEndPolicy::Hold));
        assert_eq!(parse_end_policy("wrap"), Some(SuggestionEndPolicy::Wrap));
        // Case insensitive
        assert_eq!(parse_end_policy("WRAP"), Some(SuggestionEndPolicy::Wrap));
        // Invalid
        assert!(parse_end_policy("loop").is_none());
    }

    #[test]
    fn test_resolve_defaults() {
        let config = EngineSettings::resolve(&CliConfig::default(), None).unwrap();
        assert_eq!(config, EngineSettings::default());
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.playlists.max_size, 300);
        assert_eq!(
            config.playlists.defaults,
            vec!["Favorites", "Watch Later", "Educational"]
        );
    }

    #[test]
    fn test_resolve_cli_only() {
        let cli = CliConfig {
            history_capacity: 3,
            suggestion_end: SuggestionEndPolicy::Wrap,
            owner: "alice".to_string(),
            seed_sample_data: false,
        };

        let config = EngineSettings::resolve(&cli, None).unwrap();

        assert_eq!(config.history_capacity, 3);
        assert_eq!(config.suggestion_end, SuggestionEndPolicy::Wrap);
        assert_eq!(config.owner, "alice");
        assert!(!config.seed_sample_data);
        assert_eq!(config.root_category, "All Videos");
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let cli = CliConfig {
            history_capacity: 3,
            owner: "alice".to_string(),
            ..Default::default()
        };

        let file_config = FileConfig {
            history_capacity: Some(5),
            suggestion_end: Some("Wrap".to_string()),
            playlists: Some(PlaylistsConfig {
                liked_name: Some("Hearted".to_string()),
                defaults: Some(vec!["Later".to_string()]),
                max_size: Some(50),
            }),
            ..Default::default()
        };

        let config = EngineSettings::resolve(&cli, Some(file_config)).unwrap();

        // TOML values should override CLI
        assert_eq!(config.history_capacity, 5);
        assert_eq!(config.suggestion_end, SuggestionEndPolicy::Wrap);
        assert_eq!(config.playlists.liked_name, "Hearted");
        assert_eq!(config.playlists.defaults, vec!["Later"]);
        assert_eq!(config.playlists.max_size, 50);
        // CLI value used when TOML doesn't specify
        assert_eq!(config.owner, "alice");
    }

    #[test]
    fn test_resolve_end_policy_from_toml_text() {
        let file_config: FileConfig = toml::from_str("suggestion_end = \"WRAP\"").unwrap();
        let config = EngineSettings::resolve(&CliConfig::default(), Some(file_config)).unwrap();
        assert_eq!(config.suggestion_end, SuggestionEndPolicy::Wrap);
    }

    #[test]
    fn test_resolve_zero_capacity_error() {
        let cli = CliConfig {
            history_capacity: 0,
            ..Default::default()
        };
        let result = EngineSettings::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("history_capacity must be at least 1"));
    }

    #[test]
    fn test_resolve_invalid_end_policy_error() {
        let file_config = FileConfig {
            suggestion_end: Some("loop".to_string()),
            ..Default::default()
        };
        let result = EngineSettings::resolve(&CliConfig::default(), Some(file_config));
        assert!(result.unwrap_err().to_string().contains("Invalid suggestion_end"));
    }

    #[test]
    fn test_resolve_blank_owner_error() {
        let cli = CliConfig {
            owner: "  ".to_string(),
            ..Default::default()
        };
        let result = EngineSettings::resolve(&cli, None);
        assert!(result.unwrap_err().to_string().contains("owner cannot be empty"));
    }

    #[test]
    fn test_resolve_playlist_name_clash_error() {
        let file_config = FileConfig {
            playlists: Some(PlaylistsConfig {
                defaults: Some(vec!["Favorites".to_string(), "Liked Videos".to_string()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let result = EngineSettings::resolve(&CliConfig::default(), Some(file_config));
        assert!(result.unwrap_err().to_string().contains("clashes"));
    }

    #[test]
    fn test_resolve_duplicate_default_playlist_error() {
        let file_config = FileConfig {
            playlists: Some(PlaylistsConfig {
                defaults: Some(vec!["Later".to_string(), "Later".to_string()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let result = EngineSettings::resolve(&CliConfig::default(), Some(file_config));
        assert!(result.unwrap_err().to_string().contains("listed twice"));
    }
}
