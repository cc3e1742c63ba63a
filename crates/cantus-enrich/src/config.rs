use anyhow::{Context, Result};
use cantus_search::VectorizerConfig;
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Cover shown when no album art can be found for a song.
pub const DEFAULT_PLACEHOLDER_COVER_URL: &str = "https://i.postimg.cc/0QNxYz4V/social.png";

/// Configuration for cantus.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (CANTUS_* prefix)
/// 3. Config file (~/.config/cantus/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the lyrics dataset (columns `song`, `artist`, `text`).
    ///
    /// Can be set via:
    /// - CLI: --data /path/to/songs.csv
    /// - ENV: CANTUS_DATASET_PATH
    /// - Config: dataset_path = "/path/to/songs.csv"
    /// - Default: ~/.local/share/cantus/spotify_millsongdata.csv
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Number of recommendations to show.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Minimum number of songs a term must appear in to be indexed.
    #[serde(default = "default_min_df")]
    pub min_df: usize,

    /// Maximum vocabulary size.
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Spotify client ID for cover-art lookup.
    ///
    /// Can be set via:
    /// - ENV: CANTUS_SPOTIFY_CLIENT_ID
    /// - Config: spotify_client_id = "..."
    pub spotify_client_id: Option<String>,

    /// Spotify client secret for cover-art lookup.
    ///
    /// Can be set via:
    /// - ENV: CANTUS_SPOTIFY_CLIENT_SECRET
    /// - Config: spotify_client_secret = "..."
    pub spotify_client_secret: Option<String>,

    /// Image used when a cover cannot be found.
    #[serde(default = "default_placeholder_cover_url")]
    pub placeholder_cover_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            top_n: default_top_n(),
            min_df: default_min_df(),
            max_features: default_max_features(),
            spotify_client_id: None,
            spotify_client_secret: None,
            placeholder_cover_url: default_placeholder_cover_url(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/cantus/config.toml
    /// Reads environment variables with CANTUS_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("cantus");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration with a dataset path given on the command line.
    pub fn load_with_dataset_path(dataset_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::load()?;
        if let Some(path) = dataset_path {
            config.dataset_path = path;
        }
        Ok(config)
    }

    /// Vectorizer policy derived from this configuration.
    pub fn vectorizer(&self) -> VectorizerConfig {
        VectorizerConfig::default()
            .with_min_df(self.min_df)
            .with_max_features(self.max_features)
    }

    /// Spotify credentials, when both halves are configured.
    pub fn spotify_credentials(&self) -> Option<(&str, &str)> {
        match (&self.spotify_client_id, &self.spotify_client_secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                Some((id.as_str(), secret.as_str()))
            }
            _ => None,
        }
    }
}

fn default_dataset_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cantus")
        .join("spotify_millsongdata.csv")
}

fn default_top_n() -> usize {
    cantus_search::DEFAULT_TOP_N
}

fn default_min_df() -> usize {
    cantus_search::vectorizer::DEFAULT_MIN_DF
}

fn default_max_features() -> usize {
    cantus_search::vectorizer::DEFAULT_MAX_FEATURES
}

fn default_placeholder_cover_url() -> String {
    DEFAULT_PLACEHOLDER_COVER_URL.to_string()
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/cantus/config.toml
/// - macOS: ~/Library/Application Support/cantus/config.toml
/// - Windows: %APPDATA%\cantus\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cantus")
        .join("config.toml")
}

/// Keys accepted by `cantus config get/set`.
pub const KEYS: [&str; 7] = [
    "dataset_path",
    "top_n",
    "min_df",
    "max_features",
    "spotify_client_id",
    "spotify_client_secret",
    "placeholder_cover_url",
];

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Cantus Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (CANTUS_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Lyrics dataset with at least the columns: song, artist, text
#
# Can also be set via:
# - CLI: cantus recommend --data /path/to/songs.csv "Song Title"
# - Environment: CANTUS_DATASET_PATH=/path/to/songs.csv
#
# Default: Platform-specific data directory
#dataset_path = "/path/to/spotify_millsongdata.csv"

# Number of recommendations to show
top_n = 5

# Vocabulary pruning: a term must occur in at least min_df songs,
# and at most max_features terms are kept
min_df = 5
max_features = 15000

# Spotify credentials for album cover lookup (optional)
#
# Create an app at: https://developer.spotify.com/dashboard
#
# Can also be set via:
# - Environment: CANTUS_SPOTIFY_CLIENT_ID / CANTUS_SPOTIFY_CLIENT_SECRET
#spotify_client_id = "your-client-id"
#spotify_client_secret = "your-client-secret"

# Image shown when no album cover is found
#placeholder_cover_url = "https://i.postimg.cc/0QNxYz4V/social.png"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.dataset_path.as_os_str().is_empty());
        assert_eq!(config.top_n, 5);
        assert_eq!(config.min_df, 5);
        assert_eq!(config.max_features, 15_000);
        assert!(config.spotify_credentials().is_none());
        assert_eq!(config.placeholder_cover_url, DEFAULT_PLACEHOLDER_COVER_URL);
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_custom_dataset_path() {
        let custom_path = PathBuf::from("/tmp/songs.csv");
        let config = Config::load_with_dataset_path(Some(custom_path.clone()));
        assert!(config.is_ok());
        assert_eq!(config.unwrap().dataset_path, custom_path);
    }

    #[test]
    fn test_vectorizer_from_config() {
        let config = Config {
            min_df: 2,
            max_features: 100,
            ..Config::default()
        };
        let vectorizer = config.vectorizer();
        assert_eq!(vectorizer.min_df, 2);
        assert_eq!(vectorizer.max_features, 100);
        assert_eq!(vectorizer.ngram_range, (1, 2));
        assert!(vectorizer.stop_words);
    }

    #[test]
    fn test_spotify_credentials_need_both_halves() {
        let mut config = Config {
            spotify_client_id: Some("id".to_string()),
            ..Config::default()
        };
        assert!(config.spotify_credentials().is_none());

        config.spotify_client_secret = Some(String::new());
        assert!(config.spotify_credentials().is_none());

        config.spotify_client_secret = Some("secret".to_string());
        assert_eq!(config.spotify_credentials(), Some(("id", "secret")));
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let parsed: Config = serde_json::from_value(serde_json::json!({ "top_n": 8 })).unwrap();
        assert_eq!(parsed.top_n, 8);
        assert_eq!(parsed.min_df, 5);
        assert_eq!(parsed.placeholder_cover_url, DEFAULT_PLACEHOLDER_COVER_URL);
    }
}
