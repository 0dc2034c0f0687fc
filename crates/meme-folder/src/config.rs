use media_fs::ListOptions;
use std::path::PathBuf;

/// Name of the favorites file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "meme-folder-config.json";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the favorites file (defaults to the home directory)
    pub config_dir: Option<PathBuf>,
    /// Largest image shown in listings, in megabytes
    pub image_limit_mb: u64,
    /// Largest video shown in listings, in megabytes
    pub video_limit_mb: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: None,
            image_limit_mb: ListOptions::DEFAULT_IMAGE_LIMIT_MB,
            video_limit_mb: ListOptions::DEFAULT_VIDEO_LIMIT_MB,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `MEME_FOLDER_CONFIG_DIR`: directory for the favorites file (supports ~)
    /// - `MEME_FOLDER_IMAGE_LIMIT_MB`: image size ceiling (default 20)
    /// - `MEME_FOLDER_VIDEO_LIMIT_MB`: video size ceiling (default 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let config_dir = var("MEME_FOLDER_CONFIG_DIR").map(|dir| expand_tilde(dir.trim()));
        let image_limit_mb = match var("MEME_FOLDER_IMAGE_LIMIT_MB") {
            Some(value) => parse_megabytes("MEME_FOLDER_IMAGE_LIMIT_MB", &value)?,
            None => defaults.image_limit_mb,
        };
        let video_limit_mb = match var("MEME_FOLDER_VIDEO_LIMIT_MB") {
            Some(value) => parse_megabytes("MEME_FOLDER_VIDEO_LIMIT_MB", &value)?,
            None => defaults.video_limit_mb,
        };

        Ok(Self {
            config_dir,
            image_limit_mb,
            video_limit_mb,
        })
    }

    /// Override the config directory (e.g. from a command-line flag).
    pub fn with_config_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.config_dir = Some(expand_tilde(&dir.to_string_lossy()));
        }
        self
    }

    /// Full path of the favorites file.
    pub fn config_file_path(&self) -> Result<PathBuf, ConfigError> {
        let dir = match &self.config_dir {
            Some(dir) => dir.clone(),
            None => dirs::home_dir().ok_or(ConfigError::MissingHomeDirectory)?,
        };
        Ok(dir.join(CONFIG_FILE_NAME))
    }

    /// Size ceilings for directory listings.
    pub fn list_options(&self) -> ListOptions {
        ListOptions::from_megabytes(self.image_limit_mb, self.video_limit_mb)
    }
}

fn parse_megabytes(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}

/// Expand ~ or ~/ prefix to the user's home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"))
    } else if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path))
    } else {
        PathBuf::from(path)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a whole number of megabytes, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("Could not determine the home directory; set MEME_FOLDER_CONFIG_DIR")]
    MissingHomeDirectory,
}
