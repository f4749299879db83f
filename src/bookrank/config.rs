use crate::error::{CatalogError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "bookrank.json";
pub const DATA_DIR_ENV: &str = "BOOKRANK_DATA";

const DEFAULT_BOOKS_FILE: &str = "books.json";
const DEFAULT_CHANNELS_FILE: &str = "channels.json";
const DEFAULT_STORE_URL: &str = "https://www.amazon.co.jp/dp/";
const DEFAULT_CHANNEL_URL_PREFIX: &str = "https://www.youtube.com/channel/";

/// Configuration for bookrank, read from `bookrank.json`.
///
/// Every field has a default, so a partial (or absent) file is fine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Directory holding the dataset files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_books_file")]
    pub books_file: String,

    #[serde(default = "default_channels_file")]
    pub channels_file: String,

    /// Product page prefix; the ASIN is appended
    #[serde(default = "default_store_url")]
    pub store_url: String,

    /// Associate id added to generated links as `?tag=`
    #[serde(default)]
    pub associate_tag: Option<String>,

    #[serde(default = "default_channel_url_prefix")]
    pub channel_url_prefix: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_books_file() -> String {
    DEFAULT_BOOKS_FILE.to_string()
}

fn default_channels_file() -> String {
    DEFAULT_CHANNELS_FILE.to_string()
}

fn default_store_url() -> String {
    DEFAULT_STORE_URL.to_string()
}

fn default_channel_url_prefix() -> String {
    DEFAULT_CHANNEL_URL_PREFIX.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            books_file: default_books_file(),
            channels_file: default_channels_file(),
            store_url: default_store_url(),
            associate_tag: None,
            channel_url_prefix: default_channel_url_prefix(),
        }
    }
}

impl CatalogConfig {
    /// Load config from a file, or return defaults if it doesn't exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(CatalogError::Io)?;
        let config: CatalogConfig =
            serde_json::from_str(&content).map_err(CatalogError::Serialization)?;
        Ok(config)
    }

    /// Finds the config to use when none is given explicitly: `bookrank.json`
    /// in `cwd` first, then the user's config directory.
    pub fn discover(cwd: &Path) -> Option<PathBuf> {
        let local = cwd.join(CONFIG_FILENAME);
        if local.exists() {
            return Some(local);
        }

        ProjectDirs::from("com", "bookrank", "bookrank")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
            .filter(|p| p.exists())
    }

    /// Resolves `data_dir` against the directory the config came from.
    pub fn anchored_at(mut self, base: &Path) -> Self {
        if self.data_dir.is_relative() {
            self.data_dir = base.join(&self.data_dir);
        }
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn books_path(&self) -> PathBuf {
        self.data_dir.join(&self.books_file)
    }

    pub fn channels_path(&self) -> PathBuf {
        self.data_dir.join(&self.channels_file)
    }

    pub fn channel_url(&self, channel_id: &str) -> String {
        format!("{}{}", self.channel_url_prefix, channel_id)
    }
}
