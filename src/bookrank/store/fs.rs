use super::DataSource;
use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::model::{Book, Channel};
use log::{debug, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileSource {
    books_path: PathBuf,
    channels_path: PathBuf,
}

/// The site publishes channels wrapped in an object; older snapshots are a
/// bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum ChannelsFile {
    Wrapped { channels: Vec<Channel> },
    Bare(Vec<Channel>),
}

impl FileSource {
    pub fn new(books_path: PathBuf, channels_path: PathBuf) -> Self {
        Self {
            books_path,
            channels_path,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.books_path(), config.channels_path())
    }

    pub fn books_path(&self) -> &Path {
        &self.books_path
    }

    pub fn channels_path(&self) -> &Path {
        &self.channels_path
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        if !path.exists() {
            return Err(CatalogError::dataset(path, "file not found"));
        }
        let content = fs::read_to_string(path).map_err(|e| CatalogError::dataset(path, e))?;
        serde_json::from_str(&content).map_err(|e| CatalogError::dataset(path, e))
    }
}

impl DataSource for FileSource {
    fn load_books(&self) -> Result<Vec<Book>> {
        let books: Vec<Book> = Self::read_json(&self.books_path)?;
        let inconsistent = books
            .iter()
            .filter(|b| b.count as usize != b.appearances.len())
            .count();
        if inconsistent > 0 {
            warn!(
                "{} books in {} have a count that differs from their appearance list",
                inconsistent,
                self.books_path.display()
            );
        }
        debug!(
            "loaded {} books from {}",
            books.len(),
            self.books_path.display()
        );
        Ok(books)
    }

    fn load_channels(&self) -> Result<Vec<Channel>> {
        let channels = match Self::read_json(&self.channels_path)? {
            ChannelsFile::Wrapped { channels } => channels,
            ChannelsFile::Bare(channels) => channels,
        };
        debug!(
            "loaded {} channels from {}",
            channels.len(),
            self.channels_path.display()
        );
        Ok(channels)
    }
}
