//! # Dataset Access
//!
//! The catalogue is a read-only snapshot: a books file and a channels file,
//! produced elsewhere and loaded whole. The [`DataSource`] trait hides where
//! the snapshot comes from.
//!
//! ## Implementations
//!
//! - [`fs::FileSource`]: reads the JSON files from the configured data directory
//! - [`memory::InMemorySource`]: fixed collections for tests
//!
//! ## Dataset Format
//!
//! ```text
//! data/
//! ├── books.json      # [ { "id", "title", "author", ..., "videos": [ ... ] } ]
//! └── channels.json   # { "channels": [ { "name", "channel_id", ... } ] } or a bare array
//! ```
//!
//! Sources do no caching and no retries: every call loads the snapshot again,
//! and a failure is returned as is for the caller to degrade on.

use crate::error::Result;
use crate::model::{Book, Channel};

pub mod fs;
pub mod memory;

pub trait DataSource {
    /// All books, in dataset order
    fn load_books(&self) -> Result<Vec<Book>>;

    /// All channels, in dataset order
    fn load_channels(&self) -> Result<Vec<Channel>>;
}
