use super::DataSource;
use crate::error::{CatalogError, Result};
use crate::model::{Book, Channel};

/// In-memory dataset for testing.
///
/// `unavailable()` builds a source whose loads always fail, to exercise the
/// degraded paths.
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    books: Vec<Book>,
    channels: Vec<Channel>,
    unavailable: bool,
}

impl InMemorySource {
    pub fn new(books: Vec<Book>, channels: Vec<Channel>) -> Self {
        Self {
            books,
            channels,
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            return Err(CatalogError::dataset("memory", "source marked unavailable"));
        }
        Ok(())
    }
}

impl DataSource for InMemorySource {
    fn load_books(&self) -> Result<Vec<Book>> {
        self.check()?;
        Ok(self.books.clone())
    }

    fn load_channels(&self) -> Result<Vec<Channel>> {
        self.check()?;
        Ok(self.channels.clone())
    }
}
