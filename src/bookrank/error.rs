use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Dataset unavailable at {path}: {reason}")]
    Dataset { path: PathBuf, reason: String },

    #[error("Invalid product code: {0}")]
    InvalidCode(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl CatalogError {
    pub fn dataset(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        CatalogError::Dataset {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
