//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Document {id} is not available at {}", path.display())]
    DocumentUnavailable { id: String, path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
