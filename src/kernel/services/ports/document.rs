use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse PDF {}: {message}", .path.display())]
    Pdf { path: PathBuf, message: String },
    #[error("unsupported document type: {}", .path.display())]
    Unsupported { path: PathBuf },
    #[error("no extractable text found in {}", .path.display())]
    NoText { path: PathBuf },
}

impl ExtractionError {
    pub fn path(&self) -> &Path {
        match self {
            ExtractionError::Io { path, .. }
            | ExtractionError::Pdf { path, .. }
            | ExtractionError::Unsupported { path }
            | ExtractionError::NoText { path } => path,
        }
    }
}

/// Turns a document on disk into raw text. Blocking; callers run it off the UI thread.
pub trait DocumentExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}
