//! 本地文档提取
//!
//! PDF 走 `pdf-extract`，纯文本直接读取；其它扩展名拒绝。

use crate::kernel::services::ports::{DocumentExtractor, ExtractionError};
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Case-insensitive on the extension. A file without an extension is read as text.
    pub fn from_path(path: &Path) -> Option<Self> {
        let Some(ext) = path.extension() else {
            return Some(Self::PlainText);
        };
        match ext.to_string_lossy().to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" | "text" | "md" | "markdown" => Some(Self::PlainText),
            _ => None,
        }
    }
}

pub struct FileExtractor;

impl FileExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for FileExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let kind = DocumentKind::from_path(path).ok_or_else(|| ExtractionError::Unsupported {
            path: path.to_path_buf(),
        })?;

        let bytes = fs::read(path).map_err(|source| ExtractionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let text = match kind {
            DocumentKind::Pdf => extract_pdf(path, &bytes)?,
            DocumentKind::PlainText => String::from_utf8_lossy(&bytes).into_owned(),
        };

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!(
            path = %path.display(),
            kind = ?kind,
            bytes = bytes.len(),
            chars = text.len(),
            "document extracted"
        );
        Ok(text)
    }
}

fn extract_pdf(path: &Path, bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed inputs.
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));
    match result {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::Pdf {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
        Err(_) => Err(ExtractionError::Pdf {
            path: path.to_path_buf(),
            message: "parser panicked on malformed input".to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/document.rs"]
mod tests;
