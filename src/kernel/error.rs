use super::pacing::ReaderState;
use super::services::ports::ExtractionError;
use thiserror::Error;

/// Everything the reader can reject. None of these are fatal: the user recovers by
/// reloading, adjusting controls or restarting.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("document contains no readable words")]
    EmptyDocument,
    #[error("cannot {op} while {state}")]
    InvalidTransition {
        op: &'static str,
        state: ReaderState,
    },
    #[error("document exhausted")]
    DocumentExhausted,
}

impl ReaderError {
    /// Rejected state transitions are reported as warnings, not errors.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ReaderError::InvalidTransition { .. } | ReaderError::DocumentExhausted
        )
    }
}
