use std::path::PathBuf;

use crate::core::Command;

use super::error::ReaderError;
use super::pacing::ReaderState;
use super::services::ports::{DisplayEvent, StatusEvent};

#[derive(Debug)]
pub enum Action {
    RunCommand(Command),
    /// Load a document (CLI argument or prompt).
    OpenPath(PathBuf),
    /// The engine now holds the new document.
    DocumentLoaded {
        path: PathBuf,
        word_count: usize,
    },
    DocumentFailed {
        path: PathBuf,
        error: ReaderError,
    },
    Display(DisplayEvent),
    Status(StatusEvent),
    /// Engine state after effects ran or messages were drained.
    ReaderSync {
        state: ReaderState,
        next_index: usize,
    },
    /// The engine refused a requested transition.
    ReaderRejected(ReaderError),
    PromptInsert(char),
    PromptPaste(String),
    SettingsSaved,
}
