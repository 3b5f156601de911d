use std::path::PathBuf;

use super::services::ports::ReaderSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadDocument(PathBuf),
    StartReading,
    PauseReading,
    ResumeReading,
    StopReading,
    /// Push the control values into the live configuration.
    ApplyControls(ReaderSettings),
    SaveSettings,
    Quit,
}
