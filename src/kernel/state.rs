use std::path::PathBuf;

use super::pacing::ReaderState;
use super::services::ports::{ReaderSettings, ThemeSettings};
use super::tokenizer::Token;

pub const READY_PLACEHOLDER: &str = "Ready";

pub const WPM_STEP: u32 = 25;
pub const MIN_CONTROL_WPM: u32 = 50;
pub const MAX_CONTROL_WPM: u32 = 1200;
pub const START_STEP: u8 = 5;

pub const DARK_BACKGROUND: &str = "#111111";
pub const LIGHT_BACKGROUND: &str = "#FFFFFF";
pub const WHITE: &str = "#FFFFFF";
pub const BLACK: &str = "#000000";

/// Colors offered by the cycle commands, in order.
pub const COLOR_PALETTE: [&str; 8] = [
    "#FFFFFF", "#000000", "#FF4444", "#FFD166", "#06D6A0", "#4CC9F0", "#B388FF", "#FF9F1C",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    #[default]
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Info,
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Warning,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Error,
        }
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::info("No document loaded.")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentState {
    /// Currently loaded document.
    pub path: Option<PathBuf>,
    pub word_count: usize,
    /// Load in flight.
    pub loading: Option<PathBuf>,
}

impl DocumentState {
    pub fn is_loaded(&self) -> bool {
        self.path.is_some() && self.word_count > 0
    }
}

/// What the word area shows, mirrored from the pacing engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingState {
    pub word: Token,
    /// Index of `word`; `None` for the placeholder.
    pub shown_index: Option<usize>,
    /// Engine position (next word to show).
    pub next_index: usize,
    pub total: usize,
    pub reader: ReaderState,
}

impl ReadingState {
    /// `(i, N)` with `i` 1-based, for the progress display.
    pub fn progress(&self) -> Option<(usize, usize)> {
        let index = self.shown_index?;
        (self.total > 0).then(|| ((index + 1).min(self.total), self.total))
    }

    pub fn percent(&self) -> u8 {
        match self.progress() {
            Some((i, n)) => ((i * 100) / n).min(100) as u8,
            None => 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptState {
    pub active: bool,
    pub input: String,
}

impl PromptState {
    pub fn open(&mut self, initial: &str) {
        self.active = true;
        self.input.clear();
        self.input.push_str(initial);
    }

    pub fn close(&mut self) {
        self.active = false;
        self.input.clear();
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub document: DocumentState,
    pub reading: ReadingState,
    pub controls: ReaderSettings,
    pub theme: ThemeSettings,
    pub status: StatusLine,
    pub prompt: PromptState,
    /// Controls or theme changed since the settings were last written.
    pub settings_dirty: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(controls: ReaderSettings, theme: ThemeSettings) -> Self {
        Self {
            document: DocumentState::default(),
            reading: ReadingState::default(),
            controls,
            theme,
            status: StatusLine::default(),
            prompt: PromptState::default(),
            settings_dirty: false,
            should_quit: false,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ReaderSettings::default(), ThemeSettings::default())
    }
}

/// Next palette entry after `current` (case-insensitive); the first entry when `current` is
/// not in the palette.
pub fn next_palette_color(current: Option<&str>) -> &'static str {
    let pos = current.and_then(|c| {
        COLOR_PALETTE
            .iter()
            .position(|p| p.eq_ignore_ascii_case(c.trim()))
    });
    match pos {
        Some(i) => COLOR_PALETTE[(i + 1) % COLOR_PALETTE.len()],
        None => COLOR_PALETTE[0],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
