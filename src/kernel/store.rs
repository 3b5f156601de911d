use std::path::{Path, PathBuf};

use crate::core::Command;

use super::error::ReaderError;
use super::pacing::ReaderState;
use super::services::ports::{ExtractionError, ReaderSettings, StatusKind};
use super::state::{
    next_palette_color, StatusLine, BLACK, DARK_BACKGROUND, LIGHT_BACKGROUND, MAX_CONTROL_WPM,
    MIN_CONTROL_WPM, READY_PLACEHOLDER, START_STEP, WHITE, WPM_STEP,
};
use super::{Action, AppState, Effect};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    fn changed() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: true,
        }
    }

    fn with_effects(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            state_changed: true,
        }
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::RunCommand(cmd) => self.dispatch_command(cmd),
            Action::OpenPath(path) => self.open_path(path),
            Action::DocumentLoaded { path, word_count } => {
                let status = format!("Loaded {word_count} words. Set options and press Start.");
                let doc = &mut self.state.document;
                doc.path = Some(path);
                doc.word_count = word_count;
                doc.loading = None;

                let reading = &mut self.state.reading;
                reading.word = READY_PLACEHOLDER.into();
                reading.shown_index = None;
                reading.next_index = 0;
                reading.total = word_count;
                reading.reader = ReaderState::Idle;

                self.state.status = StatusLine::info(status);
                DispatchResult::changed()
            }
            Action::DocumentFailed { path, error } => {
                if self.state.document.loading.as_deref() == Some(path.as_path()) {
                    self.state.document.loading = None;
                }
                self.state.status = StatusLine::error(load_failure_message(&path, &error));
                DispatchResult::changed()
            }
            Action::Display(event) => {
                // Queued before a stop/load; the engine has moved on.
                if self.state.reading.reader == ReaderState::Idle {
                    return DispatchResult::unchanged();
                }
                let reading = &mut self.state.reading;
                reading.word = event.token;
                reading.shown_index = Some(event.index);
                reading.total = event.total;
                DispatchResult::changed()
            }
            Action::Status(event) => {
                self.state.status = match event.kind {
                    StatusKind::Error => StatusLine::error(event.detail),
                    _ => StatusLine::info(event.detail),
                };
                DispatchResult::changed()
            }
            Action::ReaderSync { state, next_index } => {
                let reading = &mut self.state.reading;
                let changed = reading.reader != state || reading.next_index != next_index;
                reading.reader = state;
                reading.next_index = next_index;
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: changed,
                }
            }
            Action::ReaderRejected(error) => {
                self.state.status = rejection_status(&error);
                DispatchResult::changed()
            }
            Action::PromptInsert(ch) => {
                if !self.state.prompt.active || ch.is_control() {
                    return DispatchResult::unchanged();
                }
                self.state.prompt.input.push(ch);
                DispatchResult::changed()
            }
            Action::PromptPaste(text) => {
                if !self.state.prompt.active {
                    return DispatchResult::unchanged();
                }
                let before = self.state.prompt.input.len();
                self.state
                    .prompt
                    .input
                    .extend(text.chars().filter(|c| !c.is_control()));
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: self.state.prompt.input.len() != before,
                }
            }
            Action::SettingsSaved => {
                self.state.settings_dirty = false;
                DispatchResult::unchanged()
            }
        }
    }

    fn dispatch_command(&mut self, cmd: Command) -> DispatchResult {
        match cmd {
            Command::Start => {
                if !self.state.document.is_loaded() {
                    return self.warn("Please load a document first.");
                }
                DispatchResult::with_effects(vec![Effect::StartReading])
            }
            Command::PauseResume => {
                if !self.state.document.is_loaded() {
                    return self.warn("Please load a document first.");
                }
                let reading = &self.state.reading;
                match reading.reader {
                    ReaderState::Running => DispatchResult::with_effects(vec![Effect::PauseReading]),
                    ReaderState::Paused if reading.next_index < reading.total => {
                        DispatchResult::with_effects(vec![Effect::ResumeReading])
                    }
                    ReaderState::Paused | ReaderState::Finished => {
                        self.warn("At end of document. Press Start to restart.")
                    }
                    ReaderState::Idle => self.warn("Press Start to begin reading."),
                }
            }
            Command::Stop => match self.state.reading.reader {
                ReaderState::Running | ReaderState::Paused => {
                    self.state.status = StatusLine::info("Stopped.");
                    DispatchResult::with_effects(vec![Effect::StopReading])
                }
                _ => DispatchResult::unchanged(),
            },
            Command::Reload => match self.state.document.path.clone() {
                Some(path) => self.open_path(path),
                None => self.warn("Please load a document first."),
            },
            Command::OpenPrompt => {
                let initial = self
                    .state
                    .document
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                self.state.prompt.open(&initial);
                DispatchResult::changed()
            }
            Command::PromptConfirm => {
                if !self.state.prompt.active {
                    return DispatchResult::unchanged();
                }
                let input = self.state.prompt.input.trim().to_string();
                self.state.prompt.close();
                if input.is_empty() {
                    return DispatchResult::changed();
                }
                self.open_path(expand_home(&input))
            }
            Command::PromptCancel => {
                if !self.state.prompt.active {
                    return DispatchResult::unchanged();
                }
                self.state.prompt.close();
                DispatchResult::changed()
            }
            Command::PromptBackspace => {
                let changed = self.state.prompt.active && self.state.prompt.input.pop().is_some();
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: changed,
                }
            }
            Command::WpmUp => self.adjust_controls(|c| {
                c.wpm = c
                    .wpm
                    .saturating_add(WPM_STEP)
                    .clamp(MIN_CONTROL_WPM, MAX_CONTROL_WPM);
            }),
            Command::WpmDown => self.adjust_controls(|c| {
                c.wpm = c
                    .wpm
                    .saturating_sub(WPM_STEP)
                    .clamp(MIN_CONTROL_WPM, MAX_CONTROL_WPM);
            }),
            Command::StartPositionUp => self.adjust_controls(|c| {
                c.start_percent = c.start_percent.saturating_add(START_STEP).min(100);
            }),
            Command::StartPositionDown => self.adjust_controls(|c| {
                c.start_percent = c.start_percent.saturating_sub(START_STEP);
            }),
            Command::ToggleFocusHighlight => {
                self.adjust_controls(|c| c.focus_highlight = !c.focus_highlight)
            }
            Command::ToggleOrpAlignment => {
                self.adjust_controls(|c| c.orp_alignment = !c.orp_alignment)
            }
            Command::ToggleSentenceAware => {
                self.adjust_controls(|c| c.sentence_aware = !c.sentence_aware)
            }
            Command::DarkMode => {
                let theme = &mut self.state.theme;
                theme.dark_mode = true;
                theme.background = Some(DARK_BACKGROUND.to_string());
                if is_color(theme.text.as_deref(), BLACK) {
                    theme.text = Some(WHITE.to_string());
                }
                self.state.settings_dirty = true;
                DispatchResult::changed()
            }
            Command::LightMode => {
                let theme = &mut self.state.theme;
                theme.dark_mode = false;
                theme.background = Some(LIGHT_BACKGROUND.to_string());
                if is_color(theme.text.as_deref(), WHITE) {
                    theme.text = Some(BLACK.to_string());
                }
                self.state.settings_dirty = true;
                DispatchResult::changed()
            }
            Command::CycleTextColor => {
                let theme = &mut self.state.theme;
                theme.text = Some(next_palette_color(theme.text.as_deref()).to_string());
                self.state.settings_dirty = true;
                DispatchResult::changed()
            }
            Command::CycleFocusColor => {
                let theme = &mut self.state.theme;
                theme.focus = Some(next_palette_color(theme.focus.as_deref()).to_string());
                self.state.settings_dirty = true;
                DispatchResult::changed()
            }
            Command::Quit => {
                self.state.should_quit = true;
                let mut effects = vec![Effect::StopReading];
                if self.state.settings_dirty {
                    effects.push(Effect::SaveSettings);
                }
                effects.push(Effect::Quit);
                DispatchResult::with_effects(effects)
            }
            Command::Custom(name) => {
                tracing::debug!(command = %name, "no handler for command");
                DispatchResult::unchanged()
            }
        }
    }

    fn open_path(&mut self, path: PathBuf) -> DispatchResult {
        self.state.status = StatusLine::info(format!("Loading {}...", path.display()));
        self.state.document.loading = Some(path.clone());

        let mut effects = Vec::with_capacity(2);
        if matches!(
            self.state.reading.reader,
            ReaderState::Running | ReaderState::Paused
        ) {
            effects.push(Effect::StopReading);
        }
        effects.push(Effect::LoadDocument(path));
        DispatchResult::with_effects(effects)
    }

    fn adjust_controls(&mut self, f: impl FnOnce(&mut ReaderSettings)) -> DispatchResult {
        let before = self.state.controls.clone();
        f(&mut self.state.controls);
        if self.state.controls == before {
            return DispatchResult::unchanged();
        }
        self.state.settings_dirty = true;
        DispatchResult::with_effects(vec![Effect::ApplyControls(self.state.controls.clone())])
    }

    fn warn(&mut self, text: &str) -> DispatchResult {
        self.state.status = StatusLine::warning(text);
        DispatchResult::changed()
    }
}

fn is_color(current: Option<&str>, expected: &str) -> bool {
    current.is_some_and(|c| c.trim().eq_ignore_ascii_case(expected))
}

fn load_failure_message(path: &Path, error: &ReaderError) -> String {
    match error {
        ReaderError::EmptyDocument | ReaderError::Extraction(ExtractionError::NoText { .. }) => {
            format!("No extractable text found in {}.", path.display())
        }
        other => format!("Failed to load {}: {other}", path.display()),
    }
}

fn rejection_status(error: &ReaderError) -> StatusLine {
    match error {
        ReaderError::DocumentExhausted => {
            StatusLine::warning("At end of document. Press Start to restart.")
        }
        ReaderError::EmptyDocument => StatusLine::warning("Please load a document first."),
        ReaderError::InvalidTransition { op, state } => {
            StatusLine::warning(format!("Cannot {op} while {state}."))
        }
        ReaderError::Extraction(e) => StatusLine::error(e.to_string()),
    }
}

/// `~` and `~/...` resolve against `$HOME`.
fn expand_home(input: &str) -> PathBuf {
    let rest = match input.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(input),
    };
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(rest),
        None => PathBuf::from(input),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
