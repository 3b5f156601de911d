//! 阅读器：持有 Store、PacingEngine 和后台运行时，负责把 Action 的副作用落地
//!
//! 数据流：
//! - 输入 / 后台消息 → `Action` → `Store::dispatch`
//! - `Effect` 在这里执行（引擎、加载、保存设置）
//! - 每次执行完都用引擎的真实状态同步 `ReaderSync`

use super::theme::ReaderTheme;
use crate::core::Command;
use crate::kernel::config::{MAX_START_PERCENT, MIN_WPM};
use crate::kernel::services::adapters::{
    save_settings_to, AppMessage, AsyncRuntime, FileExtractor, KeybindingService, MessageSender,
    TokioClock,
};
use crate::kernel::services::ports::{DocumentExtractor, KeybindingRule, Settings, ThemeSettings};
use crate::kernel::{Action, AppState, Effect, LiveConfig, PacingEngine, ReaderError, Store};
use crate::tui::wakeup::WakeupSender;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

mod input;
mod render;
mod tick;

pub use render::paint;

pub struct ReaderApp {
    store: Store,
    engine: PacingEngine,
    runtime: AsyncRuntime,
    rx: Receiver<AppMessage>,
    live: Arc<LiveConfig>,
    keybindings: KeybindingService,
    /// Written back unchanged when settings are saved.
    keybinding_rules: Vec<KeybindingRule>,
    extractor: Arc<dyn DocumentExtractor>,
    settings_path: Option<PathBuf>,
    theme: ReaderTheme,
    theme_source: ThemeSettings,
    adapt_colors: bool,
}

impl ReaderApp {
    pub fn new(
        settings: Settings,
        settings_path: Option<PathBuf>,
        wakeup: Option<WakeupSender>,
    ) -> io::Result<Self> {
        Self::with_extractor(
            settings,
            settings_path,
            wakeup,
            Arc::new(FileExtractor::new()),
        )
    }

    pub fn with_extractor(
        settings: Settings,
        settings_path: Option<PathBuf>,
        wakeup: Option<WakeupSender>,
        extractor: Arc<dyn DocumentExtractor>,
    ) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let mut sender = MessageSender::new(tx);
        if let Some(wakeup) = wakeup {
            sender.set_wakeup(wakeup);
        }

        let runtime = AsyncRuntime::new(sender.clone())?;
        let mut controls = settings.reader.clone();
        controls.wpm = controls.wpm.max(MIN_WPM);
        controls.start_percent = controls.start_percent.min(MAX_START_PERCENT);

        let live = Arc::new(LiveConfig::from_settings(&controls));
        let engine = PacingEngine::new(
            Arc::clone(&live),
            Arc::new(sender),
            Arc::new(runtime.tokio_handle()),
            Arc::new(TokioClock),
        );

        let mut keybindings = KeybindingService::with_defaults();
        let applied = keybindings.apply_rules(&settings.keybindings);
        if applied > 0 {
            tracing::info!(applied, "custom keybindings applied");
        }

        let theme = ReaderTheme::from_settings(&settings.theme);
        let store = Store::new(AppState::new(controls, settings.theme.clone()));

        Ok(Self {
            store,
            engine,
            runtime,
            rx,
            live,
            keybindings,
            keybinding_rules: settings.keybindings,
            extractor,
            settings_path,
            theme,
            theme_source: settings.theme,
            adapt_colors: false,
        })
    }

    /// Map theme colors to what the terminal can show. Off by default so headless rendering
    /// is independent of `$TERM`.
    pub fn adapt_colors_to_terminal(&mut self) {
        self.adapt_colors = true;
        self.theme.adapt_to_terminal_capabilities();
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn engine(&self) -> &PacingEngine {
        &self.engine
    }

    pub fn should_quit(&self) -> bool {
        self.store.state().should_quit
    }

    /// Start loading `path` in the background.
    pub fn open(&mut self, path: PathBuf) -> bool {
        self.dispatch(Action::OpenPath(path))
    }

    /// Stop reading, persist dirty settings and mark the app for exit.
    pub fn quit(&mut self) {
        self.dispatch(Action::RunCommand(Command::Quit));
    }

    pub(super) fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        let mut changed = result.state_changed;
        for effect in result.effects {
            changed |= self.run_effect(effect);
        }
        changed
    }

    fn run_effect(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::LoadDocument(path) => {
                tracing::info!(path = %path.display(), "loading document");
                self.runtime
                    .load_document(path, Arc::clone(&self.extractor));
                false
            }
            Effect::StartReading => {
                let result = self.engine.start().map(|_| ());
                self.engine_outcome(result)
            }
            Effect::PauseReading => {
                let result = self.engine.pause();
                self.engine_outcome(result)
            }
            Effect::ResumeReading => {
                let result = self.engine.resume();
                self.engine_outcome(result)
            }
            Effect::StopReading => {
                self.engine.stop();
                self.sync_reader()
            }
            Effect::ApplyControls(controls) => {
                self.live.apply_settings(&controls);
                false
            }
            Effect::SaveSettings => self.save_settings(),
            Effect::Quit => {
                tracing::info!("quit requested");
                false
            }
        }
    }

    fn engine_outcome(&mut self, result: Result<(), ReaderError>) -> bool {
        let mut changed = false;
        if let Err(error) = result {
            tracing::debug!(error = %error, "reader rejected command");
            changed |= self.dispatch(Action::ReaderRejected(error));
        }
        changed | self.sync_reader()
    }

    /// Mirror the engine's state and position into the store.
    pub(super) fn sync_reader(&mut self) -> bool {
        let action = Action::ReaderSync {
            state: self.engine.state(),
            next_index: self.engine.index(),
        };
        self.store.dispatch(action).state_changed
    }

    fn save_settings(&mut self) -> bool {
        let Some(path) = self.settings_path.clone() else {
            tracing::debug!("no settings path; skipping save");
            return false;
        };
        let state = self.store.state();
        let settings = Settings {
            reader: state.controls.clone(),
            theme: state.theme.clone(),
            keybindings: self.keybinding_rules.clone(),
        };
        match save_settings_to(&path, &settings) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "settings saved");
                self.dispatch(Action::SettingsSaved)
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to save settings");
                false
            }
        }
    }

    fn current_theme(&mut self) -> &ReaderTheme {
        let source = &self.store.state().theme;
        if *source != self.theme_source {
            self.theme_source = source.clone();
            self.theme = ReaderTheme::from_settings(source);
            if self.adapt_colors {
                self.theme.adapt_to_terminal_capabilities();
            }
        }
        &self.theme
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/reader/mod.rs"]
mod tests;
