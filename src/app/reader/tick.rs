use super::ReaderApp;
use crate::kernel::services::adapters::AppMessage;
use crate::kernel::Action;
use std::path::Path;
use std::sync::mpsc::{RecvTimeoutError, TryRecvError};
use std::time::Duration;

const MAX_MESSAGES_PER_TICK: usize = 1024;

impl ReaderApp {
    /// Drain queued background messages (called by the main loop after each wakeup).
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        for _ in 0..MAX_MESSAGES_PER_TICK {
            match self.rx.try_recv() {
                Ok(msg) => changed |= self.handle_message(msg),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("message channel disconnected");
                    break;
                }
            }
        }
        changed | self.sync_reader()
    }

    /// Block until a message arrives or `timeout` passes, then drain.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(msg) => {
                let changed = self.handle_message(msg);
                changed | self.tick()
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                self.sync_reader()
            }
        }
    }

    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::DocumentLoaded { path, tokens } => {
                if !self.is_pending_load(&path) {
                    tracing::debug!(path = %path.display(), "dropping superseded document load");
                    return false;
                }
                let word_count = tokens.len();
                self.engine.load(tokens);
                tracing::info!(path = %path.display(), word_count, "document ready");
                self.dispatch(Action::DocumentLoaded { path, word_count }) | self.sync_reader()
            }
            AppMessage::DocumentFailed { path, error } => {
                if !self.is_pending_load(&path) {
                    tracing::debug!(path = %path.display(), error = %error, "dropping superseded load failure");
                    return false;
                }
                tracing::warn!(path = %path.display(), error = %error, "document load failed");
                self.dispatch(Action::DocumentFailed { path, error })
            }
            AppMessage::Display(event) => self.dispatch(Action::Display(event)),
            AppMessage::Status(event) => self.dispatch(Action::Status(event)),
        }
    }

    fn is_pending_load(&self, path: &Path) -> bool {
        self.store.state().document.loading.as_deref() == Some(path)
    }
}
