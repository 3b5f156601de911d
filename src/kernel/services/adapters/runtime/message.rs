use crate::kernel::error::ReaderError;
use crate::kernel::services::ports::{DisplayEvent, PresentationSink, StatusEvent};
use crate::kernel::tokenizer::Token;
use crate::tui::wakeup::WakeupSender;
use std::path::PathBuf;
use std::sync::mpsc::{SendError, Sender};

#[derive(Debug)]
pub enum AppMessage {
    DocumentLoaded {
        path: PathBuf,
        tokens: Vec<Token>,
    },
    DocumentFailed {
        path: PathBuf,
        error: ReaderError,
    },
    Display(DisplayEvent),
    Status(StatusEvent),
}

/// Sending half of the UI message queue. Every send also pokes the wakeup pipe (if set) so
/// the main loop leaves `poll()` immediately.
#[derive(Clone)]
pub struct MessageSender {
    tx: Sender<AppMessage>,
    wakeup: Option<WakeupSender>,
}

impl MessageSender {
    pub fn new(tx: Sender<AppMessage>) -> Self {
        Self { tx, wakeup: None }
    }

    pub fn with_wakeup(mut self, wakeup: WakeupSender) -> Self {
        self.wakeup = Some(wakeup);
        self
    }

    pub fn set_wakeup(&mut self, wakeup: WakeupSender) {
        self.wakeup = Some(wakeup);
    }

    pub fn send(&self, msg: AppMessage) -> Result<(), SendError<AppMessage>> {
        self.tx.send(msg)?;
        if let Some(wakeup) = &self.wakeup {
            wakeup.wake();
        }
        Ok(())
    }
}

impl PresentationSink for MessageSender {
    fn display(&self, event: DisplayEvent) {
        // The receiver only goes away during shutdown.
        let _ = self.send(AppMessage::Display(event));
    }

    fn status(&self, event: StatusEvent) {
        let _ = self.send(AppMessage::Status(event));
    }
}
