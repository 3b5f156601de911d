use crate::kernel::tokenizer::Token;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEvent {
    pub index: usize,
    pub total: usize,
    pub token: Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loaded,
    Reading,
    Paused,
    Exhausted,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    pub kind: StatusKind,
    pub detail: String,
}

impl StatusEvent {
    pub fn new(kind: StatusKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

/// Consumer of reader output. Implementations forward to whatever owns rendering; they
/// must not block.
pub trait PresentationSink: Send + Sync {
    fn display(&self, event: DisplayEvent);

    fn status(&self, event: StatusEvent);
}
