//! Async runtime adapter: runs blocking extraction off the UI thread and sends messages back.

mod message;
mod runtime;

pub use message::{AppMessage, MessageSender};
pub use runtime::{AsyncRuntime, TokioClock};
