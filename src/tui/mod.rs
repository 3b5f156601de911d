//! Terminal integration: raw-mode guard, termination signals and the poll wakeup pipe.
//!
//! Kept apart from `kernel` so the reader core builds without any terminal crates.

#[cfg(feature = "tui")]
pub mod terminal_guard;
pub mod wakeup;
