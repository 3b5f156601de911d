//! Reader application layer: input → commands, message polling, effects, rendering.

pub mod reader;
pub mod theme;

pub use reader::ReaderApp;
pub use theme::ReaderTheme;
