//! 核心抽象
//!
//! - Command: 语义命令（与按键无关）
//! - Event: 终端输入事件（需要 `tui` feature）

pub mod command;
#[cfg(feature = "tui")]
pub mod event;

pub use command::Command;
#[cfg(feature = "tui")]
pub use event::{InputEvent, Key};
