//! zread - terminal speed reader (RSVP)
//!
//! 模块结构：
//! - kernel: 核心（tokenizer, pacing engine, word layout, reducer）
//! - kernel::services: ports（契约）+ adapters（tokio / pdf / settings）
//! - ui: 与后端无关的绘制指令 + ratatui / headless 后端
//! - tui: 终端集成（terminal guard, signals, wakeup pipe）
//! - app: 阅读器应用层（输入、消息轮询、渲染、主题）

#[cfg(feature = "tui")]
pub mod app;
pub mod core;
pub mod kernel;
pub mod tui;
pub mod ui;
