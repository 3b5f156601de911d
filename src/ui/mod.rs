//! UI layer.
//!
//! Rendering code builds a list of backend-neutral `PaintCmd`s; backends rasterize them into
//! cells. All `ratatui` types stay behind `backend::terminal`.

pub mod backend;
pub mod core;
