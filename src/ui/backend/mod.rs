//! Rendering backends.
//!
//! Views paint into a `Painter`; a backend rasterizes the commands onto its own cell grid, so
//! nothing above this module mentions `ratatui`.

use crate::ui::core::geom::{Pos, Rect};
use crate::ui::core::painter::PaintCmd;

pub trait Backend {
    fn draw(&mut self, area: Rect, cmds: &[PaintCmd]);

    fn set_cursor(&mut self, pos: Option<Pos>);
}

#[cfg(feature = "tui")]
#[path = "ratatui.rs"]
pub mod terminal;
