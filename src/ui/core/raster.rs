//! Shared rasterizer: turns `PaintCmd`s into cell writes on any grid.

use super::geom::{Pos, Rect};
use super::painter::{BorderKind, PaintCmd};
use super::style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A grid of terminal cells. `set_cell` outside `area()` must be a no-op.
pub trait CellTarget {
    fn area(&self) -> Rect;

    fn set_cell(&mut self, x: u16, y: u16, symbol: &str, style: Style);
}

pub fn rasterize<T: CellTarget + ?Sized>(target: &mut T, cmds: &[PaintCmd]) {
    for cmd in cmds {
        match cmd {
            PaintCmd::FillRect { rect, style } => fill_rect(target, *rect, *style),
            PaintCmd::HLine { pos, len, ch, style } => {
                draw_hline(target, *pos, *len, *ch, *style)
            }
            PaintCmd::Text {
                pos,
                text,
                style,
                clip,
            } => draw_text(target, *pos, text, *style, *clip),
            PaintCmd::Border { rect, style, kind } => draw_border(target, *rect, *style, *kind),
        }
    }
}

fn fill_rect<T: CellTarget + ?Sized>(target: &mut T, rect: Rect, style: Style) {
    let clip = rect.intersect(target.area());
    for y in clip.y..clip.bottom() {
        for x in clip.x..clip.right() {
            target.set_cell(x, y, " ", style);
        }
    }
}

fn draw_hline<T: CellTarget + ?Sized>(target: &mut T, pos: Pos, len: u16, ch: char, style: Style) {
    let clip = Rect::new(pos.x, pos.y, len, 1).intersect(target.area());
    let mut buf = [0u8; 4];
    let symbol = ch.encode_utf8(&mut buf);
    for x in clip.x..clip.right() {
        target.set_cell(x, clip.y, symbol, style);
    }
}

/// Grapheme-aware text. Zero-width clusters are dropped, wide glyphs that would straddle the
/// clip edge are not drawn, and the trailing cells of a wide glyph are blanked.
fn draw_text<T: CellTarget + ?Sized>(
    target: &mut T,
    pos: Pos,
    text: &str,
    style: Style,
    clip: Option<Rect>,
) {
    let area = target.area();
    let clip = clip.unwrap_or(area).intersect(area);
    if clip.is_empty() || pos.y < clip.y || pos.y >= clip.bottom() {
        return;
    }
    let y = pos.y;
    let mut x = pos.x;
    for g in text.graphemes(true) {
        let w = UnicodeWidthStr::width(g) as u16;
        if w == 0 {
            continue;
        }
        if x >= clip.right() || x.saturating_add(w) > clip.right() {
            break;
        }
        if x >= clip.x {
            target.set_cell(x, y, g, style);
            for dx in 1..w {
                target.set_cell(x + dx, y, " ", style);
            }
        }
        x = x.saturating_add(w);
    }
}

fn draw_border<T: CellTarget + ?Sized>(target: &mut T, rect: Rect, style: Style, kind: BorderKind) {
    let rect = rect.intersect(target.area());
    if rect.w < 2 || rect.h < 2 {
        return;
    }

    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;
    let (tl, tr, bl, br, h, v) = match kind {
        BorderKind::Plain => ("┌", "┐", "└", "┘", "─", "│"),
        BorderKind::Rounded => ("╭", "╮", "╰", "╯", "─", "│"),
    };

    target.set_cell(rect.x, rect.y, tl, style);
    target.set_cell(right, rect.y, tr, style);
    target.set_cell(rect.x, bottom, bl, style);
    target.set_cell(right, bottom, br, style);
    for x in rect.x + 1..right {
        target.set_cell(x, rect.y, h, style);
        target.set_cell(x, bottom, h, style);
    }
    for y in rect.y + 1..bottom {
        target.set_cell(rect.x, y, v, style);
        target.set_cell(right, y, v, style);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/raster.rs"]
mod tests;
