use super::ReaderApp;
use crate::app::theme::ReaderTheme;
use crate::kernel::config::LayoutConfig;
use crate::kernel::layout::{layout_word, Segment};
use crate::kernel::services::adapters::CellMeasure;
use crate::kernel::state::{AppState, StatusLevel};
use crate::kernel::ReaderState;
use crate::ui::backend::Backend;
use crate::ui::core::geom::{Pos, Rect};
use crate::ui::core::painter::{BorderKind, Painter};
use crate::ui::core::style::{Mod, Style};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const HEADER_HEIGHT: u16 = 1;
/// Controls, progress bar, progress text, status, help.
const FOOTER_HEIGHT: u16 = 5;
const PROMPT_HEIGHT: u16 = 3;
const PROMPT_MAX_WIDTH: u16 = 72;

const IDLE_HINT: &str = "Press Ctrl+O to open a PDF or text file";
const HELP: &str = "Enter start  Space pause  x stop  ↑/↓ wpm  ←/→ start  f/a/t toggles  \
                    d/l theme  c/h colors  r reload  ^O open  q quit";

impl ReaderApp {
    pub fn render(&mut self, backend: &mut dyn Backend, area: Rect) {
        let theme = self.current_theme().clone();
        let mut painter = Painter::new();
        let cursor = paint(self.store.state(), &theme, area, &mut painter);
        backend.draw(area, painter.cmds());
        backend.set_cursor(cursor);
    }
}

/// Paint the whole reader into `painter`; returns the cursor position when the prompt is open.
pub fn paint(
    state: &AppState,
    theme: &ReaderTheme,
    area: Rect,
    painter: &mut Painter,
) -> Option<Pos> {
    if area.is_empty() {
        return None;
    }

    let base = Style::default().fg(theme.text).bg(theme.background);
    painter.fill_rect(area, base);

    if area.h < HEADER_HEIGHT + FOOTER_HEIGHT + 1 {
        let (reading, status) = area.split_bottom(1);
        paint_word(state, theme, reading, painter);
        paint_status(state, theme, status, painter);
    } else {
        let (body, footer) = area.split_bottom(FOOTER_HEIGHT);
        paint_header(state, theme, body.row(0), painter);
        let reading = Rect::new(body.x, body.y + HEADER_HEIGHT, body.w, body.h - HEADER_HEIGHT);
        paint_word(state, theme, reading, painter);

        paint_controls(state, theme, footer.row(0), painter);
        paint_progress_bar(state, theme, footer.row(1), painter);
        paint_progress(state, theme, footer.row(2), painter);
        paint_status(state, theme, footer.row(3), painter);
        painter.text_clipped(
            Pos::new(footer.x, footer.y + 4),
            HELP,
            muted(theme),
            footer.row(4),
        );
    }

    if state.prompt.active {
        return paint_prompt(state, theme, area, painter);
    }
    None
}

fn muted(theme: &ReaderTheme) -> Style {
    Style::default().fg(theme.muted).bg(theme.background)
}

fn paint_header(state: &AppState, theme: &ReaderTheme, row: Rect, painter: &mut Painter) {
    let title = Style::default()
        .fg(theme.focus)
        .bg(theme.background)
        .add_mod(Mod::BOLD);
    painter.text_clipped(Pos::new(row.x, row.y), "zread", title, row);

    let doc = &state.document;
    let detail = match (&doc.loading, &doc.path) {
        (Some(path), _) => format!("loading {}", file_label(path)),
        (None, Some(path)) => format!("{} · {} words", file_label(path), doc.word_count),
        (None, None) => return,
    };
    painter.text_clipped(Pos::new(row.x + 6, row.y), detail, muted(theme), row);
}

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn paint_word(state: &AppState, theme: &ReaderTheme, area: Rect, painter: &mut Painter) {
    if area.is_empty() {
        return;
    }
    let row = area.row(area.h / 2);
    let word = state.reading.word.as_str();

    if word.is_empty() {
        if !state.document.is_loaded() && state.document.loading.is_none() {
            paint_centered(painter, row, IDLE_HINT, muted(theme));
        }
        return;
    }

    let config = LayoutConfig {
        focus_highlight_enabled: state.controls.focus_highlight,
        orp_alignment_enabled: state.controls.orp_alignment,
    };
    let center_x = f32::from(row.x) + f32::from(row.w) / 2.0;
    let layout = layout_word(word, config, &CellMeasure, center_x);

    let text_style = Style::default()
        .fg(theme.text)
        .bg(theme.background)
        .add_mod(Mod::BOLD);
    let focus_style = text_style.fg(theme.focus);
    for segment in layout.segments() {
        let style = if segment.is_focus {
            focus_style
        } else {
            text_style
        };
        paint_segment(painter, row, segment, style);
    }
}

/// Left cell = `floor(anchor - width / 2)`. Glyphs left of the row are dropped one by one so
/// the rest keep their columns; the right edge is clipped by the rasterizer.
fn paint_segment(painter: &mut Painter, row: Rect, segment: &Segment<'_>, style: Style) {
    if segment.is_empty() {
        return;
    }
    let mut left = segment.left_x().floor() as i32;
    let mut text = segment.text;
    while left < i32::from(row.x) {
        let Some(g) = text.graphemes(true).next() else {
            return;
        };
        left += g.width() as i32;
        text = &text[g.len()..];
    }
    if text.is_empty() || left >= i32::from(row.right()) {
        return;
    }
    painter.text_clipped(Pos::new(left as u16, row.y), text, style, row);
}

fn paint_centered(painter: &mut Painter, row: Rect, text: &str, style: Style) {
    let width = text.width().min(usize::from(row.w)) as u16;
    let x = row.x + (row.w - width) / 2;
    painter.text_clipped(Pos::new(x, row.y), text, style, row);
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

fn paint_controls(state: &AppState, theme: &ReaderTheme, row: Rect, painter: &mut Painter) {
    let c = &state.controls;
    let text = format!(
        "WPM {}   Start {}%   Focus {}   ORP {}   Sentence pauses {}",
        c.wpm,
        c.start_percent,
        on_off(c.focus_highlight),
        on_off(c.orp_alignment),
        on_off(c.sentence_aware),
    );
    painter.text_clipped(Pos::new(row.x, row.y), text, muted(theme), row);
}

fn paint_progress_bar(state: &AppState, theme: &ReaderTheme, row: Rect, painter: &mut Painter) {
    if row.is_empty() {
        return;
    }
    let filled = (u32::from(row.w) * u32::from(state.reading.percent()) / 100) as u16;
    painter.hline(
        Pos::new(row.x, row.y),
        filled,
        '━',
        Style::default().fg(theme.focus).bg(theme.background),
    );
    painter.hline(
        Pos::new(row.x + filled, row.y),
        row.w - filled,
        '─',
        muted(theme),
    );
}

fn paint_progress(state: &AppState, theme: &ReaderTheme, row: Rect, painter: &mut Painter) {
    let reading = &state.reading;
    let position = match reading.progress() {
        Some((i, n)) => format!("word {i}/{n} ({}%)", reading.percent()),
        None if state.document.is_loaded() => format!("{} words", state.document.word_count),
        None => return,
    };
    let label = match reading.reader {
        ReaderState::Idle => "ready",
        ReaderState::Running => "reading",
        ReaderState::Paused => "paused",
        ReaderState::Finished => "finished",
    };
    let style = Style::default().fg(theme.text).bg(theme.background);
    painter.text_clipped(
        Pos::new(row.x, row.y),
        format!("{position} · {label}"),
        style,
        row,
    );
}

fn paint_status(state: &AppState, theme: &ReaderTheme, row: Rect, painter: &mut Painter) {
    let fg = match state.status.level {
        StatusLevel::Info => theme.text,
        StatusLevel::Warning => theme.warning,
        StatusLevel::Error => theme.error,
    };
    painter.text_clipped(
        Pos::new(row.x, row.y),
        state.status.text.as_str(),
        Style::default().fg(fg).bg(theme.background),
        row,
    );
}

fn paint_prompt(
    state: &AppState,
    theme: &ReaderTheme,
    area: Rect,
    painter: &mut Painter,
) -> Option<Pos> {
    let width = area.w.saturating_sub(4).min(PROMPT_MAX_WIDTH);
    let rect = area.centered(width, PROMPT_HEIGHT);
    if rect.w < 4 || rect.h < PROMPT_HEIGHT {
        return None;
    }

    let style = Style::default().fg(theme.text).bg(theme.background);
    let accent = style.fg(theme.focus);
    painter.fill_rect(rect, style);
    painter.border(rect, accent, BorderKind::Rounded);
    painter.text_clipped(Pos::new(rect.x + 2, rect.y), " Open file ", accent, rect);

    let inner = Rect::new(rect.x + 1, rect.y + 1, rect.w - 2, 1);
    // One cell is kept free for the cursor.
    let visible = tail_fitting(&state.prompt.input, usize::from(inner.w - 1));
    painter.text_clipped(Pos::new(inner.x, inner.y), visible, style, inner);
    Some(Pos::new(inner.x + visible.width() as u16, inner.y))
}

/// Longest suffix of `text` that fits in `max` cells.
fn tail_fitting(text: &str, max: usize) -> &str {
    let mut width = 0;
    let mut start = text.len();
    for (idx, g) in text.grapheme_indices(true).rev() {
        let w = g.width();
        if width + w > max {
            break;
        }
        width += w;
        start = idx;
    }
    &text[start..]
}

#[cfg(test)]
#[path = "../../../tests/unit/app/reader/render.rs"]
mod tests;
