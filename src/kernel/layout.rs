//! Word layout: split a token around its optimal recognition point (ORP) and position the
//! three pieces so the focus character stays put from word to word.
//!
//! Positions are horizontal *centers* in the measure's unit. Characters are extended
//! grapheme clusters, so `pre + focus + post` always reassembles the token byte-for-byte.

use super::config::LayoutConfig;
use super::services::ports::TextMeasure;
use unicode_segmentation::UnicodeSegmentation;

/// Fraction of the word length at which the focus character sits.
pub const ORP_RATIO: f64 = 0.35;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment<'a> {
    pub text: &'a str,
    /// Horizontal center of the segment.
    pub anchor_x: f32,
    pub width: f32,
    /// Drawn in the focus color.
    pub is_focus: bool,
}

impl<'a> Segment<'a> {
    fn new(text: &'a str, anchor_x: f32, width: f32) -> Self {
        Self {
            text,
            anchor_x,
            width,
            is_focus: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Left edge of the segment.
    pub fn left_x(&self) -> f32 {
        self.anchor_x - self.width / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WordLayout<'a> {
    pub pre: Segment<'a>,
    pub focus: Segment<'a>,
    pub post: Segment<'a>,
}

impl<'a> WordLayout<'a> {
    pub fn segments(&self) -> [&Segment<'a>; 3] {
        [&self.pre, &self.focus, &self.post]
    }

    fn empty(center_x: f32) -> Self {
        let seg = Segment::new("", center_x, 0.0);
        Self {
            pre: seg,
            focus: seg,
            post: seg,
        }
    }
}

/// `clamp(floor(len * 0.35), 0, len - 1)`; `0` for an empty word.
pub fn orp_index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    ((len as f64 * ORP_RATIO).floor() as usize).min(len - 1)
}

/// Split `token` into `(pre, focus, post)` around its ORP.
pub fn split_word(token: &str) -> (&str, &str, &str) {
    let bounds: Vec<usize> = token.grapheme_indices(true).map(|(i, _)| i).collect();
    if bounds.is_empty() {
        return ("", "", "");
    }
    let orp = orp_index(bounds.len());
    let start = bounds[orp];
    let end = bounds.get(orp + 1).copied().unwrap_or(token.len());
    (&token[..start], &token[start..end], &token[end..])
}

pub fn layout_word<'a, M>(
    token: &'a str,
    config: LayoutConfig,
    measure: &M,
    center_x: f32,
) -> WordLayout<'a>
where
    M: TextMeasure + ?Sized,
{
    if token.is_empty() {
        return WordLayout::empty(center_x);
    }

    if !config.focus_highlight_enabled && !config.orp_alignment_enabled {
        let mut layout = WordLayout::empty(center_x);
        layout.focus = Segment::new(token, center_x, measure.measure(token));
        return layout;
    }

    let (pre, focus, post) = split_word(token);
    let pre_w = measure.measure(pre);
    let focus_w = measure.measure(focus);
    let post_w = measure.measure(post);

    let (pre_x, focus_x, post_x) = if config.orp_alignment_enabled {
        (
            center_x - focus_w / 2.0 - pre_w / 2.0,
            center_x,
            center_x + focus_w / 2.0 + post_w / 2.0,
        )
    } else {
        let left = center_x - (pre_w + focus_w + post_w) / 2.0;
        (
            left + pre_w / 2.0,
            left + pre_w + focus_w / 2.0,
            left + pre_w + focus_w + post_w / 2.0,
        )
    };

    let mut focus = Segment::new(focus, focus_x, focus_w);
    focus.is_focus = config.focus_highlight_enabled;

    WordLayout {
        pre: Segment::new(pre, pre_x, pre_w),
        focus,
        post: Segment::new(post, post_x, post_w),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/layout.rs"]
mod tests;
