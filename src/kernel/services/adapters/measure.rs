use crate::kernel::services::ports::TextMeasure;
use unicode_width::UnicodeWidthStr;

/// Terminal cell width (East Asian wide characters count as 2).
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasure;

impl TextMeasure for CellMeasure {
    fn measure(&self, text: &str) -> f32 {
        text.width() as f32
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/measure.rs"]
mod tests;
