/// Width of a string in the renderer's horizontal unit (pixels, terminal cells, ...).
///
/// Must be pure: the same text always measures the same, otherwise the focus column drifts
/// between frames.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f32,
{
    fn measure(&self, text: &str) -> f32 {
        self(text)
    }
}
