//! String width measurement.

use super::{FontSpec, FontWeight, MeasureError};

/// Measures the rendered width of a string.
pub trait FontMetrics {
    /// Width in points of `text` drawn with `font`.
    fn text_width(&self, text: &str, font: &FontSpec) -> Result<f32, MeasureError>;
}

impl<M: FontMetrics + ?Sized> FontMetrics for &M {
    fn text_width(&self, text: &str, font: &FontSpec) -> Result<f32, MeasureError> {
        (**self).text_width(text, font)
    }
}

/// Fixed-advance approximation: every character is the same width within a
/// face, expressed as a fraction of the font size (em).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateMetrics {
    /// Advance of a monospace glyph, in em
    pub monospace_advance: f32,

    /// Average advance of a proportional glyph, in em
    pub proportional_advance: f32,

    /// Extra width applied to bold faces (0.05 = 5%)
    pub bold_widening: f32,
}

impl ApproximateMetrics {
    /// Create metrics with the default advances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Metrics where every character of every face is exactly `advance` em.
    pub fn uniform(advance: f32) -> Self {
        Self {
            monospace_advance: advance,
            proportional_advance: advance,
            bold_widening: 0.0,
        }
    }

    fn advance(&self, font: &FontSpec) -> f32 {
        let base = if font.family.is_monospace() {
            self.monospace_advance
        } else {
            self.proportional_advance
        };
        match font.weight {
            FontWeight::Bold => base * (1.0 + self.bold_widening),
            FontWeight::Normal => base,
        }
    }
}

impl Default for ApproximateMetrics {
    fn default() -> Self {
        Self {
            monospace_advance: 0.6,
            proportional_advance: 0.5,
            bold_widening: 0.05,
        }
    }
}

impl FontMetrics for ApproximateMetrics {
    fn text_width(&self, text: &str, font: &FontSpec) -> Result<f32, MeasureError> {
        let width = text.chars().count() as f32 * self.advance(font) * font.size;
        if !width.is_finite() || width < 0.0 {
            return Err(MeasureError::new(format!(
                "width of {:?} at {}pt is not a finite positive number",
                text, font.size
            )));
        }
        Ok(width)
    }
}
