//! Line wrapping contract and the default greedy implementation.

use super::{FontMetrics, FontSpec, MeasureError};

/// Breaks text into lines no wider than `max_width`.
///
/// Implementations break only at whitespace. A single word wider than
/// `max_width` is placed on its own line and allowed to overflow.
pub trait TextWrapper {
    fn wrap(&self, text: &str, max_width: f32, font: &FontSpec)
        -> Result<Vec<String>, MeasureError>;
}

impl<F> TextWrapper for F
where
    F: Fn(&str, f32, &FontSpec) -> Result<Vec<String>, MeasureError>,
{
    fn wrap(
        &self,
        text: &str,
        max_width: f32,
        font: &FontSpec,
    ) -> Result<Vec<String>, MeasureError> {
        self(text, max_width, font)
    }
}

/// First-fit wrapper over a [`FontMetrics`] backend.
///
/// Words are appended to the current line while the line still fits. With
/// a fixed inter-word space this yields the minimum number of lines.
#[derive(Debug, Clone, Default)]
pub struct GreedyWrapper<M> {
    metrics: M,
}

impl<M: FontMetrics> GreedyWrapper<M> {
    /// Create a wrapper measuring with `metrics`.
    pub fn new(metrics: M) -> Self {
        Self { metrics }
    }
}

impl<M: FontMetrics> TextWrapper for GreedyWrapper<M> {
    fn wrap(
        &self,
        text: &str,
        max_width: f32,
        font: &FontSpec,
    ) -> Result<Vec<String>, MeasureError> {
        if !max_width.is_finite() || max_width <= 0.0 {
            return Err(MeasureError::new(format!(
                "wrap width must be positive, got {}",
                max_width
            )));
        }

        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }

            let candidate_len = current.len() + 1 + word.len();
            let mut candidate = String::with_capacity(candidate_len);
            candidate.push_str(&current);
            candidate.push(' ');
            candidate.push_str(word);

            if self.metrics.text_width(&candidate, font)? <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }

        Ok(lines)
    }
}
