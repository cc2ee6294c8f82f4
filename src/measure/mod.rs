//! Text measurement and line wrapping.
//!
//! The layout engine never measures glyphs itself. It asks a
//! [`TextWrapper`] to break text into lines that fit a width, and the
//! default [`GreedyWrapper`] in turn asks a [`FontMetrics`] backend for
//! string widths. Hosts with real font data plug in their own metrics;
//! tests and headless callers use [`ApproximateMetrics`].
//!
//! # Example
//!
//! ```
//! use mdpage::measure::{ApproximateMetrics, FontSpec, GreedyWrapper, TextWrapper};
//!
//! let wrapper = GreedyWrapper::new(ApproximateMetrics::default());
//! let font = FontSpec::helvetica(12.0);
//! let lines = wrapper.wrap("the quick brown fox", 60.0, &font).unwrap();
//! assert_eq!(lines, vec!["the quick", "brown fox"]);
//! ```

mod font;
mod metrics;
mod wrap;

pub use font::{FontFamily, FontSpec, FontStyle, FontWeight};
pub use metrics::{ApproximateMetrics, FontMetrics};
pub use wrap::{GreedyWrapper, TextWrapper};

use thiserror::Error;

/// Failure reported by a measurement or wrapping backend.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct MeasureError {
    message: String,
}

impl MeasureError {
    /// Create an error with a description of what went wrong.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}
