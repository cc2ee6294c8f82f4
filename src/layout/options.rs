//! Layout options and configuration.

use crate::model::Color;

/// Options controlling a layout run. Page geometry is passed separately
/// since it has no defaults in the engine.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Remaining height below which a block starts on a new page
    pub min_runway: f32,

    /// How unknown raw block kinds are handled
    pub unknown_blocks: ErrorMode,

    /// Marker drawn before unordered list items
    pub bullet: String,

    /// Fill behind code blocks
    pub code_background: Color,

    /// Stroke of the blockquote decoration line
    pub quote_rule_color: Color,

    /// Stroke of horizontal rules
    pub rule_color: Color,

    /// Whether batch layout uses parallel processing
    pub parallel: bool,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum runway in points.
    pub fn with_min_runway(mut self, points: f32) -> Self {
        self.min_runway = points.max(0.0);
        self
    }

    /// Skip unknown block kinds instead of failing.
    pub fn lenient(mut self) -> Self {
        self.unknown_blocks = ErrorMode::Lenient;
        self
    }

    /// Set the unordered list marker.
    pub fn with_bullet(mut self, bullet: impl Into<String>) -> Self {
        self.bullet = bullet.into();
        self
    }

    /// Disable parallel batch layout.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            min_runway: 50.0,
            unknown_blocks: ErrorMode::Strict,
            bullet: "\u{2022}".to_string(),
            code_background: Color::rgb(245, 245, 245),
            quote_rule_color: Color::rgb(200, 200, 200),
            rule_color: Color::rgb(200, 200, 200),
            parallel: true,
        }
    }
}

/// Error handling mode for unknown block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the run
    #[default]
    Strict,
    /// Skip the block, log it and record a warning
    Lenient,
}
