//! Page geometry.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Physical page size and uniform margin, in points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width in points
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Margin applied to all four edges
    pub margin: f32,
}

impl PageGeometry {
    /// Create a geometry. Call [`validate`](Self::validate) before use.
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// A4 portrait (210 x 297 mm) with a 40pt margin.
    pub fn a4() -> Self {
        Self::new(595.0, 842.0, 40.0) // 210mm * 2.834, 297mm * 2.834
    }

    /// US Letter portrait (8.5 x 11 inches) with a 40pt margin.
    pub fn letter() -> Self {
        Self::new(612.0, 792.0, 40.0)
    }

    /// Replace the margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Width left for content between the left and right margins.
    pub fn usable_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Height left for content between the top and bottom margins.
    pub fn usable_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    /// Lowest y coordinate content may reach on a page.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin
    }

    /// Check that the geometry leaves a positive content area.
    pub fn validate(&self) -> Result<()> {
        let finite = self.width.is_finite() && self.height.is_finite() && self.margin.is_finite();
        if !finite || self.margin < 0.0 || self.usable_width() <= 0.0 || self.usable_height() <= 0.0
        {
            return Err(Error::Geometry {
                width: self.width,
                height: self.height,
                margin: self.margin,
            });
        }
        Ok(())
    }
}
