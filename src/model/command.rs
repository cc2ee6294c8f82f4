//! Backend-independent draw commands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::measure::{FontFamily, FontSpec, FontStyle, FontWeight};

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One or more lines of text sharing a font.
///
/// `y` is the baseline of the first line; each following line sits
/// `line_height` points lower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCommand {
    pub lines: Vec<String>,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub font_family: FontFamily,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub line_height: f32,
}

impl TextCommand {
    /// Create a text command drawn with `font`.
    pub fn new(lines: Vec<String>, x: f32, y: f32, font: &FontSpec, line_height: f32) -> Self {
        Self {
            lines,
            x,
            y,
            font_size: font.size,
            font_family: font.family,
            font_weight: font.weight,
            font_style: font.style,
            line_height,
        }
    }

    /// Font this command is drawn with.
    pub fn font(&self) -> FontSpec {
        FontSpec {
            family: self.font_family,
            size: self.font_size,
            weight: self.font_weight,
            style: self.font_style,
        }
    }

    /// Baseline of the last line.
    pub fn last_baseline(&self) -> f32 {
        let extra = self.lines.len().saturating_sub(1) as f32;
        self.y + extra * self.line_height
    }
}

/// Solid axis-aligned rectangle; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilledRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

/// Stroked straight line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub color: Color,
    pub width: f32,
}

/// A single drawing instruction. Coordinates are in points from the
/// top-left corner of the current page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawCommand {
    Text(TextCommand),
    FilledRect(FilledRect),
    Line(LineSegment),
    /// Finish the current page and start a new one.
    PageBreak,
}

impl DrawCommand {
    /// Check if this command ends a page.
    pub fn is_page_break(&self) -> bool {
        matches!(self, DrawCommand::PageBreak)
    }

    /// Get the text payload, if any.
    pub fn as_text(&self) -> Option<&TextCommand> {
        match self {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Lowest y coordinate the command touches, ignoring glyph descenders.
    /// `None` for page breaks.
    pub fn bottom(&self) -> Option<f32> {
        match self {
            DrawCommand::Text(text) => Some(text.last_baseline()),
            DrawCommand::FilledRect(rect) => Some(rect.y + rect.height),
            DrawCommand::Line(line) => Some(line.y1.max(line.y2)),
            DrawCommand::PageBreak => None,
        }
    }
}
