//! Per-kind typography and spacing.

use crate::measure::FontSpec;
use crate::model::HeadingLevel;

/// Font, line pitch and trailing gap of a wrapped-text block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BlockStyle {
    pub font: FontSpec,
    pub line_height: f32,
    pub gap_after: f32,
}

impl BlockStyle {
    /// Offset from the top of a line box to its baseline.
    pub fn ascent(&self) -> f32 {
        self.font.size
    }

    /// Height of `lines` wrapped lines, without the trailing gap.
    pub fn height(&self, lines: usize) -> f32 {
        lines as f32 * self.line_height
    }
}

pub(crate) fn heading(level: HeadingLevel) -> BlockStyle {
    let (size, line_height, gap_after) = match level {
        HeadingLevel::H1 => (24.0, 30.0, 20.0),
        HeadingLevel::H2 => (20.0, 25.0, 15.0),
        HeadingLevel::H3 => (16.0, 20.0, 10.0),
    };
    BlockStyle {
        font: FontSpec::helvetica(size).bold(),
        line_height,
        gap_after,
    }
}

pub(crate) fn paragraph() -> BlockStyle {
    BlockStyle {
        font: FontSpec::helvetica(12.0),
        line_height: 15.0,
        gap_after: 15.0,
    }
}

pub(crate) fn blockquote() -> BlockStyle {
    BlockStyle {
        font: FontSpec::helvetica(12.0).italic(),
        ..paragraph()
    }
}

/// `gap_after` is the gap between items.
pub(crate) fn list_item() -> BlockStyle {
    BlockStyle {
        font: FontSpec::helvetica(12.0),
        line_height: 15.0,
        gap_after: LIST_ITEM_GAP,
    }
}

/// `gap_after` is unused; code blocks are padded instead.
pub(crate) fn code() -> BlockStyle {
    BlockStyle {
        font: FontSpec::courier(11.0),
        line_height: 15.0,
        gap_after: 0.0,
    }
}

pub(crate) const LIST_TEXT_INDENT: f32 = 15.0;
pub(crate) const LIST_WRAP_INSET: f32 = 20.0;
pub(crate) const LIST_ITEM_GAP: f32 = 10.0;
pub(crate) const LIST_TRAILING_GAP: f32 = 10.0;

pub(crate) const CODE_PADDING: f32 = 10.0;
pub(crate) const CODE_BLEED: f32 = 5.0;

pub(crate) const QUOTE_TEXT_INDENT: f32 = 10.0;
pub(crate) const QUOTE_RULE_OFFSET: f32 = 10.0;
pub(crate) const QUOTE_WRAP_INSET: f32 = 20.0;
pub(crate) const QUOTE_RULE_WIDTH: f32 = 2.0;

pub(crate) const RULE_GAP: f32 = 20.0;
pub(crate) const RULE_WIDTH: f32 = 1.0;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{FontFamily, FontStyle, FontWeight};

    #[test]
    fn test_heading_table() {
        let h1 = heading(HeadingLevel::H1);
        assert_eq!(h1.font.size, 24.0);
        assert_eq!(h1.font.weight, FontWeight::Bold);
        assert_eq!(h1.height(1) + h1.gap_after, 50.0);

        let h3 = heading(HeadingLevel::H3);
        assert_eq!(h3.height(2) + h3.gap_after, 50.0);
    }

    #[test]
    fn test_blockquote_is_italic_paragraph() {
        let quote = blockquote();
        assert_eq!(quote.font.style, FontStyle::Italic);
        assert_eq!(quote.line_height, paragraph().line_height);
    }

    #[test]
    fn test_code_is_monospace() {
        let style = code();
        assert_eq!(style.font.family, FontFamily::Courier);
        assert_eq!(style.ascent(), 11.0);
    }
}
