//! Layout result with warnings and statistics.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{DrawCommand, TextCommand};

/// Vertical write position and page index of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    /// Offset from the top edge of the current page, in points
    pub y: f32,

    /// 0-based index of the current page
    pub page_index: u32,
}

impl Cursor {
    /// Cursor at the top margin of the first page.
    pub fn new(margin: f32) -> Self {
        Self {
            y: margin,
            page_index: 0,
        }
    }
}

/// Output of a successful layout run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    /// Draw commands in paint order, pages separated by `PageBreak`
    pub commands: Vec<DrawCommand>,

    /// Number of pages, always at least 1
    pub page_count: u32,

    /// Non-fatal problems met during layout
    pub warnings: Vec<LayoutWarning>,

    /// Layout statistics
    pub stats: LayoutStats,

    /// Cursor position after the last block
    pub cursor: Cursor,
}

impl LayoutResult {
    /// Number of `PageBreak` commands.
    pub fn page_break_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_page_break()).count()
    }

    /// Commands grouped per page, without the `PageBreak` separators.
    /// Always yields `page_count` groups.
    pub fn pages(&self) -> impl Iterator<Item = &[DrawCommand]> {
        self.commands.split(|c| c.is_page_break())
    }

    /// All text commands in order.
    pub fn text_commands(&self) -> impl Iterator<Item = &TextCommand> {
        self.commands.iter().filter_map(DrawCommand::as_text)
    }

    /// Check if layout produced any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Non-fatal layout problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutWarning {
    /// A block or list item is taller than a whole page and was drawn past
    /// the bottom margin.
    Overflow {
        /// Index of the block in the input sequence
        block_index: usize,
        /// Index of the list item, for lists
        item_index: Option<usize>,
        /// Page the overflowing content starts on (0-based)
        page_index: u32,
        /// Height the content needs
        required_height: f32,
        /// Usable height of a page
        available_height: f32,
    },

    /// An unknown block kind was dropped in lenient mode.
    SkippedBlock {
        /// Index of the block in the input sequence
        block_index: usize,
        /// The unrecognized tag
        kind: String,
    },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutWarning::Overflow {
                block_index,
                item_index,
                page_index,
                required_height,
                available_height,
            } => {
                write!(f, "block {}", block_index)?;
                if let Some(item) = item_index {
                    write!(f, " item {}", item)?;
                }
                write!(
                    f,
                    " needs {:.1}pt but a page holds {:.1}pt (overflows page {})",
                    required_height,
                    available_height,
                    page_index + 1
                )
            }
            LayoutWarning::SkippedBlock { block_index, kind } => {
                write!(f, "block {} of unknown kind '{}' skipped", block_index, kind)
            }
        }
    }
}

/// Statistics collected during a layout run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Total number of pages
    pub page_count: u32,

    /// Number of headings laid out
    pub heading_count: u32,

    /// Number of paragraphs laid out
    pub paragraph_count: u32,

    /// Number of lists laid out
    pub list_count: u32,

    /// Number of list items laid out
    pub list_item_count: u32,

    /// Number of code blocks laid out
    pub code_block_count: u32,

    /// Number of verbatim code lines drawn
    pub code_line_count: u32,

    /// Number of blockquotes laid out
    pub blockquote_count: u32,

    /// Number of horizontal rules
    pub rule_count: u32,

    /// Number of wrapped text lines drawn (markers and code excluded)
    pub text_line_count: u32,
}

impl LayoutStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a heading.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Count a paragraph.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Count a list of either kind.
    pub fn add_list(&mut self) {
        self.list_count += 1;
    }

    /// Count a list item wrapped to `lines` lines.
    pub fn add_list_item(&mut self, lines: usize) {
        self.list_item_count += 1;
        self.add_text_lines(lines);
    }

    /// Count a code block of `lines` verbatim lines.
    pub fn add_code_block(&mut self, lines: usize) {
        self.code_block_count += 1;
        self.code_line_count += lines as u32;
    }

    /// Count a blockquote.
    pub fn add_blockquote(&mut self) {
        self.blockquote_count += 1;
    }

    /// Count a horizontal rule.
    pub fn add_rule(&mut self) {
        self.rule_count += 1;
    }

    /// Add wrapped text lines.
    pub fn add_text_lines(&mut self, lines: usize) {
        self.text_line_count += lines as u32;
    }

    /// Add the counts of another run, e.g. to total a batch.
    pub fn merge(&mut self, other: &LayoutStats) {
        self.page_count += other.page_count;
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.code_block_count += other.code_block_count;
        self.code_line_count += other.code_line_count;
        self.blockquote_count += other.blockquote_count;
        self.rule_count += other.rule_count;
        self.text_line_count += other.text_line_count;
    }
}
