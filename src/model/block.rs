//! Block-level input nodes.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

/// Heading depth. Only the first three levels are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Numeric level (1-3).
    pub fn number(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> std::result::Result<Self, Self::Error> {
        match level {
            1 => Ok(HeadingLevel::H1),
            2 => Ok(HeadingLevel::H2),
            3 => Ok(HeadingLevel::H3),
            other => Err(format!("heading level {} is outside 1-3", other)),
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.number()
    }
}

/// Marker style of a list block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    /// Bulleted list
    Unordered,
    /// Numbered list (1-based, period suffix)
    Ordered,
}

/// One structural unit of a document, with plain-text content.
///
/// Inline emphasis, links and images must already be flattened to text by
/// the supplier. Code blocks keep their line breaks; every other kind is
/// expected to hold whitespace-normalized text (see [`normalize_text`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockNode {
    /// Section heading
    Heading {
        /// Heading depth
        level: HeadingLevel,
        /// Heading text
        text: String,
    },

    /// Body paragraph
    Paragraph {
        /// Paragraph text
        text: String,
    },

    /// Bulleted list
    UnorderedList {
        /// Item texts in order
        items: Vec<String>,
    },

    /// Numbered list
    OrderedList {
        /// Item texts in order
        items: Vec<String>,
    },

    /// Preformatted code, drawn verbatim
    CodeBlock {
        /// Code text with line breaks
        text: String,
    },

    /// Quoted passage
    Blockquote {
        /// Quote text
        text: String,
    },

    /// Horizontal rule
    Rule,
}

impl BlockNode {
    /// Create a heading with normalized text.
    pub fn heading(level: HeadingLevel, text: impl AsRef<str>) -> Self {
        BlockNode::Heading {
            level,
            text: normalize_text(text.as_ref()),
        }
    }

    /// Create a paragraph with normalized text.
    pub fn paragraph(text: impl AsRef<str>) -> Self {
        BlockNode::Paragraph {
            text: normalize_text(text.as_ref()),
        }
    }

    /// Create a list of the given kind with normalized item texts.
    pub fn list<I, S>(kind: ListKind, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items = items
            .into_iter()
            .map(|item| normalize_text(item.as_ref()))
            .collect();
        match kind {
            ListKind::Unordered => BlockNode::UnorderedList { items },
            ListKind::Ordered => BlockNode::OrderedList { items },
        }
    }

    /// Create a code block. Line breaks are kept, carriage returns dropped.
    pub fn code(text: impl AsRef<str>) -> Self {
        let text: String = text.as_ref().nfc().filter(|c| *c != '\r').collect();
        BlockNode::CodeBlock { text }
    }

    /// Create a blockquote with normalized text.
    pub fn blockquote(text: impl AsRef<str>) -> Self {
        BlockNode::Blockquote {
            text: normalize_text(text.as_ref()),
        }
    }

    /// Short lowercase name of the block kind, used in logs and warnings.
    pub fn kind_name(&self) -> &'static str {
        match self {
            BlockNode::Heading { .. } => "heading",
            BlockNode::Paragraph { .. } => "paragraph",
            BlockNode::UnorderedList { .. } => "unordered_list",
            BlockNode::OrderedList { .. } => "ordered_list",
            BlockNode::CodeBlock { .. } => "code_block",
            BlockNode::Blockquote { .. } => "blockquote",
            BlockNode::Rule => "rule",
        }
    }

    /// Check if this block is a list of either kind.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            BlockNode::UnorderedList { .. } | BlockNode::OrderedList { .. }
        )
    }

    /// Plain text of the block; list items are joined with newlines.
    pub fn plain_text(&self) -> String {
        match self {
            BlockNode::Heading { text, .. }
            | BlockNode::Paragraph { text }
            | BlockNode::CodeBlock { text }
            | BlockNode::Blockquote { text } => text.clone(),
            BlockNode::UnorderedList { items } | BlockNode::OrderedList { items } => {
                items.join("\n")
            }
            BlockNode::Rule => String::new(),
        }
    }
}

/// Loosely typed block as emitted by a tag-based tree walker.
///
/// This is the boundary where unknown kinds and malformed nodes are caught;
/// [`BlockNode`] itself cannot represent either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    /// Element tag, e.g. `h1`, `p`, `ul`, `pre`
    pub tag: String,

    /// Text content for non-list kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Item texts for list kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

impl RawBlock {
    /// Create a raw block with only a tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: None,
            items: None,
        }
    }

    /// Set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the list items.
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = Some(items.into_iter().map(Into::into).collect());
        self
    }

    /// Check if the tag names a kind the engine knows how to lay out.
    pub fn is_known_kind(&self) -> bool {
        matches!(
            self.tag.to_ascii_lowercase().as_str(),
            "h1" | "h2" | "h3" | "p" | "ul" | "ol" | "pre" | "blockquote" | "hr"
        )
    }

    /// Convert into a typed block. `index` is reported in errors.
    pub fn into_block(self, index: usize) -> Result<BlockNode> {
        let tag = self.tag.to_ascii_lowercase();
        let block = match tag.as_str() {
            "h1" => BlockNode::heading(HeadingLevel::H1, self.require_text(index)?),
            "h2" => BlockNode::heading(HeadingLevel::H2, self.require_text(index)?),
            "h3" => BlockNode::heading(HeadingLevel::H3, self.require_text(index)?),
            "p" => BlockNode::paragraph(self.require_text(index)?),
            "ul" => BlockNode::list(ListKind::Unordered, self.require_items(index)?),
            "ol" => BlockNode::list(ListKind::Ordered, self.require_items(index)?),
            "pre" => BlockNode::code(self.require_text(index)?),
            "blockquote" => BlockNode::blockquote(self.require_text(index)?),
            "hr" => BlockNode::Rule,
            _ => {
                return Err(Error::UnknownBlockKind {
                    index,
                    kind: self.tag,
                })
            }
        };
        Ok(block)
    }

    fn require_text(&self, index: usize) -> Result<&str> {
        self.text
            .as_deref()
            .ok_or_else(|| Error::MalformedBlock {
                index,
                reason: format!("'{}' node has no text content", self.tag),
            })
    }

    fn require_items(&self, index: usize) -> Result<&[String]> {
        self.items
            .as_deref()
            .ok_or_else(|| Error::MalformedBlock {
                index,
                reason: format!("'{}' node lacks an items array", self.tag),
            })
    }
}

/// Normalize text for layout: Unicode NFC, whitespace runs collapsed to a
/// single space, leading and trailing whitespace removed.
pub fn normalize_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}
