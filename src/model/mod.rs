//! Model types shared by the layout engine and its collaborators.
//!
//! The input side ([`BlockNode`], [`RawBlock`], [`PageGeometry`]) describes
//! what a block-tree supplier hands to the engine. The output side
//! ([`DrawCommand`] and its value types) is what a rendering backend
//! consumes. Neither side knows about markdown syntax or file formats.

mod block;
mod command;
mod geometry;

pub use block::{normalize_text, BlockNode, HeadingLevel, ListKind, RawBlock};
pub use command::{Color, DrawCommand, FilledRect, LineSegment, TextCommand};
pub use geometry::PageGeometry;
