//! Pagination engine turning block sequences into draw commands.
//!
//! Blocks are laid out top to bottom with an explicit cursor. Before a
//! block is drawn the engine checks how much room is left above the bottom
//! margin and starts a new page when the block (or, for lists, the next
//! item) would not fit. The output is a flat command list in which
//! `PageBreak` separates pages.

mod engine;
mod options;
mod result;
mod rules;

pub use engine::Paginator;
pub use options::{ErrorMode, LayoutOptions};
pub use result::{Cursor, LayoutResult, LayoutStats, LayoutWarning};

use crate::measure::{ApproximateMetrics, GreedyWrapper};

/// Paginator measuring text with [`ApproximateMetrics`].
pub type DefaultPaginator = Paginator<GreedyWrapper<ApproximateMetrics>>;
