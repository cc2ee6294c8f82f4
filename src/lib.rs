//! # mdpage
//!
//! Deterministic pagination of markdown block trees.
//!
//! This library takes an already-parsed sequence of block nodes (headings,
//! paragraphs, lists, code blocks, blockquotes, rules) and lays them out on
//! fixed-size pages, producing an ordered list of backend-independent draw
//! commands. Turning those commands into PDF bytes or pixels is left to the
//! caller.
//!
//! ## Quick Start
//!
//! ```
//! use mdpage::{layout, BlockNode, HeadingLevel, ListKind, PageGeometry};
//!
//! fn main() -> mdpage::Result<()> {
//!     let blocks = vec![
//!         BlockNode::heading(HeadingLevel::H1, "Shopping"),
//!         BlockNode::list(ListKind::Unordered, ["Apple", "Banana", "Cherry"]),
//!     ];
//!
//!     let result = layout(&blocks, &PageGeometry::a4())?;
//!     assert_eq!(result.page_count, 1);
//!     println!("{}", mdpage::render::to_text(&result));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Pluggable measurement**: supply any [`TextWrapper`], or a
//!   [`FontMetrics`] backend for the built-in greedy wrapper
//! - **Atomic runs**: a failed run returns an error and no commands
//! - **Overflow reporting**: oversized content is drawn and reported as a
//!   [`LayoutWarning`] rather than failing
//! - **Parallel batches**: independent documents are laid out with Rayon

pub mod error;
pub mod layout;
pub mod measure;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layout::{
    Cursor, DefaultPaginator, ErrorMode, LayoutOptions, LayoutResult, LayoutStats,
    LayoutWarning, Paginator,
};
pub use measure::{
    ApproximateMetrics, FontFamily, FontMetrics, FontSpec, FontStyle, FontWeight, GreedyWrapper,
    MeasureError, TextWrapper,
};
pub use model::{
    BlockNode, Color, DrawCommand, FilledRect, HeadingLevel, LineSegment, ListKind, PageGeometry,
    RawBlock, TextCommand,
};
pub use render::JsonFormat;

use std::path::Path;

/// Lay out blocks with the default options and approximate metrics.
///
/// # Example
///
/// ```
/// use mdpage::{layout, BlockNode, PageGeometry};
///
/// let result = layout(&[BlockNode::paragraph("Hi")], &PageGeometry::a4()).unwrap();
/// assert_eq!(result.text_commands().count(), 1);
/// ```
pub fn layout(blocks: &[BlockNode], geometry: &PageGeometry) -> Result<LayoutResult> {
    DefaultPaginator::default().run(blocks, geometry)
}

/// Lay out blocks with custom options and approximate metrics.
pub fn layout_with_options(
    blocks: &[BlockNode],
    geometry: &PageGeometry,
    options: LayoutOptions,
) -> Result<LayoutResult> {
    DefaultPaginator::default()
        .with_options(options)
        .run(blocks, geometry)
}

/// Parse a JSON array of raw blocks.
///
/// # Example
///
/// ```
/// use mdpage::blocks_from_json;
///
/// let raw = blocks_from_json(r#"[{"tag": "h1", "text": "Title"}, {"tag": "hr"}]"#).unwrap();
/// assert_eq!(raw.len(), 2);
/// ```
pub fn blocks_from_json(json: &str) -> Result<Vec<RawBlock>> {
    Ok(serde_json::from_str(json)?)
}

/// Lay out a JSON array of raw blocks.
pub fn layout_json(
    json: &str,
    geometry: &PageGeometry,
    options: LayoutOptions,
) -> Result<LayoutResult> {
    let raw = blocks_from_json(json)?;
    DefaultPaginator::default()
        .with_options(options)
        .run_raw(&raw, geometry)
}

/// Lay out a JSON file holding an array of raw blocks.
///
/// # Example
///
/// ```no_run
/// use mdpage::{layout_file, LayoutOptions, PageGeometry};
///
/// let result = layout_file("blocks.json", &PageGeometry::a4(), LayoutOptions::default())?;
/// println!("{} pages", result.page_count);
/// # Ok::<(), mdpage::Error>(())
/// ```
pub fn layout_file<P: AsRef<Path>>(
    path: P,
    geometry: &PageGeometry,
    options: LayoutOptions,
) -> Result<LayoutResult> {
    let json = std::fs::read_to_string(path)?;
    layout_json(&json, geometry, options)
}
