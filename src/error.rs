//! Error types for the mdpage library.

use std::io;
use thiserror::Error;

use crate::measure::MeasureError;

/// Result type alias for mdpage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that abort a layout run.
///
/// A run that returns any of these produces no draw commands at all.
#[derive(Error, Debug)]
pub enum Error {
    /// Page geometry leaves no usable area once margins are applied.
    #[error(
        "Invalid page geometry: {width}x{height} with margin {margin} leaves no usable area"
    )]
    Geometry {
        /// Page width in points
        width: f32,
        /// Page height in points
        height: f32,
        /// Uniform margin in points
        margin: f32,
    },

    /// The supplier produced a block kind the engine does not lay out.
    #[error("Unknown block kind '{kind}' at index {index}")]
    UnknownBlockKind {
        /// Position of the block in the input sequence
        index: usize,
        /// The unrecognized tag
        kind: String,
    },

    /// A known block kind is missing content it requires.
    #[error("Malformed block at index {index}: {reason}")]
    MalformedBlock {
        /// Position of the block in the input sequence
        index: usize,
        /// What is wrong with the block
        reason: String,
    },

    /// The text-measurement adapter failed.
    #[error("Text measurement failed: {0}")]
    Measurement(#[from] MeasureError),

    /// I/O error when reading block files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
