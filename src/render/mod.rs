//! Encoders for finished layouts.
//!
//! The engine never writes files; these helpers turn a [`LayoutResult`]
//! into text a rendering backend or a human can consume.
//!
//! [`LayoutResult`]: crate::LayoutResult

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::to_text;
