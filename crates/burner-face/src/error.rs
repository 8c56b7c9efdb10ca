//! Error types for layout runs and exports.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Rust uses `Result<T, E>` instead of exceptions. `thiserror` writes the
//! `Display` and `std::error::Error` impls for us from the `#[error]`
//! attributes, and `#[from]` lets `?` convert foreign errors automatically.

use thiserror::Error;

/// Errors raised while building a hole layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A configured length is non-positive or not finite.
    #[error("invalid configuration: {field} = {value} (must be a positive length)")]
    InvalidConfiguration { field: &'static str, value: f64 },

    /// A shape could not be built, or a predicate was asked about a malformed one.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
}

impl LayoutError {
    pub(crate) fn degenerate(msg: impl Into<String>) -> Self {
        LayoutError::DegenerateGeometry(msg.into())
    }
}

/// Errors raised while writing a layout to a vector file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("nothing to export: the drawing has no entities")]
    EmptyDrawing,
}
