use thiserror::Error;

use crate::units::Rect;

/// Errors raised by the shape library when an element cannot be created.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Invalid geometry for {kind}: {rect:?} (width and height must be positive and finite)")]
    InvalidGeometry { kind: &'static str, rect: Rect },

    #[error("A table needs at least one row and one column")]
    EmptyTable,

    #[error("A chart needs at least one category and one series")]
    EmptyChart,

    #[error("Chart series '{name}' has {actual} values for {expected} categories")]
    SeriesLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}
