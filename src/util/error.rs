//! Error types for stereobmp.

use thiserror::Error;

/// Result alias for stereobmp operations.
pub type StereoBmpResult<T> = std::result::Result<T, StereoBmpError>;

/// Errors that can occur when loading, transforming or matching bitmaps.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StereoBmpError {
    /// The operation needs pixel buffers that were never allocated or were released.
    #[error("no pixel data loaded, {operation} cannot be applied")]
    MissingBuffer { operation: &'static str },
    /// The image is not in a state that permits the operation.
    #[error("invalid state: {reason}")]
    InvalidState { reason: &'static str },
    /// A coordinate, row or region falls outside the buffer extents.
    #[error("coordinate ({row}, {col}) is out of bounds for a {height}x{width} image")]
    OutOfBounds {
        row: isize,
        col: isize,
        height: usize,
        width: usize,
    },
    /// A channel has a zero intensity range, so it cannot be stretched.
    #[error("channel {channel} has a degenerate contrast range (min == max == {value})")]
    DegenerateContrast { channel: usize, value: u8 },
    /// The input ended before the expected number of bytes was read.
    #[error("truncated input: expected {expected} bytes, got {got}")]
    TruncatedInput { expected: usize, got: usize },
    /// Opening, reading or writing a file failed.
    #[error("i/o error: {reason}")]
    Io { reason: String },
}

impl StereoBmpError {
    pub(crate) fn out_of_bounds(row: isize, col: isize, height: usize, width: usize) -> Self {
        Self::OutOfBounds {
            row,
            col,
            height,
            width,
        }
    }
}
