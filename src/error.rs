//! Failures of buffer acquisition and harness sequencing.
//!
//! The doubling kernels themselves cannot fail: every loop bound is derived from
//! the slice length. Only [`PinnedBuffer`](crate::PinnedBuffer) construction and
//! [`VectorBenchmark`](crate::VectorBenchmark) calls made out of order return errors.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoublerError {
    /// The allocator returned null. Nothing was retried and nothing is held.
    AllocationError {
        /// Bytes asked of the allocator, including the skew.
        requested_size: usize,
        requested_alignment: usize,
        message: String,
    },
    /// `len + skew` elements have no valid layout: the byte count overflows
    /// `usize` or exceeds `isize::MAX`.
    LayoutError {
        len: usize,
        skew: usize,
        alignment: usize,
        message: String,
    },
    /// A harness call was made out of order, or a strategy name did not parse.
    ValidationError { message: String },
}

impl fmt::Display for DoublerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoublerError::AllocationError {
                requested_size,
                requested_alignment,
                message,
            } => write!(
                f,
                "cannot allocate {requested_size} bytes aligned to {requested_alignment}: {message}"
            ),
            DoublerError::LayoutError {
                len,
                skew,
                alignment,
                message,
            } => write!(
                f,
                "no layout for {len} i32 elements with skew {skew} at alignment {alignment}: {message}"
            ),
            DoublerError::ValidationError { message } => write!(f, "invalid use: {message}"),
        }
    }
}

impl std::error::Error for DoublerError {}

pub type Result<T> = std::result::Result<T, DoublerError>;

pub fn allocation_error(
    requested_size: usize,
    requested_alignment: usize,
    message: impl Into<String>,
) -> DoublerError {
    DoublerError::AllocationError {
        requested_size,
        requested_alignment,
        message: message.into(),
    }
}

pub fn layout_error(
    len: usize,
    skew: usize,
    alignment: usize,
    message: impl Into<String>,
) -> DoublerError {
    DoublerError::LayoutError {
        len,
        skew,
        alignment,
        message: message.into(),
    }
}

pub fn validation_error(message: impl Into<String>) -> DoublerError {
    DoublerError::ValidationError {
        message: message.into(),
    }
}
