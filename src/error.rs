//! Errors reported by array construction, element access and bulk operations.

use thiserror::{Error};

use super::{Shape};

/// The broad category of an [`Error`].
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller broke the contract of the call: mismatched dimensionality,
    /// malformed sub-array bounds, mismatched shapes, a shape too large to
    /// count, or a buffer of the wrong length.
    InvalidArgument,

    /// A coordinate component lies outside its axis.
    OutOfRange,

    /// The host could not provide a resource, e.g. worker threads.
    Resource,
}

/// The error type of this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {expected: usize, got: usize},

    #[error("extent {extent} of axis {axis} is negative")]
    NegativeExtent {axis: usize, extent: isize},

    #[error("shape {extents:?} has more than usize::MAX elements")]
    SizeOverflow {extents: Vec<usize>},

    #[error("sub-array origin {from} on axis {axis} is negative")]
    NegativeOrigin {axis: usize, from: isize},

    #[error("sub-array end {to} on axis {axis} exceeds extent {extent}")]
    EndOutOfBounds {axis: usize, to: isize, extent: usize},

    #[error("sub-array origin {from} on axis {axis} exceeds end {to}")]
    InvertedBounds {axis: usize, from: isize, to: isize},

    #[error("shape mismatch: {left} vs {right}")]
    ShapeMismatch {left: Shape, right: Shape},

    #[error("buffer of length {got} cannot hold shape {shape} ({expected} elements)")]
    BufferLength {shape: Shape, expected: usize, got: usize},

    #[error("row {row} has length {got}, expected {expected}")]
    RaggedRows {row: usize, expected: usize, got: usize},

    #[error("index {index} out of range for axis {axis} of extent {extent}")]
    OutOfRange {axis: usize, index: isize, extent: usize},

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl Error {
    /// Classify `self`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::OutOfRange {..} => ErrorKind::OutOfRange,
            Error::ThreadPool(_) => ErrorKind::Resource,
            _ => ErrorKind::InvalidArgument,
        }
    }

    /// Returns an [`Error::ShapeMismatch`] unless `left == right`.
    pub(crate) fn check_shapes(left: &Shape, right: &Shape) -> Result<()> {
        if left != right {
            return Err(Error::ShapeMismatch {left: left.clone(), right: right.clone()});
        }
        Ok(())
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(e: rayon::ThreadPoolBuildError) -> Self { Error::ThreadPool(e.to_string()) }
}

/// `Result` specialized to [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

// ----------------------------------------------------------------------------
