//! Error types for densr

use thiserror::Error;

/// Result type alias using densr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in densr operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A tensor needs at least one dimension
    #[error("Invalid rank {rank}: a tensor must have at least one dimension")]
    InvalidRank {
        /// The rejected rank
        rank: usize,
    },

    /// Out of memory
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },

    /// Number of indices does not match the tensor rank
    #[error("Rank mismatch: expected {expected} indices, got {got}")]
    RankMismatch {
        /// Rank of the tensor
        expected: usize,
        /// Number of indices supplied
        got: usize,
    },

    /// Operand shapes are incompatible
    #[error("Shape mismatch: {lhs:?} vs {rhs:?}")]
    ShapeMismatch {
        /// Left-hand side shape
        lhs: Vec<usize>,
        /// Right-hand side shape
        rhs: Vec<usize>,
    },

    /// Element counts differ where they must agree
    #[error("Size mismatch: expected {expected} elements, got {got}")]
    SizeMismatch {
        /// Required element count
        expected: usize,
        /// Element count supplied
        got: usize,
    },

    /// Index out of bounds
    #[error("Index {index} out of bounds for axis {axis} of size {size}")]
    IndexOutOfBounds {
        /// Axis the index addresses
        axis: usize,
        /// The invalid index
        index: usize,
        /// Size of the axis
        size: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(lhs: &[usize], rhs: &[usize]) -> Self {
        Self::ShapeMismatch {
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create an out-of-memory error for `elems` values of type `T`
    pub(crate) fn out_of_memory<T>(elems: usize) -> Self {
        Self::OutOfMemory {
            size: elems.saturating_mul(std::mem::size_of::<T>()),
        }
    }
}
