//! Strides type: element offsets for tensor memory layout

use super::shape::STACK_DIMS;
use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// Strides type: element offsets between consecutive elements along each dimension
/// NOTE: Strides are in ELEMENTS, not bytes
///
/// Only row-major (C-order) strides are ever produced, so they are unsigned.
#[derive(Clone, PartialEq, Eq)]
pub struct Strides(SmallVec<[usize; STACK_DIMS]>);

impl Strides {
    /// Compute row-major strides for `shape`.
    ///
    /// `stride[rank - 1] = 1` and `stride[i] = stride[i + 1] * shape[i + 1]`.
    /// Products saturate: an overflowing stride can only occur when some
    /// outer axis has size 0, in which case no index ever reaches it.
    pub fn row_major(shape: &[usize]) -> Result<Self> {
        let mut inner: SmallVec<[usize; STACK_DIMS]> = SmallVec::new();
        inner
            .try_reserve(shape.len())
            .map_err(|_| Error::out_of_memory::<usize>(shape.len()))?;

        let mut stride = 1usize;
        for &dim in shape.iter().rev() {
            inner.push(stride);
            stride = stride.saturating_mul(dim);
        }
        inner.reverse();

        Ok(Self(inner))
    }

    /// View strides as a slice.
    pub fn as_slice(&self) -> &[usize] {
        self.0.as_slice()
    }

    /// Number of stride entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this stride vector is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for Strides {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl fmt::Debug for Strides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<[usize]> for Strides {
    fn as_ref(&self) -> &[usize] {
        self.0.as_slice()
    }
}
