//! Shape type: dimensions of a tensor

use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// Stack allocation threshold for dimensions
/// Most tensors have 4 or fewer dimensions, so we stack-allocate up to 4
pub(crate) const STACK_DIMS: usize = 4;

/// Shape type: dimensions of a tensor
///
/// Index 0 is the outermost (slowest-varying) axis.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Shape(SmallVec<[usize; STACK_DIMS]>);

impl Shape {
    /// Copy `dims` into a new shape.
    ///
    /// Ranks above the inline threshold spill to the heap; that reservation is
    /// fallible and reports `OutOfMemory` instead of aborting.
    pub fn try_from_slice(dims: &[usize]) -> Result<Self> {
        let mut inner = SmallVec::new();
        inner
            .try_reserve(dims.len())
            .map_err(|_| Error::out_of_memory::<usize>(dims.len()))?;
        inner.extend_from_slice(dims);
        Ok(Self(inner))
    }

    /// Copy `dims` in reverse axis order.
    pub fn try_reversed(dims: &[usize]) -> Result<Self> {
        let mut shape = Self::try_from_slice(dims)?;
        shape.0.reverse();
        Ok(shape)
    }

    /// View shape as a slice.
    pub fn as_slice(&self) -> &[usize] {
        self.0.as_slice()
    }

    /// Number of dimensions in this shape.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }
}

/// Product of `dims`, or `None` on overflow. The empty product is 1.
pub(crate) fn checked_product(dims: &[usize]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

impl Deref for Shape {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<[usize]> for Shape {
    fn as_ref(&self) -> &[usize] {
        self.0.as_slice()
    }
}
