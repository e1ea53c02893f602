//! Layout: shape and row-major strides of a tensor

use super::shape::{Shape, checked_product};
use super::strides::Strides;
use crate::error::{Error, Result};
use std::fmt;

/// Layout describes how a tensor's multi-index maps onto its flat buffer
///
/// Layouts are always contiguous and row-major: the last axis varies fastest.
///
/// Flat index of the element at indices [i0, i1, ..., in]:
///   i0 * strides[0] + i1 * strides[1] + ... + in * strides[n]
#[derive(Clone, PartialEq, Eq)]
pub struct Layout {
    /// Shape: size along each dimension
    shape: Shape,
    /// Strides: offset (in elements) between consecutive elements along each dimension
    strides: Strides,
    /// Cached product of `shape`
    elem_count: usize,
}

impl Layout {
    /// Create a row-major layout from a shape
    ///
    /// # Errors
    ///
    /// - `InvalidRank` if `shape` is empty
    /// - `InvalidArgument` if the element count overflows `usize`
    /// - `OutOfMemory` if the shape copy cannot be allocated
    ///
    /// # Example
    /// ```
    /// use densr::tensor::Layout;
    /// let layout = Layout::contiguous(&[2, 3, 4])?;
    /// assert_eq!(layout.shape(), &[2, 3, 4]);
    /// assert_eq!(layout.strides(), &[12, 4, 1]);
    /// # Ok::<(), densr::error::Error>(())
    /// ```
    pub fn contiguous(shape: &[usize]) -> Result<Self> {
        let elem_count = validate_shape(shape)?;
        Ok(Self {
            shape: Shape::try_from_slice(shape)?,
            strides: Strides::row_major(shape)?,
            elem_count,
        })
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Total number of elements
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.elem_count
    }

    /// Compute the flat index for a multi-index
    ///
    /// Every index is checked against its axis before any arithmetic, so the
    /// result is always `< elem_count()`.
    pub fn index(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.ndim() {
            return Err(Error::RankMismatch {
                expected: self.ndim(),
                got: indices.len(),
            });
        }

        for (axis, (&index, &size)) in indices.iter().zip(self.shape.iter()).enumerate() {
            if index >= size {
                return Err(Error::IndexOutOfBounds { axis, index, size });
            }
        }

        Ok(indices
            .iter()
            .zip(self.strides.iter())
            .map(|(&idx, &stride)| idx * stride)
            .sum())
    }

    /// Inverse of [`Layout::index`]: recover the multi-index of a flat position
    ///
    /// A flat position past the end is reported as out of bounds on axis 0.
    pub fn unravel(&self, flat: usize) -> Result<Vec<usize>> {
        if flat >= self.elem_count {
            return Err(Error::IndexOutOfBounds {
                axis: 0,
                index: flat,
                size: self.elem_count,
            });
        }

        let mut indices = zeroed_index(self.ndim())?;
        let mut remaining = flat;
        for (slot, &dim) in indices.iter_mut().zip(self.shape.iter()).rev() {
            *slot = remaining % dim;
            remaining /= dim;
        }
        Ok(indices)
    }

    /// Create a layout over the same element count with a new shape
    ///
    /// # Errors
    ///
    /// - `InvalidRank` if `new_shape` is empty
    /// - `InvalidArgument` if the new element count overflows `usize`
    /// - `SizeMismatch` if the new element count differs from this one
    pub fn reshape(&self, new_shape: &[usize]) -> Result<Self> {
        let new_count = validate_shape(new_shape)?;
        if new_count != self.elem_count {
            return Err(Error::SizeMismatch {
                expected: self.elem_count,
                got: new_count,
            });
        }
        Self::contiguous(new_shape)
    }

    /// Create a row-major layout whose axes are this layout's axes in reverse order
    pub fn reversed(&self) -> Result<Self> {
        let shape = Shape::try_reversed(&self.shape)?;
        let strides = Strides::row_major(&shape)?;
        Ok(Self {
            shape,
            strides,
            elem_count: self.elem_count,
        })
    }
}

/// All-zero multi-index of length `rank`
pub(crate) fn zeroed_index(rank: usize) -> Result<Vec<usize>> {
    let mut index = Vec::new();
    index
        .try_reserve_exact(rank)
        .map_err(|_| Error::out_of_memory::<usize>(rank))?;
    index.resize(rank, 0);
    Ok(index)
}

/// Check rank and compute the element count of `shape`
fn validate_shape(shape: &[usize]) -> Result<usize> {
    if shape.is_empty() {
        return Err(Error::InvalidRank { rank: 0 });
    }
    checked_product(shape).ok_or_else(|| {
        Error::invalid_argument("shape", format!("element count of {shape:?} overflows usize"))
    })
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layout {{ shape: {:?}, strides: {:?} }}",
            self.shape.as_slice(),
            self.strides.as_slice(),
        )
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.shape.as_slice())
    }
}
