//! Core Tensor type

use super::layout::zeroed_index;
use super::{Layout, Storage};
use crate::error::{Error, Result};
use crate::random::RandomSource;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::fmt;

/// Dense N-dimensional array of `f64` values
///
/// `Tensor` is the fundamental data structure in densr. It consists of:
/// - **Storage**: an exclusively owned, contiguous element buffer
/// - **Layout**: shape and row-major strides describing that buffer
///
/// A tensor always has at least one dimension. Axes may have size 0, which
/// produces a valid tensor with no elements.
///
/// # Ownership
///
/// No two tensors ever share a buffer. `Clone` performs a deep copy, and
/// dropping a tensor (or calling [`Tensor::release`]) frees both its shape
/// and its data.
///
/// # Example
///
/// ```
/// use densr::prelude::*;
///
/// let mut t = Tensor::zeros(&[2, 3])?;
/// t.set(&[1, 2], 5.0)?;
/// assert_eq!(t.get(&[1, 2])?, 5.0);
/// assert_eq!(t.as_slice()[5], 5.0);
/// # Ok::<(), densr::error::Error>(())
/// ```
#[derive(Clone, PartialEq)]
pub struct Tensor {
    /// Element buffer
    storage: Storage,
    /// Shape and strides
    layout: Layout,
}

impl Tensor {
    /// Create a tensor from storage and layout
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if the storage length differs from the layout's
    /// element count.
    pub fn from_parts(storage: Storage, layout: Layout) -> Result<Self> {
        if storage.len() != layout.elem_count() {
            return Err(Error::SizeMismatch {
                expected: layout.elem_count(),
                got: storage.len(),
            });
        }
        log::trace!(
            "allocated tensor {} ({} bytes)",
            layout,
            storage.size_in_bytes()
        );
        Ok(Self { storage, layout })
    }

    /// Create a tensor filled with zeros
    ///
    /// # Errors
    ///
    /// - `InvalidRank` if `shape` is empty
    /// - `InvalidArgument` if the element count overflows `usize`
    /// - `OutOfMemory` if the shape or data cannot be allocated
    pub fn zeros(shape: &[usize]) -> Result<Self> {
        Self::full(shape, 0.0)
    }

    /// Create a tensor filled with ones
    pub fn ones(shape: &[usize]) -> Result<Self> {
        Self::full(shape, 1.0)
    }

    /// Create a tensor with every element set to `value`
    pub fn full(shape: &[usize], value: f64) -> Result<Self> {
        let layout = Layout::contiguous(shape)?;
        let storage = Storage::filled(layout.elem_count(), value)?;
        Self::from_parts(storage, layout)
    }

    /// Create a tensor whose elements are drawn from `source`
    ///
    /// Elements are drawn one at a time in flat (row-major) order.
    ///
    /// # Example
    ///
    /// ```
    /// use densr::prelude::*;
    ///
    /// let mut sampler = Sampler::seeded(Distribution::Uniform { low: -1.0, high: 1.0 }, 7)?;
    /// let t = Tensor::random(&[4, 4], &mut sampler)?;
    /// assert!(t.as_slice().iter().all(|v| (-1.0..1.0).contains(v)));
    /// # Ok::<(), densr::error::Error>(())
    /// ```
    pub fn random<S: RandomSource + ?Sized>(shape: &[usize], source: &mut S) -> Result<Self> {
        let layout = Layout::contiguous(shape)?;
        let storage = Storage::from_fn(layout.elem_count(), |_| source.sample())?;
        Self::from_parts(storage, layout)
    }

    /// Create a tensor of uniform values in `[0, 1)` from the thread-local RNG
    pub fn rand(shape: &[usize]) -> Result<Self> {
        let mut rng = rand::rng();
        Self::random(shape, &mut || rng.random::<f64>())
    }

    /// Create a tensor of standard normal values (mean 0, std 1) from the thread-local RNG
    pub fn randn(shape: &[usize]) -> Result<Self> {
        let mut rng = rand::rng();
        Self::random(shape, &mut || -> f64 { StandardNormal.sample(&mut rng) })
    }

    /// Create a tensor by copying row-major `data`
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if `data.len()` does not equal the product of
    /// `shape`, plus the errors of [`Tensor::zeros`].
    ///
    /// # Example
    ///
    /// ```
    /// use densr::prelude::*;
    ///
    /// let t = Tensor::from_slice(&[1.0, 2.0, 3.0, 4.0], &[2, 2])?;
    /// assert_eq!(t.get(&[1, 0])?, 3.0);
    /// # Ok::<(), densr::error::Error>(())
    /// ```
    pub fn from_slice(data: &[f64], shape: &[usize]) -> Result<Self> {
        let layout = Layout::contiguous(shape)?;
        check_len(&layout, data.len())?;
        Self::from_parts(Storage::from_slice(data)?, layout)
    }

    /// Create a tensor that adopts `data` as its buffer without copying
    pub fn from_vec(data: Vec<f64>, shape: &[usize]) -> Result<Self> {
        let layout = Layout::contiguous(shape)?;
        check_len(&layout, data.len())?;
        Self::from_parts(Storage::from_vec(data), layout)
    }

    // ===== Accessors =====

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the storage
    #[inline]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    /// Number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.elem_count()
    }

    /// Whether the tensor has no elements (some axis has size 0)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.numel() == 0
    }

    /// Elements in flat (row-major) order
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        self.storage.as_slice()
    }

    /// Mutable elements in flat (row-major) order
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        self.storage.as_mut_slice()
    }

    /// Copy the elements out in flat order
    pub fn to_vec(&self) -> Vec<f64> {
        self.as_slice().to_vec()
    }

    /// Consume the tensor and return its buffer
    pub fn into_vec(self) -> Vec<f64> {
        self.storage.into_vec()
    }

    // ===== Element access =====

    /// Flat buffer position of a multi-index
    ///
    /// # Errors
    ///
    /// - `RankMismatch` if `indices.len()` differs from the rank
    /// - `IndexOutOfBounds` if any `indices[i] >= shape[i]`
    pub fn flat_index(&self, indices: &[usize]) -> Result<usize> {
        self.layout.index(indices)
    }

    /// Multi-index of a flat buffer position
    pub fn unravel_index(&self, flat: usize) -> Result<Vec<usize>> {
        self.layout.unravel(flat)
    }

    /// Read the element at `indices`
    pub fn get(&self, indices: &[usize]) -> Result<f64> {
        let flat = self.layout.index(indices)?;
        Ok(self.as_slice()[flat])
    }

    /// Write `value` at `indices`
    pub fn set(&mut self, indices: &[usize], value: f64) -> Result<()> {
        let flat = self.layout.index(indices)?;
        self.as_mut_slice()[flat] = value;
        Ok(())
    }

    // ===== Shape operations =====

    /// Reinterpret the buffer under a new shape, in place
    ///
    /// The data is neither moved nor reordered; only the shape and strides
    /// change. On failure the tensor is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - `InvalidRank` if `new_shape` is empty
    /// - `SizeMismatch` if the element count would change
    /// - `OutOfMemory` if the new shape cannot be allocated
    ///
    /// # Example
    ///
    /// ```
    /// use densr::prelude::*;
    ///
    /// let mut t = Tensor::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])?;
    /// let before = t.get(&[1, 0])?;
    /// t.reshape(&[6])?;
    /// assert_eq!(t.get(&[3])?, before);
    /// assert!(t.reshape(&[5]).is_err());
    /// assert_eq!(t.shape(), &[6]);
    /// # Ok::<(), densr::error::Error>(())
    /// ```
    pub fn reshape(&mut self, new_shape: &[usize]) -> Result<&mut Self> {
        let layout = self.layout.reshape(new_shape).inspect_err(|err| {
            log::debug!("reshape {} -> {:?} rejected: {}", self.layout, new_shape, err);
        })?;
        log::trace!("reshape {} -> {}", self.layout, layout);
        self.layout = layout;
        Ok(self)
    }

    /// Consuming form of [`Tensor::reshape`]
    pub fn reshaped(mut self, new_shape: &[usize]) -> Result<Self> {
        self.reshape(new_shape)?;
        Ok(self)
    }

    /// Reverse the order of the axes
    ///
    /// Returns a new contiguous tensor of shape `[s(n-1), ..., s0]` whose
    /// element at `[i(n-1), ..., i0]` is this tensor's element at
    /// `[i0, ..., i(n-1)]`. For a matrix this is the ordinary transpose.
    pub fn transpose(&self) -> Result<Self> {
        let layout = self.layout.reversed()?;
        let src = self.as_slice();
        let src_strides = self.strides();
        let dst_shape = layout.shape();
        let mut index = zeroed_index(dst_shape.len())?;

        let storage = Storage::from_fn(layout.elem_count(), |_| {
            // Output axis k is input axis (rank - 1 - k).
            let offset: usize = index
                .iter()
                .zip(src_strides.iter().rev())
                .map(|(&i, &stride)| i * stride)
                .sum();
            advance(&mut index, dst_shape);
            src[offset]
        })?;

        Self::from_parts(storage, layout)
    }

    // ===== Release =====

    /// Free the tensor's shape and data
    ///
    /// Equivalent to dropping the tensor; provided so that release points
    /// can be written explicitly.
    pub fn release(self) {
        log::trace!("released tensor {}", self.layout);
        drop(self);
    }

    /// Release the tensor held in `slot`, leaving `None`
    ///
    /// Releasing an empty slot is a no-op, so this may be called any number
    /// of times.
    pub fn release_slot(slot: &mut Option<Tensor>) {
        if let Some(tensor) = slot.take() {
            tensor.release();
        }
    }
}

fn check_len(layout: &Layout, len: usize) -> Result<()> {
    if len != layout.elem_count() {
        return Err(Error::SizeMismatch {
            expected: layout.elem_count(),
            got: len,
        });
    }
    Ok(())
}

/// Step a row-major multi-index to its successor, wrapping to all zeros
/// after the last position.
fn advance(index: &mut [usize], shape: &[usize]) {
    for (i, &dim) in index.iter_mut().zip(shape).rev() {
        *i += 1;
        if *i < dim {
            return;
        }
        *i = 0;
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .field("data", &self.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let tensor = Tensor::zeros(&[2, 3]).unwrap();

        assert_eq!(tensor.shape(), &[2, 3]);
        assert_eq!(tensor.ndim(), 2);
        assert_eq!(tensor.numel(), 6);
        assert_eq!(tensor.to_vec(), [0.0; 6]);
    }

    #[test]
    fn test_ones_and_full() {
        let ones = Tensor::ones(&[2, 2]).unwrap();
        assert_eq!(ones.to_vec(), [1.0; 4]);

        let full = Tensor::full(&[3], 42.0).unwrap();
        assert_eq!(full.to_vec(), [42.0; 3]);
    }

    #[test]
    fn test_zero_rank_rejected() {
        assert_eq!(Tensor::zeros(&[]), Err(Error::InvalidRank { rank: 0 }));
        assert_eq!(
            Tensor::from_slice(&[1.0], &[]),
            Err(Error::InvalidRank { rank: 0 })
        );
    }

    #[test]
    fn test_zero_sized_axis_is_valid() {
        let tensor = Tensor::zeros(&[4, 0, 2]).unwrap();
        assert_eq!(tensor.numel(), 0);
        assert!(tensor.is_empty());
        assert!(tensor.as_slice().is_empty());
    }

    #[test]
    fn test_from_parts_checks_length() {
        let layout = Layout::contiguous(&[2, 2]).unwrap();
        let storage = Storage::filled(3, 0.0).unwrap();
        assert_eq!(
            Tensor::from_parts(storage, layout),
            Err(Error::SizeMismatch {
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn test_storage_accessor() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        assert_eq!(t.storage().len(), 3);
        assert_eq!(t.storage().size_in_bytes(), 3 * std::mem::size_of::<f64>());
        assert_eq!(t.storage().as_slice(), t.as_slice());
    }

    #[test]
    fn test_from_slice_length_mismatch() {
        let err = Tensor::from_slice(&[1.0, 2.0, 3.0], &[2, 2]).unwrap_err();
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 4,
                got: 3
            }
        );
    }

    #[test]
    fn test_get_set() {
        let mut tensor = Tensor::zeros(&[2, 3]).unwrap();
        tensor.set(&[1, 2], 5.0).unwrap();

        assert_eq!(tensor.flat_index(&[1, 2]), Ok(5));
        assert_eq!(tensor.get(&[1, 2]), Ok(5.0));
        assert_eq!(tensor.get(&[0, 0]), Ok(0.0));
        assert_eq!(tensor.as_slice()[5], 5.0);
    }

    #[test]
    fn test_set_out_of_bounds_leaves_data() {
        let mut tensor = Tensor::zeros(&[2, 3]).unwrap();
        let err = tensor.set(&[0, 3], 1.0).unwrap_err();
        assert_eq!(
            err,
            Error::IndexOutOfBounds {
                axis: 1,
                index: 3,
                size: 3
            }
        );
        assert_eq!(tensor.to_vec(), [0.0; 6]);
    }

    #[test]
    fn test_reshape_in_place() {
        let mut tensor = Tensor::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        tensor.reshape(&[3, 2]).unwrap();
        assert_eq!(tensor.shape(), &[3, 2]);
        assert_eq!(tensor.strides(), &[2, 1]);
        assert_eq!(tensor.get(&[2, 1]), Ok(6.0));
        assert_eq!(tensor.to_vec(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_reshape_failure_keeps_shape() {
        let mut tensor = Tensor::zeros(&[2, 3]).unwrap();
        assert!(matches!(
            tensor.reshape(&[5]),
            Err(Error::SizeMismatch {
                expected: 6,
                got: 5
            })
        ));
        assert!(matches!(
            tensor.reshape(&[]),
            Err(Error::InvalidRank { rank: 0 })
        ));
        assert_eq!(tensor.shape(), &[2, 3]);
    }

    #[test]
    fn test_transpose_matrix() {
        let tensor = Tensor::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let transposed = tensor.transpose().unwrap();

        assert_eq!(transposed.shape(), &[3, 2]);
        assert_eq!(transposed.to_vec(), [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_transpose_rank3() {
        let data: Vec<f64> = (0..24).map(f64::from).collect();
        let tensor = Tensor::from_vec(data, &[2, 3, 4]).unwrap();
        let transposed = tensor.transpose().unwrap();

        assert_eq!(transposed.shape(), &[4, 3, 2]);
        for i in 0..2 {
            for j in 0..3 {
                for k in 0..4 {
                    assert_eq!(
                        transposed.get(&[k, j, i]).unwrap(),
                        tensor.get(&[i, j, k]).unwrap()
                    );
                }
            }
        }
    }

    #[test]
    fn test_transpose_high_rank() {
        let data: Vec<f64> = (0..32).map(f64::from).collect();
        let t = Tensor::from_vec(data, &[2, 2, 2, 2, 2]).unwrap();
        let tt = t.transpose().unwrap();

        assert_eq!(tt.shape(), &[2, 2, 2, 2, 2]);
        assert_eq!(tt.get(&[1, 0, 0, 0, 0]).unwrap(), t.get(&[0, 0, 0, 0, 1]).unwrap());
        assert_eq!(tt.get(&[0, 1, 1, 0, 1]).unwrap(), t.get(&[1, 0, 1, 1, 0]).unwrap());
        assert_eq!(tt.transpose().unwrap(), t);
    }

    #[test]
    fn test_transpose_vector_is_copy() {
        let tensor = Tensor::from_slice(&[1.0, 2.0, 3.0], &[3]).unwrap();
        assert_eq!(tensor.transpose().unwrap(), tensor);
    }

    #[test]
    fn test_release_slot_is_idempotent() {
        let mut slot = Some(Tensor::zeros(&[2]).unwrap());
        Tensor::release_slot(&mut slot);
        assert!(slot.is_none());
        Tensor::release_slot(&mut slot);
        assert!(slot.is_none());
    }

    #[test]
    fn test_advance_wraps() {
        let shape = [2, 2];
        let mut index = [0, 0];
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(index);
            advance(&mut index, &shape);
        }
        assert_eq!(seen, [[0, 0], [0, 1], [1, 0], [1, 1]]);
        assert_eq!(index, [0, 0]);
    }
}
