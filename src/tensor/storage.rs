//! Storage: exclusively owned element buffer

use crate::error::{Error, Result};

/// Contiguous buffer of `f64` elements owned by exactly one tensor
///
/// Every constructor reserves the full buffer up front through
/// `Vec::try_reserve_exact`, so exhaustion surfaces as `OutOfMemory`
/// rather than an abort. Memory is freed when the storage is dropped.
#[derive(Clone, PartialEq)]
pub struct Storage {
    data: Vec<f64>,
}

impl Storage {
    /// Allocate `len` elements, each set to `value`
    pub fn filled(len: usize, value: f64) -> Result<Self> {
        let mut data = reserve(len)?;
        data.resize(len, value);
        Ok(Self { data })
    }

    /// Allocate `len` elements produced in order by `f`
    pub fn from_fn(len: usize, mut f: impl FnMut(usize) -> f64) -> Result<Self> {
        let mut data = reserve(len)?;
        data.extend((0..len).map(&mut f));
        Ok(Self { data })
    }

    /// Copy `values` into a fresh buffer
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let mut data = reserve(values.len())?;
        data.extend_from_slice(values);
        Ok(Self { data })
    }

    /// Adopt an existing buffer without copying
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if storage is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get size in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<f64>()
    }

    /// Elements in flat order
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable elements in flat order
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the storage and return its buffer
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}

fn reserve(len: usize) -> Result<Vec<f64>> {
    let mut data = Vec::new();
    if let Err(err) = data.try_reserve_exact(len) {
        log::warn!("failed to reserve {len} f64 elements: {err}");
        return Err(Error::out_of_memory::<f64>(len));
    }
    Ok(data)
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("len", &self.len())
            .finish()
    }
}
