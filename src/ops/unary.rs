//! Element-wise unary application of caller-supplied functions.

use crate::error::Result;
use crate::tensor::{Layout, Storage, Tensor};

impl Tensor {
    /// Replace every element with `f(element)`, in flat order
    ///
    /// `f` must be a pure mapping; the `Fn` bound rules out captured mutable
    /// state.
    ///
    /// # Example
    ///
    /// ```
    /// use densr::prelude::*;
    ///
    /// let mut t = Tensor::from_slice(&[1.0, 4.0, 9.0], &[3])?;
    /// t.apply(f64::sqrt);
    /// assert_eq!(t.to_vec(), [1.0, 2.0, 3.0]);
    /// # Ok::<(), densr::error::Error>(())
    /// ```
    pub fn apply<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(f64) -> f64,
    {
        for elem in self.as_mut_slice() {
            *elem = f(*elem);
        }
        self
    }

    /// Allocating form of [`Tensor::apply`]; the result has `self`'s shape
    pub fn map<F>(&self, f: F) -> Result<Tensor>
    where
        F: Fn(f64) -> f64,
    {
        let src = self.as_slice();
        let storage = Storage::from_fn(src.len(), |i| f(src[i]))?;
        Tensor::from_parts(storage, Layout::contiguous(self.shape())?)
    }
}
