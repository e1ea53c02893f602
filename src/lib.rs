//! # densr
//!
//! **Dense N-dimensional `f64` tensors over a single row-major buffer.**
//!
//! densr is a small numeric primitive layer: allocation, checked element
//! access by multi-index, element-wise arithmetic and shape reinterpretation.
//! It is meant to sit underneath higher-level code such as autodiff or linear
//! algebra.
//!
//! ## Features
//!
//! - **Tensors**: rank >= 1, any axis may be 0, exclusively owned buffers
//! - **Construction**: zeros, ones, full, from slices/vectors, random sources
//! - **Indexing**: bounds-checked `get`/`set`, flat index <-> multi-index
//! - **Element-wise ops**: add, sub, mul, div (destination, allocating and in-place
//!   forms), apply/map
//! - **Shape ops**: in-place reshape, axis-reversing transpose
//!
//! Every fallible operation returns [`error::Result`]; allocation failure is
//! reported as [`error::Error::OutOfMemory`] instead of aborting.
//!
//! ## Quick Start
//!
//! ```rust
//! use densr::prelude::*;
//!
//! let a = Tensor::from_slice(&[1.0, 2.0, 3.0, 4.0], &[2, 2])?;
//! let b = Tensor::from_slice(&[5.0, 6.0, 7.0, 8.0], &[2, 2])?;
//!
//! let mut c = Tensor::zeros(&[2, 2])?;
//! densr::ops::add(&mut c, &a, &b)?;
//! assert_eq!(c.get(&[1, 1])?, 12.0);
//!
//! c.reshape(&[4])?;
//! assert_eq!(c.get(&[3])?, 12.0);
//! # Ok::<(), densr::error::Error>(())
//! ```
//!
//! ## Logging
//!
//! Allocation, reshape and rejected operations are reported through the
//! [`log`](https://docs.rs/log) facade at `trace`/`debug`/`warn` level. No
//! logger is installed by this crate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod error;
pub mod ops;
pub mod random;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::ops::BinaryOp;
    pub use crate::random::{Distribution, RandomSource, Sampler};
    pub use crate::tensor::{Layout, Tensor};
}
