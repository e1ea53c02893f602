//! Tensor types and operations
//!
//! This module provides the core `Tensor` type, a dense n-dimensional array
//! of `f64` values in a row-major buffer, together with the shape, stride and
//! storage types it is built from.

mod core;
mod layout;
mod shape;
mod storage;
mod strides;

pub use self::core::Tensor;
pub use layout::Layout;
pub use shape::Shape;
pub use storage::Storage;
pub use strides::Strides;
