//! Tensor operations
//!
//! ```text
//! Tensor
//!   ├── add, sub, mul, div          (destination form, free functions)
//!   ├── Tensor::add, ::sub, ...     (allocating form)
//!   ├── Tensor::add_assign, ...     (in-place form)
//!   └── Tensor::apply, ::map        (caller-supplied unary functions)
//! ```
//!
//! Binary operations require operands of identical shape. There is no
//! broadcasting.

pub mod arithmetic;
mod binary;
mod unary;

pub use arithmetic::{BinaryOp, validate_destination, validate_operands};
pub use binary::{add, binary_into, div, mul, sub};
