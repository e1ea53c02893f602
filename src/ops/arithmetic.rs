//! Arithmetic operations helpers
//!
//! This module contains the operation kind enum and the operand validation
//! shared by every element-wise binary operation.

use crate::error::{Error, Result};
use crate::tensor::Tensor;
use std::fmt;

/// Binary operation kind
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Addition: a + b
    Add,
    /// Subtraction: a - b
    Sub,
    /// Multiplication: a * b
    Mul,
    /// Division: a / b (IEEE-754: x/0 is ±inf or NaN)
    Div,
}

impl BinaryOp {
    /// Apply the operation to one pair of elements
    #[inline]
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }

    /// Operation name used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check that `lhs` and `rhs` may be combined element-wise
///
/// Operands must agree in rank, element count and shape; any disagreement is
/// a `ShapeMismatch`.
pub fn validate_operands(op: BinaryOp, lhs: &Tensor, rhs: &Tensor) -> Result<()> {
    if lhs.ndim() != rhs.ndim() || lhs.numel() != rhs.numel() || lhs.shape() != rhs.shape() {
        log::debug!("{op} rejected: {:?} vs {:?}", lhs.shape(), rhs.shape());
        return Err(Error::shape_mismatch(lhs.shape(), rhs.shape()));
    }
    Ok(())
}

/// Check that a destination can hold the result of combining `lhs` with an
/// operand of the same shape
///
/// Only the element count is compared; the destination keeps its own shape.
pub fn validate_destination(op: BinaryOp, dst: &Tensor, lhs: &Tensor) -> Result<()> {
    if dst.numel() != lhs.numel() {
        log::debug!(
            "{op} rejected: destination holds {} elements, operands {}",
            dst.numel(),
            lhs.numel()
        );
        return Err(Error::SizeMismatch {
            expected: lhs.numel(),
            got: dst.numel(),
        });
    }
    Ok(())
}
