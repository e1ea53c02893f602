//! Element-wise binary operations.
//!
//! Each operation comes in three forms:
//!
//! - destination: [`add`] / [`sub`] / [`mul`] / [`div`] write `lhs op rhs`
//!   into a caller-provided tensor and return it
//! - allocating: [`Tensor::add`] etc. return a new tensor shaped like `lhs`
//! - in place: [`Tensor::add_assign`] etc. overwrite `self` with `self op rhs`
//!
//! Output element `i` depends only on input elements `i`, so the in-place
//! form gives the same values as writing to a separate destination.

use super::arithmetic::{BinaryOp, validate_destination, validate_operands};
use crate::error::Result;
use crate::tensor::{Layout, Storage, Tensor};

/// Write `lhs op rhs` into `dst` and return `dst`
///
/// # Errors
///
/// - `ShapeMismatch` if `lhs` and `rhs` differ in rank, element count or shape
/// - `SizeMismatch` if `dst` does not hold the same number of elements
///
/// On error `dst` is unchanged.
pub fn binary_into<'a>(
    op: BinaryOp,
    dst: &'a mut Tensor,
    lhs: &Tensor,
    rhs: &Tensor,
) -> Result<&'a mut Tensor> {
    validate_operands(op, lhs, rhs)?;
    validate_destination(op, dst, lhs)?;
    binary_op_kernel(op, lhs.as_slice(), rhs.as_slice(), dst.as_mut_slice());
    Ok(dst)
}

/// Element-wise addition into `dst`: `dst[i] = lhs[i] + rhs[i]`
///
/// # Example
///
/// ```
/// use densr::prelude::*;
///
/// let a = Tensor::from_slice(&[1.0, 2.0, 3.0, 4.0], &[2, 2])?;
/// let b = Tensor::from_slice(&[5.0, 6.0, 7.0, 8.0], &[2, 2])?;
/// let mut dst = Tensor::zeros(&[2, 2])?;
/// densr::ops::add(&mut dst, &a, &b)?;
/// assert_eq!(dst.to_vec(), [6.0, 8.0, 10.0, 12.0]);
/// # Ok::<(), densr::error::Error>(())
/// ```
pub fn add<'a>(dst: &'a mut Tensor, lhs: &Tensor, rhs: &Tensor) -> Result<&'a mut Tensor> {
    binary_into(BinaryOp::Add, dst, lhs, rhs)
}

/// Element-wise subtraction into `dst`: `dst[i] = lhs[i] - rhs[i]`
pub fn sub<'a>(dst: &'a mut Tensor, lhs: &Tensor, rhs: &Tensor) -> Result<&'a mut Tensor> {
    binary_into(BinaryOp::Sub, dst, lhs, rhs)
}

/// Element-wise multiplication into `dst`: `dst[i] = lhs[i] * rhs[i]`
pub fn mul<'a>(dst: &'a mut Tensor, lhs: &Tensor, rhs: &Tensor) -> Result<&'a mut Tensor> {
    binary_into(BinaryOp::Mul, dst, lhs, rhs)
}

/// Element-wise division into `dst`: `dst[i] = lhs[i] / rhs[i]`
///
/// Division by zero yields ±inf or NaN, not an error.
pub fn div<'a>(dst: &'a mut Tensor, lhs: &Tensor, rhs: &Tensor) -> Result<&'a mut Tensor> {
    binary_into(BinaryOp::Div, dst, lhs, rhs)
}

impl Tensor {
    /// Allocating form of a binary operation; the result has `self`'s shape
    pub fn binary(&self, op: BinaryOp, rhs: &Tensor) -> Result<Tensor> {
        validate_operands(op, self, rhs)?;
        let lhs = self.as_slice();
        let rhs = rhs.as_slice();
        let storage = Storage::from_fn(lhs.len(), |i| op.apply(lhs[i], rhs[i]))?;
        Tensor::from_parts(storage, Layout::contiguous(self.shape())?)
    }

    /// In-place form of a binary operation: `self[i] = self[i] op rhs[i]`
    pub fn binary_assign(&mut self, op: BinaryOp, rhs: &Tensor) -> Result<&mut Self> {
        validate_operands(op, self, rhs)?;
        for (a, &b) in self.as_mut_slice().iter_mut().zip(rhs.as_slice()) {
            *a = op.apply(*a, b);
        }
        Ok(self)
    }

    /// Element-wise addition, returning a new tensor
    pub fn add(&self, rhs: &Tensor) -> Result<Tensor> {
        self.binary(BinaryOp::Add, rhs)
    }

    /// Element-wise subtraction, returning a new tensor
    pub fn sub(&self, rhs: &Tensor) -> Result<Tensor> {
        self.binary(BinaryOp::Sub, rhs)
    }

    /// Element-wise multiplication, returning a new tensor
    pub fn mul(&self, rhs: &Tensor) -> Result<Tensor> {
        self.binary(BinaryOp::Mul, rhs)
    }

    /// Element-wise division, returning a new tensor
    pub fn div(&self, rhs: &Tensor) -> Result<Tensor> {
        self.binary(BinaryOp::Div, rhs)
    }

    /// In-place element-wise addition
    pub fn add_assign(&mut self, rhs: &Tensor) -> Result<&mut Self> {
        self.binary_assign(BinaryOp::Add, rhs)
    }

    /// In-place element-wise subtraction
    pub fn sub_assign(&mut self, rhs: &Tensor) -> Result<&mut Self> {
        self.binary_assign(BinaryOp::Sub, rhs)
    }

    /// In-place element-wise multiplication
    pub fn mul_assign(&mut self, rhs: &Tensor) -> Result<&mut Self> {
        self.binary_assign(BinaryOp::Mul, rhs)
    }

    /// In-place element-wise division
    pub fn div_assign(&mut self, rhs: &Tensor) -> Result<&mut Self> {
        self.binary_assign(BinaryOp::Div, rhs)
    }
}

fn binary_op_kernel(op: BinaryOp, a: &[f64], b: &[f64], out: &mut [f64]) {
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = op.apply(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn matrix(data: &[f64]) -> Tensor {
        Tensor::from_slice(data, &[2, 2]).unwrap()
    }

    #[test]
    fn test_add_into() {
        let a = matrix(&[1.0, 2.0, 3.0, 4.0]);
        let b = matrix(&[5.0, 6.0, 7.0, 8.0]);
        let mut dst = Tensor::zeros(&[2, 2]).unwrap();

        add(&mut dst, &a, &b).unwrap();
        assert_eq!(dst.to_vec(), [6.0, 8.0, 10.0, 12.0]);
    }

    #[test]
    fn test_each_op_into() {
        let a = matrix(&[8.0, 6.0, 4.0, 2.0]);
        let b = matrix(&[2.0, 3.0, 4.0, 2.0]);
        let mut dst = Tensor::zeros(&[2, 2]).unwrap();

        sub(&mut dst, &a, &b).unwrap();
        assert_eq!(dst.to_vec(), [6.0, 3.0, 0.0, 0.0]);
        mul(&mut dst, &a, &b).unwrap();
        assert_eq!(dst.to_vec(), [16.0, 18.0, 16.0, 4.0]);
        div(&mut dst, &a, &b).unwrap();
        assert_eq!(dst.to_vec(), [4.0, 2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_destination_keeps_its_shape() {
        let a = matrix(&[1.0, 2.0, 3.0, 4.0]);
        let mut dst = Tensor::zeros(&[4]).unwrap();

        add(&mut dst, &a, &a).unwrap();
        assert_eq!(dst.shape(), &[4]);
        assert_eq!(dst.to_vec(), [2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_destination_size_mismatch() {
        let a = matrix(&[1.0, 2.0, 3.0, 4.0]);
        let mut dst = Tensor::full(&[3], 9.0).unwrap();

        let err = add(&mut dst, &a, &a).unwrap_err();
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 4,
                got: 3
            }
        );
        assert_eq!(dst.to_vec(), [9.0; 3]);
    }

    #[test]
    fn test_operand_shape_mismatch() {
        let a = Tensor::zeros(&[2, 3]).unwrap();
        let b = Tensor::zeros(&[3, 2]).unwrap();
        let mut dst = Tensor::zeros(&[2, 3]).unwrap();

        assert!(matches!(
            sub(&mut dst, &a, &b),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(matches!(a.mul(&b), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_allocating_ops() {
        let a = matrix(&[1.0, 2.0, 3.0, 4.0]);
        let b = matrix(&[4.0, 3.0, 2.0, 1.0]);

        let sum = a.add(&b).unwrap();
        assert_eq!(sum.shape(), &[2, 2]);
        assert_eq!(sum.to_vec(), [5.0; 4]);
        assert_eq!(a.sub(&b).unwrap().to_vec(), [-3.0, -1.0, 1.0, 3.0]);
        assert_eq!(a.mul(&b).unwrap().to_vec(), [4.0, 6.0, 6.0, 4.0]);
        assert_eq!(a.div(&b).unwrap().to_vec(), [0.25, 2.0 / 3.0, 1.5, 4.0]);
    }

    #[test]
    fn test_in_place_ops() {
        let mut a = matrix(&[1.0, 2.0, 3.0, 4.0]);
        let b = matrix(&[1.0, 1.0, 2.0, 2.0]);

        a.add_assign(&b).unwrap();
        assert_eq!(a.to_vec(), [2.0, 3.0, 5.0, 6.0]);
        a.mul_assign(&b).unwrap();
        assert_eq!(a.to_vec(), [2.0, 3.0, 10.0, 12.0]);
        a.div_assign(&b).unwrap();
        assert_eq!(a.to_vec(), [2.0, 3.0, 5.0, 6.0]);
        a.sub_assign(&b).unwrap();
        assert_eq!(a.to_vec(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_in_place_matches_destination_form() {
        let a = matrix(&[1.5, -2.0, 0.25, 8.0]);
        let b = matrix(&[0.5, 4.0, -1.0, 2.0]);

        for op in [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div] {
            let mut dst = Tensor::zeros(&[2, 2]).unwrap();
            binary_into(op, &mut dst, &a, &b).unwrap();

            let mut in_place = a.clone();
            in_place.binary_assign(op, &b).unwrap();

            assert_eq!(in_place, dst, "{op}");
            assert_eq!(a.binary(op, &b).unwrap(), dst, "{op}");
        }
    }

    #[test]
    fn test_high_rank_operands() {
        let shape = [2, 1, 2, 1, 2, 1];
        let a = Tensor::full(&shape, 3.0).unwrap();
        let b = Tensor::full(&shape, 2.0).unwrap();

        let sum = a.add(&b).unwrap();
        assert_eq!(sum.shape(), &shape);
        assert_eq!(sum.strides(), &[4, 4, 2, 2, 1, 1]);
        assert_eq!(sum.to_vec(), [5.0; 8]);

        let mut dst = Tensor::zeros(&[8]).unwrap();
        mul(&mut dst, &a, &b).unwrap();
        assert_eq!(dst.to_vec(), [6.0; 8]);
    }

    #[test]
    fn test_div_by_zero_propagates() {
        let a = Tensor::from_slice(&[1.0, -1.0, 0.0], &[3]).unwrap();
        let zero = Tensor::zeros(&[3]).unwrap();
        let q = a.div(&zero).unwrap();

        assert_eq!(q.as_slice()[0], f64::INFINITY);
        assert_eq!(q.as_slice()[1], f64::NEG_INFINITY);
        assert!(q.as_slice()[2].is_nan());
    }

    #[test]
    fn test_empty_operands() {
        let a = Tensor::zeros(&[0, 3]).unwrap();
        let mut dst = Tensor::zeros(&[0]).unwrap();
        add(&mut dst, &a, &a).unwrap();
        assert!(dst.is_empty());
    }
}
