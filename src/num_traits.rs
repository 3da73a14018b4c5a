use crate::impl_matrix_data_type;
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// The element type of a [`Matrix`](crate::Matrix).
///
/// Implemented for `f32` (the primary, single-precision target) and `f64`.
pub trait MatrixDataType:
    Copy
    + Default
    + PartialOrd
    + num_traits::Zero
    + num_traits::One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + SquareRoot
    + IsNaN
{
    /// Returns the reciprocal value `1 / self`.
    #[inline(always)]
    fn recip(self) -> Self {
        Self::one() / self
    }
}

/// Square root of a scalar, backed by `std` or by `libm` in `no_std` builds.
///
/// Cholesky pivots are taken through this; implementations must be correctly rounded.
pub trait SquareRoot {
    fn square_root(self) -> Self;
}

pub trait IsNaN {
    /// Determines whether the value is "not a number".
    fn is_nan(&self) -> bool;
}

impl_matrix_data_type!(f32);
impl_matrix_data_type!(f64);

#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
impl SquareRoot for f32 {
    #[inline(always)]
    fn square_root(self) -> Self {
        f32::sqrt(self)
    }
}

#[cfg(not(feature = "std"))]
impl SquareRoot for f32 {
    #[inline(always)]
    fn square_root(self) -> Self {
        num_traits::Float::sqrt(self)
    }
}

#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
impl SquareRoot for f64 {
    #[inline(always)]
    fn square_root(self) -> Self {
        f64::sqrt(self)
    }
}

#[cfg(not(feature = "std"))]
impl SquareRoot for f64 {
    #[inline(always)]
    fn square_root(self) -> Self {
        num_traits::Float::sqrt(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_root_f32() {
        assert_eq!(4.0_f32.square_root(), 2.0);
        approx::assert_abs_diff_eq!(
            2.0_f32.square_root(),
            core::f32::consts::SQRT_2,
            epsilon = 1e-6
        );
        approx::assert_abs_diff_eq!(5.0_f32.square_root(), 2.236_068, epsilon = 1e-6);
    }

    #[test]
    fn test_square_root_f64() {
        approx::assert_abs_diff_eq!(9.0_f64.square_root(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_is_nan() {
        assert!(f32::NAN.is_nan());
        assert!(!1.0_f32.is_nan());
        assert!(IsNaN::is_nan(&f64::NAN));
    }
}
