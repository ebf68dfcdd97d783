use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point elements used by the control loop.
///
/// Required wherever clamping or finiteness checks are needed.
/// Covers `f32` and `f64`.
pub trait FloatScalar: Scalar + Float {
    /// Clamp `self` into `[lo, hi]`.
    ///
    /// NaN maps to the value zero would clamp to, so a saturated output is
    /// always a number inside the bounds.
    #[inline]
    fn saturate(self, lo: Self, hi: Self) -> Self {
        let v = if self.is_nan() { Self::zero() } else { self };
        if v < lo {
            lo
        } else if v > hi {
            hi
        } else {
            v
        }
    }
}

impl<T: Scalar + Float> FloatScalar for T {}
