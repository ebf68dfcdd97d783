use crate::traits::{FloatScalar, Scalar};
use crate::Matrix;

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use statespace::Matrix;
    /// let m: Matrix<f64, 3, 3> = Matrix::from_fn(|i, j| {
    ///     if i == j { 1.0 } else { 0.0 }
    /// });
    /// assert_eq!(m, Matrix::eye());
    /// ```
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut m = Self::zeros();
        for j in 0..N {
            for i in 0..M {
                m.data[j][i] = f(i, j);
            }
        }
        m
    }

    /// Create a matrix from a flat slice in column-major order.
    ///
    /// Panics if `slice.len() != M * N`.
    ///
    /// ```
    /// use statespace::Matrix;
    /// // Column-major: col0=[1,4], col1=[2,5], col2=[3,6]
    /// let m: Matrix<f64, 2, 3> = Matrix::from_slice(&[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    /// assert_eq!(m[(0, 0)], 1.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// ```
    pub fn from_slice(slice: &[T]) -> Self {
        assert_eq!(
            slice.len(),
            M * N,
            "slice length {} does not match {}x{} matrix",
            slice.len(),
            M,
            N
        );
        let mut m = Self::zeros();
        m.as_mut_slice().copy_from_slice(slice);
        m
    }
}

// ── Slice access ────────────────────────────────────────────────────

impl<T, const M: usize, const N: usize> Matrix<T, M, N> {
    /// View the entire matrix as a flat slice in column-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.data.as_flattened()
    }

    /// View the entire matrix as a mutable flat slice in column-major order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_flattened_mut()
    }

    /// Iterate over all elements in column-major order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

// ── Float checks and clamping ───────────────────────────────────────

impl<T: FloatScalar, const M: usize, const N: usize> Matrix<T, M, N> {
    /// `true` if no element is NaN or infinite.
    ///
    /// ```
    /// use statespace::Matrix;
    /// assert!(Matrix::new([[1.0_f64, 2.0]]).is_finite());
    /// assert!(!Matrix::new([[1.0_f64, f64::NAN]]).is_finite());
    /// ```
    pub fn is_finite(&self) -> bool {
        self.iter().all(|v| v.is_finite())
    }

    /// Largest absolute element (zero for an empty matrix).
    pub fn max_abs(&self) -> T {
        self.iter().fold(T::zero(), |acc, v| acc.max(v.abs()))
    }

    /// Element-wise clamp into `[lo, hi]`.
    ///
    /// Each element saturates on its own; a clipped element does not scale the
    /// others. NaN elements map to the clamped zero.
    ///
    /// ```
    /// use statespace::ColumnVector;
    /// let u = ColumnVector::from_column([224.8_f64, -3.0]);
    /// let lo = ColumnVector::from_column([-12.0, -12.0]);
    /// let hi = ColumnVector::from_column([12.0, 12.0]);
    /// let c = u.clamp(&lo, &hi);
    /// assert_eq!(c[0], 12.0);
    /// assert_eq!(c[1], -3.0);
    /// ```
    pub fn clamp(&self, lo: &Self, hi: &Self) -> Self {
        Self::from_fn(|i, j| self[(i, j)].saturate(lo[(i, j)], hi[(i, j)]))
    }

    /// `true` if every element of `self` is `<=` the matching element of `rhs`.
    pub fn all_le(&self, rhs: &Self) -> bool {
        self.iter().zip(rhs.iter()).all(|(a, b)| a <= b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColumnVector;

    #[test]
    fn from_slice_col_major() {
        let m: Matrix<f64, 2, 2> = Matrix::from_slice(&[1.0, 3.0, 2.0, 4.0]);
        assert_eq!(m, Matrix::new([[1.0, 2.0], [3.0, 4.0]]));
        assert_eq!(m.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "slice length")]
    fn from_slice_wrong_length() {
        let _: Matrix<f64, 2, 2> = Matrix::from_slice(&[1.0, 2.0, 3.0]);
    }

    #[test]
    fn max_abs_picks_largest_magnitude() {
        let v = ColumnVector::from_column([3.0_f64, -4.0]);
        assert_eq!(v.max_abs(), 4.0);
    }

    #[test]
    fn clamp_is_per_element() {
        let u = ColumnVector::from_column([20.0_f64, 0.5, -30.0]);
        let lo = ColumnVector::from_column([-12.0, -1.0, -6.0]);
        let hi = ColumnVector::from_column([12.0, 1.0, 6.0]);
        let c = u.clamp(&lo, &hi);
        assert_eq!(c.to_array(), [12.0, 0.5, -6.0]);
        assert!(lo.all_le(&c) && c.all_le(&hi));
    }

    #[test]
    fn clamp_nan_maps_inside_bounds() {
        let u = ColumnVector::from_column([f64::NAN, f64::NAN]);
        let lo = ColumnVector::from_column([-1.0, 2.0]);
        let hi = ColumnVector::from_column([1.0, 3.0]);
        let c = u.clamp(&lo, &hi);
        assert_eq!(c.to_array(), [0.0, 2.0]);
    }

    #[test]
    fn clamp_infinity() {
        let u = ColumnVector::from_column([f64::INFINITY, f64::NEG_INFINITY]);
        let lo = ColumnVector::fill(-12.0);
        let hi = ColumnVector::fill(12.0);
        assert_eq!(u.clamp(&lo, &hi).to_array(), [12.0, -12.0]);
    }
}
