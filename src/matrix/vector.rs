use core::ops::{Index, IndexMut};

use crate::traits::Scalar;
use crate::Matrix;

/// A column vector (N×1 matrix).
///
/// States, inputs, outputs and references are all column vectors, so
/// `Matrix * ColumnVector` reads like the model equations:
/// `(M×N) * (N×1) → (M×1)`.
///
/// Single-element access works with either `cv[i]` or `cv[(i, 0)]`.
///
/// # Examples
///
/// ```
/// use statespace::ColumnVector;
///
/// let x = ColumnVector::from_column([0.5_f64, -1.0]);
/// assert_eq!(x[0], 0.5);
/// assert_eq!(x[(1, 0)], -1.0);
/// assert_eq!(x.len(), 2);
/// ```
pub type ColumnVector<T, const N: usize> = Matrix<T, N, 1>;

// ── Column vector size aliases ──────────────────────────────────────

/// A 1-element column vector.
pub type ColumnVector1<T> = ColumnVector<T, 1>;
/// A 2-element column vector.
pub type ColumnVector2<T> = ColumnVector<T, 2>;

impl<T: Scalar, const N: usize> ColumnVector<T, N> {
    /// Create a column vector from a 1D array.
    ///
    /// ```
    /// use statespace::ColumnVector;
    /// let cv = ColumnVector::from_column([1.0, 2.0, 3.0]);
    /// assert_eq!(cv[(0, 0)], 1.0);
    /// assert_eq!(cv[(2, 0)], 3.0);
    /// ```
    #[inline]
    pub fn from_column(data: [T; N]) -> Self {
        Self { data: [data] }
    }

    /// Create a column vector with every element set to `value`.
    #[inline]
    pub fn fill(value: T) -> Self {
        Self { data: [[value; N]] }
    }

    /// Copy the elements out into an array.
    #[inline]
    pub fn to_array(&self) -> [T; N] {
        self.data[0]
    }

    /// Number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// `true` for a zero-length vector.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

// Single-index access: cv[i] instead of cv[(i, 0)]
impl<T, const N: usize> Index<usize> for ColumnVector<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[0][i]
    }
}

impl<T, const N: usize> IndexMut<usize> for ColumnVector<T, N> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[0][i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_column_and_index() {
        let v = ColumnVector::from_column([1.0, 2.0, 3.0]);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[2], 3.0);
        assert_eq!(v.nrows(), 3);
        assert_eq!(v.ncols(), 1);
    }

    #[test]
    fn index_mut() {
        let mut v: ColumnVector2<f64> = ColumnVector::zeros();
        v[1] = 4.0;
        assert_eq!(v[(1, 0)], 4.0);
        assert_eq!(v.to_array(), [0.0, 4.0]);
    }

    #[test]
    fn fill() {
        let v = ColumnVector::<f64, 3>::fill(12.0);
        assert_eq!(v.to_array(), [12.0; 3]);
    }

    #[test]
    fn matrix_times_column() {
        let b: Matrix<f64, 2, 1> = Matrix::new([[0.0005871], [0.0861092]]);
        let u = ColumnVector::from_column([12.0]);
        let x = b * u;
        assert!((x[0] - 0.0070452).abs() < 1e-12);
        assert!((x[1] - 1.0333104).abs() < 1e-12);
    }
}
