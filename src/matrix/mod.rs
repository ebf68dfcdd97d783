pub mod aliases;
mod ops;
mod util;
pub mod vector;

use core::ops::{Index, IndexMut};

use crate::traits::Scalar;

/// Fixed-size matrix with `M` rows and `N` columns.
///
/// Storage is column-major: `data[col][row]`.
/// Stack-allocated, no-std compatible. Every coefficient and signal in the
/// control loop is one of these, so a dimension error is a type error.
///
/// # Examples
///
/// ```
/// use statespace::Matrix;
///
/// let a = Matrix::new([[1.0, 0.0038], [0.0, 0.0925]]);
/// assert_eq!(a[(0, 1)], 0.0038);
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 2);
///
/// let b: Matrix<f64, 3, 3> = Matrix::eye();
/// assert_eq!(b[(0, 0)], 1.0);
/// assert_eq!(b[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<T, const M: usize, const N: usize> {
    pub(crate) data: [[T; M]; N],
}

impl<T: Scalar, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Create a matrix from a row-major 2D array.
    ///
    /// The input is `[[row0], [row1], ...]` (M arrays of N elements each),
    /// which is how gains exported by model-design tools read.
    #[inline]
    pub fn new(rows: [[T; N]; M]) -> Self {
        let mut data = [[T::zero(); M]; N];
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                data[j][i] = v;
            }
        }
        Self { data }
    }

    /// Create a matrix filled with zeros.
    pub fn zeros() -> Self {
        Self {
            data: [[T::zero(); M]; N],
        }
    }
}

impl<T, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Number of rows.
    #[inline]
    pub const fn nrows(&self) -> usize {
        M
    }

    /// Number of columns.
    #[inline]
    pub const fn ncols(&self) -> usize {
        N
    }

    /// `(rows, cols)`.
    #[inline]
    pub const fn shape(&self) -> (usize, usize) {
        (M, N)
    }
}

impl<T: Scalar, const N: usize> Matrix<T, N, N> {
    /// Create an identity matrix (square matrices only).
    pub fn eye() -> Self {
        let mut m = Self::zeros();
        for i in 0..N {
            m.data[i][i] = T::one();
        }
        m
    }
}

// Index by (row, col) tuple
impl<T, const M: usize, const N: usize> Index<(usize, usize)> for Matrix<T, M, N> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[col][row]
    }
}

impl<T, const M: usize, const N: usize> IndexMut<(usize, usize)> for Matrix<T, M, N> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[col][row]
    }
}

impl<T: Scalar, const M: usize, const N: usize> Default for Matrix<T, M, N> {
    fn default() -> Self {
        Self::zeros()
    }
}
