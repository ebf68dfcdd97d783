//! Type aliases for the matrix shapes that show up in small plants.

use crate::Matrix;

/// 1×1 matrix.
pub type Matrix1<T> = Matrix<T, 1, 1>;
/// 2×2 matrix.
pub type Matrix2<T> = Matrix<T, 2, 2>;

/// 1×2 matrix.
pub type Matrix1x2<T> = Matrix<T, 1, 2>;
/// 2×1 matrix.
pub type Matrix2x1<T> = Matrix<T, 2, 1>;
