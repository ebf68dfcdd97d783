use core::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::traits::Scalar;
use crate::Matrix;

// ── Element-wise addition ───────────────────────────────────────────

impl<T: Scalar, const M: usize, const N: usize> Add for Matrix<T, M, N> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<T: Scalar, const M: usize, const N: usize> AddAssign for Matrix<T, M, N> {
    fn add_assign(&mut self, rhs: Self) {
        for j in 0..N {
            for i in 0..M {
                self.data[j][i] = self.data[j][i] + rhs.data[j][i];
            }
        }
    }
}

// ── Element-wise subtraction ────────────────────────────────────────

impl<T: Scalar, const M: usize, const N: usize> Sub for Matrix<T, M, N> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl<T: Scalar, const M: usize, const N: usize> SubAssign for Matrix<T, M, N> {
    fn sub_assign(&mut self, rhs: Self) {
        for j in 0..N {
            for i in 0..M {
                self.data[j][i] = self.data[j][i] - rhs.data[j][i];
            }
        }
    }
}

// ── Matrix multiplication: (M×N) * (N×P) → (M×P) ──────────────────

impl<T: Scalar, const M: usize, const N: usize, const P: usize> Mul<Matrix<T, N, P>>
    for Matrix<T, M, N>
{
    type Output = Matrix<T, M, P>;

    fn mul(self, rhs: Matrix<T, N, P>) -> Matrix<T, M, P> {
        let mut out = Matrix::<T, M, P>::zeros();
        for i in 0..M {
            for j in 0..P {
                let mut sum = T::zero();
                for k in 0..N {
                    sum = sum + self[(i, k)] * rhs[(k, j)];
                }
                out[(i, j)] = sum;
            }
        }
        out
    }
}

impl<T: Scalar, const M: usize, const N: usize, const P: usize> Mul<&Matrix<T, N, P>>
    for &Matrix<T, M, N>
{
    type Output = Matrix<T, M, P>;

    #[inline]
    fn mul(self, rhs: &Matrix<T, N, P>) -> Matrix<T, M, P> {
        *self * *rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub() {
        let a = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::new([[0.5, 0.5], [1.0, -1.0]]);
        let c = a + b;
        assert_eq!(c, Matrix::new([[1.5, 2.5], [4.0, 3.0]]));
        assert_eq!(c - b, a);
    }

    #[test]
    fn assign_ops() {
        let mut a = Matrix::new([[1.0_f64], [2.0]]);
        a += Matrix::new([[1.0], [1.0]]);
        assert_eq!(a, Matrix::new([[2.0], [3.0]]));
        a -= Matrix::new([[2.0], [3.0]]);
        assert_eq!(a, Matrix::zeros());
    }

    #[test]
    fn matmul_rectangular() {
        // (1×2) * (2×1) → 1×1
        let k = Matrix::new([[197.745, 1.58686]]);
        let e = Matrix::new([[1.0], [0.0]]);
        let u = k * e;
        assert_eq!(u[(0, 0)], 197.745);

        // (2×2) * (2×1) → 2×1
        let a = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
        let x = Matrix::new([[1.0], [1.0]]);
        assert_eq!(a * x, Matrix::new([[3.0], [7.0]]));
        assert_eq!(&a * &x, a * x);
    }
}
