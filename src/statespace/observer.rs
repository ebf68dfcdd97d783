use crate::matrix::vector::ColumnVector;
use crate::traits::FloatScalar;
use crate::Matrix;

use super::{require_finite, PlantCoeffs, StateSpaceError};

/// Steady-state observer gain.
///
/// `L` (N×P) is fixed: a precomputed steady-state Kalman gain or a Luenberger
/// gain. There is no covariance to propagate, so a correction costs two
/// matrix-vector products.
///
/// # Example
///
/// ```
/// use statespace::statespace::{ObserverCoeffs, PlantCoeffs};
/// use statespace::{ColumnVector, Matrix};
///
/// let plant = PlantCoeffs::new(
///     Matrix::new([[1.0_f64, 0.01], [0.0, 1.0]]),
///     Matrix::new([[0.0], [0.01]]),
///     Matrix::new([[1.0, 0.0]]),
///     Matrix::new([[0.0]]),
/// ).unwrap();
/// let observer = ObserverCoeffs::new(Matrix::new([[0.5], [2.0]])).unwrap();
///
/// let x_hat = ColumnVector::zeros();
/// let y = ColumnVector::from_column([1.0]);
/// let corrected = observer.correct(&plant, &x_hat, &y, &ColumnVector::zeros());
/// assert_eq!(corrected.to_array(), [0.5, 2.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverCoeffs<T, const N: usize, const P: usize> {
    l: Matrix<T, N, P>,
}

impl<T: FloatScalar, const N: usize, const P: usize> ObserverCoeffs<T, N, P> {
    /// Wrap an observer gain.
    ///
    /// Returns `StateSpaceError::NonFiniteCoefficient` if `L` holds NaN or infinity.
    pub fn new(l: Matrix<T, N, P>) -> Result<Self, StateSpaceError> {
        require_finite("L", &l)?;
        Ok(Self { l })
    }

    /// Build an observer gain from a runtime-shaped matrix; `L` must be N×P.
    #[cfg(feature = "alloc")]
    pub fn try_from_dyn(l: &crate::DynMatrix<T>) -> Result<Self, StateSpaceError> {
        Self::new(super::fixed_from_dyn("L", l)?)
    }

    /// Measurement residual `y − C·x̂ − D·u_prev`.
    #[inline]
    pub fn residual<const M: usize>(
        &self,
        plant: &PlantCoeffs<T, N, M, P>,
        x_hat: &ColumnVector<T, N>,
        y: &ColumnVector<T, P>,
        u_prev: &ColumnVector<T, M>,
    ) -> ColumnVector<T, P> {
        *y - plant.calculate_y(x_hat, u_prev)
    }

    /// Fold a measurement into the estimate: `x̂ + L·(y − C·x̂ − D·u_prev)`.
    ///
    /// `u_prev` is the input applied during the period that produced `y`.
    #[inline]
    pub fn correct<const M: usize>(
        &self,
        plant: &PlantCoeffs<T, N, M, P>,
        x_hat: &ColumnVector<T, N>,
        y: &ColumnVector<T, P>,
        u_prev: &ColumnVector<T, M>,
    ) -> ColumnVector<T, N> {
        *x_hat + self.l * self.residual(plant, x_hat, y, u_prev)
    }

    /// Observer gain.
    #[inline]
    pub fn l(&self) -> &Matrix<T, N, P> {
        &self.l
    }
}
