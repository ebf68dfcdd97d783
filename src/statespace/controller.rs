use crate::matrix::vector::ColumnVector;
use crate::traits::FloatScalar;
use crate::Matrix;

use super::{rejected, require_finite, StateSpaceError};

/// Feedback and feedforward gains plus actuator limits.
///
/// `K` is the (offline, LQR-designed) feedback gain acting on the tracking
/// error, `Kff` the feedforward gain acting on the reference itself, and
/// `[Umin, Umax]` the per-channel input range.
///
/// # Example
///
/// ```
/// use statespace::statespace::ControllerCoeffs;
/// use statespace::{ColumnVector, Matrix};
///
/// let ctrl = ControllerCoeffs::new(
///     Matrix::new([[197.74500975121012_f64, 1.5868649265235129]]),
///     Matrix::new([[27.107309014237973, 9.9389704745734]]),
///     ColumnVector::from_column([-12.0]),
///     ColumnVector::from_column([12.0]),
/// ).unwrap();
///
/// let x_hat = ColumnVector::from_column([0.0, 0.0]);
/// let r = ColumnVector::from_column([1.0, 0.0]);
/// assert_eq!(ctrl.calculate_u(&x_hat, &r)[0], 12.0); // saturated
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerCoeffs<T, const N: usize, const M: usize> {
    k: Matrix<T, M, N>,
    kff: Matrix<T, M, N>,
    u_min: ColumnVector<T, M>,
    u_max: ColumnVector<T, M>,
}

impl<T: FloatScalar, const N: usize, const M: usize> ControllerCoeffs<T, N, M> {
    /// Build a controller from its gains and input bounds.
    ///
    /// Returns `StateSpaceError::NonFiniteCoefficient` for NaN/inf entries and
    /// `StateSpaceError::InvalidInputBounds` if `Umin > Umax` on any channel.
    pub fn new(
        k: Matrix<T, M, N>,
        kff: Matrix<T, M, N>,
        u_min: ColumnVector<T, M>,
        u_max: ColumnVector<T, M>,
    ) -> Result<Self, StateSpaceError> {
        require_finite("K", &k)?;
        require_finite("Kff", &kff)?;
        require_finite("Umin", &u_min)?;
        require_finite("Umax", &u_max)?;
        if let Some(channel) = (0..M).find(|&i| u_min[i] > u_max[i]) {
            return Err(rejected(StateSpaceError::InvalidInputBounds { channel }));
        }
        Ok(Self {
            k,
            kff,
            u_min,
            u_max,
        })
    }

    /// Build a controller from runtime-shaped matrices.
    ///
    /// K and Kff must be M×N, Umin and Umax M×1.
    #[cfg(feature = "alloc")]
    pub fn try_from_dyn(
        k: &crate::DynMatrix<T>,
        kff: &crate::DynMatrix<T>,
        u_min: &crate::DynMatrix<T>,
        u_max: &crate::DynMatrix<T>,
    ) -> Result<Self, StateSpaceError> {
        use super::fixed_from_dyn;
        Self::new(
            fixed_from_dyn("K", k)?,
            fixed_from_dyn("Kff", kff)?,
            fixed_from_dyn("Umin", u_min)?,
            fixed_from_dyn("Umax", u_max)?,
        )
    }

    /// Control law before saturation: `K·(r − x̂) + Kff·r`.
    ///
    /// The feedforward term uses the reference directly, so the input needed
    /// to hold a reference is applied before any error builds up.
    #[inline]
    pub fn calculate_unclamped_u(
        &self,
        x_hat: &ColumnVector<T, N>,
        r: &ColumnVector<T, N>,
    ) -> ColumnVector<T, M> {
        self.k * (*r - *x_hat) + self.kff * *r
    }

    /// Control law with saturation: every channel lands in `[Umin, Umax]`.
    pub fn calculate_u(
        &self,
        x_hat: &ColumnVector<T, N>,
        r: &ColumnVector<T, N>,
    ) -> ColumnVector<T, M> {
        let unclamped = self.calculate_unclamped_u(x_hat, r);
        let u = self.saturate(&unclamped);
        if u != unclamped {
            log::trace!("input saturated: {:?} -> {:?}", unclamped.as_slice(), u.as_slice());
        }
        u
    }

    /// Clip each channel of `u` to its bounds independently.
    #[inline]
    pub fn saturate(&self, u: &ColumnVector<T, M>) -> ColumnVector<T, M> {
        u.clamp(&self.u_min, &self.u_max)
    }

    /// Feedback gain.
    #[inline]
    pub fn k(&self) -> &Matrix<T, M, N> {
        &self.k
    }

    /// Feedforward gain.
    #[inline]
    pub fn kff(&self) -> &Matrix<T, M, N> {
        &self.kff
    }

    /// Lower input bound.
    #[inline]
    pub fn u_min(&self) -> &ColumnVector<T, M> {
        &self.u_min
    }

    /// Upper input bound.
    #[inline]
    pub fn u_max(&self) -> &ColumnVector<T, M> {
        &self.u_max
    }
}
