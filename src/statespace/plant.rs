use crate::matrix::vector::ColumnVector;
use crate::traits::FloatScalar;
use crate::Matrix;

use super::{require_finite, StateSpaceError};

/// Linear time-invariant plant `x[k+1] = A·x + B·u`, `y = C·x + D·u`.
///
/// `N` states, `M` inputs, `P` outputs. The const-generic shapes make A square
/// and the four matrices mutually consistent; [`try_from_dyn`](Self::try_from_dyn)
/// checks the same thing for matrices whose shape is only known at runtime.
///
/// # Example
///
/// ```
/// use statespace::statespace::PlantCoeffs;
/// use statespace::{ColumnVector, Matrix};
///
/// let plant = PlantCoeffs::new(
///     Matrix::new([[1.0_f64, 0.0038123917094548044], [0.0, 0.09251846318419062]]),
///     Matrix::new([[0.000587130443210727], [0.08610920599650167]]),
///     Matrix::new([[1.0, 0.0]]),
///     Matrix::new([[0.0]]),
/// ).unwrap();
///
/// let x = ColumnVector::from_column([0.0, 0.0]);
/// let u = ColumnVector::from_column([12.0]);
/// let x1 = plant.update_x(&x, &u);
/// assert!((x1[1] - 12.0 * 0.08610920599650167).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantCoeffs<T, const N: usize, const M: usize, const P: usize> {
    a: Matrix<T, N, N>,
    b: Matrix<T, N, M>,
    c: Matrix<T, P, N>,
    d: Matrix<T, P, M>,
}

impl<T: FloatScalar, const N: usize, const M: usize, const P: usize> PlantCoeffs<T, N, M, P> {
    /// Build a plant from its discrete-time matrices.
    ///
    /// Returns `StateSpaceError::NonFiniteCoefficient` if any entry is NaN or infinite.
    pub fn new(
        a: Matrix<T, N, N>,
        b: Matrix<T, N, M>,
        c: Matrix<T, P, N>,
        d: Matrix<T, P, M>,
    ) -> Result<Self, StateSpaceError> {
        require_finite("A", &a)?;
        require_finite("B", &b)?;
        require_finite("C", &c)?;
        require_finite("D", &d)?;
        Ok(Self { a, b, c, d })
    }

    /// Build a plant from runtime-shaped matrices.
    ///
    /// Returns `StateSpaceError::DimensionMismatch` naming the first matrix
    /// whose shape disagrees with `(N, M, P)`: A must be N×N, B N×M, C P×N
    /// and D P×M.
    ///
    /// ```
    /// use statespace::statespace::{PlantCoeffs, StateSpaceError};
    /// use statespace::DynMatrix;
    ///
    /// let a = DynMatrix::zeros(3, 2, 0.0_f64);
    /// let b = DynMatrix::zeros(2, 1, 0.0);
    /// let c = DynMatrix::zeros(1, 2, 0.0);
    /// let d = DynMatrix::zeros(1, 1, 0.0);
    /// let err = PlantCoeffs::<f64, 2, 1, 1>::try_from_dyn(&a, &b, &c, &d).unwrap_err();
    /// assert_eq!(
    ///     err,
    ///     StateSpaceError::DimensionMismatch { matrix: "A", expected: (2, 2), got: (3, 2) }
    /// );
    /// ```
    #[cfg(feature = "alloc")]
    pub fn try_from_dyn(
        a: &crate::DynMatrix<T>,
        b: &crate::DynMatrix<T>,
        c: &crate::DynMatrix<T>,
        d: &crate::DynMatrix<T>,
    ) -> Result<Self, StateSpaceError> {
        use super::fixed_from_dyn;
        Self::new(
            fixed_from_dyn("A", a)?,
            fixed_from_dyn("B", b)?,
            fixed_from_dyn("C", c)?,
            fixed_from_dyn("D", d)?,
        )
    }

    /// Next state: `A·x + B·u`.
    #[inline]
    pub fn update_x(&self, x: &ColumnVector<T, N>, u: &ColumnVector<T, M>) -> ColumnVector<T, N> {
        self.a * *x + self.b * *u
    }

    /// Output: `C·x + D·u`.
    #[inline]
    pub fn calculate_y(
        &self,
        x: &ColumnVector<T, N>,
        u: &ColumnVector<T, M>,
    ) -> ColumnVector<T, P> {
        self.c * *x + self.d * *u
    }

    /// State transition matrix.
    #[inline]
    pub fn a(&self) -> &Matrix<T, N, N> {
        &self.a
    }

    /// Input matrix.
    #[inline]
    pub fn b(&self) -> &Matrix<T, N, M> {
        &self.b
    }

    /// Output matrix.
    #[inline]
    pub fn c(&self) -> &Matrix<T, P, N> {
        &self.c
    }

    /// Feedthrough matrix.
    #[inline]
    pub fn d(&self) -> &Matrix<T, P, M> {
        &self.d
    }
}

/// Simulated plant carrying a true state.
///
/// Stands in for the mechanism when exercising a loop off-robot: feed it the
/// loop's input, hand its output back to the loop as the next measurement.
///
/// # Example
///
/// ```
/// use statespace::statespace::{Plant, PlantCoeffs};
/// use statespace::{ColumnVector, Matrix};
///
/// let coeffs = PlantCoeffs::new(
///     Matrix::new([[1.0_f64, 0.01], [0.0, 1.0]]),
///     Matrix::new([[0.0], [0.01]]),
///     Matrix::new([[1.0, 0.0]]),
///     Matrix::new([[0.0]]),
/// ).unwrap();
/// let mut plant = Plant::new(coeffs).with_initial_state(ColumnVector::from_column([0.0, 1.0]));
///
/// let y = plant.update(&ColumnVector::from_column([0.0]));
/// assert!((y[0] - 0.01).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct Plant<T, const N: usize, const M: usize, const P: usize> {
    coeffs: PlantCoeffs<T, N, M, P>,
    x: ColumnVector<T, N>,
    y: ColumnVector<T, P>,
}

impl<T: FloatScalar, const N: usize, const M: usize, const P: usize> Plant<T, N, M, P> {
    /// Create a plant at rest (`x = 0`).
    pub fn new(coeffs: PlantCoeffs<T, N, M, P>) -> Self {
        Self {
            coeffs,
            x: ColumnVector::zeros(),
            y: ColumnVector::zeros(),
        }
    }

    /// Start from `x0` instead of rest. Returns `self` for chaining.
    pub fn with_initial_state(mut self, x0: ColumnVector<T, N>) -> Self {
        self.set_x(x0);
        self
    }

    /// Advance one sample period with input `u` and return the new output.
    pub fn update(&mut self, u: &ColumnVector<T, M>) -> ColumnVector<T, P> {
        self.x = self.coeffs.update_x(&self.x, u);
        self.y = self.coeffs.calculate_y(&self.x, u);
        self.y
    }

    /// True state.
    #[inline]
    pub fn x(&self) -> &ColumnVector<T, N> {
        &self.x
    }

    /// Output after the last update.
    #[inline]
    pub fn y(&self) -> &ColumnVector<T, P> {
        &self.y
    }

    /// Overwrite the true state. The output is recomputed with zero input.
    pub fn set_x(&mut self, x: ColumnVector<T, N>) {
        self.x = x;
        self.y = self.coeffs.calculate_y(&self.x, &ColumnVector::zeros());
    }

    /// Return to rest.
    pub fn reset(&mut self) {
        self.set_x(ColumnVector::zeros());
    }

    /// The model this plant follows.
    #[inline]
    pub fn coeffs(&self) -> &PlantCoeffs<T, N, M, P> {
        &self.coeffs
    }
}
