//! Discrete-time state-space control: plant model, LQR feedback with
//! feedforward and saturation, steady-state observer, and the loop that runs
//! them in order every sample period.
//!
//! The model is
//!
//! ```text
//! x[k+1] = A·x[k] + B·u[k]
//! y[k]   = C·x[k] + D·u[k]
//! ```
//!
//! with `N` states, `M` inputs and `P` outputs fixed at compile time. Each
//! cycle of [`StateSpaceLoop::update`] runs
//!
//! 1. correct: `x̂ ← x̂ + L·(y − C·x̂ − D·u_prev)`
//! 2. control: `u = clamp(K·(r − x̂) + Kff·r, Umin, Umax)`
//! 3. predict: `x̂ ← A·x̂ + B·u`
//!
//! Gains are designed offline for one sample period; running the loop at a
//! different rate silently invalidates them.
//!
//! # Example
//!
//! ```
//! use statespace::statespace::{ControllerCoeffs, ObserverCoeffs, PlantCoeffs, StateSpaceLoop};
//! use statespace::{ColumnVector, Matrix};
//!
//! // Double integrator sampled at 10 ms, position measured
//! let dt = 0.01_f64;
//! let plant = PlantCoeffs::new(
//!     Matrix::new([[1.0, dt], [0.0, 1.0]]),
//!     Matrix::new([[0.5 * dt * dt], [dt]]),
//!     Matrix::new([[1.0, 0.0]]),
//!     Matrix::new([[0.0]]),
//! ).unwrap();
//! let controller = ControllerCoeffs::new(
//!     Matrix::new([[40.0, 9.0]]),
//!     Matrix::zeros(),
//!     ColumnVector::from_column([-12.0]),
//!     ColumnVector::from_column([12.0]),
//! ).unwrap();
//! let observer = ObserverCoeffs::new(Matrix::new([[0.9], [5.0]])).unwrap();
//!
//! let mut ss = StateSpaceLoop::new(plant, controller, observer);
//! ss.set_reference(ColumnVector::from_column([1.0, 0.0]));
//! let u = ss.update(&ColumnVector::from_column([0.0]));
//! assert!(u[0] <= 12.0 && u[0] >= -12.0);
//! ```

mod controller;
mod observer;
mod plant;
mod state_space_loop;


pub use controller::ControllerCoeffs;
pub use observer::ObserverCoeffs;
pub use plant::{Plant, PlantCoeffs};
pub use state_space_loop::{LoopState, StateSpaceLoop};

use crate::traits::FloatScalar;
use crate::Matrix;

/// Errors from building coefficient sets.
///
/// All of them are construction-time failures: a loop is either built from
/// fully valid coefficients or not built at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateSpaceError {
    /// A runtime-shaped matrix does not have the shape the loop was declared with.
    DimensionMismatch {
        /// Which coefficient (`"A"`, `"B"`, `"K"`, `"L"`, ...).
        matrix: &'static str,
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Got `(rows, cols)`.
        got: (usize, usize),
    },
    /// `Umin > Umax` for an input channel.
    InvalidInputBounds {
        /// Index of the offending input.
        channel: usize,
    },
    /// A coefficient contains NaN or infinity.
    NonFiniteCoefficient {
        /// Which coefficient.
        matrix: &'static str,
    },
}

impl core::fmt::Display for StateSpaceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StateSpaceError::DimensionMismatch {
                matrix,
                expected,
                got,
            } => write!(
                f,
                "matrix {} has shape {}x{}, expected {}x{}",
                matrix, got.0, got.1, expected.0, expected.1
            ),
            StateSpaceError::InvalidInputBounds { channel } => {
                write!(f, "input {channel} has Umin greater than Umax")
            }
            StateSpaceError::NonFiniteCoefficient { matrix } => {
                write!(f, "matrix {matrix} contains a non-finite value")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StateSpaceError {}

/// Reject a coefficient matrix holding NaN or infinity.
pub(super) fn require_finite<T: FloatScalar, const R: usize, const C: usize>(
    matrix: &'static str,
    m: &Matrix<T, R, C>,
) -> Result<(), StateSpaceError> {
    if m.is_finite() {
        Ok(())
    } else {
        Err(rejected(StateSpaceError::NonFiniteCoefficient { matrix }))
    }
}

/// Log a rejected coefficient set and hand the error back.
pub(super) fn rejected(err: StateSpaceError) -> StateSpaceError {
    log::warn!("rejecting state-space coefficients: {err}");
    err
}

/// Check a runtime-shaped matrix against the declared shape.
#[cfg(feature = "alloc")]
pub(super) fn fixed_from_dyn<T: crate::traits::Scalar, const R: usize, const C: usize>(
    matrix: &'static str,
    d: &crate::DynMatrix<T>,
) -> Result<Matrix<T, R, C>, StateSpaceError> {
    Matrix::try_from(d).map_err(|e| {
        rejected(StateSpaceError::DimensionMismatch {
            matrix,
            expected: e.expected,
            got: e.got,
        })
    })
}
