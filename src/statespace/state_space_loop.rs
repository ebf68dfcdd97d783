use crate::matrix::vector::ColumnVector;
use crate::traits::FloatScalar;

use super::{ControllerCoeffs, ObserverCoeffs, PlantCoeffs};

/// Whether the loop has a reference to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No reference set; the observer keeps running but the input is zero.
    Idle,
    /// Following the last reference passed to `set_reference`.
    Tracking,
}

/// Last observer step taken, for the Correct/Predict alternation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Fresh,
    Corrected,
    Predicted,
}

/// Closed-loop controller with state estimation for one mechanism.
///
/// Owns the plant, controller and observer coefficients plus the running
/// estimate `x̂`, reference `r` and last applied input `u`. One periodic
/// caller drives it through [`update`](Self::update) once per sample period.
///
/// Correct and predict must alternate. Correcting twice folds the same
/// measurement in twice and predicting twice advances the estimate a period
/// ahead of the mechanism; both panic. A fresh or reset loop accepts either.
///
/// # Example
///
/// ```
/// use statespace::elevator::make_elevator_loop;
/// use statespace::ColumnVector;
///
/// let mut ss = make_elevator_loop().unwrap();
/// ss.set_reference(ColumnVector::from_column([1.0, 0.0]));
///
/// let u = ss.update(&ColumnVector::from_column([0.0]));
/// assert_eq!(u[0], 12.0);
/// ```
#[derive(Debug, Clone)]
pub struct StateSpaceLoop<T, const N: usize, const M: usize, const P: usize> {
    plant: PlantCoeffs<T, N, M, P>,
    controller: ControllerCoeffs<T, N, M>,
    observer: ObserverCoeffs<T, N, P>,

    x_hat: ColumnVector<T, N>,
    r: ColumnVector<T, N>,
    u: ColumnVector<T, M>,
    state: LoopState,
    phase: Phase,
}

impl<T: FloatScalar, const N: usize, const M: usize, const P: usize> StateSpaceLoop<T, N, M, P> {
    /// Assemble a loop. The estimate, reference and input start at zero and the
    /// loop starts [`Idle`](LoopState::Idle).
    pub fn new(
        plant: PlantCoeffs<T, N, M, P>,
        controller: ControllerCoeffs<T, N, M>,
        observer: ObserverCoeffs<T, N, P>,
    ) -> Self {
        Self {
            plant,
            controller,
            observer,
            x_hat: ColumnVector::zeros(),
            r: ColumnVector::zeros(),
            u: ColumnVector::zeros(),
            state: LoopState::Idle,
            phase: Phase::Fresh,
        }
    }

    /// Start from the estimate `x0` instead of zero. Returns `self` for chaining.
    pub fn with_initial_estimate(mut self, x0: ColumnVector<T, N>) -> Self {
        self.x_hat = x0;
        self
    }

    /// Set the state to track from the next computed input on.
    ///
    /// No computation happens here. The first call moves the loop from
    /// `Idle` to `Tracking`.
    pub fn set_reference(&mut self, r: ColumnVector<T, N>) {
        if self.state == LoopState::Idle {
            log::debug!("state-space loop: idle -> tracking");
            self.state = LoopState::Tracking;
        }
        self.r = r;
    }

    /// Fold measurement `y` into the estimate using the last applied input.
    ///
    /// # Panics
    ///
    /// Panics if the previous observer step was also a correct.
    pub fn correct(&mut self, y: &ColumnVector<T, P>) {
        assert!(
            self.phase != Phase::Corrected,
            "correct called twice without an intervening predict"
        );
        self.x_hat = self.observer.correct(&self.plant, &self.x_hat, y, &self.u);
        self.phase = Phase::Corrected;
    }

    /// Record `u` as the applied input and propagate the estimate one period.
    ///
    /// # Panics
    ///
    /// Panics if the previous observer step was also a predict.
    pub fn predict(&mut self, u: &ColumnVector<T, M>) {
        assert!(
            self.phase != Phase::Predicted,
            "predict called twice without an intervening correct"
        );
        self.u = *u;
        self.x_hat = self.plant.update_x(&self.x_hat, u);
        self.phase = Phase::Predicted;
    }

    /// Run one control cycle and return the input to apply.
    ///
    /// Corrects with `y`, computes the saturated input from the corrected
    /// estimate and the reference, then predicts with that input. While
    /// `Idle` the input is zero (clipped to the bounds).
    pub fn update(&mut self, y: &ColumnVector<T, P>) -> ColumnVector<T, M> {
        self.correct(y);
        let u = match self.state {
            LoopState::Tracking => self.controller.calculate_u(&self.x_hat, &self.r),
            LoopState::Idle => self.controller.saturate(&ColumnVector::zeros()),
        };
        self.predict(&u);
        u
    }

    /// Zero the estimate, reference and input and return to `Idle`.
    ///
    /// Use on mode transitions (e.g. re-enabling after a disable) so a stale
    /// estimate doesn't produce a transient. Calling it twice is the same as once.
    pub fn reset(&mut self) {
        if self.state == LoopState::Tracking {
            log::debug!("state-space loop: tracking -> idle (reset)");
        }
        self.x_hat = ColumnVector::zeros();
        self.r = ColumnVector::zeros();
        self.u = ColumnVector::zeros();
        self.state = LoopState::Idle;
        self.phase = Phase::Fresh;
    }

    /// Current state estimate.
    #[inline]
    pub fn x_hat(&self) -> &ColumnVector<T, N> {
        &self.x_hat
    }

    /// Overwrite the estimate, e.g. after the position sensor is re-zeroed.
    pub fn set_x_hat(&mut self, x_hat: ColumnVector<T, N>) {
        self.x_hat = x_hat;
    }

    /// Current reference.
    #[inline]
    pub fn reference(&self) -> &ColumnVector<T, N> {
        &self.r
    }

    /// Last applied input.
    #[inline]
    pub fn u(&self) -> &ColumnVector<T, M> {
        &self.u
    }

    /// Tracking error `r − x̂`.
    #[inline]
    pub fn error(&self) -> ColumnVector<T, N> {
        self.r - self.x_hat
    }

    /// Output predicted from the estimate: `C·x̂ + D·u`.
    #[inline]
    pub fn y_hat(&self) -> ColumnVector<T, P> {
        self.plant.calculate_y(&self.x_hat, &self.u)
    }

    /// `Idle` or `Tracking`.
    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Plant coefficients.
    #[inline]
    pub fn plant(&self) -> &PlantCoeffs<T, N, M, P> {
        &self.plant
    }

    /// Controller coefficients.
    #[inline]
    pub fn controller(&self) -> &ControllerCoeffs<T, N, M> {
        &self.controller
    }

    /// Observer coefficients.
    #[inline]
    pub fn observer(&self) -> &ObserverCoeffs<T, N, P> {
        &self.observer
    }
}
