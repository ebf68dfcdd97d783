//! Elevator coefficient sets and a profiled elevator controller.
//!
//! Two parameterizations of the same mechanism, both discretized at
//! [`ELEVATOR_DT`] with states `[position (m), velocity (m/s)]` and a single
//! motor-voltage input limited to ±12 V:
//!
//! - `make_elevator_*`: position sensing only (`P = 1`).
//! - `make_elevator_kf_*`: position and velocity sensing (`P = 2`) with a
//!   steady-state Kalman gain.
//!
//! The factories are pure functions returning fresh values; nothing is shared
//! between the loops they build.
//!
//! # Example
//!
//! ```
//! use statespace::elevator::{make_elevator_kf_loop, ElevatorController, ELEVATOR_DT};
//! use statespace::ColumnVector;
//!
//! let mut elevator = ElevatorController::new(make_elevator_kf_loop().unwrap());
//! elevator.set_goal(0.5, 0.0).unwrap();
//!
//! let y = ColumnVector::from_column([0.0, 0.0]);
//! let volts = elevator.update(&y, ELEVATOR_DT);
//! assert!(volts > 0.0 && volts <= 12.0);
//! ```

mod coeffs;


pub use coeffs::{
    make_elevator_controller_coeffs, make_elevator_kf_controller_coeffs, make_elevator_kf_loop,
    make_elevator_kf_observer_coeffs, make_elevator_kf_plant_coeffs, make_elevator_loop,
    make_elevator_observer_coeffs, make_elevator_plant_coeffs,
};

use crate::matrix::vector::ColumnVector;
use crate::profile::{Constraints, ProfileError, ProfileState, TrapezoidalProfile};
use crate::statespace::StateSpaceLoop;

/// Sample period both elevator coefficient sets were derived for, in seconds.
pub const ELEVATOR_DT: f64 = 0.01;

/// Default motion limits: 30 in/s cruise, 45 in/s² acceleration.
pub const ELEVATOR_CONSTRAINTS: Constraints<f64> = Constraints {
    max_velocity: 0.762,
    max_acceleration: 1.143,
};

/// Position-sensing elevator loop.
pub type ElevatorLoop = StateSpaceLoop<f64, 2, 1, 1>;

/// Position + velocity sensing elevator loop.
pub type ElevatorKfLoop = StateSpaceLoop<f64, 2, 1, 2>;

/// Named heights of the powered first stage, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Minimum,
    PortalIntake,
    CargoShipHatch,
    LowRocket,
    MidRocket,
    HighRocket,
}

impl Preset {
    /// Height of the preset in meters.
    pub fn height(self) -> f64 {
        const INCH: f64 = 0.0254;
        match self {
            Preset::Minimum => 1.1 * INCH,
            Preset::PortalIntake => 2.4 * INCH,
            Preset::CargoShipHatch => 1.5 * INCH,
            Preset::LowRocket => 3.73 * INCH,
            Preset::MidRocket => 19.1 * INCH,
            Preset::HighRocket => 30.4 * INCH,
        }
    }
}

/// Elevator loop driven from a trapezoidal motion profile.
///
/// [`set_goal`](Self::set_goal) plans a move from the current estimate; each
/// [`update`](Self::update) samples the plan into the loop's reference and
/// runs one control cycle. `t` is whatever monotonic clock the caller ticks
/// at [`ELEVATOR_DT`]; only differences matter.
#[derive(Debug, Clone)]
pub struct ElevatorController<const P: usize> {
    ss: StateSpaceLoop<f64, 2, 1, P>,
    constraints: Constraints<f64>,
    profile: Option<TrapezoidalProfile<f64>>,
    profile_start: f64,
}

impl<const P: usize> ElevatorController<P> {
    /// Wrap an elevator loop, using [`ELEVATOR_CONSTRAINTS`] for moves.
    pub fn new(ss: StateSpaceLoop<f64, 2, 1, P>) -> Self {
        Self {
            ss,
            constraints: ELEVATOR_CONSTRAINTS,
            profile: None,
            profile_start: 0.0,
        }
    }

    /// Plan moves with `constraints` instead. Returns `self` for chaining.
    pub fn with_constraints(mut self, constraints: Constraints<f64>) -> Self {
        self.constraints = constraints;
        self
    }

    /// Plan a move to `position` (m), ending at rest, starting at time `t`.
    ///
    /// The move starts from the current estimate, so a goal change mid-move
    /// carries the present velocity into the new plan.
    pub fn set_goal(&mut self, position: f64, t: f64) -> Result<(), ProfileError> {
        let x_hat = self.ss.x_hat();
        let profile = TrapezoidalProfile::new(
            self.constraints,
            ProfileState::new(position, 0.0),
            ProfileState::new(x_hat[0], x_hat[1]),
        )?;
        log::debug!(
            "elevator: new goal {position:.3} m from {:.3} m, {:.2} s move",
            x_hat[0],
            profile.total_time()
        );
        self.profile = Some(profile);
        self.profile_start = t;
        Ok(())
    }

    /// Track a fixed `[position, velocity]` reference, dropping any profile.
    pub fn set_reference(&mut self, r: ColumnVector<f64, 2>) {
        self.profile = None;
        self.ss.set_reference(r);
    }

    /// Run one control cycle with measurement `y` at time `t`; returns volts.
    pub fn update(&mut self, y: &ColumnVector<f64, P>, t: f64) -> f64 {
        if let Some(profile) = &self.profile {
            let s = profile.sample(t - self.profile_start);
            self.ss
                .set_reference(ColumnVector::from_column([s.position, s.velocity]));
        }
        self.ss.update(y)[0]
    }

    /// `true` once the active profile has run out (or there is none).
    pub fn is_profile_finished(&self, t: f64) -> bool {
        self.profile
            .as_ref()
            .map_or(true, |p| p.is_finished(t - self.profile_start))
    }

    /// Last commanded voltage.
    #[inline]
    pub fn voltage(&self) -> f64 {
        self.ss.u()[0]
    }

    /// Estimated position (m).
    #[inline]
    pub fn position(&self) -> f64 {
        self.ss.x_hat()[0]
    }

    /// Estimated velocity (m/s).
    #[inline]
    pub fn velocity(&self) -> f64 {
        self.ss.x_hat()[1]
    }

    /// Drop the profile and reset the loop to idle.
    pub fn reset(&mut self) {
        self.profile = None;
        self.profile_start = 0.0;
        self.ss.reset();
    }

    /// Active motion profile, if any.
    #[inline]
    pub fn profile(&self) -> Option<&TrapezoidalProfile<f64>> {
        self.profile.as_ref()
    }

    /// Underlying loop.
    #[inline]
    pub fn state_space_loop(&self) -> &StateSpaceLoop<f64, 2, 1, P> {
        &self.ss
    }

    /// Underlying loop, mutably (e.g. to re-anchor the estimate).
    #[inline]
    pub fn state_space_loop_mut(&mut self) -> &mut StateSpaceLoop<f64, 2, 1, P> {
        &mut self.ss
    }
}
