//! Trapezoidal motion profiles.
//!
//! A profile turns a move from one `[position, velocity]` state to another
//! into a reference trajectory that respects velocity and acceleration limits:
//! accelerate at the limit, cruise at the velocity limit, decelerate at the
//! limit. Short moves that never reach the velocity limit become triangles.
//! Sampling the profile every control period gives the loop a reference it
//! can actually follow instead of a step it can only saturate against.
//!
//! # Example
//!
//! ```
//! use statespace::profile::{Constraints, ProfileState, TrapezoidalProfile};
//!
//! let profile = TrapezoidalProfile::new(
//!     Constraints::new(1.0_f64, 2.0),
//!     ProfileState::new(1.0, 0.0),
//!     ProfileState::new(0.0, 0.0),
//! ).unwrap();
//!
//! // 0.5 s accelerating, 0.5 s cruising, 0.5 s decelerating
//! assert!((profile.total_time() - 1.5).abs() < 1e-12);
//! let mid = profile.sample(0.75);
//! assert!((mid.velocity - 1.0).abs() < 1e-12);
//! assert_eq!(profile.sample(2.0), ProfileState::new(1.0, 0.0));
//! ```

use crate::traits::FloatScalar;

/// Errors from profile construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileError {
    /// Velocity or acceleration limit is not finite and positive.
    InvalidConstraints,
    /// Initial or goal state holds NaN or infinity.
    NonFiniteState,
}

impl core::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProfileError::InvalidConstraints => {
                write!(f, "velocity and acceleration limits must be finite and positive")
            }
            ProfileError::NonFiniteState => write!(f, "profile states must be finite"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProfileError {}

/// Velocity and acceleration limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints<T> {
    /// Largest speed the profile commands.
    pub max_velocity: T,
    /// Largest acceleration magnitude the profile commands.
    pub max_acceleration: T,
}

impl<T: FloatScalar> Constraints<T> {
    /// Bundle a velocity and acceleration limit.
    pub fn new(max_velocity: T, max_acceleration: T) -> Self {
        Self {
            max_velocity,
            max_acceleration,
        }
    }

    fn is_valid(&self) -> bool {
        let ok = |v: T| v.is_finite() && v > T::zero();
        ok(self.max_velocity) && ok(self.max_acceleration)
    }
}

/// A point on a profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileState<T> {
    /// Position.
    pub position: T,
    /// Velocity.
    pub velocity: T,
}

impl<T: FloatScalar> ProfileState<T> {
    /// A state at `position` moving at `velocity`.
    pub fn new(position: T, velocity: T) -> Self {
        Self { position, velocity }
    }

    fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    fn scaled(self, direction: T) -> Self {
        Self::new(self.position * direction, self.velocity * direction)
    }
}

/// Trapezoidal profile between two states.
///
/// The move is solved once at construction; [`sample`](Self::sample) is a
/// handful of multiplies. Times are measured from the start of the move.
/// Moves toward lower positions are solved as mirrored positive moves.
/// The goal velocity is assumed to be zero or in the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidalProfile<T> {
    constraints: Constraints<T>,
    direction: T,
    // Initial and goal states mirrored into the positive direction.
    initial: ProfileState<T>,
    goal: ProfileState<T>,

    end_accel: T,
    end_full_speed: T,
    end_decel: T,
}

impl<T: FloatScalar> TrapezoidalProfile<T> {
    /// Solve a move from `initial` to `goal` under `constraints`.
    ///
    /// An initial speed above the velocity limit is clipped to the limit. An
    /// initial velocity is always carried into the move: a start moving away
    /// from the goal, or too fast to stop before it, first brakes and then
    /// heads back, so position is continuous from `t = 0`.
    ///
    /// Returns `ProfileError::InvalidConstraints` for non-positive or
    /// non-finite limits and `ProfileError::NonFiniteState` for non-finite states.
    pub fn new(
        constraints: Constraints<T>,
        goal: ProfileState<T>,
        initial: ProfileState<T>,
    ) -> Result<Self, ProfileError> {
        if !constraints.is_valid() {
            return Err(ProfileError::InvalidConstraints);
        }
        if !goal.is_finite() || !initial.is_finite() {
            return Err(ProfileError::NonFiniteState);
        }

        let max_v = constraints.max_velocity;
        let max_a = constraints.max_acceleration;
        let two = T::one() + T::one();

        let mut initial = initial;
        initial.velocity = initial.velocity.max(-max_v).min(max_v);

        // Solve toward the goal as seen from where braking at the limit would
        // stop. A start that cannot stop before the goal passes through it and
        // comes back, so the move is solved in the opposite direction.
        let stop = initial.position + initial.velocity * initial.velocity.abs() / (two * max_a);
        let direction = if goal.position < stop {
            -T::one()
        } else {
            T::one()
        };
        let initial = initial.scaled(direction);
        let goal = goal.scaled(direction);

        // Time/distance the initial and goal velocities "borrow" from a
        // full trapezoid starting and ending at rest.
        let cutoff_begin = initial.velocity / max_a;
        let cutoff_dist_begin = cutoff_begin * cutoff_begin * max_a / two;
        let cutoff_end = goal.velocity / max_a;
        let cutoff_dist_end = cutoff_end * cutoff_end * max_a / two;

        let full_trapezoid_dist =
            cutoff_dist_begin + (goal.position - initial.position) + cutoff_dist_end;
        let mut accel_time = max_v / max_a;
        let mut full_speed_dist = full_trapezoid_dist - accel_time * accel_time * max_a;

        // Triangle: the velocity limit is never reached
        if full_speed_dist < T::zero() {
            accel_time = (full_trapezoid_dist / max_a).max(T::zero()).sqrt();
            full_speed_dist = T::zero();
        }

        let end_accel = (accel_time - cutoff_begin).max(T::zero());
        let end_full_speed = end_accel + full_speed_dist / max_v;
        let end_decel = (end_full_speed + accel_time - cutoff_end).max(end_full_speed);

        Ok(Self {
            constraints,
            direction,
            initial,
            goal,
            end_accel,
            end_full_speed,
            end_decel,
        })
    }

    /// State at time `t` after the start of the move.
    ///
    /// Times at or before zero give the initial state; times at or after
    /// [`total_time`](Self::total_time) give the goal.
    pub fn sample(&self, t: T) -> ProfileState<T> {
        let max_v = self.constraints.max_velocity;
        let max_a = self.constraints.max_acceleration;
        let two = T::one() + T::one();
        let v0 = self.initial.velocity;

        let directed = if t <= T::zero() {
            self.initial
        } else if t < self.end_accel {
            ProfileState::new(
                self.initial.position + (v0 + t * max_a / two) * t,
                v0 + t * max_a,
            )
        } else if t < self.end_full_speed {
            let accel_dist = (v0 + self.end_accel * max_a / two) * self.end_accel;
            ProfileState::new(
                self.initial.position + accel_dist + max_v * (t - self.end_accel),
                max_v,
            )
        } else if t < self.end_decel {
            let time_left = self.end_decel - t;
            ProfileState::new(
                self.goal.position - (self.goal.velocity + time_left * max_a / two) * time_left,
                self.goal.velocity + time_left * max_a,
            )
        } else {
            self.goal
        };

        directed.scaled(self.direction)
    }

    /// Duration of the move.
    #[inline]
    pub fn total_time(&self) -> T {
        self.end_decel
    }

    /// `true` once `t` has reached the end of the move.
    #[inline]
    pub fn is_finished(&self, t: T) -> bool {
        t >= self.end_decel
    }

    /// Limits the profile was solved with.
    #[inline]
    pub fn constraints(&self) -> &Constraints<T> {
        &self.constraints
    }

    /// Where the move ends.
    pub fn goal(&self) -> ProfileState<T> {
        self.goal.scaled(self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    fn at_rest(p: f64) -> ProfileState<f64> {
        ProfileState::new(p, 0.0)
    }

    #[test]
    fn full_trapezoid_timing() {
        // v=1, a=2: accel 0.5 s covers 0.25, decel covers 0.25, cruise 0.5 s
        let p = TrapezoidalProfile::new(Constraints::new(1.0, 2.0), at_rest(1.0), at_rest(0.0))
            .unwrap();
        assert_near(p.total_time(), 1.5, TOL, "total time");

        let s = p.sample(0.25);
        assert_near(s.velocity, 0.5, TOL, "accelerating velocity");
        assert_near(s.position, 0.0625, TOL, "accelerating position");

        let s = p.sample(0.75);
        assert_near(s.velocity, 1.0, TOL, "cruise velocity");
        assert_near(s.position, 0.5, TOL, "cruise position");

        let s = p.sample(1.25);
        assert_near(s.velocity, 0.5, TOL, "decelerating velocity");
        assert_near(s.position, 1.0 - 0.0625, TOL, "decelerating position");
    }

    #[test]
    fn reaches_goal_and_stays() {
        let p = TrapezoidalProfile::new(Constraints::new(1.133, 1.5), at_rest(0.77), at_rest(0.03))
            .unwrap();
        let end = p.sample(p.total_time());
        assert_near(end.position, 0.77, TOL, "goal position");
        assert_near(end.velocity, 0.0, TOL, "goal velocity");
        assert_eq!(p.sample(p.total_time() + 10.0), at_rest(0.77));
        assert!(p.is_finished(p.total_time()));
        assert!(!p.is_finished(0.5 * p.total_time()));
    }

    #[test]
    fn before_start_is_initial() {
        let p = TrapezoidalProfile::new(Constraints::new(1.0, 1.0), at_rest(2.0), at_rest(0.5))
            .unwrap();
        assert_eq!(p.sample(0.0), at_rest(0.5));
        assert_eq!(p.sample(-1.0), at_rest(0.5));
    }

    #[test]
    fn triangle_never_reaches_limit() {
        // Distance 0.1 with a=1 peaks at sqrt(0.1) ≈ 0.316 < 1
        let p = TrapezoidalProfile::new(Constraints::new(1.0, 1.0), at_rest(0.1), at_rest(0.0))
            .unwrap();
        assert_near(p.total_time(), 2.0 * 0.1_f64.sqrt(), TOL, "triangle time");
        let peak = p.sample(0.5 * p.total_time());
        assert_near(peak.velocity, 0.1_f64.sqrt(), 1e-6, "triangle peak");
        assert_near(peak.position, 0.05, 1e-6, "triangle midpoint");
    }

    #[test]
    fn respects_velocity_limit_and_is_continuous() {
        let c = Constraints::new(0.8, 3.0);
        let p = TrapezoidalProfile::new(c, at_rest(1.7), at_rest(-0.4)).unwrap();
        let dt = 0.001;
        let mut prev = p.sample(0.0);
        let steps = (p.total_time() / dt) as usize + 10;
        for k in 1..steps {
            let s = p.sample(k as f64 * dt);
            assert!(s.velocity <= c.max_velocity + 1e-12, "velocity limit at step {k}");
            assert!(s.velocity >= -1e-12, "velocity sign at step {k}");
            assert!(
                (s.position - prev.position).abs() <= c.max_velocity * dt + 1e-9,
                "position jump at step {k}"
            );
            assert!(
                (s.velocity - prev.velocity).abs() <= c.max_acceleration * dt + 1e-9,
                "velocity jump at step {k}"
            );
            prev = s;
        }
        assert_near(prev.position, 1.7, TOL, "end position");
    }

    #[test]
    fn negative_move_mirrors_positive() {
        let c = Constraints::new(1.0, 2.0);
        let up = TrapezoidalProfile::new(c, at_rest(1.0), at_rest(0.0)).unwrap();
        let down = TrapezoidalProfile::new(c, at_rest(-1.0), at_rest(0.0)).unwrap();
        assert_near(up.total_time(), down.total_time(), TOL, "same duration");
        for k in 0..=15 {
            let t = k as f64 * 0.1;
            let a = up.sample(t);
            let b = down.sample(t);
            assert_near(a.position, -b.position, TOL, "mirrored position");
            assert_near(a.velocity, -b.velocity, TOL, "mirrored velocity");
        }
        assert_eq!(down.goal(), at_rest(-1.0));
    }

    #[test]
    fn starts_from_initial_velocity() {
        // Already cruising at the limit: no acceleration phase
        let c = Constraints::new(1.0, 2.0);
        let p = TrapezoidalProfile::new(c, at_rest(1.0), ProfileState::new(0.0, 1.0)).unwrap();
        assert_near(p.sample(0.1).velocity, 1.0, TOL, "cruising from start");
        // 0.75 m of cruise + 0.5 s of decel
        assert_near(p.total_time(), 1.25, TOL, "total time");
    }

    #[test]
    fn initial_speed_above_limit_is_clipped() {
        let c = Constraints::new(1.0, 2.0);
        let p = TrapezoidalProfile::new(c, at_rest(5.0), ProfileState::new(0.0, 3.0)).unwrap();
        assert_near(p.sample(0.0).velocity, 1.0, TOL, "clipped initial speed");
    }

    /// Walk the profile at 1 ms and check that nothing jumps, the speed limit
    /// holds, and the move ends at the goal.
    fn assert_smooth(p: &TrapezoidalProfile<f64>, start: ProfileState<f64>) {
        let c = *p.constraints();
        let dt = 0.001;
        let mut prev = p.sample(0.0);
        assert_eq!(prev, start);
        let steps = (p.total_time() / dt) as usize + 10;
        for k in 1..steps {
            let s = p.sample(k as f64 * dt);
            assert!(s.velocity.abs() <= c.max_velocity + 1e-12, "speed at step {k}");
            assert!(
                (s.position - prev.position).abs() <= c.max_velocity * dt + 1e-9,
                "position jump at step {k}: {} -> {}",
                prev.position,
                s.position
            );
            assert!(
                (s.velocity - prev.velocity).abs() <= c.max_acceleration * dt + 1e-9,
                "velocity jump at step {k}: {} -> {}",
                prev.velocity,
                s.velocity
            );
            prev = s;
        }
        assert_eq!(prev, p.goal());
    }

    #[test]
    fn too_fast_to_stop_passes_goal_and_returns() {
        // Braking from 0.762 m/s at 1.143 m/s² takes 0.254 m, goal is 0.1 m away
        let c = Constraints::new(0.762, 1.143);
        let start = ProfileState::new(0.0, 0.762);
        let p = TrapezoidalProfile::new(c, at_rest(0.1), start).unwrap();
        assert_smooth(&p, start);

        let early = p.sample(0.01);
        assert!(early.position > 0.0, "keeps moving forward at first");
        assert!(early.velocity > 0.0 && early.velocity < 0.762, "braking");

        let peak = (0..1400)
            .map(|k| p.sample(k as f64 * 0.001).position)
            .fold(f64::MIN, f64::max);
        assert_near(peak, 0.254, 1e-4, "stops where braking ends");
    }

    #[test]
    fn too_fast_to_stop_moving_down() {
        let c = Constraints::new(0.762, 1.143);
        let start = ProfileState::new(0.5, -0.6);
        let p = TrapezoidalProfile::new(c, at_rest(0.45), start).unwrap();
        assert_smooth(&p, start);
        assert!(p.sample(0.01).position < 0.5);
    }

    #[test]
    fn moving_away_turns_around() {
        let c = Constraints::new(0.762, 1.143);
        let start = ProfileState::new(0.5, -0.5);
        let p = TrapezoidalProfile::new(c, at_rest(1.0), start).unwrap();
        assert_smooth(&p, start);
        // Still heading down right after the start
        assert!(p.sample(0.01).position < 0.5);

        let start = ProfileState::new(0.5, 0.3);
        let p = TrapezoidalProfile::new(c, at_rest(0.0), start).unwrap();
        assert_smooth(&p, start);
        assert!(p.sample(0.01).position > 0.5);
    }

    #[test]
    fn zero_length_move() {
        let p = TrapezoidalProfile::new(Constraints::new(1.0, 1.0), at_rest(0.3), at_rest(0.3))
            .unwrap();
        assert_near(p.total_time(), 0.0, TOL, "no time needed");
        assert_eq!(p.sample(0.2), at_rest(0.3));
    }

    #[test]
    fn rejects_bad_constraints() {
        let goal = at_rest(1.0);
        let start = at_rest(0.0);
        for c in [
            Constraints::new(0.0, 1.0),
            Constraints::new(1.0, -1.0),
            Constraints::new(f64::INFINITY, 1.0),
            Constraints::new(1.0, f64::NAN),
        ] {
            assert_eq!(
                TrapezoidalProfile::new(c, goal, start).unwrap_err(),
                ProfileError::InvalidConstraints
            );
        }
    }

    #[test]
    fn rejects_non_finite_states() {
        let c = Constraints::new(1.0, 1.0);
        assert_eq!(
            TrapezoidalProfile::new(c, at_rest(f64::NAN), at_rest(0.0)).unwrap_err(),
            ProfileError::NonFiniteState
        );
    }

    #[test]
    fn f32_profile() {
        let p = TrapezoidalProfile::new(
            Constraints::new(1.0_f32, 2.0),
            ProfileState::new(1.0, 0.0),
            ProfileState::new(0.0, 0.0),
        )
        .unwrap();
        assert!((p.total_time() - 1.5).abs() < 1e-5);
    }
}
