// Gains from an offline LQR / steady-state Kalman design at 10 ms.
// Regenerate all of a set together; mixing sets breaks closed-loop stability.

use crate::matrix::aliases::{Matrix1, Matrix1x2, Matrix2, Matrix2x1};
use crate::matrix::vector::ColumnVector1;
use crate::statespace::{
    ControllerCoeffs, ObserverCoeffs, PlantCoeffs, StateSpaceError, StateSpaceLoop,
};

const U_MIN: f64 = -12.0;
const U_MAX: f64 = 12.0;

fn voltage_limits() -> (ColumnVector1<f64>, ColumnVector1<f64>) {
    (
        ColumnVector1::from_column([U_MIN]),
        ColumnVector1::from_column([U_MAX]),
    )
}

// ── Position sensing ────────────────────────────────────────────────

/// Elevator plant, position measured.
pub fn make_elevator_plant_coeffs() -> Result<PlantCoeffs<f64, 2, 1, 1>, StateSpaceError> {
    PlantCoeffs::new(
        Matrix2::new([
            [1.0, 0.0038123917094548044],
            [0.0, 0.09251846318419062],
        ]),
        Matrix2x1::new([[0.000587130443210727], [0.08610920599650167]]),
        Matrix1x2::new([[1.0, 0.0]]),
        Matrix1::new([[0.0]]),
    )
}

/// LQR gain, feedforward and ±12 V limits for the position-sensing elevator.
pub fn make_elevator_controller_coeffs() -> Result<ControllerCoeffs<f64, 2, 1>, StateSpaceError> {
    let (u_min, u_max) = voltage_limits();
    ControllerCoeffs::new(
        Matrix1x2::new([[197.74500975121012, 1.5868649265235129]]),
        Matrix1x2::new([[27.107309014237973, 9.9389704745734]]),
        u_min,
        u_max,
    )
}

/// Observer gain for the position-sensing elevator.
pub fn make_elevator_observer_coeffs() -> Result<ObserverCoeffs<f64, 2, 1>, StateSpaceError> {
    ObserverCoeffs::new(Matrix2x1::new([
        [0.9999757217645118],
        [0.6994463408695476],
    ]))
}

/// Complete position-sensing elevator loop, idle with a zero estimate.
pub fn make_elevator_loop() -> Result<StateSpaceLoop<f64, 2, 1, 1>, StateSpaceError> {
    Ok(StateSpaceLoop::new(
        make_elevator_plant_coeffs()?,
        make_elevator_controller_coeffs()?,
        make_elevator_observer_coeffs()?,
    ))
}

// ── Position + velocity sensing ─────────────────────────────────────

/// Elevator plant, position and velocity measured.
pub fn make_elevator_kf_plant_coeffs() -> Result<PlantCoeffs<f64, 2, 1, 2>, StateSpaceError> {
    PlantCoeffs::new(
        Matrix2::new([
            [1.0, 0.0003360854456897485],
            [0.0, 1.196341385291671e-13],
        ]),
        Matrix2x1::new([[0.0001833981134224514], [0.01897762158302933]]),
        Matrix2::eye(),
        Matrix2x1::zeros(),
    )
}

/// LQR gain, feedforward and ±12 V limits for the dual-sensing elevator.
pub fn make_elevator_kf_controller_coeffs(
) -> Result<ControllerCoeffs<f64, 2, 1>, StateSpaceError> {
    let (u_min, u_max) = voltage_limits();
    ControllerCoeffs::new(
        Matrix1x2::new([[496.33196305989753, 0.16680994901646984]]),
        Matrix1x2::new([[49.40964192567784, 12.781994720667953]]),
        u_min,
        u_max,
    )
}

/// Steady-state Kalman gain for the dual-sensing elevator.
pub fn make_elevator_kf_observer_coeffs() -> Result<ObserverCoeffs<f64, 2, 2>, StateSpaceError> {
    ObserverCoeffs::new(Matrix2::new([
        [0.32792156109672227, 1.0800339822309741e-20],
        [1.0800339822306136e-24, 0.9996001599360256],
    ]))
}

/// Complete dual-sensing elevator loop, idle with a zero estimate.
pub fn make_elevator_kf_loop() -> Result<StateSpaceLoop<f64, 2, 1, 2>, StateSpaceError> {
    Ok(StateSpaceLoop::new(
        make_elevator_kf_plant_coeffs()?,
        make_elevator_kf_controller_coeffs()?,
        make_elevator_kf_observer_coeffs()?,
    ))
}
