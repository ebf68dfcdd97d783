//! Simulate the elevator following a trapezoidal move and print CSV.
//!
//! ```sh
//! cargo run --example elevator_step > elevator.csv
//! cargo run --example elevator_step -- --kf --goal 0.6 > elevator_kf.csv
//! ```

use clap::Parser;
use statespace::elevator::{
    make_elevator_kf_loop, make_elevator_kf_plant_coeffs, make_elevator_loop,
    make_elevator_plant_coeffs, ElevatorController, Preset, ELEVATOR_DT,
};
use statespace::statespace::{Plant, PlantCoeffs, StateSpaceLoop};
use statespace::ColumnVector;

const DURATION: f64 = 4.0;

#[derive(Parser, Debug)]
#[command(name = "elevator_step")]
#[command(about = "Simulate a profiled elevator move and print CSV", long_about = None)]
struct Args {
    /// Use the position + velocity sensing coefficient set
    #[arg(long)]
    kf: bool,

    /// Goal height in meters (default: the high rocket preset)
    #[arg(short, long, allow_negative_numbers = true)]
    goal: Option<f64>,
}

fn run<const P: usize>(
    ss: StateSpaceLoop<f64, 2, 1, P>,
    coeffs: PlantCoeffs<f64, 2, 1, P>,
    goal: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut plant = Plant::new(coeffs);
    let mut elevator = ElevatorController::new(ss);
    elevator.set_goal(goal, 0.0)?;

    println!("t,reference_position,reference_velocity,position,velocity,estimated_position,estimated_velocity,voltage");
    let steps = (DURATION / ELEVATOR_DT).round() as usize;
    for k in 0..steps {
        let t = k as f64 * ELEVATOR_DT;
        let volts = elevator.update(plant.y(), t);
        plant.update(&ColumnVector::from_column([volts]));

        let r = elevator.state_space_loop().reference();
        println!(
            "{:.2},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.4}",
            t,
            r[0],
            r[1],
            plant.x()[0],
            plant.x()[1],
            elevator.position(),
            elevator.velocity(),
            volts
        );
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let goal = args.goal.unwrap_or_else(|| Preset::HighRocket.height());

    if args.kf {
        run(make_elevator_kf_loop()?, make_elevator_kf_plant_coeffs()?, goal)
    } else {
        run(make_elevator_loop()?, make_elevator_plant_coeffs()?, goal)
    }
}
