//! # statespace
//!
//! Discrete-time state-space control for embedded mechanisms, no-std
//! compatible. A loop owns a linear plant model, an LQR feedback gain with
//! feedforward and input saturation, and a steady-state observer, and runs
//! correct → control → predict once per sample period with no heap allocation.
//!
//! ## Quick start
//!
//! ```
//! use statespace::elevator::make_elevator_loop;
//! use statespace::ColumnVector;
//!
//! let mut ss = make_elevator_loop().unwrap();
//! ss.set_reference(ColumnVector::from_column([1.0, 0.0]));
//!
//! // One cycle: measured position in, motor voltage out
//! let u = ss.update(&ColumnVector::from_column([0.0]));
//! assert!(u[0] <= 12.0);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: Fixed-size `Matrix<T, M, N>` with const-generic dimensions,
//!   stack-allocated. [`ColumnVector<T, N>`] is the N×1 alias used for states,
//!   inputs, outputs and references.
//!
//! - [`dynmatrix`]: Heap-allocated `DynMatrix<T>` with runtime dimensions
//!   (requires `alloc`, included with `std`). Converts into a fixed `Matrix`
//!   only when the shapes agree.
//!
//! - [`statespace`]: `PlantCoeffs`, `ControllerCoeffs`, `ObserverCoeffs`,
//!   the `StateSpaceLoop` that composes them, and a `Plant` simulator.
//!
//! - [`profile`]: Trapezoidal motion profiles for generating references.
//!
//! - [`elevator`]: Coefficient sets for an elevator (position-only and
//!   position + velocity sensing) and an `ElevatorController` that drives a
//!   loop from a motion profile.
//!
//! - [`traits`]: Element traits: [`Scalar`] for all matrix elements,
//!   [`FloatScalar`] for the real floats the control code runs on.
//!
//! ## Cargo features
//!
//! | Feature | Default  | Description |
//! |---------|----------|-------------|
//! | `std`   | yes      | Implies `alloc`. Hardware FPU via system libm, `std::error::Error` impls |
//! | `alloc` | via std  | `DynMatrix` and the `try_from_dyn` constructors |
//!
//! Logging goes through the `log` facade; nothing is printed unless the
//! application installs a logger.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
pub mod dynmatrix;
pub mod elevator;
pub mod matrix;
pub mod profile;
pub mod statespace;
pub mod traits;

pub use matrix::aliases::{Matrix1, Matrix1x2, Matrix2, Matrix2x1};
pub use matrix::vector::{ColumnVector, ColumnVector1, ColumnVector2};
pub use matrix::Matrix;
#[cfg(feature = "alloc")]
pub use dynmatrix::{DimensionMismatch, DynMatrix};
pub use traits::{FloatScalar, Scalar};
