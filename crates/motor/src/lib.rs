//! DC motor models for the ReCalc motion engine.
//!
//! - [`MotorSpec`] and [`Motor`]: nameplate data and the electrical constants
//!   derived from it
//! - [`MotorModel`]: the catalog of common motors, with winding inductance
//! - [`MotorRules`]: steady-state operating point at a fixed speed or current
//! - [`drive`]: current-limit conversion, battery sag, stall load, feedforward gains
//! - [`curve`]: speed sweeps under stator and supply limits
//! - [`dynamics`]: RK4 simulation of the motor including winding inductance
//!
//! # Features
//!
//! - `serde-derive`: derives `Serialize`/`Deserialize` for specs, requests,
//!   and samples so a simulation can be shipped to a worker as plain data.

mod catalog;
mod error;
mod motor;
mod rules;
mod spec;

pub mod curve;
pub mod drive;
pub mod dynamics;

pub use catalog::MotorModel;
pub use error::Error;
pub use motor::Motor;
pub use rules::{MotorRules, MotorState, Operating};
pub use spec::MotorSpec;
