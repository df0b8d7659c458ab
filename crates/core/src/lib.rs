//! Core traits and types for the ReCalc motion engine.
//!
//! This crate defines the shared abstractions that solvers, observers, and
//! the motor and profile crates build on:
//!
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`VectorField`] and [`Rates`]: an ODE right-hand side with a stop signal
//! - [`RootProblem`]: a scalar equation with an analytic derivative
//! - [`StepIntegrable`]: states that can be advanced by `derivative * delta`
//! - [`constraint`]: numeric invariants checked at construction

mod observer;
mod problems;
mod step;

pub mod constraint;

pub use observer::Observer;
pub use problems::{Rates, RootProblem, VectorField};
pub use step::{DerivativeOf, StepIntegrable};
