//! Numerical solvers for the ReCalc motion engine.
//!
//! - [`ode`]: fixed-step Euler, midpoint, and RK4 integration with early stopping
//! - [`equation::newton`]: Newton's method for scalar equations
//!
//! Solvers accept an [`Observer`](recalc_core::Observer) that receives an event
//! per iteration and may stop the solver early.

pub mod equation;
pub mod ode;
