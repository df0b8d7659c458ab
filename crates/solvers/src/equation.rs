//! Solvers for scalar equations `f(x) = 0`.
//!
//! Problems implement [`RootProblem`], supplying both the residual and its
//! derivative.
//!
//! # Solvers
//!
//! - [`newton`]: quadratic convergence near a simple root, no bracketing
//!
//! [`RootProblem`]: recalc_core::RootProblem

pub mod newton;
