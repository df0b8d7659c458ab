//! Reusable observers for the ReCalc solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across the Newton root finder and the fixed-step ODE integrator.
//!
//! # Modules
//!
//! - [`traits`]: capability traits for cross-solver observers
//!   ([`HasResidual`], [`HasStep`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`LogObserver`]: logs every event through the `log` facade
//! - [`StopAfter`]: stops a solver once a step count is reached
//! - [`GoodEnough`]: stops a root finder once the residual is small enough
//!
//! [`Observer`]: recalc_core::Observer
//! [`HasResidual`]: traits::HasResidual
//! [`HasStep`]: traits::HasStep
//! [`CanStopEarly`]: traits::CanStopEarly

mod logging;
mod stop;

pub mod traits;

pub use logging::LogObserver;
pub use stop::{GoodEnough, StopAfter};
