//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, letting
//! one observer drive both [`newton`] and [`ode`].
//!
//! # Event traits
//!
//! - [`HasResidual`]: events that carry a residual value
//! - [`HasStep`]: events that carry an iteration or step counter
//!
//! # Action traits
//!
//! - [`CanStopEarly`]: actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use recalc_core::Observer;
//! use recalc_observers::traits::{CanStopEarly, HasResidual};
//!
//! struct Tight {
//!     tolerance: f64,
//! }
//!
//! impl<E: HasResidual, A: CanStopEarly> Observer<E, A> for Tight {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.residual().abs() < self.tolerance).then(A::stop_early)
//!     }
//! }
//! ```

use recalc_solvers::{equation::newton, ode};

/// An event that carries a residual value.
pub trait HasResidual {
    /// Returns the residual for this event.
    fn residual(&self) -> f64;
}

/// An event that carries a step or iteration counter.
pub trait HasStep {
    /// Returns the counter for this event.
    fn step(&self) -> usize;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

// --- newton ---

impl HasResidual for newton::Event {
    fn residual(&self) -> f64 {
        self.residual
    }
}

impl HasStep for newton::Event {
    fn step(&self) -> usize {
        self.iter
    }
}

impl CanStopEarly for newton::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

// --- ode ---

impl<const N: usize> HasStep for ode::Event<N> {
    fn step(&self) -> usize {
        self.step
    }
}

impl CanStopEarly for ode::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
