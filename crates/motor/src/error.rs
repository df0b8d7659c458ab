use thiserror::Error;

use recalc_solvers::ode;

/// Errors produced by the motor crate.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The name does not match any catalogued motor.
    #[error("unknown motor {0:?}")]
    UnknownMotor(String),

    #[error("integration failed: {0}")]
    Integration(#[from] ode::Error),
}
