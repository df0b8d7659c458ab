use thiserror::Error;

/// Reasons the Newton solver could not produce a root.
///
/// Every variant means "no root found"; callers must not substitute a
/// fallback value for the missing root.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("derivative {derivative:.3e} at x = {x} is too close to zero")]
    FlatDerivative { x: f64, derivative: f64 },

    #[error("non-finite residual {residual} or derivative {derivative} at x = {x}")]
    NonFinite {
        x: f64,
        residual: f64,
        derivative: f64,
    },

    #[error("no convergence after {iters} iterations (last x = {x})")]
    MaxIters { iters: usize, x: f64 },
}
