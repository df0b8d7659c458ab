use thiserror::Error;

/// Errors from planning or sampling a multi-phase profile.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The drive cannot overcome gravity at the current limit.
    #[error("drive cannot accelerate the load (net acceleration {acceleration} m/s²)")]
    CannotAccelerate { acceleration: f64 },

    /// Sampling never reached the target within the configured budget.
    #[error("profile did not finish within {max_samples} samples")]
    TooManySamples { max_samples: usize },
}
