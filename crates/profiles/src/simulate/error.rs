use thiserror::Error;

/// Errors from a simulated run.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The run did not finish within the configured budget.
    #[error("run did not finish within {max_samples} samples")]
    TooManySamples { max_samples: usize },
}
