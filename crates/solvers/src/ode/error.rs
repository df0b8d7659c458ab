use thiserror::Error;

/// Errors that can occur when setting up a fixed-step integration.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("resolution must be at least one step")]
    ZeroResolution,

    #[error("invalid time interval [{t0}, {t1}]: bounds must be finite with t1 > t0")]
    InvalidInterval { t0: f64, t1: f64 },
}
