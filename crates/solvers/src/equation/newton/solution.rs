/// Indicates how a successful Newton solve finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The update step fell below the configured tolerance.
    Converged,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a Newton solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,

    /// Root estimate.
    pub x: f64,

    /// Residual at the root estimate.
    pub residual: f64,

    /// Iteration count when the solver finished.
    pub iters: usize,
}

impl Solution {
    /// Returns the root if the solver converged.
    #[must_use]
    pub fn root(&self) -> Option<f64> {
        match self.status {
            Status::Converged => Some(self.x),
            Status::StoppedByObserver => None,
        }
    }
}
