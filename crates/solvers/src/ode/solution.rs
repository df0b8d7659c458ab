/// Indicates how the integrator terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Completed all requested steps.
    Complete,

    /// The vector field asked to stop; the trajectory is truncated.
    StoppedEarly,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a fixed-step integration.
///
/// `ts` and `ys` are parallel: `ys[i]` is the state at time `ts[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<const N: usize> {
    /// How the integrator terminated.
    pub status: Status,

    /// Time points, starting at `t0`.
    pub ts: Vec<f64>,

    /// State vectors, starting at `y0`.
    pub ys: Vec<[f64; N]>,
}

impl<const N: usize> Solution<N> {
    /// Returns the number of points in the trajectory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ts.len()
    }

    /// Returns `true` if no points were emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ts.is_empty()
    }

    /// Iterates over `(t, y)` pairs in time order.
    pub fn points(&self) -> impl Iterator<Item = (f64, &[f64; N])> {
        self.ts.iter().copied().zip(self.ys.iter())
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<(f64, &[f64; N])> {
        self.ts.last().copied().zip(self.ys.last())
    }
}
