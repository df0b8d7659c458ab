//! Fixed-step integrators for vector ODEs.
//!
//! An [`Integrator`] divides `[t0, t1]` into `resolution` equal steps of
//! size `h = (t1 - t0) / resolution` and advances the state with one of the
//! schemes in [`Method`].
//!
//! # Early stopping
//!
//! The vector field can ask to halt by returning [`Rates::stop`]. If that
//! happens at any evaluation while computing point `k + 1` from point `k`,
//! integration ends and the trajectory is truncated to points `0..k`: the
//! state the step started from is dropped along with the step itself. This
//! rule applies to every method, so an Euler or midpoint run stops exactly
//! where an RK4 run with the same field would.
//!
//! # Example
//!
//! ```
//! use recalc_core::Rates;
//! use recalc_solvers::ode::{Integrator, Status};
//!
//! let integrator = Integrator::new([1.0], 0.0, 1.0).unwrap();
//! let solution = integrator
//!     .rk4(|_t: f64, y: &[f64; 1]| Rates::new([-y[0]]), 100)
//!     .unwrap();
//!
//! assert_eq!(solution.status, Status::Complete);
//! assert_eq!(solution.len(), 101);
//! ```
//!
//! [`Rates::stop`]: recalc_core::Rates::stop

mod action;
mod error;
mod event;
mod method;
mod solution;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use method::Method;
pub use solution::{Solution, Status};

use recalc_core::{Observer, VectorField};

/// A fixed-step initial value problem over `[t0, t1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator<const N: usize> {
    y0: [f64; N],
    t0: f64,
    t1: f64,
}

impl<const N: usize> Integrator<N> {
    /// Creates an integrator starting from `y0` at `t0`.
    ///
    /// A `y0` containing NaN is accepted with a warning; the NaN propagates
    /// through the trajectory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] unless both bounds are finite and
    /// `t1 > t0`.
    pub fn new(y0: [f64; N], t0: f64, t1: f64) -> Result<Self, Error> {
        if !t0.is_finite() || !t1.is_finite() || t1 <= t0 {
            return Err(Error::InvalidInterval { t0, t1 });
        }
        if y0.iter().any(|y| y.is_nan()) {
            log::warn!("initial state contains NaN: {y0:?}");
        }

        Ok(Self { y0, t0, t1 })
    }

    /// Returns the initial state.
    #[must_use]
    pub fn y0(&self) -> &[f64; N] {
        &self.y0
    }

    /// Returns the time bounds `(t0, t1)`.
    #[must_use]
    pub fn interval(&self) -> (f64, f64) {
        (self.t0, self.t1)
    }

    /// Integrates with forward Euler.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroResolution`] if `resolution` is zero.
    pub fn euler<F: VectorField<N>>(&self, field: F, resolution: usize) -> Result<Solution<N>, Error> {
        self.solve(Method::Euler, field, resolution, ())
    }

    /// Integrates with the explicit midpoint method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroResolution`] if `resolution` is zero.
    pub fn midpoint<F: VectorField<N>>(
        &self,
        field: F,
        resolution: usize,
    ) -> Result<Solution<N>, Error> {
        self.solve(Method::Midpoint, field, resolution, ())
    }

    /// Integrates with classical fourth-order Runge-Kutta.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroResolution`] if `resolution` is zero.
    pub fn rk4<F: VectorField<N>>(&self, field: F, resolution: usize) -> Result<Solution<N>, Error> {
        self.solve(Method::Rk4, field, resolution, ())
    }

    /// Integrates with the given method.
    ///
    /// # Algorithm
    ///
    /// 1. Record `(t0, y0)` and emit it as step 0.
    /// 2. For each step `k` in `0..resolution`:
    ///    - Advance point `k` by `h` with `method`.
    ///    - If the field asked to stop, truncate to points `0..k` and return
    ///      with [`Status::StoppedEarly`].
    ///    - Record point `k + 1` at `t0 + (k + 1) * h` and emit it.
    ///    - If the observer returns [`Action::StopEarly`], return with
    ///      [`Status::StoppedByObserver`].
    /// 3. Return all `resolution + 1` points with [`Status::Complete`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroResolution`] if `resolution` is zero.
    pub fn solve<F, Obs>(
        &self,
        method: Method,
        mut field: F,
        resolution: usize,
        mut observer: Obs,
    ) -> Result<Solution<N>, Error>
    where
        F: VectorField<N>,
        Obs: Observer<Event<N>, Action>,
    {
        if resolution == 0 {
            return Err(Error::ZeroResolution);
        }

        #[allow(clippy::cast_precision_loss)]
        let h = (self.t1 - self.t0) / resolution as f64;
        #[allow(clippy::cast_precision_loss)]
        let time_at = |k: usize| self.t0 + k as f64 * h;

        let mut ts = Vec::with_capacity(resolution + 1);
        let mut ys = Vec::with_capacity(resolution + 1);
        ts.push(self.t0);
        ys.push(self.y0);

        let event = Event {
            step: 0,
            t: self.t0,
            y: self.y0,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                ts,
                ys,
            });
        }

        for k in 0..resolution {
            let Some(next) = method.step(&mut field, time_at(k), &ys[k], h) else {
                log::debug!("{method:?}: stop requested during step {k}, keeping {k} points");
                ts.truncate(k);
                ys.truncate(k);
                return Ok(Solution {
                    status: Status::StoppedEarly,
                    ts,
                    ys,
                });
            };

            let t = time_at(k + 1);
            ts.push(t);
            ys.push(next);

            let event = Event {
                step: k + 1,
                t,
                y: next,
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                return Ok(Solution {
                    status: Status::StoppedByObserver,
                    ts,
                    ys,
                });
            }
        }

        Ok(Solution {
            status: Status::Complete,
            ts,
            ys,
        })
    }
}
