//! Newton's method for scalar equations with an analytic derivative.
//!
//! Each iteration applies the update
//!
//! ```text
//! x_{n+1} = x_n - f(x_n) / f'(x_n)
//! ```
//!
//! and stops once `|x_{n+1} - x_n|` falls below [`Config::x_abs_tol`].
//! The solver never brackets or falls back: a flat derivative, a non-finite
//! evaluation, or running out of iterations are all reported as errors.
//!
//! # Example
//!
//! ```
//! use recalc_core::RootProblem;
//! use recalc_solvers::equation::newton;
//!
//! struct Sqrt2;
//!
//! impl RootProblem for Sqrt2 {
//!     fn residual(&self, x: f64) -> f64 {
//!         x * x - 2.0
//!     }
//!     fn derivative(&self, x: f64) -> f64 {
//!         2.0 * x
//!     }
//! }
//!
//! let solution = newton::solve_unobserved(&Sqrt2, 1.0, &newton::Config::default()).unwrap();
//! assert!((solution.x - 2.0_f64.sqrt()).abs() < 1e-9);
//! ```

mod action;
mod config;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use recalc_core::{Observer, RootProblem};

/// Finds a root of `problem` starting from `x0`.
///
/// # Observer
///
/// The observer receives an [`Event`] after every update and may return
/// [`Action::StopEarly`], in which case the solver returns the iterate the
/// event was computed from with [`Status::StoppedByObserver`].
///
/// # Errors
///
/// Returns an error if the derivative magnitude drops below
/// [`Config::min_derivative`], if the residual or derivative is not finite,
/// or if the iteration does not converge within [`Config::max_iters`].
pub fn solve<P, Obs>(
    problem: &P,
    x0: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    P: RootProblem,
    Obs: Observer<Event, Action>,
{
    let mut x = x0;

    for iter in 1..=config.max_iters() {
        let residual = problem.residual(x);
        let derivative = problem.derivative(x);

        if !residual.is_finite() || !derivative.is_finite() {
            log::debug!("newton: non-finite evaluation at x = {x}");
            return Err(Error::NonFinite {
                x,
                residual,
                derivative,
            });
        }
        if derivative.abs() < config.min_derivative() {
            log::debug!("newton: flat derivative {derivative:e} at x = {x}");
            return Err(Error::FlatDerivative { x, derivative });
        }

        let next_x = x - residual / derivative;

        let event = Event {
            iter,
            x,
            residual,
            derivative,
            next_x,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                x,
                residual,
                iters: iter,
            });
        }

        if (next_x - x).abs() < config.x_abs_tol() {
            log::trace!("newton: converged to {next_x} after {iter} iterations");
            return Ok(Solution {
                status: Status::Converged,
                x: next_x,
                residual: problem.residual(next_x),
                iters: iter,
            });
        }

        x = next_x;
    }

    log::debug!(
        "newton: no convergence after {} iterations (x = {x})",
        config.max_iters()
    );
    Err(Error::MaxIters {
        iters: config.max_iters(),
        x,
    })
}

/// Finds a root of `problem` without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<P: RootProblem>(
    problem: &P,
    x0: f64,
    config: &Config,
) -> Result<Solution, Error> {
    solve(problem, x0, config, ())
}
