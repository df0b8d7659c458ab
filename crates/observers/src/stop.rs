use recalc_core::Observer;

use crate::traits::{CanStopEarly, HasResidual, HasStep};

/// Stops a solver once an event reports a step of at least `max_step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopAfter {
    max_step: usize,
}

impl StopAfter {
    #[must_use]
    pub fn new(max_step: usize) -> Self {
        Self { max_step }
    }
}

impl<E: HasStep, A: CanStopEarly> Observer<E, A> for StopAfter {
    fn observe(&mut self, event: &E) -> Option<A> {
        (event.step() >= self.max_step).then(A::stop_early)
    }
}

/// Stops a root finder once the residual magnitude drops below `tolerance`.
///
/// The check is skipped until `min_iters` events have been seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoodEnough {
    tolerance: f64,
    min_iters: usize,
    seen: usize,
}

impl GoodEnough {
    #[must_use]
    pub fn new(tolerance: f64, min_iters: usize) -> Self {
        Self {
            tolerance,
            min_iters,
            seen: 0,
        }
    }
}

impl<E: HasResidual, A: CanStopEarly> Observer<E, A> for GoodEnough {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.seen += 1;
        (self.seen >= self.min_iters && event.residual().abs() < self.tolerance)
            .then(A::stop_early)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use recalc_core::{Rates, RootProblem};
    use recalc_solvers::{equation::newton, ode};

    use crate::LogObserver;

    struct Cube;

    impl RootProblem for Cube {
        fn residual(&self, x: f64) -> f64 {
            x * x * x - 8.0
        }

        fn derivative(&self, x: f64) -> f64 {
            3.0 * x * x
        }
    }

    #[test]
    fn stop_after_limits_integration() {
        let integrator = ode::Integrator::new([0.0], 0.0, 1.0).unwrap();

        let solution = integrator
            .solve(
                ode::Method::Rk4,
                |_t: f64, _y: &[f64; 1]| Rates::new([1.0]),
                100,
                StopAfter::new(5),
            )
            .unwrap();

        assert_eq!(solution.status, ode::Status::StoppedByObserver);
        assert_eq!(solution.len(), 6);
        assert_relative_eq!(solution.ys[5][0], 0.05, epsilon = 1e-12);
    }

    #[test]
    fn good_enough_stops_newton_before_tolerance() {
        let config = newton::Config::default();

        let solution = newton::solve(&Cube, 3.0, &config, GoodEnough::new(1e-3, 1)).unwrap();

        assert_eq!(solution.status, newton::Status::StoppedByObserver);
        assert!(solution.residual.abs() < 1e-3);
        assert_relative_eq!(solution.x, 2.0, epsilon = 1e-3);
    }

    #[test]
    fn log_observer_never_acts() {
        let config = newton::Config::default();

        let solution = newton::solve(&Cube, 3.0, &config, LogObserver::default()).unwrap();

        assert_eq!(solution.status, newton::Status::Converged);
        assert_relative_eq!(solution.x, 2.0, epsilon = 1e-9);
    }
}
