use approx::assert_relative_eq;
use integration_tests::init_logging;
use log::Level;
use recalc_core::{Rates, RootProblem};
use recalc_observers::{GoodEnough, LogObserver, StopAfter};
use recalc_solvers::{
    equation::newton,
    ode::{self, Integrator, Method},
};

/// `cos(x) = x`, a root near 0.739.
struct Dottie;

impl RootProblem for Dottie {
    fn residual(&self, x: f64) -> f64 {
        x.cos() - x
    }

    fn derivative(&self, x: f64) -> f64 {
        -x.sin() - 1.0
    }
}

fn decay(_t: f64, y: &[f64; 1]) -> Rates<1> {
    Rates::new([-y[0]])
}

#[test]
fn logging_observer_leaves_results_unchanged() {
    init_logging();
    let integrator = Integrator::new([1.0], 0.0, 1.0).unwrap();

    let logged = integrator
        .solve(Method::Rk4, decay, 100, LogObserver::new("ode", Level::Debug))
        .unwrap();
    let plain = integrator.rk4(decay, 100).unwrap();

    assert_eq!(logged, plain);
    assert_relative_eq!(logged.last().unwrap().1[0], (-1.0_f64).exp(), max_relative = 1e-8);
}

#[test]
fn stop_after_bounds_an_integration() {
    init_logging();
    let integrator = Integrator::new([1.0], 0.0, 10.0).unwrap();

    let solution = integrator
        .solve(Method::Midpoint, decay, 1000, StopAfter::new(10))
        .unwrap();

    assert_eq!(solution.status, ode::Status::StoppedByObserver);
    assert_eq!(solution.len(), 11);
}

#[test]
fn good_enough_accepts_a_loose_root() {
    init_logging();
    let config = newton::Config::default();

    let strict = newton::solve_unobserved(&Dottie, 0.0, &config).unwrap();
    let loose = newton::solve(&Dottie, 0.0, &config, GoodEnough::new(1e-3, 1)).unwrap();

    assert_eq!(strict.status, newton::Status::Converged);
    assert_eq!(loose.status, newton::Status::StoppedByObserver);
    assert!(loose.iters <= strict.iters);
    assert_relative_eq!(loose.x, strict.x, epsilon = 1e-2);
}
