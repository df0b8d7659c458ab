/// Defines a scalar equation `f(x) = 0` with an analytic derivative.
///
/// Derivative-based root finders (Newton's method) call `residual` and
/// `derivative` at each iterate. Both should return finite values over the
/// region of interest; non-finite values are reported by the solver.
pub trait RootProblem {
    /// Evaluates `f(x)`.
    fn residual(&self, x: f64) -> f64;

    /// Evaluates `f'(x)`.
    fn derivative(&self, x: f64) -> f64;
}

impl<P: RootProblem + ?Sized> RootProblem for &P {
    fn residual(&self, x: f64) -> f64 {
        (**self).residual(x)
    }

    fn derivative(&self, x: f64) -> f64 {
        (**self).derivative(x)
    }
}
