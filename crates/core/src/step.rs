/// A trait for types that can be stepped using their derivative.
///
/// Implementing this trait lets the fixed-step integrators advance a state by
/// `derivative * delta`, where the derivative is taken with respect to
/// `Delta`. The integrators in `recalc-solvers` work with `[f64; N]` states
/// and `f64` time steps, for which an implementation is provided.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

impl<const N: usize> StepIntegrable<f64> for [f64; N] {
    type Derivative = [f64; N];

    fn step(&self, derivative: [f64; N], delta: f64) -> Self {
        std::array::from_fn(|i| self[i] + derivative[i] * delta)
    }
}
