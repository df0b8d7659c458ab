/// The value of a vector field at one evaluation point.
///
/// `change_rates` is `dy/dt` for every component of the state vector.
/// `should_stop` asks the integrator to halt; the step being computed when it
/// is raised is discarded along with the state it started from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates<const N: usize> {
    pub change_rates: [f64; N],
    pub should_stop: bool,
}

impl<const N: usize> Rates<N> {
    /// Creates rates that let integration continue.
    #[must_use]
    pub fn new(change_rates: [f64; N]) -> Self {
        Self {
            change_rates,
            should_stop: false,
        }
    }

    /// Creates rates that request integration to halt.
    #[must_use]
    pub fn stop(change_rates: [f64; N]) -> Self {
        Self {
            change_rates,
            should_stop: true,
        }
    }
}

/// Defines an ODE `dy/dt = f(t, y)` over an `N`-component state vector.
///
/// Fixed-step integrators evaluate the field one or more times per step.
/// Implementations may carry mutable state (for example a step counter used by
/// a stop predicate), so evaluation takes `&mut self`.
///
/// Closures of the form `FnMut(f64, &[f64; N]) -> Rates<N>` implement this
/// trait automatically.
pub trait VectorField<const N: usize> {
    /// Evaluates the field at time `t` and state `y`.
    fn rates(&mut self, t: f64, y: &[f64; N]) -> Rates<N>;
}

impl<const N: usize, F> VectorField<N> for F
where
    F: FnMut(f64, &[f64; N]) -> Rates<N>,
{
    fn rates(&mut self, t: f64, y: &[f64; N]) -> Rates<N> {
        self(t, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_vector_fields() {
        let mut calls = 0;
        let mut decay = |_t: f64, y: &[f64; 2]| {
            calls += 1;
            Rates::new([-y[0], -2.0 * y[1]])
        };

        let rates = decay.rates(0.0, &[1.0, 3.0]);

        assert_eq!(rates.change_rates, [-1.0, -6.0]);
        assert!(!rates.should_stop);
        assert_eq!(calls, 1);
    }

    #[test]
    fn stop_sets_flag() {
        let rates = Rates::stop([0.0]);
        assert!(rates.should_stop);
    }
}
