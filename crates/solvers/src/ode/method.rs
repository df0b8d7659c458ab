use recalc_core::{StepIntegrable, VectorField};

/// Fixed-step integration schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Forward Euler, one evaluation per step.
    Euler,

    /// Explicit midpoint, two evaluations per step.
    Midpoint,

    /// Classical fourth-order Runge-Kutta, four evaluations per step.
    Rk4,
}

impl Method {
    /// Advances `y` from `t` by `h`.
    ///
    /// Returns `None` as soon as any evaluation raises `should_stop`; the
    /// remaining stages of the step are not evaluated.
    pub(super) fn step<const N: usize, F: VectorField<N>>(
        self,
        field: &mut F,
        t: f64,
        y: &[f64; N],
        h: f64,
    ) -> Option<[f64; N]> {
        match self {
            Self::Euler => {
                let k1 = evaluate(field, t, y)?;
                Some(y.step(k1, h))
            }
            Self::Midpoint => {
                let k1 = evaluate(field, t, y)?;
                let k2 = evaluate(field, t + h / 2.0, &y.step(k1, h / 2.0))?;
                Some(y.step(k2, h))
            }
            Self::Rk4 => {
                let k1 = evaluate(field, t, y)?;
                let k2 = evaluate(field, t + h / 2.0, &y.step(k1, h / 2.0))?;
                let k3 = evaluate(field, t + h / 2.0, &y.step(k2, h / 2.0))?;
                let k4 = evaluate(field, t + h, &y.step(k3, h))?;

                let slope = std::array::from_fn(|j| {
                    k1[j] / 6.0 + k2[j] / 3.0 + k3[j] / 3.0 + k4[j] / 6.0
                });
                Some(y.step(slope, h))
            }
        }
    }
}

fn evaluate<const N: usize, F: VectorField<N>>(
    field: &mut F,
    t: f64,
    y: &[f64; N],
) -> Option<[f64; N]> {
    let rates = field.rates(t, y);
    (!rates.should_stop).then_some(rates.change_rates)
}
