use recalc_core::RootProblem;
use recalc_solvers::equation::newton;

/// Time into the exponential phase at which braking must begin.
///
/// The exponential phase follows `v(τ) = A + B·e^{Cτ}`. Braking at `a_stop`
/// from that velocity covers `v²/(2·a_stop)`, so the switch time is the root
/// of
///
/// ```text
/// B²e^{2Cτ} + (DB/C + 2AB)e^{Cτ} + ADτ - DB/C - Δx·D + A² = 0
/// ```
///
/// with `D = 2·a_stop` and `Δx` the distance left at the start of the phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct StopIntercept {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    delta_x: f64,
}

impl StopIntercept {
    pub(super) fn new(v_free: f64, v_lim: f64, a_lim: f64, a_stop: f64, delta_x: f64) -> Self {
        Self {
            a: v_free,
            b: -(v_free - v_lim),
            c: -a_lim / (v_free - v_lim),
            d: 2.0 * a_stop,
            delta_x,
        }
    }

    /// Solves from `τ = 0`, returning `None` unless Newton's method finds a
    /// positive root.
    ///
    /// A phase that starts at rest has zero slope at `τ = 0`, so the search is
    /// retried from the time a constant `a_lim` ramp would need.
    pub(super) fn solve(&self) -> Option<f64> {
        let config = newton::Config::default();

        let solved = match newton::solve_unobserved(self, 0.0, &config) {
            Err(newton::Error::FlatDerivative { .. }) if self.a + self.b <= 0.0 => {
                newton::solve_unobserved(self, self.ramp_seed(), &config)
            }
            solved => solved,
        };

        match solved {
            Ok(solution) => solution.root().filter(|t| t.is_finite() && *t > 0.0),
            Err(error) => {
                log::debug!("no braking intercept in the exponential phase: {error}");
                None
            }
        }
    }

    /// Time to cover `Δx` accelerating at `a_lim` and braking at `a_stop`.
    fn ramp_seed(&self) -> f64 {
        let a_lim = self.b * self.c;
        let a_stop = self.d / 2.0;
        (2.0 * self.delta_x / (a_lim + a_lim * a_lim / a_stop)).sqrt()
    }
}

impl RootProblem for StopIntercept {
    fn residual(&self, t: f64) -> f64 {
        let Self { a, b, c, d, delta_x } = *self;

        b * b * (2.0 * c * t).exp() + (d * b / c + 2.0 * a * b) * (c * t).exp() + a * d * t
            - d * b / c
            - delta_x * d
            + a * a
    }

    /// Terms that overflow are dropped so a far iterate still gets a usable
    /// slope from the linear term.
    fn derivative(&self, t: f64) -> f64 {
        let Self { a, b, c, d, .. } = *self;

        [
            2.0 * b * b * c * (2.0 * c * t).exp(),
            (b * d / c + 2.0 * a * b) * c * (c * t).exp(),
            a * d,
        ]
        .into_iter()
        .filter(|term| term.is_finite())
        .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    // Kraken X60 through 10:1 onto a 5 cm pulley moving 10 kg at 40 A.
    const V_FREE: f64 = 1.570_796_326_794_896_8;
    const V_LIM: f64 = 1.406_812_094_876_748_2;
    const A_LIM: f64 = 29.606_593_406_593_408;

    #[test]
    fn braking_lands_on_target() {
        let x20 = A_LIM * (V_LIM / A_LIM).powi(2) / 2.0;
        let intercept = StopIntercept::new(V_FREE, V_LIM, A_LIM, A_LIM, 1.0 - x20);

        let tau = intercept.solve().unwrap();
        assert_abs_diff_eq!(tau, 0.589_392, epsilon = 1e-6);

        let decay = (-A_LIM / (V_FREE - V_LIM) * tau).exp();
        let v = V_FREE - (V_FREE - V_LIM) * decay;
        let x = x20 + V_FREE * tau + (V_FREE - V_LIM).powi(2) / A_LIM * (decay - 1.0);
        assert_abs_diff_eq!(x + v * v / (2.0 * A_LIM), 1.0, epsilon = 1e-8);
    }

    #[test]
    fn phase_starting_at_rest_finds_intercept() {
        // Core Hex direct onto a 5 cm pulley with 1 kg: never current limited.
        let v_free = 0.327_249_234_748_936_8;
        let intercept = StopIntercept::new(v_free, 0.0, 128.0, 128.0, 0.05);

        let tau = intercept.solve().unwrap();
        assert_abs_diff_eq!(tau, 0.154_067, epsilon = 1e-6);
    }

    #[test]
    fn intercept_behind_phase_start_is_rejected() {
        // Braking from v_lim already overshoots 1 cm; the only root is negative.
        let intercept = StopIntercept::new(V_FREE, V_LIM, A_LIM, A_LIM, 0.01);

        assert_eq!(intercept.solve(), None);
    }

    #[test]
    fn flat_problem_has_no_intercept() {
        // With no braking, nothing depends on τ and the residual is flat.
        let intercept = StopIntercept {
            a: 0.0,
            b: 0.0,
            c: -1.0,
            d: 0.0,
            delta_x: 1.0,
        };

        assert_eq!(intercept.solve(), None);
    }
}
