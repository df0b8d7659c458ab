//! Minimum-time profiles for a saturating first-order drive.
//!
//! The drive is modeled as `dv/dt = A·v + B·u` with `|u| ≤ max_input`, the
//! shape of a voltage-limited DC motor where `A = -kV/kA` and `B = 1/kA`.
//! The fastest move between two states applies full input in one direction
//! and then full input in the other. Both arcs have closed-form solutions,
//! so a profile is evaluated without stepping:
//!
//! ```text
//! v(t) = (v0 + B·u/A)·e^{A·t} - B·u/A
//! x(t) = x0 + (-B·u·t + (v0 + B·u/A)·(e^{A·t} - 1)) / A
//! ```
//!
//! The only solve is for the velocity at which the two arcs meet.
//!
//! A move toward a goal behind the current state is solved as its mirror
//! image and negated back, so moves in opposite directions are exact
//! negations of each other.
//!
//! # Example
//!
//! ```
//! use recalc_profiles::{Constraints, ExponentialProfile, State};
//!
//! let profile = ExponentialProfile::new(Constraints::from_characteristics(12.0, 2.5629, 0.43277));
//! let goal = State::new(10.0, 0.0);
//!
//! let mut state = State::new(0.0, 0.0);
//! for _ in 0..450 {
//!     state = profile.calculate(0.01, state, goal);
//! }
//! assert_eq!(state, goal);
//! ```

use crate::State;

/// Tolerance for treating a velocity as equal to the saturation velocity.
const SATURATION_EPSILON: f64 = 1e-9;

/// Radicands in `(-RADICAND_EPSILON, 0)` are rounding noise around zero.
const RADICAND_EPSILON: f64 = 1e-9;

/// Input limit and plant coefficients of `dv/dt = A·v + B·u`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraints {
    pub max_input: f64,
    pub a: f64,
    pub b: f64,
}

impl Constraints {
    /// Builds constraints directly from the state-space coefficients.
    #[must_use]
    pub fn from_state_space(max_input: f64, a: f64, b: f64) -> Self {
        Self { max_input, a, b }
    }

    /// Builds constraints from feedforward gains: `A = -kV/kA`, `B = 1/kA`.
    #[must_use]
    pub fn from_characteristics(max_input: f64, kv: f64, ka: f64) -> Self {
        Self::from_state_space(max_input, -kv / ka, 1.0 / ka)
    }

    /// Steady-state velocity under full input.
    #[must_use]
    pub fn max_velocity(&self) -> f64 {
        -self.max_input * self.b / self.a
    }
}

/// When the input switches sign and when the move ends, in seconds from the
/// current state.
///
/// `total_time` may be zero or negative if the goal is already reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileTiming {
    pub inflection_time: f64,
    pub total_time: f64,
}

impl ProfileTiming {
    /// Returns `true` once `t` has passed the inflection point.
    #[must_use]
    pub fn is_finished(&self, t: f64) -> bool {
        t >= self.inflection_time
    }
}

/// A bang-bang profile over a [`Constraints`] plant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialProfile {
    constraints: Constraints,
}

impl ExponentialProfile {
    #[must_use]
    pub fn new(constraints: Constraints) -> Self {
        Self { constraints }
    }

    #[must_use]
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// State `t` seconds after `current` on the way to `goal`.
    ///
    /// Negative `t` returns `current`; `t` at or past the end returns `goal`
    /// exactly.
    #[must_use]
    pub fn calculate(&self, t: f64, current: State, goal: State) -> State {
        if is_reversed(current, goal) {
            return -self.calculate_forward(t, -current, -goal);
        }
        self.calculate_forward(t, current, goal)
    }

    fn calculate_forward(&self, t: f64, current: State, goal: State) -> State {
        let u = self.input(current, goal);
        let inflection = self.inflection_point_with_input(current, goal, u);
        let timing = self.timing_with_input(current, inflection, goal, u);

        if t < 0.0 {
            current
        } else if t < timing.inflection_time {
            State::new(
                self.distance_from_time(t, u, current),
                self.velocity_from_time(t, u, current),
            )
        } else if t < timing.total_time {
            State::new(
                self.distance_from_time(t - timing.total_time, -u, goal),
                self.velocity_from_time(t - timing.total_time, -u, goal),
            )
        } else {
            goal
        }
    }

    /// State at which the input switches sign.
    ///
    /// Returns `current` when it already equals `goal`.
    #[must_use]
    pub fn calculate_inflection_point(&self, current: State, goal: State) -> State {
        if is_reversed(current, goal) {
            return -self.calculate_inflection_point(-current, -goal);
        }
        let u = self.input(current, goal);
        self.inflection_point_with_input(current, goal, u)
    }

    /// Seconds until `goal` is reached from `current`.
    #[must_use]
    pub fn time_left_until(&self, current: State, goal: State) -> f64 {
        self.calculate_profile_timing(current, goal).total_time
    }

    #[must_use]
    pub fn calculate_profile_timing(&self, current: State, goal: State) -> ProfileTiming {
        if is_reversed(current, goal) {
            return self.calculate_profile_timing(-current, -goal);
        }
        let u = self.input(current, goal);
        let inflection = self.inflection_point_with_input(current, goal, u);
        self.timing_with_input(current, inflection, goal, u)
    }

    /// Position reached when the velocity hits `velocity` from `initial`
    /// under constant `input`.
    #[must_use]
    pub fn compute_distance_from_velocity(&self, velocity: f64, input: f64, initial: State) -> f64 {
        let Constraints { a, b, .. } = self.constraints;
        let u = input;

        initial.position + (velocity - initial.velocity) / a
            - ((b * u) / (a * a)) * ((a * velocity + b * u) / (a * initial.velocity + b * u)).ln()
    }

    /// Exact state equality.
    #[must_use]
    pub fn are_states_equal(lhs: State, rhs: State) -> bool {
        lhs == rhs
    }

    /// Signed input applied on the first arc.
    fn input(&self, current: State, goal: State) -> f64 {
        if self.should_flip_input(current, goal) {
            -self.constraints.max_input
        } else {
            self.constraints.max_input
        }
    }

    fn inflection_point_with_input(&self, current: State, goal: State, input: f64) -> State {
        if Self::are_states_equal(current, goal) {
            return current;
        }

        let velocity = self.solve_for_inflection_velocity(input, current, goal);
        let position = self.compute_distance_from_velocity(velocity, -input, goal);

        State::new(position, velocity)
    }

    fn timing_with_input(
        &self,
        current: State,
        inflection: State,
        goal: State,
        input: f64,
    ) -> ProfileTiming {
        let u = input;
        let max_velocity = self.constraints.max_velocity();

        let inflection_forward =
            if (sign(u) * max_velocity - inflection.velocity).abs() < SATURATION_EPSILON {
                // The first arc only approaches max velocity asymptotically, so
                // time it to a solvable velocity nearby and coast the rest.
                let (t_solvable, x_solvable) =
                    if (current.velocity - inflection.velocity).abs() < SATURATION_EPSILON {
                        (0.0, current.position)
                    } else {
                        let solvable = if current.velocity.abs() > max_velocity {
                            inflection.velocity + sign(u) * SATURATION_EPSILON
                        } else {
                            inflection.velocity - sign(u) * SATURATION_EPSILON
                        };
                        log::trace!("inflection at saturation, timing to v = {solvable}");

                        (
                            self.time_from_velocity(solvable, u, current.velocity),
                            self.compute_distance_from_velocity(solvable, u, current),
                        )
                    };

                t_solvable + sign(u) * (inflection.position - x_solvable) / max_velocity
            } else {
                self.time_from_velocity(inflection.velocity, u, current.velocity)
            };

        let inflection_backward = self.time_from_velocity(inflection.velocity, -u, goal.velocity);

        ProfileTiming {
            inflection_time: inflection_forward,
            total_time: inflection_forward - inflection_backward,
        }
    }

    fn distance_from_time(&self, t: f64, input: f64, initial: State) -> f64 {
        let Constraints { a, b, .. } = self.constraints;
        let u = input;

        initial.position
            + (-b * u * t + (initial.velocity + (b * u) / a) * ((a * t).exp() - 1.0)) / a
    }

    fn velocity_from_time(&self, t: f64, input: f64, initial: State) -> f64 {
        let Constraints { a, b, .. } = self.constraints;
        let u = input;

        (initial.velocity + (b * u) / a) * (a * t).exp() - (b * u) / a
    }

    fn time_from_velocity(&self, velocity: f64, input: f64, initial: f64) -> f64 {
        let Constraints { a, b, .. } = self.constraints;
        let u = input;

        ((a * velocity + b * u) / (a * initial + b * u)).ln() / a
    }

    /// Velocity at which the forward arc from `current` meets the backward
    /// arc from `goal`.
    fn solve_for_inflection_velocity(&self, input: f64, current: State, goal: State) -> f64 {
        let Constraints { a, b, .. } = self.constraints;
        let u = input;

        let position_delta = goal.position - current.position;
        let velocity_delta = goal.velocity - current.velocity;

        let scalar = (a * current.velocity + b * u) * (a * goal.velocity - b * u);
        let power = (-a / b / u) * (a * position_delta - velocity_delta);

        let quadratic = -a * a;
        let constant = b * b * (u * u) + scalar * power.exp();

        if -RADICAND_EPSILON < constant && constant < 0.0 {
            return 0.0;
        }

        sign(u) * (-constant / quadratic).sqrt()
    }

    /// Whether the first arc should use negative input.
    fn should_flip_input(&self, current: State, goal: State) -> bool {
        let u = self.constraints.max_input;
        let max_velocity = self.constraints.max_velocity();

        let xf = goal.position;
        let v0 = current.velocity;
        let vf = goal.velocity;

        let x_forward = self.compute_distance_from_velocity(vf, u, current);
        let x_reverse = self.compute_distance_from_velocity(vf, -u, current);

        if v0 >= max_velocity {
            return xf < x_reverse;
        }
        if v0 <= -max_velocity {
            return xf < x_forward;
        }

        let moving_forward = v0 >= 0.0;
        let ending_forward = vf >= 0.0;
        let reachable_forward = xf >= x_forward;
        let reachable_reverse = xf >= x_reverse;

        (moving_forward && !reachable_reverse)
            || (ending_forward && !reachable_forward)
            || (!reachable_forward && !reachable_reverse)
    }
}

/// Whether `goal` lies behind `current`, or level with it at a lower
/// velocity.
fn is_reversed(current: State, goal: State) -> bool {
    let position_delta = goal.position - current.position;
    position_delta < 0.0 || (position_delta == 0.0 && goal.velocity < current.velocity)
}

/// Sign of `x`, zero for zero.
fn sign(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x.signum() }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    const DT: f64 = 0.01;

    fn constraints() -> Constraints {
        Constraints::from_characteristics(12.0, 2.5629, 0.43277)
    }

    fn run(profile: &ExponentialProfile, mut state: State, goal: State, steps: usize) -> State {
        for _ in 0..steps {
            state = profile.calculate(DT, state, goal);
        }
        state
    }

    #[test]
    fn characteristics_map_to_state_space() {
        let c = constraints();
        assert_abs_diff_eq!(c.a, -2.5629 / 0.43277);
        assert_abs_diff_eq!(c.b, 1.0 / 0.43277);
        assert_abs_diff_eq!(c.max_velocity(), 12.0 / 2.5629, epsilon = 1e-12);
    }

    #[test]
    fn reaches_goal() {
        let profile = ExponentialProfile::new(constraints());
        let goal = State::new(10.0, 0.0);

        assert_eq!(run(&profile, State::new(0.0, 0.0), goal, 450), goal);
    }

    #[test]
    fn backwards() {
        let profile = ExponentialProfile::new(constraints());
        let goal = State::new(-10.0, 0.0);

        assert_eq!(run(&profile, State::new(0.0, 0.0), goal, 400), goal);
    }

    #[test]
    fn position_continuous_when_input_limit_changes() {
        for target in [10.0, -10.0] {
            let goal = State::new(target, 0.0);
            let weaker = ExponentialProfile::new(Constraints::from_state_space(
                9.0,
                constraints().a,
                constraints().b,
            ));

            let full = ExponentialProfile::new(constraints());

            let halfway = run(&full, State::default(), goal, 150);
            assert_eq!(run(&weaker, halfway, goal, 150), goal);
        }
    }

    #[test]
    fn switch_goal_in_middle() {
        let profile = ExponentialProfile::new(constraints());

        let state = run(&profile, State::new(0.0, 0.0), State::new(-10.0, 0.0), 50);
        assert_ne!(state, State::new(-10.0, 0.0));

        let origin = State::new(0.0, 0.0);
        assert_eq!(run(&profile, state, origin, 100), origin);
    }

    #[test]
    fn opposite_moves_mirror_exactly() {
        let profile = ExponentialProfile::new(constraints());
        let ahead = State::new(10.0, 0.0);
        let behind = State::new(-10.0, 0.0);

        let mut forward = State::default();
        let mut backward = State::default();
        for _ in 0..450 {
            forward = profile.calculate(DT, forward, ahead);
            backward = profile.calculate(DT, backward, behind);
            assert_eq!(backward, -forward);
        }
        assert_eq!(forward, ahead);
    }

    #[test]
    fn level_goal_at_lower_velocity_mirrors_raising_it() {
        let profile = ExponentialProfile::new(constraints());
        let current = State::new(1.0, 2.0);
        let goal = State::new(1.0, -1.0);

        for t in [0.0, 0.05, 0.2, 0.6] {
            assert_eq!(
                profile.calculate(t, current, goal),
                -profile.calculate(t, -current, -goal)
            );
        }
        assert_eq!(
            profile.calculate_profile_timing(current, goal),
            profile.calculate_profile_timing(-current, -goal)
        );
    }

    #[test]
    fn inflection_heuristic() {
        let profile = ExponentialProfile::new(constraints());
        let expected = State::new(1.3758, 4.4304);

        for (initial, goal) in [
            (State::new(0.0, -4.0), State::new(0.75, -4.0)),
            (State::new(0.0, -4.0), State::new(1.4103, 4.0)),
        ] {
            let inflection = profile.calculate_inflection_point(initial, goal);
            assert_abs_diff_eq!(inflection.position, expected.position, epsilon = 1e-3);
            assert_abs_diff_eq!(inflection.velocity, expected.velocity, epsilon = 1e-3);
        }
    }

    #[test]
    fn equal_states_inflect_at_current() {
        let profile = ExponentialProfile::new(constraints());
        let state = State::new(2.0, 1.0);

        assert_eq!(profile.calculate_inflection_point(state, state), state);
    }

    #[test]
    fn negative_time_returns_current() {
        let profile = ExponentialProfile::new(constraints());
        let current = State::new(1.0, 0.5);

        assert_eq!(profile.calculate(-1.0, current, State::new(5.0, 0.0)), current);
    }

    #[test]
    fn time_past_end_returns_goal() {
        let profile = ExponentialProfile::new(constraints());
        let current = State::new(0.0, 0.0);
        let goal = State::new(3.0, 0.0);

        let total = profile.time_left_until(current, goal);

        assert!(total > 0.0);
        assert_eq!(profile.calculate(total, current, goal), goal);
        assert_eq!(profile.calculate(total + 1.0, current, goal), goal);
    }

    #[test]
    fn timing_is_ordered() {
        let profile = ExponentialProfile::new(constraints());

        let timing =
            profile.calculate_profile_timing(State::new(0.0, 0.0), State::new(5.0, 0.0));

        assert!(timing.inflection_time > 0.0);
        assert!(timing.total_time > timing.inflection_time);
        assert!(!timing.is_finished(0.0));
        assert!(timing.is_finished(timing.inflection_time));
    }

    #[test]
    fn tiny_negative_radicand_clamps_to_zero_velocity() {
        // With A = -1, B = 1, u = 1, a move from rest to rest at distance dx
        // has constant term 1 - e^{-dx}, just below zero for a tiny negative dx.
        let profile = ExponentialProfile::new(Constraints::from_state_space(1.0, -1.0, 1.0));

        let velocity = profile.solve_for_inflection_velocity(
            1.0,
            State::new(0.0, 0.0),
            State::new(-1e-12, 0.0),
        );

        assert_eq!(velocity, 0.0);
    }

    #[test]
    fn distance_from_velocity_inverts_time_solution() {
        let profile = ExponentialProfile::new(constraints());
        let start = State::new(0.5, 0.0);
        let u = profile.constraints().max_input;

        let t = 0.3;
        let v = profile.velocity_from_time(t, u, start);
        let x = profile.distance_from_time(t, u, start);

        assert_abs_diff_eq!(
            profile.compute_distance_from_velocity(v, u, start),
            x,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(profile.time_from_velocity(v, u, start.velocity), t, epsilon = 1e-12);
    }
}
