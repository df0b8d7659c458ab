//! Closed-form, current-limited move of a geared linear mechanism.
//!
//! A move is assembled from up to four phases:
//!
//! 1. **Ramp**: constant acceleration `a_lim` while the current limit binds.
//! 2. **Exponential**: back-EMF takes over and the velocity approaches the
//!    loaded free speed as `v_free - (v_free - v_lim)·e^{-a_lim·τ/(v_free - v_lim)}`.
//! 3. **Coast**: constant velocity at the speed cap.
//! 4. **Stop**: constant deceleration `a_stop` to rest at the target.
//!
//! Phases 1 and 4 are always present, giving the sequences `{1,4}`,
//! `{1,2,4}`, `{1,3,4}` and `{1,2,3,4}`. Each transition time is solved in
//! closed form except the switch from phase 2 straight to braking, which is
//! found with Newton's method.
//!
//! Internally everything is SI: seconds, meters, m/s and m/s².

mod config;
mod error;
mod intercept;
mod mechanism;
mod phase;
mod sample;

pub use config::{ConfigError, SampleConfig};
pub use error::Error;
pub use mechanism::Mechanism;
pub use phase::{Phase, PhaseKind, Segment, Txv};
pub use sample::ProfileSample;

use recalc_motor::{Motor, MotorRules, Operating};
use uom::si::{
    acceleration::meter_per_second_squared,
    angular_velocity::radian_per_second,
    electric_current::ampere,
    f64::{AngularVelocity, Length, Time, Velocity},
    length::meter,
    mass::kilogram,
    ratio::ratio,
    time::second,
    torque::newton_meter,
    velocity::meter_per_second,
};

use intercept::StopIntercept;

/// Candidate end times of the ramp phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampTransitions {
    /// Velocity reaches `v_lim` and back-EMF starts to limit current.
    pub t_12: f64,
    /// Velocity reaches the speed cap.
    pub t_13: f64,
    /// Braking must begin to stop at the target.
    pub t_14: f64,
}

/// Candidate end times of the exponential phase, relative to its start.
///
/// `None` means the transition never happens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialTransitions {
    pub t_23: Option<f64>,
    pub t_24: Option<f64>,
}

/// A planned multi-phase move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhasedProfile {
    target: f64,
    a_lim: f64,
    a_stop: f64,
    v_lim: f64,
    v_free: f64,
    v_max: f64,
    ramp_transitions: RampTransitions,
    exponential_transitions: Option<ExponentialTransitions>,
    ramp: Segment,
    exponential: Phase,
    coast: Phase,
    stop: Segment,
}

/// Derived drive limits for a mechanism.
struct Limits {
    a_lim: f64,
    a_stop: f64,
    v_lim: f64,
    v_free: f64,
    v_max: f64,
}

impl Limits {
    fn new(motor: &Motor, mechanism: &Mechanism) -> Self {
        let spec = motor.spec();
        let free_speed = spec.free_speed.get::<radian_per_second>();
        let stall_torque = spec.stall_torque.get::<newton_meter>();
        let stall_current = spec.stall_current.get::<ampere>();
        let free_current = spec.free_current.get::<ampere>();

        let gear_ratio = mechanism.ratio.get();
        let mass = mechanism.mass.get().get::<kilogram>();
        let radius = mechanism.diameter.get().get::<meter>() / 2.0;
        let gravity = mechanism.gravity.get().get::<meter_per_second_squared>();
        let efficiency = mechanism.efficiency.as_ref().get::<ratio>();

        // A limit at or above stall current never binds.
        let limited_fraction = ((mechanism.stator_limit.get::<ampere>() - free_current)
            / (stall_current - free_current))
            .min(1.0);

        let limited_torque =
            stall_torque * f64::from(motor.quantity()) * efficiency * limited_fraction;
        let a_lim = limited_torque * gear_ratio / radius / mass - gravity;

        let v_lim = free_speed * (1.0 - limited_fraction) * radius / gear_ratio;
        let v_free = free_speed * radius / gear_ratio
            * (1.0 - mass * gravity * radius / (stall_torque * gear_ratio));

        Self {
            a_lim,
            a_stop: a_lim + 2.0 * gravity,
            v_lim,
            v_free,
            v_max: v_free.min(mechanism.max_velocity.get::<meter_per_second>()),
        }
    }
}

impl PhasedProfile {
    /// Plans the move for `mechanism` driven by `motor`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotAccelerate`] if the current-limited drive
    /// cannot accelerate the load at all.
    pub fn plan(motor: &Motor, mechanism: &Mechanism) -> Result<Self, Error> {
        let Limits {
            a_lim,
            a_stop,
            v_lim,
            v_free,
            v_max,
        } = Limits::new(motor, mechanism);

        if a_lim.is_nan() || a_lim <= 0.0 {
            log::warn!("drive cannot accelerate the load: a_lim = {a_lim}");
            return Err(Error::CannotAccelerate {
                acceleration: a_lim,
            });
        }

        let target = mechanism.target_distance.get::<meter>();

        let ramp_transitions = RampTransitions {
            t_12: v_lim / a_lim,
            t_13: v_max / a_lim,
            t_14: (2.0 * target / (a_lim + a_lim * a_lim / a_stop)).sqrt(),
        };
        let RampTransitions { t_12, t_13, t_14 } = ramp_transitions;

        let ramp_until = |t: f64| Segment {
            start: Txv::new(0.0, 0.0, 0.0),
            end: Txv::new(t, 0.5 * a_lim * t * t, a_lim * t),
        };

        let mut ramp = ramp_until(t_12.min(t_13).min(t_14));
        let mut exponential = Phase::NotEntered;
        let mut exponential_transitions = None;
        let mut enter_coast = t_13 < t_14;

        if t_12 < t_13 && t_12 < t_14 {
            let start = ramp.end;
            let t_23 = {
                let decay = (v_free - v_max) / (v_free - v_lim);
                (decay > 0.0).then(|| -(v_free - v_lim) / a_lim * decay.ln())
            };
            let t_24 = StopIntercept::new(v_free, v_lim, a_lim, a_stop, target - start.x).solve();
            exponential_transitions = Some(ExponentialTransitions { t_23, t_24 });

            let duration = match (t_23, t_24) {
                (Some(t_23), Some(t_24)) => {
                    enter_coast = t_23 < t_24;
                    Some(t_23.min(t_24))
                }
                (None, Some(t_24)) => {
                    enter_coast = false;
                    Some(t_24)
                }
                (Some(t_23), None) => {
                    enter_coast = true;
                    Some(t_23)
                }
                (None, None) => None,
            };

            if let Some(duration) = duration {
                let (x, v) = exponential_state(start, duration, a_lim, v_lim, v_free);
                exponential = Phase::Entered(Segment {
                    start,
                    end: Txv::new(start.t + duration, x, v),
                });
            } else {
                log::warn!("exponential phase has no end; ramping straight to the speed cap");
                ramp = ramp_until(t_13.min(t_14));
            }
        }

        let before_coast = exponential.segment().map_or(ramp.end, |segment| segment.end);

        let coast = if enter_coast {
            let dt_34 = (target - before_coast.x) / v_max - v_max / 2.0 / a_stop;
            Phase::Entered(Segment {
                start: before_coast,
                end: Txv::new(before_coast.t + dt_34, before_coast.x + v_max * dt_34, v_max),
            })
        } else {
            Phase::NotEntered
        };

        let stop_start = coast.segment().map_or(before_coast, |segment| segment.end);
        let stop = Segment {
            start: stop_start,
            end: Txv::new(stop_start.t + stop_start.v / a_stop, target, 0.0),
        };

        let profile = Self {
            target,
            a_lim,
            a_stop,
            v_lim,
            v_free,
            v_max,
            ramp_transitions,
            exponential_transitions,
            ramp,
            exponential,
            coast,
            stop,
        };
        log::debug!(
            "planned {:?} over {:.3} s",
            profile.sequence(),
            profile.total_time()
        );

        Ok(profile)
    }

    /// Position and velocity at `t` seconds.
    ///
    /// Times at or before zero give rest at the origin; times at or past the
    /// end give rest at the target.
    #[must_use]
    pub fn state_at(&self, t: f64) -> Txv {
        if t <= 0.0 {
            return Txv::new(t, 0.0, 0.0);
        }
        if t >= self.stop.end.t {
            return Txv::new(t, self.stop.end.x, self.stop.end.v);
        }

        if self.ramp.covers(t) {
            return Txv::new(t, 0.5 * self.a_lim * t * t, self.a_lim * t);
        }

        if let Phase::Entered(segment) = self.exponential {
            if segment.covers(t) {
                let (x, v) = exponential_state(
                    segment.start,
                    t - segment.start.t,
                    self.a_lim,
                    self.v_lim,
                    self.v_free,
                );
                return Txv::new(t, x, v);
            }
        }

        if let Phase::Entered(segment) = self.coast {
            if segment.covers(t) {
                let x = segment.start.x + self.v_max * (t - segment.start.t);
                return Txv::new(t, x, self.v_max);
            }
        }

        let Txv { t: t0, x: x0, v: v0 } = self.stop.start;
        let tau = t - t0;
        Txv::new(t, x0 + v0 * tau - self.a_stop * tau * tau / 2.0, v0 - self.a_stop * tau)
    }

    /// Samples the move every `config.dt()` from zero until the target
    /// distance, the end time, or the mechanism's velocity threshold is
    /// reached, annotating each point with the motor's operating point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManySamples`] if none of the stop conditions is
    /// met within `config.max_samples()` samples.
    pub fn sample(
        &self,
        motor: &Motor,
        mechanism: &Mechanism,
        config: &SampleConfig,
    ) -> Result<Vec<ProfileSample>, Error> {
        let dt = config.dt().get::<second>();
        let radius = mechanism.diameter.get().get::<meter>() / 2.0;
        let gear_ratio = mechanism.ratio.get();
        let stop_at = mechanism.stop_at_velocity.map(|v| v.get::<meter_per_second>());

        let mut samples = Vec::new();
        for i in 0..config.max_samples() {
            #[allow(clippy::cast_precision_loss)]
            let state = self.state_at(i as f64 * dt);

            let motor_speed = AngularVelocity::new::<radian_per_second>(state.v * gear_ratio / radius);
            let operating = MotorRules::new(
                motor,
                mechanism.stator_limit,
                Operating::Speed {
                    speed: motor_speed,
                    voltage: config.voltage(),
                },
            )
            .solve();

            samples.push(ProfileSample {
                time: Time::new::<second>(state.t),
                position: Length::new::<meter>(state.x),
                velocity: Velocity::new::<meter_per_second>(state.v),
                motor_speed,
                current: operating.current,
                torque: operating.torque,
                power: operating.power,
                efficiency: operating.efficiency,
            });

            if state.x >= self.target
                || state.t >= self.stop.end.t
                || stop_at.is_some_and(|limit| state.v >= limit)
            {
                return Ok(samples);
            }
        }

        Err(Error::TooManySamples {
            max_samples: config.max_samples(),
        })
    }

    /// The phases this move passes through, in order.
    #[must_use]
    pub fn sequence(&self) -> Vec<PhaseKind> {
        let mut sequence = vec![PhaseKind::Ramp];
        if self.exponential.is_entered() {
            sequence.push(PhaseKind::Exponential);
        }
        if self.coast.is_entered() {
            sequence.push(PhaseKind::Coast);
        }
        sequence.push(PhaseKind::Stop);
        sequence
    }

    #[must_use]
    pub fn total_time(&self) -> f64 {
        self.stop.end.t
    }

    /// Current-limited acceleration net of gravity, in m/s².
    #[must_use]
    pub fn a_lim(&self) -> f64 {
        self.a_lim
    }

    /// Braking deceleration, in m/s².
    #[must_use]
    pub fn a_stop(&self) -> f64 {
        self.a_stop
    }

    /// Velocity at which back-EMF starts limiting current, in m/s.
    #[must_use]
    pub fn v_lim(&self) -> f64 {
        self.v_lim
    }

    /// Free speed under load, in m/s.
    #[must_use]
    pub fn v_free(&self) -> f64 {
        self.v_free
    }

    /// Effective speed cap, in m/s.
    #[must_use]
    pub fn v_max(&self) -> f64 {
        self.v_max
    }

    #[must_use]
    pub fn ramp_transitions(&self) -> &RampTransitions {
        &self.ramp_transitions
    }

    /// `None` when the exponential phase was never considered.
    #[must_use]
    pub fn exponential_transitions(&self) -> Option<&ExponentialTransitions> {
        self.exponential_transitions.as_ref()
    }

    #[must_use]
    pub fn ramp(&self) -> &Segment {
        &self.ramp
    }

    #[must_use]
    pub fn exponential(&self) -> &Phase {
        &self.exponential
    }

    #[must_use]
    pub fn coast(&self) -> &Phase {
        &self.coast
    }

    #[must_use]
    pub fn stop(&self) -> &Segment {
        &self.stop
    }
}

/// A planned move and its samples.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedProfile {
    pub profile: PhasedProfile,
    pub samples: Vec<ProfileSample>,
}

/// Plans and samples the move for `mechanism` in one call.
///
/// # Errors
///
/// Returns an error if planning fails or sampling does not finish.
pub fn generate_profile(
    motor: &Motor,
    mechanism: &Mechanism,
    config: &SampleConfig,
) -> Result<GeneratedProfile, Error> {
    let profile = PhasedProfile::plan(motor, mechanism)?;
    let samples = profile.sample(motor, mechanism, config)?;
    Ok(GeneratedProfile { profile, samples })
}

/// Position and velocity `tau` seconds into the exponential phase.
fn exponential_state(start: Txv, tau: f64, a_lim: f64, v_lim: f64, v_free: f64) -> (f64, f64) {
    let gap = v_free - v_lim;
    let decay = (-a_lim / gap * tau).exp();

    (
        start.x + v_free * tau + gap * gap / a_lim * (decay - 1.0),
        v_free - gap * decay,
    )
}
