//! Stepping an [`ExponentialProfile`] and recording each step.
//!
//! Both runs feed the profile's output back in as the next starting state,
//! which is how a controller following the profile would use it. A run that
//! lands on the goal after its first step records only the starting sample.

mod config;
mod error;

pub use config::{ConfigError, StepConfig};
pub use error::Error;

use recalc_motor::{Motor, MotorRules, Operating, drive::loaded_battery_voltage};
use uom::si::{
    angular_velocity::radian_per_second,
    electric_current::ampere,
    f64::{
        AngularVelocity, ElectricCurrent, ElectricPotential, ElectricalResistance, Length, Power,
        Ratio, Time, Torque,
    },
    length::meter,
    power::watt,
    ratio::ratio,
    time::second,
    torque::newton_meter,
};

use crate::{ExponentialProfile, State};

/// A motor geared onto a spool, powered from a battery with internal
/// resistance.
///
/// Profile positions and velocities are taken as meters and m/s of spool
/// travel.
#[derive(Debug, Clone, Copy)]
pub struct LinearDrive<'a> {
    pub motor: &'a Motor,
    pub current_limit: ElectricCurrent,
    pub stator_voltage: ElectricPotential,
    pub spool_diameter: Length,
    /// Motor turns per spool turn. Zero disconnects the motor.
    pub ratio: f64,
    pub supply_voltage: ElectricPotential,
    pub battery_resistance: ElectricalResistance,
}

impl LinearDrive<'_> {
    /// Motor shaft speed for a spool surface velocity in m/s.
    fn motor_speed(&self, velocity: f64) -> AngularVelocity {
        if self.ratio == 0.0 {
            return AngularVelocity::new::<radian_per_second>(0.0);
        }

        let radius = self.spool_diameter.get::<meter>() / 2.0;
        AngularVelocity::new::<radian_per_second>(velocity * self.ratio / radius)
    }
}

/// One step of a linear run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearSample {
    pub time: Time,
    pub state: State,
    pub motor_speed: AngularVelocity,
    pub voltage: ElectricPotential,
    pub current: ElectricCurrent,
    pub torque: Torque,
    pub power: Power,
    pub efficiency: Ratio,
    pub losses: Power,
    pub battery_voltage: ElectricPotential,
}

/// One step of a flywheel run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct FlywheelSample {
    pub time: Time,
    pub state: State,
    pub speed: AngularVelocity,
}

/// Steps `profile` from `current` toward `goal` every `config.dt()` while the
/// position is short of the goal.
///
/// Every step after the first is annotated with the motor operating point at
/// the matching shaft speed and the battery voltage under that load. The
/// starting sample carries no load.
///
/// # Errors
///
/// Returns [`Error::TooManySamples`] if the goal is still ahead after
/// `config.max_samples()` samples.
pub fn simulate_linear(
    profile: &ExponentialProfile,
    mut current: State,
    goal: State,
    config: &StepConfig,
    drive: &LinearDrive<'_>,
) -> Result<Vec<LinearSample>, Error> {
    let step = config.dt().get::<second>();
    let zero_power = Power::new::<watt>(0.0);

    let mut samples = vec![LinearSample {
        time: Time::new::<second>(0.0),
        state: current,
        motor_speed: drive.motor_speed(current.velocity),
        voltage: drive.stator_voltage,
        current: ElectricCurrent::new::<ampere>(0.0),
        torque: Torque::new::<newton_meter>(0.0),
        power: zero_power,
        efficiency: Ratio::new::<ratio>(0.0),
        losses: zero_power,
        battery_voltage: drive.supply_voltage,
    }];

    while current.position < goal.position {
        current = profile.calculate(step, current, goal);

        if samples.len() == 1 && current == goal {
            log::trace!("goal reached in a single step");
            break;
        }
        check_budget(samples.len(), config)?;

        let motor = MotorRules::new(
            drive.motor,
            drive.current_limit,
            Operating::Speed {
                speed: drive.motor_speed(current.velocity),
                voltage: drive.stator_voltage,
            },
        )
        .solve();

        #[allow(clippy::cast_precision_loss)]
        let time = Time::new::<second>(samples.len() as f64 * step);
        samples.push(LinearSample {
            time,
            state: current,
            motor_speed: motor.speed,
            voltage: motor.voltage,
            current: motor.current,
            torque: motor.torque,
            power: motor.power,
            efficiency: motor.efficiency,
            losses: motor.losses,
            battery_voltage: loaded_battery_voltage(
                drive.supply_voltage,
                drive.battery_resistance,
                [motor.current],
            ),
        });
    }

    log::debug!("linear run finished after {} samples", samples.len());
    Ok(samples)
}

/// Steps `profile` from `current` toward `goal` every `config.dt()` while
/// the velocity is short of the goal velocity.
///
/// Profile velocities are surface speeds in m/s at `radius`.
///
/// # Errors
///
/// Returns [`Error::TooManySamples`] if the goal velocity is still ahead
/// after `config.max_samples()` samples.
pub fn simulate_flywheel(
    profile: &ExponentialProfile,
    mut current: State,
    goal: State,
    config: &StepConfig,
    radius: Length,
) -> Result<Vec<FlywheelSample>, Error> {
    let step = config.dt().get::<second>();
    let radius = radius.get::<meter>();
    let speed = |state: State| AngularVelocity::new::<radian_per_second>(state.velocity / radius);

    let mut samples = vec![FlywheelSample {
        time: Time::new::<second>(0.0),
        state: current,
        speed: speed(current),
    }];

    while current.velocity < goal.velocity {
        current = profile.calculate(step, current, goal);

        if samples.len() == 1 && current == goal {
            break;
        }
        check_budget(samples.len(), config)?;

        #[allow(clippy::cast_precision_loss)]
        let time = Time::new::<second>(samples.len() as f64 * step);
        samples.push(FlywheelSample {
            time,
            state: current,
            speed: speed(current),
        });
    }

    Ok(samples)
}

fn check_budget(recorded: usize, config: &StepConfig) -> Result<(), Error> {
    if recorded < config.max_samples() {
        return Ok(());
    }

    log::warn!("run stopped after {recorded} samples short of the goal");
    Err(Error::TooManySamples {
        max_samples: config.max_samples(),
    })
}
