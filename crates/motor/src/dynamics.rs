//! Inductive DC motor dynamics under a closed-loop current limit.
//!
//! The state vector is `[ω, I, I_lim, θ]`:
//!
//! ```text
//! dω/dt    = max(0, kt·η·I_use - τ_load - b·ω) / (J + J_rotor) · n
//! dI/dt    = (V - R·I - ω/kv) / L
//! dI_lim/dt = 0 while I has reached either current limit, dI/dt otherwise
//! dθ/dt    = ω
//! ```
//!
//! where `I_use = min(I, I_lim)` is the current the controller lets through
//! and `n` is the number of motors. Integration uses RK4 with the truncating
//! early-stop rule of [`recalc_solvers::ode`].

mod config;

pub use config::{ConfigError, MotorSimConfig};

use recalc_core::Rates;
use recalc_solvers::ode::{Integrator, Status};
use uom::si::{
    angle::radian,
    angular_velocity::radian_per_second,
    electric_current::ampere,
    electric_potential::volt,
    f64::{
        Angle, AngularVelocity, ElectricCurrent, ElectricPotential, MomentOfInertia, Power, Ratio,
        Time, Torque,
    },
    inductance::henry,
    moment_of_inertia::kilogram_square_meter,
    power::watt,
    ratio::ratio,
    time::second,
    torque::newton_meter,
};

use crate::{Error, Motor, drive::Efficiency};

/// Rotor inertia added to every load, in kg·m².
pub const ROTOR_INERTIA: f64 = 5.822569e-5;

/// RK4 diverges on `dI/dt = -R/L·I` once `h·R/L` exceeds this bound.
const RK4_STABILITY_LIMIT: f64 = 2.785;

/// Operating conditions for a motor dynamics run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct MotorOdeRequest {
    pub stator_voltage: ElectricPotential,
    pub supply_voltage: ElectricPotential,
    pub supply_limit: ElectricCurrent,
    pub stator_limit: ElectricCurrent,
    /// Load inertia reflected to the motor shaft.
    pub inertia: MomentOfInertia,
    /// Constant torque opposing motion, such as gravity on an arm.
    pub antagonist_torque: Torque,
    pub efficiency: Efficiency,
}

/// What the stop predicate sees at every RK4 stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoppingInfo {
    pub position: Angle,
    pub velocity: AngularVelocity,
    pub current_draw: ElectricCurrent,
    /// Elapsed time in steps; fractional at RK4 half steps.
    pub step_number: f64,
}

/// One accepted point of a motor dynamics run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct OdeSample {
    pub time: Time,
    pub position: Angle,
    pub velocity: AngularVelocity,
    pub stator_current: ElectricCurrent,
    pub power: Power,
    pub losses: Power,
    pub efficiency: Ratio,
    pub torque: Torque,
}

/// Simulates `motor` from rest until `config`'s duration elapses or
/// `should_stop` returns `true`.
///
/// The supply limit is converted to stator terms by `V_supply / V_stator`.
/// The run starts at rest with the winding at stall current (scaled by
/// `V_stator / V_supply`) and the limit tracker at the tighter of the two
/// limits. `should_stop` is evaluated at every RK4 stage; when it fires the
/// step in progress and the point it started from are dropped.
///
/// # Errors
///
/// Returns [`Error::Integration`] if the configured window cannot be
/// integrated.
pub fn solve_motor_ode<F>(
    motor: &Motor,
    request: &MotorOdeRequest,
    config: &MotorSimConfig,
    mut should_stop: F,
) -> Result<Vec<OdeSample>, Error>
where
    F: FnMut(&StoppingInfo) -> bool,
{
    let stator_voltage = request.stator_voltage.get::<volt>();
    let supply_voltage = request.supply_voltage.get::<volt>();
    let voltage_ratio = stator_voltage / supply_voltage;
    let supply_limit = request.supply_limit.get::<ampere>() / voltage_ratio;

    let stall_current = motor.si.stall_current * voltage_ratio;
    let free_current = motor.si.free_current * voltage_ratio;

    let inductance = motor.inductance().get::<henry>();
    let inertia = request.inertia.get::<kilogram_square_meter>() + ROTOR_INERTIA;
    let antagonist = request.antagonist_torque.get::<newton_meter>();
    let efficiency = request.efficiency.as_ref().get::<ratio>();
    let quantity = f64::from(motor.quantity());
    let steps_per_second = f64::from(config.steps_per_second());

    let (resistance, kv, kt, b) = (motor.resistance, motor.kv, motor.kt, motor.b);

    let stiffness = resistance / inductance / steps_per_second;
    if stiffness > RK4_STABILITY_LIMIT {
        log::warn!(
            "step of {:.2e} s exceeds the electrical time constant L/R = {:.2e} s; \
             the current state may diverge",
            1.0 / steps_per_second,
            inductance / resistance,
        );
    }

    let field = |t: f64, y: &[f64; 4]| -> Rates<4> {
        let [velocity, current, limit, position] = *y;

        let current_draw = current.min(limit);
        let limited = current >= supply_limit || current >= limit;

        let current_rate = (stator_voltage - resistance * current - velocity / kv) / inductance;
        let acceleration = (kt * efficiency * current_draw - antagonist - b * velocity).max(0.0)
            / inertia
            * quantity;

        let info = StoppingInfo {
            position: Angle::new::<radian>(position),
            velocity: AngularVelocity::new::<radian_per_second>(velocity),
            current_draw: ElectricCurrent::new::<ampere>(current_draw),
            step_number: t * steps_per_second,
        };

        Rates {
            change_rates: [
                acceleration,
                current_rate,
                if limited { 0.0 } else { current_rate },
                velocity,
            ],
            should_stop: should_stop(&info),
        }
    };

    let y0 = [
        0.0,
        stall_current,
        request.stator_limit.get::<ampere>().min(supply_limit),
        0.0,
    ];
    let integrator = Integrator::new(y0, 0.0, config.duration().get::<second>())?;
    let solution = integrator.rk4(field, config.steps())?;

    if solution.status == Status::StoppedEarly {
        log::debug!("motor simulation stopped after {} points", solution.len());
    }

    let samples = solution
        .points()
        .map(|(t, y)| {
            let [velocity, current, limit, position] = *y;
            let current_draw = current.min(limit);

            let power = kt * (current_draw - free_current) * velocity;
            let losses = current_draw * current_draw * resistance + stator_voltage * free_current;

            OdeSample {
                time: Time::new::<second>(t),
                position: Angle::new::<radian>(position),
                velocity: AngularVelocity::new::<radian_per_second>(velocity),
                stator_current: ElectricCurrent::new::<ampere>(current_draw),
                power: Power::new::<watt>(power),
                losses: Power::new::<watt>(losses),
                efficiency: Ratio::new::<ratio>(power / (power + losses)),
                torque: Torque::new::<newton_meter>(kt * current_draw),
            }
        })
        .collect();

    Ok(samples)
}
