//! Drivetrain helpers: current-limit conversion, battery sag, stall load, and
//! the feedforward characteristics of a geared linear mechanism.
//!
//! The feedforward gains are expressed against a nominal 12 V supply:
//!
//! - `kv`: volts per unit of output velocity
//! - `ka`: volts per unit of output acceleration
//! - `kg`: volts needed to hold the load against gravity

use recalc_core::constraint::{Constrained, UnitInterval};
use uom::si::{
    angular_velocity::radian_per_second,
    electric_current::ampere,
    electric_potential::volt,
    electrical_resistance::ohm,
    f64::{
        AngularVelocity, ElectricCurrent, ElectricPotential, ElectricalResistance, Length, Mass,
        Ratio, Torque,
    },
    length::meter,
    mass::kilogram,
    ratio::ratio,
    torque::newton_meter,
};

use crate::{Motor, MotorRules, Operating};

/// Standard gravity in m/s².
pub const GRAVITY: f64 = 9.806_65;

/// Supply voltage the feedforward gains are normalized to.
pub const NOMINAL_VOLTAGE: f64 = 12.0;

/// Drivetrain efficiency in `[0, 1]`.
pub type Efficiency = Constrained<Ratio, UnitInterval>;

/// Converts a supply-side current limit to the equivalent stator current.
///
/// Power balance gives `I_stator = I_supply * V_supply / V_stator`. A zero
/// stator voltage yields a zero limit.
#[must_use]
pub fn supply_limit_to_stator_limit(
    supply_limit: ElectricCurrent,
    supply_voltage: ElectricPotential,
    stator_voltage: ElectricPotential,
) -> ElectricCurrent {
    let stator_voltage = stator_voltage.get::<volt>();
    if stator_voltage == 0.0 {
        return ElectricCurrent::new::<ampere>(0.0);
    }

    ElectricCurrent::new::<ampere>(
        supply_limit.get::<ampere>() * supply_voltage.get::<volt>() / stator_voltage,
    )
}

/// Battery terminal voltage with every listed current flowing through its
/// internal resistance.
pub fn loaded_battery_voltage<I>(
    supply_voltage: ElectricPotential,
    battery_resistance: ElectricalResistance,
    currents: I,
) -> ElectricPotential
where
    I: IntoIterator<Item = ElectricCurrent>,
{
    let resistance = battery_resistance.get::<ohm>();
    let sag: f64 = currents
        .into_iter()
        .map(|current| current.get::<ampere>() * resistance)
        .sum();

    ElectricPotential::new::<volt>(supply_voltage.get::<volt>() - sag)
}

/// Heaviest mass the mechanism can hold at the current limit.
///
/// The motors run at `current_limit` and `stator_voltage`; their combined
/// torque passes through `gear_ratio` and `efficiency` onto a spool of
/// `spool_diameter`. A zero diameter yields a zero load.
#[must_use]
pub fn stall_load(
    motor: &Motor,
    current_limit: ElectricCurrent,
    spool_diameter: Length,
    gear_ratio: f64,
    efficiency: Efficiency,
    stator_voltage: ElectricPotential,
) -> Mass {
    let diameter = spool_diameter.get::<meter>();
    if diameter == 0.0 {
        return Mass::new::<kilogram>(0.0);
    }

    let torque = holding_torque(motor, current_limit, stator_voltage, gear_ratio, efficiency);
    Mass::new::<kilogram>(torque / (diameter / 2.0) / GRAVITY)
}

/// Output torque of all motors at the current limit, after gearing and losses.
fn holding_torque(
    motor: &Motor,
    current_limit: ElectricCurrent,
    stator_voltage: ElectricPotential,
    gear_ratio: f64,
    efficiency: Efficiency,
) -> f64 {
    let state = MotorRules::new(
        motor,
        current_limit,
        Operating::Current {
            current: current_limit,
            voltage: stator_voltage,
        },
    )
    .solve();

    state.torque.get::<newton_meter>()
        * f64::from(motor.quantity())
        * gear_ratio
        * efficiency.as_ref().get::<ratio>()
}

/// Velocity gain in V·s/m for an output turning at most `free_speed` on a
/// drum of `radius`.
///
/// Returns zero for a zero free speed.
#[must_use]
pub fn kv(free_speed: AngularVelocity, radius: Length) -> f64 {
    let max_velocity = free_speed.get::<radian_per_second>() * radius.get::<meter>();
    if max_velocity == 0.0 {
        return 0.0;
    }
    NOMINAL_VOLTAGE / max_velocity
}

/// Acceleration gain in V·s²/m for `torque` at a drum of `radius` moving `mass`.
#[must_use]
pub fn ka(torque: Torque, radius: Length, mass: Mass) -> f64 {
    let acceleration = torque.get::<newton_meter>() / radius.get::<meter>() / mass.get::<kilogram>();
    NOMINAL_VOLTAGE / acceleration
}

/// Gravity gain in volts for `mass` hanging from a drum of `radius` driven
/// by at most `torque`.
#[must_use]
pub fn kg(torque: Torque, radius: Length, mass: Mass) -> ElectricPotential {
    let holding = mass.get::<kilogram>() * GRAVITY * radius.get::<meter>();
    ElectricPotential::new::<volt>(NOMINAL_VOLTAGE * holding / torque.get::<newton_meter>())
}

/// Feedforward gains of a geared spool lifting a load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feedforward {
    /// V·s/m
    pub kv: f64,
    /// V·s²/m
    pub ka: f64,
    pub kg: ElectricPotential,
}

impl Feedforward {
    /// Gains for `motor` geared by `gear_ratio` onto a spool of `spool_diameter`
    /// lifting `mass` at `angle_sin` of vertical travel (1 for a vertical
    /// elevator, 0 for a horizontal slide).
    ///
    /// A zero ratio yields zero `kv`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn linear(
        motor: &Motor,
        current_limit: ElectricCurrent,
        stator_voltage: ElectricPotential,
        gear_ratio: f64,
        efficiency: Efficiency,
        spool_diameter: Length,
        mass: Mass,
        angle_sin: f64,
    ) -> Self {
        let radius = spool_diameter / 2.0;

        let kv = if gear_ratio == 0.0 {
            0.0
        } else {
            kv(motor.spec().free_speed / gear_ratio, radius)
        };

        let peak_torque = Torque::new::<newton_meter>(
            motor.kt()
                * current_limit.get::<ampere>()
                * f64::from(motor.quantity())
                * gear_ratio
                * efficiency.as_ref().get::<ratio>(),
        );
        let ka = ka(peak_torque, radius, mass);

        let holding = Torque::new::<newton_meter>(holding_torque(
            motor,
            current_limit,
            stator_voltage,
            gear_ratio,
            efficiency,
        ));
        let kg = kg(holding, radius, mass) * angle_sin;

        Self { kv, ka, kg }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{angular_velocity::revolution_per_minute, length::inch};

    use crate::MotorModel;

    fn full_efficiency() -> Efficiency {
        UnitInterval::one()
    }

    #[test]
    fn supply_limit_scales_with_voltage_ratio() {
        let limit = supply_limit_to_stator_limit(
            ElectricCurrent::new::<ampere>(40.0),
            ElectricPotential::new::<volt>(12.0),
            ElectricPotential::new::<volt>(6.0),
        );
        assert_relative_eq!(limit.get::<ampere>(), 80.0);

        let zero = supply_limit_to_stator_limit(
            ElectricCurrent::new::<ampere>(40.0),
            ElectricPotential::new::<volt>(12.0),
            ElectricPotential::new::<volt>(0.0),
        );
        assert_relative_eq!(zero.get::<ampere>(), 0.0);
    }

    #[test]
    fn battery_sags_with_each_current() {
        let loaded = loaded_battery_voltage(
            ElectricPotential::new::<volt>(12.5),
            ElectricalResistance::new::<ohm>(0.015),
            [40.0, 60.0].map(ElectricCurrent::new::<ampere>),
        );

        assert_relative_eq!(loaded.get::<volt>(), 11.0, max_relative = 1e-12);
    }

    #[test]
    fn stall_load_matches_hand_calculation() {
        let motor = Motor::from_model(MotorModel::KrakenX60, 2);
        let current_limit = ElectricCurrent::new::<ampere>(40.0);

        let load = stall_load(
            &motor,
            current_limit,
            Length::new::<meter>(0.05),
            10.0,
            full_efficiency(),
            ElectricPotential::new::<volt>(12.0),
        );

        let per_motor = 7.09 / 366.0 * (40.0 - 2.0);
        let expected = per_motor * 2.0 * 10.0 / 0.025 / GRAVITY;
        assert_relative_eq!(load.get::<kilogram>(), expected, max_relative = 1e-12);
    }

    #[test]
    fn stall_load_zero_diameter_is_zero() {
        let motor = Motor::from_model(MotorModel::Neo, 1);

        let load = stall_load(
            &motor,
            ElectricCurrent::new::<ampere>(40.0),
            Length::new::<meter>(0.0),
            5.0,
            full_efficiency(),
            ElectricPotential::new::<volt>(12.0),
        );

        assert_relative_eq!(load.get::<kilogram>(), 0.0);
    }

    #[test]
    fn kv_is_volts_per_free_velocity() {
        let gain = kv(
            AngularVelocity::new::<revolution_per_minute>(600.0),
            Length::new::<meter>(0.1),
        );

        let free_velocity = 600.0 * std::f64::consts::TAU / 60.0 * 0.1;
        assert_relative_eq!(gain, 12.0 / free_velocity, max_relative = 1e-12);
    }

    #[test]
    fn linear_gains_are_consistent() {
        let motor = Motor::from_model(MotorModel::Neo, 2);

        let gains = Feedforward::linear(
            &motor,
            ElectricCurrent::new::<ampere>(40.0),
            ElectricPotential::new::<volt>(12.0),
            5.0,
            full_efficiency(),
            Length::new::<inch>(1.5),
            Mass::new::<kilogram>(5.0),
            1.0,
        );

        assert!(gains.kv > 0.0);
        assert!(gains.ka > 0.0);
        // Holding 5 kg needs well under the full 12 V.
        let kg = gains.kg.get::<volt>();
        assert!(kg > 0.0 && kg < NOMINAL_VOLTAGE);

        let flat = Feedforward::linear(
            &motor,
            ElectricCurrent::new::<ampere>(40.0),
            ElectricPotential::new::<volt>(12.0),
            0.0,
            full_efficiency(),
            Length::new::<inch>(1.5),
            Mass::new::<kilogram>(5.0),
            0.0,
        );
        assert_relative_eq!(flat.kv, 0.0);
    }
}
