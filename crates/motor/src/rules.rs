//! Steady-state operating point of a single current-limited motor.

use uom::si::{
    angular_velocity::radian_per_second,
    electric_current::ampere,
    electric_potential::volt,
    f64::{AngularVelocity, ElectricCurrent, ElectricPotential, Power, Ratio, Torque},
    power::watt,
    ratio::ratio,
    torque::newton_meter,
};

use crate::Motor;

/// The quantity held fixed when solving for an operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum Operating {
    /// The shaft turns at `speed` with `voltage` applied.
    Speed {
        speed: AngularVelocity,
        voltage: ElectricPotential,
    },

    /// The controller commands `current` with `voltage` available.
    Current {
        current: ElectricCurrent,
        voltage: ElectricPotential,
    },
}

/// A consistent steady-state operating point for one motor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct MotorState {
    pub speed: AngularVelocity,
    pub voltage: ElectricPotential,
    pub current: ElectricCurrent,
    pub torque: Torque,
    pub power: Power,
    pub losses: Power,
    pub efficiency: Ratio,
}

/// Solves the DC motor equations at a fixed speed or current.
///
/// The stator current never exceeds `current_limit` and never goes negative
/// (no regeneration). Torque is net of the free-running current:
///
/// ```text
/// τ = kt * max(I - I_free, 0)
/// P = τ * ω
/// losses = I²R + V * I_free
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MotorRules<'a> {
    motor: &'a Motor,
    current_limit: ElectricCurrent,
    operating: Operating,
}

impl<'a> MotorRules<'a> {
    #[must_use]
    pub fn new(motor: &'a Motor, current_limit: ElectricCurrent, operating: Operating) -> Self {
        Self {
            motor,
            current_limit,
            operating,
        }
    }

    #[must_use]
    pub fn solve(&self) -> MotorState {
        let motor = self.motor;
        let limit = self.current_limit.get::<ampere>().max(0.0);

        let (speed, voltage, current) = match self.operating {
            Operating::Speed { speed, voltage } => {
                let w = speed.get::<radian_per_second>();
                let v = voltage.get::<volt>();
                let current = ((v - w / motor.kv) / motor.resistance).clamp(0.0, limit);
                (w, v, current)
            }
            Operating::Current { current, voltage } => {
                let v = voltage.get::<volt>();
                let current = current.get::<ampere>().clamp(0.0, limit);
                let w = (motor.kv * (v - current * motor.resistance)).max(0.0);
                (w, v, current)
            }
        };

        let free_current = motor.si.free_current;
        let torque = motor.kt * (current - free_current).max(0.0);
        let power = torque * speed;
        let losses = current * current * motor.resistance + voltage * free_current;
        let efficiency = if power + losses > 0.0 {
            power / (power + losses)
        } else {
            0.0
        };

        MotorState {
            speed: AngularVelocity::new::<radian_per_second>(speed),
            voltage: ElectricPotential::new::<volt>(voltage),
            current: ElectricCurrent::new::<ampere>(current),
            torque: Torque::new::<newton_meter>(torque),
            power: Power::new::<watt>(power),
            losses: Power::new::<watt>(losses),
            efficiency: Ratio::new::<ratio>(efficiency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::angular_velocity::revolution_per_minute;

    use crate::MotorModel;

    fn volts(v: f64) -> ElectricPotential {
        ElectricPotential::new::<volt>(v)
    }

    fn amps(a: f64) -> ElectricCurrent {
        ElectricCurrent::new::<ampere>(a)
    }

    #[test]
    fn stall_draws_stall_current_when_unlimited() {
        let motor = Motor::from_model(MotorModel::Neo, 1);

        let state = MotorRules::new(
            &motor,
            amps(1000.0),
            Operating::Speed {
                speed: AngularVelocity::new::<radian_per_second>(0.0),
                voltage: volts(12.0),
            },
        )
        .solve();

        assert_relative_eq!(state.current.get::<ampere>(), 105.0, max_relative = 1e-12);
        assert_relative_eq!(
            state.torque.get::<newton_meter>(),
            2.6 / 105.0 * (105.0 - 1.8),
            max_relative = 1e-12
        );
        assert_relative_eq!(state.power.get::<watt>(), 0.0);
        assert_relative_eq!(state.efficiency.get::<ratio>(), 0.0);
    }

    #[test]
    fn free_speed_draws_free_current_and_no_torque() {
        let motor = Motor::from_model(MotorModel::Neo, 1);

        let state = MotorRules::new(
            &motor,
            amps(40.0),
            Operating::Speed {
                speed: AngularVelocity::new::<revolution_per_minute>(5676.0),
                voltage: volts(12.0),
            },
        )
        .solve();

        assert_relative_eq!(state.current.get::<ampere>(), 1.8, max_relative = 1e-9);
        assert!(state.torque.get::<newton_meter>().abs() < 1e-9);
    }

    #[test]
    fn current_limit_caps_stall_current() {
        let motor = Motor::from_model(MotorModel::Falcon500, 1);

        let state = MotorRules::new(
            &motor,
            amps(40.0),
            Operating::Speed {
                speed: AngularVelocity::new::<radian_per_second>(0.0),
                voltage: volts(12.0),
            },
        )
        .solve();

        assert_relative_eq!(state.current.get::<ampere>(), 40.0);
    }

    #[test]
    fn overspeed_never_regenerates() {
        let motor = Motor::from_model(MotorModel::Cim, 1);

        let state = MotorRules::new(
            &motor,
            amps(40.0),
            Operating::Speed {
                speed: AngularVelocity::new::<revolution_per_minute>(8000.0),
                voltage: volts(12.0),
            },
        )
        .solve();

        assert_relative_eq!(state.current.get::<ampere>(), 0.0);
        assert_relative_eq!(state.torque.get::<newton_meter>(), 0.0);
    }

    #[test]
    fn current_mode_solves_for_speed() {
        let motor = Motor::from_model(MotorModel::KrakenX60, 1);

        let state = MotorRules::new(
            &motor,
            amps(60.0),
            Operating::Current {
                current: amps(60.0),
                voltage: volts(12.0),
            },
        )
        .solve();

        let expected_speed = motor.kv() * (12.0 - 60.0 * 12.0 / 366.0);
        assert_relative_eq!(
            state.speed.get::<radian_per_second>(),
            expected_speed,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            state.torque.get::<newton_meter>(),
            7.09 / 366.0 * 58.0,
            max_relative = 1e-12
        );
        let efficiency = state.efficiency.get::<ratio>();
        assert!(efficiency > 0.0 && efficiency < 1.0);
    }
}
