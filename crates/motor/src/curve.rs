//! Speed sweeps of a single current-limited motor.

use uom::si::{
    angular_velocity::radian_per_second,
    electric_current::ampere,
    f64::{AngularVelocity, ElectricCurrent, Power, Ratio, Torque},
    power::watt,
    ratio::ratio,
    torque::newton_meter,
};

use crate::Motor;

/// One point of a motor curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    pub speed: AngularVelocity,
    /// Fraction of free speed.
    pub speed_fraction: Ratio,
    pub free_current: ElectricCurrent,
    /// Largest stator current the supply limit allows at this speed.
    pub max_stator: ElectricCurrent,
    pub stator_current: ElectricCurrent,
    pub torque: Torque,
    pub output_power: Power,
    pub losses: Power,
    pub efficiency: Ratio,
}

/// Sweeps `motor` from standstill to free speed in increments of `step`.
///
/// At each speed the stator current is the smallest of the stator limit, the
/// back-EMF-limited current, and the current the supply limit can feed after
/// resistive and free-running losses. The free current is scaled with speed.
///
/// Returns an empty curve if `step` is not positive.
#[must_use]
pub fn motor_curve(
    motor: &Motor,
    stator_limit: ElectricCurrent,
    supply_limit: ElectricCurrent,
    step: AngularVelocity,
) -> Vec<CurvePoint> {
    let step = step.get::<radian_per_second>();
    if step.is_nan() || step <= 0.0 {
        return Vec::new();
    }

    let spec = motor.si;
    let resistance = motor.resistance;
    let stator_limit = stator_limit.get::<ampere>();
    let max_power_in = spec.voltage * supply_limit.get::<ampere>();

    let mut curve = Vec::new();
    for i in 0_u32.. {
        let speed = f64::from(i) * step;
        if speed > spec.free_speed {
            break;
        }

        let fraction = speed / spec.free_speed;
        let free_current = spec.free_current * fraction;

        // Positive root of R·I² + (fraction·V)·I - (P_in - V·I_free) = 0.
        let b = fraction * spec.voltage;
        let c = spec.voltage * free_current - max_power_in;
        let discriminant = b * b - 4.0 * resistance * c;
        let max_stator = ((-b + discriminant.sqrt()) / (2.0 * resistance)).abs();

        let stator_current = stator_limit
            .min((1.0 - fraction) * spec.stall_current)
            .max(0.0)
            .min(max_stator - free_current);

        let torque = stator_current * motor.kt;
        let output_power = torque * speed;
        let losses = stator_current * stator_current * resistance + spec.voltage * free_current;
        let efficiency = output_power / (output_power + losses);

        curve.push(CurvePoint {
            speed: AngularVelocity::new::<radian_per_second>(speed),
            speed_fraction: Ratio::new::<ratio>(fraction),
            free_current: ElectricCurrent::new::<ampere>(free_current),
            max_stator: ElectricCurrent::new::<ampere>(max_stator),
            stator_current: ElectricCurrent::new::<ampere>(stator_current),
            torque: Torque::new::<newton_meter>(torque),
            output_power: Power::new::<watt>(output_power),
            losses: Power::new::<watt>(losses),
            efficiency: Ratio::new::<ratio>(efficiency),
        });
    }

    curve
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::angular_velocity::revolution_per_minute;

    use crate::MotorModel;

    fn amps(a: f64) -> ElectricCurrent {
        ElectricCurrent::new::<ampere>(a)
    }

    #[test]
    fn sweeps_to_free_speed() {
        let motor = Motor::from_model(MotorModel::Neo, 1);

        let curve = motor_curve(
            &motor,
            amps(80.0),
            amps(60.0),
            AngularVelocity::new::<revolution_per_minute>(10.0),
        );

        assert_eq!(curve.len(), 568);
        assert_relative_eq!(curve[0].speed.get::<radian_per_second>(), 0.0);
        let last = curve.last().unwrap();
        assert!(last.speed_fraction.get::<ratio>() <= 1.0);
        assert!(last.stator_current.get::<ampere>() < 1.0);
    }

    #[test]
    fn limits_bound_stator_current() {
        let motor = Motor::from_model(MotorModel::KrakenX60, 1);

        let curve = motor_curve(
            &motor,
            amps(40.0),
            amps(1000.0),
            AngularVelocity::new::<revolution_per_minute>(100.0),
        );

        assert!(curve.iter().all(|p| p.stator_current.get::<ampere>() <= 40.0 + 1e-12));
        assert_relative_eq!(curve[0].stator_current.get::<ampere>(), 40.0);
        assert_relative_eq!(curve[0].output_power.get::<watt>(), 0.0);
    }

    #[test]
    fn supply_limit_caps_power_input() {
        let motor = Motor::from_model(MotorModel::KrakenX60, 1);
        let supply = 30.0;

        let curve = motor_curve(
            &motor,
            amps(200.0),
            amps(supply),
            AngularVelocity::new::<revolution_per_minute>(250.0),
        );

        for point in &curve {
            let fraction = point.speed_fraction.get::<ratio>();
            let stator = point.stator_current.get::<ampere>();
            let free = point.free_current.get::<ampere>();
            // Electrical power drawn never exceeds what the supply can deliver.
            let drawn = 12.0 * fraction * stator + stator * stator * 12.0 / 366.0 + 12.0 * free;
            assert!(drawn <= 12.0 * supply + 1e-6, "{drawn} at {fraction}");
        }
    }

    #[test]
    fn non_positive_step_is_empty() {
        let motor = Motor::from_model(MotorModel::Cim, 1);

        let curve = motor_curve(
            &motor,
            amps(40.0),
            amps(40.0),
            AngularVelocity::new::<radian_per_second>(0.0),
        );

        assert!(curve.is_empty());
    }
}
