use uom::si::f64::{AngularVelocity, ElectricCurrent, Length, Power, Ratio, Time, Torque, Velocity};

/// One sampled point of a multi-phase profile with the motor operating point
/// that produces it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileSample {
    pub time: Time,
    pub position: Length,
    pub velocity: Velocity,
    pub motor_speed: AngularVelocity,
    pub current: ElectricCurrent,
    pub torque: Torque,
    pub power: Power,
    pub efficiency: Ratio,
}
