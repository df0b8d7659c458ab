use uom::si::{
    angular_velocity::{radian_per_second, revolution_per_minute},
    electric_current::ampere,
    electric_potential::volt,
    f64::{AngularVelocity, ElectricCurrent, ElectricPotential, Torque},
    torque::newton_meter,
};

/// Nameplate characteristics of a brushed or brushless DC motor.
///
/// All values are measured at `voltage`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct MotorSpec {
    pub free_speed: AngularVelocity,
    pub stall_torque: Torque,
    pub stall_current: ElectricCurrent,
    pub free_current: ElectricCurrent,
    pub voltage: ElectricPotential,
}

impl MotorSpec {
    /// Builds a spec from datasheet units: rpm, N·m, amperes, volts.
    #[must_use]
    pub fn from_datasheet(
        free_speed_rpm: f64,
        stall_torque_nm: f64,
        stall_current_a: f64,
        free_current_a: f64,
        voltage_v: f64,
    ) -> Self {
        Self {
            free_speed: AngularVelocity::new::<revolution_per_minute>(free_speed_rpm),
            stall_torque: Torque::new::<newton_meter>(stall_torque_nm),
            stall_current: ElectricCurrent::new::<ampere>(stall_current_a),
            free_current: ElectricCurrent::new::<ampere>(free_current_a),
            voltage: ElectricPotential::new::<volt>(voltage_v),
        }
    }

    pub(crate) fn si(&self) -> SiSpec {
        SiSpec {
            free_speed: self.free_speed.get::<radian_per_second>(),
            stall_torque: self.stall_torque.get::<newton_meter>(),
            stall_current: self.stall_current.get::<ampere>(),
            free_current: self.free_current.get::<ampere>(),
            voltage: self.voltage.get::<volt>(),
        }
    }
}

/// A [`MotorSpec`] stripped to SI magnitudes for the numeric kernels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SiSpec {
    pub free_speed: f64,
    pub stall_torque: f64,
    pub stall_current: f64,
    pub free_current: f64,
    pub voltage: f64,
}
