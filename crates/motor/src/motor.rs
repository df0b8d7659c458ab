use uom::si::{
    electrical_resistance::ohm,
    f64::{ElectricalResistance, Inductance},
    inductance::henry,
};

use crate::{
    MotorModel,
    catalog::DEFAULT_INDUCTANCE_HENRY,
    spec::{MotorSpec, SiSpec},
};

/// One or more identical motors ganged on a shared output.
///
/// The electrical constants are derived once from the [`MotorSpec`]:
///
/// ```text
/// R  = V / I_stall
/// kv = ω_free / (V - R * I_free)
/// kt = τ_stall / I_stall
/// b  = kt * I_free / ω_free
/// ```
///
/// `b` is the viscous friction that accounts for the free-running current.
#[derive(Debug, Clone, PartialEq)]
pub struct Motor {
    spec: MotorSpec,
    model: Option<MotorModel>,
    quantity: u32,
    pub(crate) si: SiSpec,
    pub(crate) resistance: f64,
    pub(crate) kv: f64,
    pub(crate) kt: f64,
    pub(crate) b: f64,
}

impl Motor {
    /// Creates a motor from a custom spec.
    ///
    /// Custom motors use the default winding inductance in dynamic simulations.
    #[must_use]
    pub fn new(spec: MotorSpec, quantity: u32) -> Self {
        Self::build(spec, None, quantity)
    }

    /// Creates a motor from a catalogued model.
    #[must_use]
    pub fn from_model(model: MotorModel, quantity: u32) -> Self {
        Self::build(model.spec(), Some(model), quantity)
    }

    fn build(spec: MotorSpec, model: Option<MotorModel>, quantity: u32) -> Self {
        let si = spec.si();
        let resistance = si.voltage / si.stall_current;
        let kv = si.free_speed / (si.voltage - resistance * si.free_current);
        let kt = si.stall_torque / si.stall_current;
        let b = kt * si.free_current / si.free_speed;

        Self {
            spec,
            model,
            quantity,
            si,
            resistance,
            kv,
            kt,
            b,
        }
    }

    #[must_use]
    pub fn spec(&self) -> &MotorSpec {
        &self.spec
    }

    /// Returns the catalogued model, if the motor came from the catalog.
    #[must_use]
    pub fn model(&self) -> Option<MotorModel> {
        self.model
    }

    /// Number of motors sharing the load.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Terminal resistance of one motor.
    #[must_use]
    pub fn resistance(&self) -> ElectricalResistance {
        ElectricalResistance::new::<ohm>(self.resistance)
    }

    /// Velocity constant in rad/s per volt.
    #[must_use]
    pub fn kv(&self) -> f64 {
        self.kv
    }

    /// Torque constant in N·m per ampere.
    #[must_use]
    pub fn kt(&self) -> f64 {
        self.kt
    }

    /// Viscous friction coefficient in N·m·s/rad.
    #[must_use]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Winding inductance used by the dynamic model.
    #[must_use]
    pub fn inductance(&self) -> Inductance {
        self.model.map_or_else(
            || Inductance::new::<henry>(DEFAULT_INDUCTANCE_HENRY),
            MotorModel::inductance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn derives_constants_from_spec() {
        let motor = Motor::from_model(MotorModel::Cim, 2);
        let free_speed = 5310.0 * std::f64::consts::TAU / 60.0;

        assert_relative_eq!(motor.resistance().get::<ohm>(), 12.0 / 133.0);
        assert_relative_eq!(motor.kt(), 2.42 / 133.0);
        assert_relative_eq!(
            motor.kv(),
            free_speed / (12.0 - 12.0 / 133.0 * 2.7),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            motor.b(),
            2.42 / 133.0 * 2.7 / free_speed,
            max_relative = 1e-12
        );
        assert_eq!(motor.quantity(), 2);
    }

    #[test]
    fn custom_motor_uses_default_inductance() {
        let motor = Motor::new(MotorSpec::from_datasheet(6000.0, 4.0, 200.0, 2.0, 12.0), 1);

        assert_eq!(motor.model(), None);
        assert_relative_eq!(motor.inductance().get::<henry>(), 35e-6);
    }
}
