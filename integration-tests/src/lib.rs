//! Shared fixtures for the cross-crate tests.

use recalc_core::constraint::{Constrained, NonNegative, StrictlyPositive, UnitInterval};
use recalc_motor::{Motor, MotorModel};
use recalc_profiles::{Constraints, phased::Mechanism};
use uom::si::{
    acceleration::meter_per_second_squared,
    electric_current::ampere,
    f64::{Acceleration, ElectricCurrent, Length, Mass, Velocity},
    length::meter,
    mass::kilogram,
    velocity::meter_per_second,
};

/// Installs a test logger once; later calls are no-ops.
pub fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// Plant of a small elevator with `kV = 2.5629 V·s/m` and `kA = 0.43277 V·s²/m`.
#[must_use]
pub fn elevator_constraints() -> Constraints {
    Constraints::from_characteristics(12.0, 2.5629, 0.43277)
}

#[must_use]
pub fn kraken() -> Motor {
    Motor::from_model(MotorModel::KrakenX60, 1)
}

/// A Kraken X60 through 10:1 onto a 5 cm pulley, sliding 10 kg at 40 A.
#[must_use]
pub fn kraken_slide(target: f64, max_velocity: f64) -> Mechanism {
    Mechanism {
        target_distance: Length::new::<meter>(target),
        max_velocity: Velocity::new::<meter_per_second>(max_velocity),
        efficiency: UnitInterval::one(),
        ratio: Constrained::<f64, StrictlyPositive>::new(10.0).expect("ratio is positive"),
        mass: Constrained::new(Mass::new::<kilogram>(10.0)).expect("mass is positive"),
        stator_limit: ElectricCurrent::new::<ampere>(40.0),
        gravity: NonNegative::new(Acceleration::new::<meter_per_second_squared>(0.0))
            .expect("gravity is non-negative"),
        diameter: Constrained::new(Length::new::<meter>(0.05)).expect("diameter is positive"),
        stop_at_velocity: None,
    }
}
