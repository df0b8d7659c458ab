use recalc_core::constraint::{Constrained, NonNegative, StrictlyPositive};
use recalc_motor::drive::Efficiency;
use uom::si::f64::{Acceleration, ElectricCurrent, Length, Mass, Velocity};

/// A motor-driven linear mechanism and the move it should make.
///
/// `gravity` opposes motion while accelerating and assists while stopping,
/// so a horizontal mechanism passes zero and a vertical lift passes standard
/// gravity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Mechanism {
    pub target_distance: Length,
    /// Speed cap; the effective cap is the smaller of this and the loaded
    /// free speed.
    pub max_velocity: Velocity,
    pub efficiency: Efficiency,
    /// Motor turns per output turn.
    pub ratio: Constrained<f64, StrictlyPositive>,
    pub mass: Constrained<Mass, StrictlyPositive>,
    /// Stator current limit per motor.
    pub stator_limit: ElectricCurrent,
    pub gravity: Constrained<Acceleration, NonNegative>,
    /// Wheel or pulley diameter.
    pub diameter: Constrained<Length, StrictlyPositive>,
    /// Ends sampling once the velocity reaches this value.
    pub stop_at_velocity: Option<Velocity>,
}
