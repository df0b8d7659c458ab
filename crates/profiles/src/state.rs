use std::ops::Neg;

/// Position and velocity along one axis.
///
/// Units are up to the caller; the profiles only require them to be
/// consistent with the [`Constraints`](crate::Constraints) in use.
/// Equality is exact.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    pub position: f64,
    pub velocity: f64,
}

impl State {
    #[must_use]
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }
}

/// Mirror image through the origin.
impl Neg for State {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.position, -self.velocity)
    }
}
