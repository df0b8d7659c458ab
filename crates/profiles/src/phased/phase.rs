/// Time, position and velocity at a phase boundary, in s, m and m/s.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Txv {
    pub t: f64,
    pub x: f64,
    pub v: f64,
}

impl Txv {
    #[must_use]
    pub fn new(t: f64, x: f64, v: f64) -> Self {
        Self { t, x, v }
    }
}

/// The boundaries of one phase.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub start: Txv,
    pub end: Txv,
}

impl Segment {
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end.t - self.start.t
    }

    /// Returns `true` if `t` falls at or before the end of this segment.
    pub(super) fn covers(&self, t: f64) -> bool {
        t <= self.end.t
    }
}

/// A phase that a move may skip.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    NotEntered,
    Entered(Segment),
}

impl Phase {
    #[must_use]
    pub fn is_entered(&self) -> bool {
        matches!(self, Self::Entered(_))
    }

    #[must_use]
    pub fn segment(&self) -> Option<&Segment> {
        match self {
            Self::Entered(segment) => Some(segment),
            Self::NotEntered => None,
        }
    }
}

/// The four phases a move is built from, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum PhaseKind {
    /// Constant acceleration at the current limit.
    Ramp,
    /// Back-EMF-limited approach toward free speed.
    Exponential,
    /// Constant velocity at the speed cap.
    Coast,
    /// Constant deceleration to rest at the target.
    Stop,
}
