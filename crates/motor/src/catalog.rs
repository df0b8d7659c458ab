//! Catalogued motors and their winding inductances.

use std::{fmt, str::FromStr};

use uom::si::{f64::Inductance, inductance::henry};

use crate::{Error, MotorSpec};

/// Inductance assumed for motors without a measured value.
pub(crate) const DEFAULT_INDUCTANCE_HENRY: f64 = 35e-6;

/// Motors with published 12 V characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum MotorModel {
    Cim,
    MiniCim,
    Bag,
    Pro775,
    RedLine775,
    Neo,
    Neo550,
    NeoVortex,
    CoreHex,
    Falcon500,
    KrakenX60,
    KrakenX60Foc,
    KrakenX44,
}

impl MotorModel {
    pub const ALL: [MotorModel; 13] = [
        Self::Cim,
        Self::MiniCim,
        Self::Bag,
        Self::Pro775,
        Self::RedLine775,
        Self::Neo,
        Self::Neo550,
        Self::NeoVortex,
        Self::CoreHex,
        Self::Falcon500,
        Self::KrakenX60,
        Self::KrakenX60Foc,
        Self::KrakenX44,
    ];

    /// The display name, also accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cim => "CIM",
            Self::MiniCim => "miniCIM",
            Self::Bag => "BAG",
            Self::Pro775 => "775pro",
            Self::RedLine775 => "775 RedLine",
            Self::Neo => "NEO",
            Self::Neo550 => "NEO 550",
            Self::NeoVortex => "NEO Vortex",
            Self::CoreHex => "Core Hex",
            Self::Falcon500 => "Falcon 500",
            Self::KrakenX60 => "Kraken X60",
            Self::KrakenX60Foc => "Kraken X60 (FOC)",
            Self::KrakenX44 => "Kraken X44",
        }
    }

    /// Nominal characteristics at 12 V.
    #[must_use]
    pub fn spec(self) -> MotorSpec {
        // free speed (rpm), stall torque (N·m), stall current (A), free current (A)
        let (free_speed, stall_torque, stall_current, free_current) = match self {
            Self::Cim => (5310.0, 2.42, 133.0, 2.7),
            Self::MiniCim => (5840.0, 1.41, 89.0, 3.0),
            Self::Bag => (13180.0, 0.43, 53.0, 1.8),
            Self::Pro775 => (18730.0, 0.71, 134.0, 0.7),
            Self::RedLine775 => (21020.0, 0.645, 122.0, 3.8),
            Self::Neo => (5676.0, 2.6, 105.0, 1.8),
            Self::Neo550 => (11000.0, 0.97, 100.0, 1.4),
            Self::NeoVortex => (6784.0, 3.6, 211.0, 3.6),
            Self::CoreHex => (125.0, 3.2, 4.4, 0.18),
            Self::Falcon500 => (6380.0, 4.69, 257.0, 1.5),
            Self::KrakenX60 => (6000.0, 7.09, 366.0, 2.0),
            Self::KrakenX60Foc => (5800.0, 9.37, 483.0, 2.0),
            Self::KrakenX44 => (7530.0, 4.05, 275.0, 1.4),
        };
        MotorSpec::from_datasheet(free_speed, stall_torque, stall_current, free_current, 12.0)
    }

    /// Measured winding inductance.
    ///
    /// Motors without a measurement fall back to 35 µH.
    #[must_use]
    pub fn inductance(self) -> Inductance {
        let microhenry = match self {
            Self::Pro775 | Self::RedLine775 => 47.0,
            Self::MiniCim => 145.0,
            Self::CoreHex => 52_000.0,
            Self::Cim => 132.0,
            Self::Bag => 138.0,
            Self::Neo550 => 10.0,
            Self::Neo => 35.0,
            _ => return Inductance::new::<henry>(DEFAULT_INDUCTANCE_HENRY),
        };
        Inductance::new::<henry>(microhenry * 1e-6)
    }
}

impl fmt::Display for MotorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MotorModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|model| model.name() == s)
            .ok_or_else(|| Error::UnknownMotor(s.to_string()))
    }
}
