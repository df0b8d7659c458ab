use thiserror::Error;
use uom::si::{
    electric_potential::volt,
    f64::{ElectricPotential, Time},
    time::second,
};

/// How a planned profile is sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleConfig {
    dt: Time,
    max_samples: usize,
    voltage: ElectricPotential,
}

/// Errors that can occur when validating a [`SampleConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("time step must be finite and positive")]
    TimeStep,

    #[error("max_samples must be at least 1")]
    MaxSamples,
}

impl Default for SampleConfig {
    /// 10 ms steps, at most 100 000 samples, 12 V applied.
    fn default() -> Self {
        Self {
            dt: Time::new::<second>(0.01),
            max_samples: 100_000,
            voltage: ElectricPotential::new::<volt>(12.0),
        }
    }
}

impl SampleConfig {
    /// Creates a new sampling config.
    ///
    /// # Errors
    ///
    /// Returns an error if `dt` is not finite and positive or if
    /// `max_samples` is zero.
    pub fn new(
        dt: Time,
        max_samples: usize,
        voltage: ElectricPotential,
    ) -> Result<Self, ConfigError> {
        let step = dt.get::<second>();
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::TimeStep);
        }
        if max_samples == 0 {
            return Err(ConfigError::MaxSamples);
        }

        Ok(Self {
            dt,
            max_samples,
            voltage,
        })
    }

    #[must_use]
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Returns the sample count past which sampling gives up.
    #[must_use]
    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    /// Returns the motor voltage used to annotate samples.
    #[must_use]
    pub fn voltage(&self) -> ElectricPotential {
        self.voltage
    }
}
