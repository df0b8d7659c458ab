use thiserror::Error;
use uom::si::{f64::Time, time::second};

/// Integration window for the motor dynamics simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct MotorSimConfig {
    duration: Time,
    steps_per_second: u32,
}

/// Errors that can occur when validating a [`MotorSimConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("duration must be finite and positive")]
    Duration,

    #[error("steps_per_second must be at least one")]
    StepsPerSecond,
}

impl Default for MotorSimConfig {
    /// Thirty seconds at one millisecond per step.
    fn default() -> Self {
        Self {
            duration: Time::new::<second>(30.0),
            steps_per_second: 1000,
        }
    }
}

impl MotorSimConfig {
    /// Creates a validated config.
    ///
    /// # Errors
    ///
    /// Returns an error if `duration` is not a finite positive time or if
    /// `steps_per_second` is zero.
    pub fn new(duration: Time, steps_per_second: u32) -> Result<Self, ConfigError> {
        let seconds = duration.get::<second>();
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(ConfigError::Duration);
        }
        if steps_per_second == 0 {
            return Err(ConfigError::StepsPerSecond);
        }

        Ok(Self {
            duration,
            steps_per_second,
        })
    }

    #[must_use]
    pub fn duration(&self) -> Time {
        self.duration
    }

    #[must_use]
    pub fn steps_per_second(&self) -> u32 {
        self.steps_per_second
    }

    /// Total number of integration steps, at least one.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn steps(&self) -> usize {
        let steps = (self.duration.get::<second>() * f64::from(self.steps_per_second)).round();
        (steps as usize).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_thirty_thousand_steps() {
        let config = MotorSimConfig::default();
        assert_eq!(config.steps(), 30_000);
        assert_eq!(config.steps_per_second(), 1000);
    }

    #[test]
    fn rejects_bad_windows() {
        assert_eq!(
            MotorSimConfig::new(Time::new::<second>(0.0), 1000),
            Err(ConfigError::Duration)
        );
        assert_eq!(
            MotorSimConfig::new(Time::new::<second>(f64::NAN), 1000),
            Err(ConfigError::Duration)
        );
        assert_eq!(
            MotorSimConfig::new(Time::new::<second>(1.0), 0),
            Err(ConfigError::StepsPerSecond)
        );
    }
}
