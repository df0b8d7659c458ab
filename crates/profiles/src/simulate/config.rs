use thiserror::Error;
use uom::si::{f64::Time, time::second};

/// Step size and sample budget of a simulated run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepConfig {
    dt: Time,
    max_samples: usize,
}

/// Errors that can occur when validating a [`StepConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("time step must be finite and positive")]
    TimeStep,

    #[error("max_samples must be at least 1")]
    MaxSamples,
}

impl Default for StepConfig {
    /// 10 ms steps, at most 100 000 samples.
    fn default() -> Self {
        Self {
            dt: Time::new::<second>(0.01),
            max_samples: 100_000,
        }
    }
}

impl StepConfig {
    /// Creates a new step config.
    ///
    /// # Errors
    ///
    /// Returns an error if `dt` is not finite and positive or if
    /// `max_samples` is zero.
    pub fn new(dt: Time, max_samples: usize) -> Result<Self, ConfigError> {
        let step = dt.get::<second>();
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::TimeStep);
        }
        if max_samples == 0 {
            return Err(ConfigError::MaxSamples);
        }

        Ok(Self { dt, max_samples })
    }

    #[must_use]
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Returns the sample count, start included, past which a run gives up.
    #[must_use]
    pub fn max_samples(&self) -> usize {
        self.max_samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_steps_that_never_advance() {
        for dt in [0.0, -0.01, f64::NAN, f64::INFINITY] {
            assert_eq!(
                StepConfig::new(Time::new::<second>(dt), 10),
                Err(ConfigError::TimeStep),
                "dt = {dt}"
            );
        }
    }

    #[test]
    fn rejects_empty_budget() {
        assert_eq!(
            StepConfig::new(Time::new::<second>(0.01), 0),
            Err(ConfigError::MaxSamples)
        );
    }

    #[test]
    fn default_steps_every_ten_milliseconds() {
        let config = StepConfig::default();
        assert_eq!(config.dt().get::<second>(), 0.01);
        assert_eq!(config.max_samples(), 100_000);
    }
}
