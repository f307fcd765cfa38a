use super::ConfigError;
use crate::core::types::SimulationTime;
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Exp};
use serde::{Deserialize, Serialize};

/// Shape of a duration distribution used for inter-arrival and service times
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DurationDistribution {
    /// Always the same duration
    Constant(SimulationTime),
    /// Exponentially distributed with the given mean
    Exponential { mean: SimulationTime },
    /// Uniform over `[min, max]`
    Uniform { min: SimulationTime, max: SimulationTime },
}

impl DurationDistribution {
    pub fn exponential(mean: SimulationTime) -> Self {
        DurationDistribution::Exponential { mean }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            DurationDistribution::Constant(t) => {
                if !t.is_finite() || t < 0.0 {
                    return Err(ConfigError::InvalidDistribution(format!(
                        "constant duration must be finite and non-negative, got {}",
                        t
                    )));
                }
            }
            DurationDistribution::Exponential { mean } => {
                if !mean.is_finite() || mean <= 0.0 {
                    return Err(ConfigError::InvalidDistribution(format!(
                        "exponential mean must be finite and positive, got {}",
                        mean
                    )));
                }
            }
            DurationDistribution::Uniform { min, max } => {
                if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
                    return Err(ConfigError::InvalidDistribution(format!(
                        "uniform bounds must satisfy 0 <= min <= max, got [{}, {}]",
                        min, max
                    )));
                }
            }
        }
        Ok(())
    }

    /// Draw one duration. Invalid parameters degrade to a zero delay; call
    /// `validate` first to reject them.
    pub fn sample(&self, rng: &mut dyn RngCore) -> SimulationTime {
        let raw = match *self {
            DurationDistribution::Constant(t) => t,
            DurationDistribution::Exponential { mean } => match Exp::new(1.0 / mean) {
                Ok(exp) => exp.sample(rng),
                Err(_) => 0.0,
            },
            DurationDistribution::Uniform { min, max } => {
                if min < max {
                    rng.gen_range(min..=max)
                } else {
                    min
                }
            }
        };
        if raw.is_finite() {
            raw.max(0.0)
        } else {
            0.0
        }
    }
}

impl Default for DurationDistribution {
    fn default() -> Self {
        DurationDistribution::Exponential { mean: 10.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_constant_sample() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(DurationDistribution::Constant(3.5).sample(&mut rng), 3.5);
    }

    #[test]
    fn test_exponential_mean_is_close() {
        let mut rng = StdRng::seed_from_u64(7);
        let dist = DurationDistribution::exponential(5.0);
        let n = 20_000;
        let total: f64 = (0..n).map(|_| dist.sample(&mut rng)).sum();
        let mean = total / n as f64;
        assert!((mean - 5.0).abs() < 0.3, "sample mean {} too far from 5.0", mean);
    }

    #[test]
    fn test_uniform_within_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let dist = DurationDistribution::Uniform { min: 2.0, max: 4.0 };
        for _ in 0..1000 {
            let t = dist.sample(&mut rng);
            assert!((2.0..=4.0).contains(&t));
        }
    }

    #[test]
    fn test_validation_rejects_bad_parameters() {
        assert!(DurationDistribution::exponential(0.0).validate().is_err());
        assert!(DurationDistribution::exponential(f64::NAN).validate().is_err());
        assert!(DurationDistribution::Constant(-1.0).validate().is_err());
        assert!(DurationDistribution::Uniform { min: 3.0, max: 1.0 }
            .validate()
            .is_err());
        assert!(DurationDistribution::default().validate().is_ok());
    }
}
