use std::{fmt::Display, str::FromStr};

use tracing::warn;

use crate::{core::Ticks, error::SimError};

const TAIL_SIGMAS: f64 = 6.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDistribution {
    pub mean: f64,
    pub std_dev: f64,
    pub min: Ticks,
    pub max: Ticks,
}

impl Default for ServiceDistribution {
    fn default() -> Self {
        Self {
            mean: 10.0,
            std_dev: 5.0,
            min: 1,
            max: 40,
        }
    }
}

impl ServiceDistribution {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.min == 0 {
            return Err(SimError::InvalidConfig(
                "service times must be at least one tick".into(),
            ));
        }
        if self.min > self.max {
            return Err(SimError::InvalidConfig(format!(
                "service bounds [{}, {}] are empty",
                self.min, self.max
            )));
        }
        if !self.mean.is_finite() || !self.std_dev.is_finite() || self.std_dev <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "service distribution N({}, {}) is not usable",
                self.mean, self.std_dev
            )));
        }
        // Bounds entirely in one tail leave almost nothing to sample
        let reach = TAIL_SIGMAS * self.std_dev;
        if self.min as f64 > self.mean + reach || (self.max as f64 + 1.0) < self.mean - reach {
            return Err(SimError::InvalidConfig(format!(
                "service bounds [{}, {}] lie outside N({}, {}) by more than {TAIL_SIGMAS} sigma",
                self.min, self.max, self.mean, self.std_dev
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub population: usize,
    pub trials: usize,
    pub service: ServiceDistribution,
    // Random when unset
    pub seed: Option<u64>,
    pub show_tables: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population: 1000,
            trials: 1000,
            service: ServiceDistribution::default(),
            seed: None,
            show_tables: false,
        }
    }
}

impl SimConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            population: parse_or(&lookup, "SCHED_POPULATION", defaults.population),
            trials: parse_or(&lookup, "SCHED_TRIALS", defaults.trials),
            service: defaults.service,
            seed: lookup("SCHED_SEED").and_then(|raw| parse_var("SCHED_SEED", &raw)),
            show_tables: parse_or(&lookup, "SCHED_SHOW_TABLES", defaults.show_tables),
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.population == 0 {
            return Err(SimError::InvalidConfig("population must not be empty".into()));
        }
        if self.trials == 0 {
            return Err(SimError::InvalidConfig("at least one trial is required".into()));
        }
        self.service.validate()
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    lookup(name)
        .and_then(|raw| parse_var(name, &raw))
        .unwrap_or(default)
}

fn parse_var<T>(name: &str, raw: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(var = name, raw, error = %e, "ignoring unparseable setting");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_are_the_study_constants() {
        let config = SimConfig::from_lookup(lookup(&[]));
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.population, 1000);
        assert_eq!(config.trials, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reads_overrides() {
        let config = SimConfig::from_lookup(lookup(&[
            ("SCHED_POPULATION", "50"),
            ("SCHED_TRIALS", " 3 "),
            ("SCHED_SEED", "99"),
            ("SCHED_SHOW_TABLES", "true"),
        ]));
        assert_eq!(config.population, 50);
        assert_eq!(config.trials, 3);
        assert_eq!(config.seed, Some(99));
        assert!(config.show_tables);
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let config = SimConfig::from_lookup(lookup(&[
            ("SCHED_POPULATION", "lots"),
            ("SCHED_SEED", "-4"),
        ]));
        assert_eq!(config.population, 1000);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn validate_rejects_empty_runs() {
        let config = SimConfig {
            trials: 0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SimConfig {
            service: ServiceDistribution {
                min: 5,
                max: 4,
                ..ServiceDistribution::default()
            },
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bounds_deep_in_a_tail() {
        let far_right = ServiceDistribution {
            min: 200,
            max: 300,
            ..ServiceDistribution::default()
        };
        assert!(matches!(far_right.validate(), Err(SimError::InvalidConfig(_))));

        let far_left = ServiceDistribution {
            mean: 500.0,
            ..ServiceDistribution::default()
        };
        assert!(matches!(far_left.validate(), Err(SimError::InvalidConfig(_))));

        // Upper tail within reach is still fine
        let edge = ServiceDistribution {
            min: 35,
            max: 40,
            ..ServiceDistribution::default()
        };
        assert!(edge.validate().is_ok());
    }
}
