use rand::prelude::*;
use rand_distr::Normal;

use super::config::ServiceDistribution;
use crate::{core::Ticks, error::SimError};

// Rejection sampling gives up after this many draws per accepted sample
const DRAWS_PER_SAMPLE: usize = 10_000;

/// Draws `len` service times from a normal distribution, truncated toward
/// zero and resampled until they fall inside `[min, max]`.
pub fn bounded_normal_population(
    len: usize,
    dist: &ServiceDistribution,
    seed: u64,
) -> Result<Vec<Ticks>, SimError> {
    dist.validate()?;
    let normal = Normal::new(dist.mean, dist.std_dev)
        .map_err(|e| SimError::InvalidConfig(format!("service distribution: {e}")))?;
    let mut rng = StdRng::seed_from_u64(seed);
    let budget = len.saturating_mul(DRAWS_PER_SAMPLE);

    let mut population = Vec::with_capacity(len);
    let mut draws = 0usize;
    while population.len() < len {
        if draws == budget {
            return Err(SimError::InvalidConfig(format!(
                "only {} of {len} service times fell inside [{}, {}] after {draws} draws",
                population.len(),
                dist.min,
                dist.max
            )));
        }
        draws += 1;

        let sample = rng.sample(normal).trunc();
        if sample >= dist.min as f64 && sample <= dist.max as f64 {
            population.push(sample as Ticks);
        }
    }

    Ok(population)
}
