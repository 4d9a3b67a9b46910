use average::{Estimate, Mean};

use crate::{core::Ticks, error::SimError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnaroundStats {
    pub mean_turnaround: f64,
    // Mean of turnaround / service per process (normalised turnaround)
    pub mean_ratio: f64,
}

pub fn reduce(turnaround: &[Ticks], service: &[Ticks]) -> Result<TurnaroundStats, SimError> {
    if turnaround.is_empty() {
        return Err(SimError::EmptyPopulation);
    }
    if turnaround.len() != service.len() {
        return Err(SimError::LengthMismatch {
            expected: service.len(),
            found: turnaround.len(),
        });
    }
    if let Some(proc) = service.iter().position(|&s| s == 0) {
        return Err(SimError::ZeroServiceTime { proc });
    }

    let mean_turnaround: Mean = turnaround.iter().map(|&t| t as f64).collect();
    let mean_ratio: Mean = turnaround
        .iter()
        .zip(service)
        .map(|(&t, &s)| t as f64 / s as f64)
        .collect();

    Ok(TurnaroundStats {
        mean_turnaround: mean_turnaround.estimate(),
        mean_ratio: mean_ratio.estimate(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_uses_real_division() {
        let stats = reduce(&[3, 8, 10], &[3, 5, 2]).unwrap();
        assert!((stats.mean_turnaround - 7.0).abs() < 1e-12);
        assert!((stats.mean_ratio - (1.0 + 1.6 + 5.0) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        assert_eq!(
            reduce(&[1, 2], &[1]),
            Err(SimError::LengthMismatch {
                expected: 1,
                found: 2
            })
        );
        assert_eq!(reduce(&[], &[]), Err(SimError::EmptyPopulation));
    }
}
