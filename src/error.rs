use std::fmt;

use crate::core::{ProcId, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    EmptyPopulation,
    // Every per-process sequence must match the service-time sequence
    LengthMismatch { expected: usize, found: usize },
    // A zero service time is indistinguishable from an already finished process
    ZeroServiceTime { proc: ProcId },
    FirstArrivalNotZero { found: Option<Ticks> },
    // Only process 0 may carry an arrival time before the run starts
    ArrivalPreset { proc: ProcId, at: Ticks },
    Stalled { now: Ticks },
    InvalidConfig(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPopulation => write!(f, "process population is empty"),
            Self::LengthMismatch { expected, found } => write!(
                f,
                "expected {expected} entries to match the service times, found {found}"
            ),
            Self::ZeroServiceTime { proc } => {
                write!(f, "process {proc} has a zero service time")
            }
            Self::FirstArrivalNotZero { found } => {
                write!(f, "process 0 must arrive at tick 0, found {found:?}")
            }
            Self::ArrivalPreset { proc, at } => write!(
                f,
                "process {proc} already has arrival time {at} before the run"
            ),
            Self::Stalled { now } => write!(
                f,
                "scheduler left the cpu idle at tick {now} with nothing left to admit"
            ),
            Self::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for SimError {}
