use crate::core::{ProcId, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    Admitted {
        proc: ProcId,
        at: Ticks,
    },
    Executed {
        proc: ProcId,
        remaining: Ticks,
    },
    Completed {
        proc: ProcId,
        at: Ticks,
    },
    // Nothing runnable; the clock moved without work
    Idle {
        at: Ticks,
    },
}
