use super::state::Ticks;

/// When the admission rule is allowed to fire, checked against the clock
/// value after the tick has been counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionGate {
    EveryTick,
    // Feedback admits at half the tick rate
    EvenTicks,
}

impl AdmissionGate {
    pub fn permits(self, now: Ticks) -> bool {
        match self {
            Self::EveryTick => true,
            Self::EvenTicks => now % 2 == 0,
        }
    }
}
