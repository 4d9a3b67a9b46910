pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use crate::core::{ProcId, SimEvent, Ticks};
pub use error::SimError;
pub use scheduler::Scheduler;
pub use sim::{Policy, RunOutcome, Sim};
