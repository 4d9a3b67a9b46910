pub mod admission;
pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use admission::AdmissionGate;
pub use driver::SchedCore;
pub use event::SimEvent;
pub use state::{ProcId, ProcState, Process, QueueId, RunQueue, SimCtx, Ticks};
