pub mod fb;
pub mod fcfs;
pub mod hrrn;
pub mod rr;

use crate::core::{
    AdmissionGate,
    state::{ProcId, SimCtx},
};
pub use fb::{FbScheduler, Level};
pub use fcfs::FcfsScheduler;
pub use hrrn::HrrnScheduler;
pub use rr::RrScheduler;

/// A dispatch policy driven one tick at a time by `SchedCore`.
///
/// Per tick the core calls `dispatch`, runs the returned process for one
/// tick, admits a new process through `enqueue` when `admission_gate`
/// permits, records completion, and finally calls `tick` for the process
/// that ran.
pub trait Scheduler {
    const NAME: &'static str;

    fn init(ctx: &mut SimCtx) -> Self;

    fn admission_gate(&self) -> AdmissionGate {
        AdmissionGate::EveryTick
    }

    // Process 0 is enqueued at tick 0 before the first dispatch
    fn enqueue(&mut self, _ctx: &mut SimCtx, _proc: ProcId) {}

    /// Picks the process for the next tick; `None` leaves the cpu idle.
    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<ProcId>;

    fn tick(&mut self, _ctx: &mut SimCtx, _proc: ProcId) {}
}
