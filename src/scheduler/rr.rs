use super::{ProcId, Scheduler, SimCtx};

/// Round robin with a one-tick quantum.
///
/// Sweeps the table in index order rather than keeping a ready queue: a
/// process admitted mid-sweep is served in that same sweep once the cursor
/// reaches its slot.
pub struct RrScheduler {
    cursor: ProcId,
}

impl RrScheduler {
    fn next_runnable(ctx: &SimCtx, from: ProcId) -> Option<ProcId> {
        (from..ctx.procs.len()).find(|&p| ctx.is_runnable(p))
    }
}

impl Scheduler for RrScheduler {
    const NAME: &'static str = "RR";

    fn init(_ctx: &mut SimCtx) -> Self {
        Self { cursor: 0 }
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<ProcId> {
        // Wrap around to start the next sweep
        let proc = Self::next_runnable(ctx, self.cursor)
            .or_else(|| Self::next_runnable(ctx, 0))?;
        self.cursor = proc + 1;
        Some(proc)
    }
}
