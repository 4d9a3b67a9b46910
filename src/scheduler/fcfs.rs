use super::{ProcId, Scheduler, SimCtx};
use crate::core::QueueId;

// Admission takes the lowest pending index, so arrival order is table order
// and a plain FIFO drains the table by index.
pub struct FcfsScheduler {
    ready: QueueId,
    current: Option<ProcId>,
}

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "FCFS";

    fn init(ctx: &mut SimCtx) -> Self {
        Self {
            ready: ctx.create_queue(),
            current: None,
        }
    }

    fn enqueue(&mut self, ctx: &mut SimCtx, proc: ProcId) {
        ctx.queue_push_back(self.ready, proc);
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<ProcId> {
        if let Some(proc) = self.current.filter(|&p| ctx.is_runnable(p)) {
            return Some(proc);
        }

        self.current = ctx.queue_pop_front(self.ready);
        self.current
    }
}
