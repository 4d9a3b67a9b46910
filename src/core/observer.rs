use super::state::{ProcId, ProcState, SimCtx};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    // Checks are limited to what the last tick could have touched
    pub fn observe(&mut self, ctx: &SimCtx, executed: Option<ProcId>) {
        self.step += 1;

        debug_assert_eq!(
            ctx.executed_ticks + ctx.idle_ticks,
            ctx.now,
            "Every tick must either execute one process or idle"
        );
        debug_assert_eq!(self.step, ctx.now, "Observer missed a tick");

        if let Some(proc_id) = executed {
            let proc = ctx.proc(proc_id);
            debug_assert_ne!(
                proc.state,
                ProcState::Pending,
                "Pending process {proc_id} was executed"
            );
            debug_assert!(
                proc.arrival_time.is_some_and(|at| at < ctx.now),
                "Process {proc_id} executed before it arrived"
            );
            match proc.state {
                ProcState::Completed => {
                    debug_assert_eq!(proc.remaining, 0);
                    debug_assert_eq!(
                        proc.finish_time,
                        Some(ctx.now),
                        "Process {proc_id} finished without a matching finish time"
                    );
                    debug_assert!(
                        ctx.queue_of(proc_id).is_none(),
                        "Completed process {proc_id} still present in a queue"
                    );
                }
                _ => debug_assert!(proc.remaining > 0),
            }
        }

        if let Some(pending) = ctx.next_pending() {
            let proc = ctx.proc(pending);
            debug_assert_eq!(proc.state, ProcState::Pending);
            debug_assert!(proc.arrival_time.is_none() && proc.finish_time.is_none());
        }

        for (&proc_id, &queue_id) in &ctx.proc_to_queue {
            debug_assert_eq!(
                ctx.proc(proc_id).state,
                ProcState::Runnable,
                "Queued process {proc_id} must be runnable"
            );
            debug_assert!(
                ctx.queues.get(queue_id).is_some_and(|q| q.contains(proc_id)),
                "proc_to_queue places process {proc_id} in queue {queue_id:?}, which does not contain it"
            );
        }
    }
}
