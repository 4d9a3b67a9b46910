use super::{
    event::SimEvent,
    observer::Observer,
    state::{SimCtx, Ticks},
};
use crate::scheduler::Scheduler;
use tracing::{debug, trace};

pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    /// Builds the context and admits process 0 at tick 0.
    pub fn new(service_times: &[Ticks]) -> Self {
        let mut ctx = SimCtx::new(service_times);
        let mut scheduler = S::init(&mut ctx);
        if let Some(first) = ctx.admit_next() {
            scheduler.enqueue(&mut ctx, first);
        }

        Self {
            ctx,
            scheduler,
            observer: Observer::new(),
        }
    }

    pub fn tick(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();
        let next = self.scheduler.dispatch(&mut self.ctx);
        self.ctx.advance_time(1);
        let now = self.ctx.now;

        match next {
            Some(proc) => {
                let remaining = self.ctx.execute(proc);
                events.push(SimEvent::Executed { proc, remaining });
            }
            None => {
                self.ctx.record_idle();
                events.push(SimEvent::Idle { at: now });
            }
        }

        // Admission precedes completion bookkeeping, so a feedback arrival
        // lands in the top queue before the executed process is demoted
        if self.scheduler.admission_gate().permits(now) {
            if let Some(proc) = self.ctx.admit_next() {
                self.scheduler.enqueue(&mut self.ctx, proc);
                events.push(SimEvent::Admitted { proc, at: now });
            }
        }

        if let Some(proc) = next {
            if self.ctx.proc(proc).remaining == 0 {
                self.ctx.mark_completed(proc, now);
                debug!(policy = S::NAME, proc, at = now, "process completed");
                events.push(SimEvent::Completed { proc, at: now });
            }
            self.scheduler.tick(&mut self.ctx, proc);
        }

        for event in &events {
            trace!(policy = S::NAME, ?event);
        }

        self.observer.observe(&self.ctx, next);
        events
    }

    pub fn is_done(&self) -> bool {
        self.ctx.all_completed()
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
