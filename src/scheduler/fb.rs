use super::{ProcId, Scheduler, SimCtx};
use crate::core::{AdmissionGate, QueueId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Q1,
    Q2,
    Q3,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Q1, Level::Q2, Level::Q3];

    // Q3 is the floor
    pub fn demoted(self) -> Self {
        match self {
            Self::Q1 => Self::Q2,
            Self::Q2 | Self::Q3 => Self::Q3,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Three-level feedback queue.
///
/// New arrivals enter the tail of Q1, but only on even ticks. Each
/// dispatch runs the head of the highest non-empty level for one tick; if
/// it does not finish it moves to the tail of the next level down. A
/// process that is already in Q3 keeps its place at the head of Q3, so
/// the bottom level drains in arrival order.
pub struct FbScheduler {
    levels: [QueueId; 3],
    running: Option<(ProcId, Level)>,
}

impl FbScheduler {
    pub fn queue(&self, level: Level) -> QueueId {
        self.levels[level.index()]
    }

    pub fn level_of(&self, ctx: &SimCtx, proc: ProcId) -> Option<Level> {
        if let Some((running, level)) = self.running {
            if running == proc {
                return Some(level);
            }
        }
        let queue = ctx.queue_of(proc)?;
        Level::ALL.into_iter().find(|&l| self.queue(l) == queue)
    }
}

impl Scheduler for FbScheduler {
    const NAME: &'static str = "FB";

    fn init(ctx: &mut SimCtx) -> Self {
        Self {
            levels: [ctx.create_queue(), ctx.create_queue(), ctx.create_queue()],
            running: None,
        }
    }

    fn admission_gate(&self) -> AdmissionGate {
        AdmissionGate::EvenTicks
    }

    fn enqueue(&mut self, ctx: &mut SimCtx, proc: ProcId) {
        ctx.queue_push_back(self.queue(Level::Q1), proc);
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<ProcId> {
        debug_assert!(self.running.is_none(), "Previous tick was not settled");

        let (proc, level) = Level::ALL
            .into_iter()
            .find_map(|level| Some((ctx.queue_pop_front(self.queue(level))?, level)))?;
        self.running = Some((proc, level));
        Some(proc)
    }

    fn tick(&mut self, ctx: &mut SimCtx, proc: ProcId) {
        let Some((running, level)) = self.running.take() else {
            return;
        };
        debug_assert_eq!(running, proc, "Core ran a process FB did not dispatch");

        if !ctx.is_runnable(proc) {
            return;
        }

        match level {
            Level::Q3 => ctx.queue_push_front(self.queue(Level::Q3), proc),
            _ => ctx.queue_push_back(self.queue(level.demoted()), proc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demotion_stops_at_q3() {
        assert_eq!(Level::Q1.demoted(), Level::Q2);
        assert_eq!(Level::Q2.demoted(), Level::Q3);
        assert_eq!(Level::Q3.demoted(), Level::Q3);
        assert!(Level::Q1 < Level::Q3);
    }

    #[test]
    fn dispatch_prefers_highest_level() {
        let mut ctx = SimCtx::new(&[4, 4]);
        let mut fb = FbScheduler::init(&mut ctx);
        ctx.admit_next();
        ctx.admit_next();
        ctx.queue_push_back(fb.queue(Level::Q3), 0);
        fb.enqueue(&mut ctx, 1);

        assert_eq!(fb.dispatch(&mut ctx), Some(1));
        assert_eq!(fb.level_of(&ctx, 1), Some(Level::Q1));
        assert_eq!(fb.level_of(&ctx, 0), Some(Level::Q3));

        ctx.execute(1);
        fb.tick(&mut ctx, 1);
        assert_eq!(fb.level_of(&ctx, 1), Some(Level::Q2));
    }

    #[test]
    fn q3_head_keeps_its_place() {
        let mut ctx = SimCtx::new(&[4, 4]);
        let mut fb = FbScheduler::init(&mut ctx);
        ctx.admit_next();
        ctx.admit_next();
        let q3 = fb.queue(Level::Q3);
        ctx.queue_push_back(q3, 0);
        ctx.queue_push_back(q3, 1);

        assert_eq!(fb.dispatch(&mut ctx), Some(0));
        ctx.execute(0);
        fb.tick(&mut ctx, 0);
        assert_eq!(ctx.queue(q3).iter().copied().collect::<Vec<_>>(), vec![0, 1]);
    }
}
