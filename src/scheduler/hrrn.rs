use super::{ProcId, Scheduler, SimCtx};
use crate::core::Ticks;

/// Response ratio `(waiting + remaining) / remaining`, in integer arithmetic.
///
/// The quotient is truncated before comparison. Many distinct ratios collapse
/// to the same value (7/5 and 3/2 are both 1), so ties, and therefore the
/// lowest-index tie-break, decide far more selections than a real-valued
/// ratio would. The comparative statistics depend on this behaviour.
pub fn response_ratio(now: Ticks, arrival: Ticks, remaining: Ticks) -> Ticks {
    debug_assert!(remaining > 0, "ratio of a finished process");
    ((now - arrival) + remaining) / remaining
}

/// Non-preemptive highest response ratio next.
pub struct HrrnScheduler {
    current: Option<ProcId>,
}

impl HrrnScheduler {
    // Strict comparison: the first process scanned keeps a tie
    fn select(ctx: &SimCtx) -> Option<ProcId> {
        let mut best: Option<(ProcId, Ticks)> = None;
        for proc in ctx.procs.iter().filter(|p| ctx.is_runnable(p.id)) {
            let arrival = proc.arrival_time.expect("Runnable process must have arrived");
            let ratio = response_ratio(ctx.now, arrival, proc.remaining);
            if best.is_none_or(|(_, top)| ratio > top) {
                best = Some((proc.id, ratio));
            }
        }
        best.map(|(id, _)| id)
    }
}

impl Scheduler for HrrnScheduler {
    const NAME: &'static str = "HRRN";

    fn init(_ctx: &mut SimCtx) -> Self {
        Self { current: None }
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<ProcId> {
        if let Some(proc) = self.current.filter(|&p| ctx.is_runnable(p)) {
            return Some(proc);
        }

        self.current = Self::select(ctx);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_truncates() {
        // 7/5 and 3/2
        assert_eq!(response_ratio(3, 1, 5), 1);
        assert_eq!(response_ratio(3, 2, 2), 1);
        assert_eq!(response_ratio(10, 0, 5), 3);
    }

    #[test]
    fn fresh_arrival_has_ratio_one() {
        assert_eq!(response_ratio(7, 7, 40), 1);
    }

    #[test]
    fn truncated_tie_goes_to_lowest_index() {
        let mut ctx = SimCtx::new(&[3, 5, 2]);
        for at in 0..3 {
            ctx.now = at;
            ctx.admit_next();
        }
        ctx.now = 3;
        ctx.proc_mut(0).remaining = 0;
        ctx.mark_completed(0, 3);

        // Real-valued ratios favour process 2 (1.5 over 1.4)
        assert_eq!(HrrnScheduler::select(&ctx), Some(1));
    }
}
