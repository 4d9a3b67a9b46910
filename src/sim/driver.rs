use crate::{
    core::{Process, SchedCore, SimEvent, state::Ticks},
    error::SimError,
    scheduler::{FbScheduler, FcfsScheduler, HrrnScheduler, RrScheduler, Scheduler},
};
use tracing::instrument;

/// Arrival times for a fresh run: process 0 at tick 0, the rest not yet
/// admitted.
pub fn initial_arrivals(len: usize) -> Vec<Option<Ticks>> {
    let mut arrivals = vec![None; len];
    if let Some(first) = arrivals.first_mut() {
        *first = Some(0);
    }
    arrivals
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub policy: &'static str,
    pub service_times: Vec<Ticks>,
    pub arrival_times: Vec<Ticks>,
    pub finish_times: Vec<Ticks>,
    pub turnaround_times: Vec<Ticks>,
    pub total_ticks: Ticks,
    pub idle_ticks: Ticks,
}

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(service_times: &[Ticks], arrivals: &[Option<Ticks>]) -> Result<Self, SimError> {
        validate(service_times, arrivals)?;
        Ok(Self {
            core: SchedCore::<S>::new(service_times),
        })
    }

    pub fn step(&mut self) -> Vec<SimEvent> {
        self.core.tick()
    }

    pub fn all_completed(&self) -> bool {
        self.core.is_done()
    }

    #[instrument(skip_all, fields(policy = S::NAME))]
    pub fn run(mut self) -> Result<RunOutcome, SimError> {
        while !self.all_completed() {
            let events = self.step();
            let idle = events.iter().any(|e| matches!(e, SimEvent::Idle { .. }));
            let admitted = events
                .iter()
                .any(|e| matches!(e, SimEvent::Admitted { .. }));
            // An idle tick that admits nothing changes no state
            if idle && !admitted && !self.core.ctx.has_pending() {
                return Err(SimError::Stalled {
                    now: self.core.now(),
                });
            }
        }

        Ok(self.outcome())
    }

    fn outcome(&self) -> RunOutcome {
        let ctx = &self.core.ctx;
        let field = |f: fn(&Process) -> Option<Ticks>| -> Vec<Ticks> {
            ctx.procs
                .iter()
                .map(|p| f(p).expect("Completed process missing timing data"))
                .collect()
        };

        RunOutcome {
            policy: S::NAME,
            service_times: ctx.procs.iter().map(|p| p.service_time).collect(),
            arrival_times: field(|p| p.arrival_time),
            finish_times: field(|p| p.finish_time),
            turnaround_times: field(|p| p.turnaround()),
            total_ticks: ctx.now,
            idle_ticks: ctx.idle_ticks,
        }
    }
}

fn validate(service_times: &[Ticks], arrivals: &[Option<Ticks>]) -> Result<(), SimError> {
    if service_times.is_empty() {
        return Err(SimError::EmptyPopulation);
    }
    if service_times.len() != arrivals.len() {
        return Err(SimError::LengthMismatch {
            expected: service_times.len(),
            found: arrivals.len(),
        });
    }
    if let Some(proc) = service_times.iter().position(|&s| s == 0) {
        return Err(SimError::ZeroServiceTime { proc });
    }
    if arrivals[0] != Some(0) {
        return Err(SimError::FirstArrivalNotZero { found: arrivals[0] });
    }
    if let Some((proc, at)) = arrivals
        .iter()
        .enumerate()
        .skip(1)
        .find_map(|(i, a)| a.map(|at| (i, at)))
    {
        return Err(SimError::ArrivalPreset { proc, at });
    }
    Ok(())
}

pub fn run_policy<S: Scheduler>(
    service_times: &[Ticks],
    arrivals: &[Option<Ticks>],
) -> Result<RunOutcome, SimError> {
    Sim::<S>::new(service_times, arrivals)?.run()
}

pub fn run_fcfs(service_times: &[Ticks], arrivals: &[Option<Ticks>]) -> Result<RunOutcome, SimError> {
    run_policy::<FcfsScheduler>(service_times, arrivals)
}

pub fn run_rr(service_times: &[Ticks], arrivals: &[Option<Ticks>]) -> Result<RunOutcome, SimError> {
    run_policy::<RrScheduler>(service_times, arrivals)
}

pub fn run_hrrn(service_times: &[Ticks], arrivals: &[Option<Ticks>]) -> Result<RunOutcome, SimError> {
    run_policy::<HrrnScheduler>(service_times, arrivals)
}

pub fn run_fb(service_times: &[Ticks], arrivals: &[Option<Ticks>]) -> Result<RunOutcome, SimError> {
    run_policy::<FbScheduler>(service_times, arrivals)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    Fcfs,
    Rr,
    Hrrn,
    Fb,
}

impl Policy {
    pub const ALL: [Policy; 4] = [Policy::Fcfs, Policy::Rr, Policy::Hrrn, Policy::Fb];

    pub fn name(self) -> &'static str {
        match self {
            Self::Fcfs => FcfsScheduler::NAME,
            Self::Rr => RrScheduler::NAME,
            Self::Hrrn => HrrnScheduler::NAME,
            Self::Fb => FbScheduler::NAME,
        }
    }

    pub fn run(
        self,
        service_times: &[Ticks],
        arrivals: &[Option<Ticks>],
    ) -> Result<RunOutcome, SimError> {
        match self {
            Self::Fcfs => run_fcfs(service_times, arrivals),
            Self::Rr => run_rr(service_times, arrivals),
            Self::Hrrn => run_hrrn(service_times, arrivals),
            Self::Fb => run_fb(service_times, arrivals),
        }
    }
}
