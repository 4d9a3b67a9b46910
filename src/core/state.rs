use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use std::collections::VecDeque;

// Index into the process table
pub type ProcId = usize;
pub type Ticks = u64;
new_key_type! {
    pub struct QueueId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    // Not yet admitted; cannot be dispatched
    Pending,
    Runnable,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Process {
    pub id: ProcId,
    pub state: ProcState,
    pub service_time: Ticks,
    pub remaining: Ticks,
    pub arrival_time: Option<Ticks>,
    pub finish_time: Option<Ticks>,
}

impl Process {
    pub fn received(&self) -> Ticks {
        self.service_time - self.remaining
    }

    pub fn turnaround(&self) -> Option<Ticks> {
        Some(self.finish_time? - self.arrival_time?)
    }
}

#[derive(Debug, Default)]
pub struct RunQueue {
    procs: VecDeque<ProcId>,
}

impl RunQueue {
    pub fn contains(&self, proc: ProcId) -> bool {
        self.procs.contains(&proc)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcId> {
        self.procs.iter()
    }
}

/// Simulation context for one policy run: the process table, the clock and
/// the run queues a policy allocates. Never shared between runs.
#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub procs: Vec<Process>,
    pub queues: SlotMap<QueueId, RunQueue>,
    pub proc_to_queue: FxHashMap<ProcId, QueueId>,
    pub executed_ticks: Ticks,
    pub idle_ticks: Ticks,

    // Pending slots always form a suffix of the table, since admission takes
    // the lowest pending index
    next_pending: ProcId,
}

impl SimCtx {
    pub fn new(service_times: &[Ticks]) -> Self {
        let procs = service_times
            .iter()
            .enumerate()
            .map(|(id, &service_time)| Process {
                id,
                state: ProcState::Pending,
                service_time,
                remaining: service_time,
                arrival_time: None,
                finish_time: None,
            })
            .collect();

        Self {
            now: 0,
            procs,
            queues: SlotMap::with_key(),
            proc_to_queue: FxHashMap::default(),
            executed_ticks: 0,
            idle_ticks: 0,
            next_pending: 0,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    /// Admits the lowest-indexed pending process at the current tick.
    /// Returns `None` once every slot has been admitted.
    pub fn admit_next(&mut self) -> Option<ProcId> {
        let id = self.next_pending;
        let now = self.now;
        let proc = self.procs.get_mut(id)?;
        debug_assert_eq!(
            proc.state,
            ProcState::Pending,
            "Slot {id} past the admission cursor must be pending"
        );

        proc.state = ProcState::Runnable;
        proc.arrival_time = Some(now);
        self.next_pending += 1;
        Some(id)
    }

    pub fn has_pending(&self) -> bool {
        self.next_pending < self.procs.len()
    }

    pub fn next_pending(&self) -> Option<ProcId> {
        self.has_pending().then_some(self.next_pending)
    }

    // Consume one tick of service; returns what is left
    pub fn execute(&mut self, proc_id: ProcId) -> Ticks {
        let proc = self.proc_mut(proc_id);
        assert_eq!(
            proc.state,
            ProcState::Runnable,
            "Process {proc_id} must be runnable to execute"
        );
        debug_assert!(proc.remaining > 0, "Runnable process {proc_id} has no work");

        proc.remaining -= 1;
        let remaining = proc.remaining;
        self.executed_ticks += 1;
        remaining
    }

    pub fn record_idle(&mut self) {
        self.idle_ticks += 1;
    }

    pub fn mark_completed(&mut self, proc_id: ProcId, finish_time: Ticks) {
        debug_assert!(
            !self.proc_to_queue.contains_key(&proc_id),
            "Completing process {proc_id} that is still enqueued"
        );

        let proc = self.proc_mut(proc_id);
        debug_assert_eq!(proc.remaining, 0, "Process {proc_id} completed with work left");
        debug_assert!(
            proc.state == ProcState::Runnable,
            "Process {proc_id} must be runnable before marked complete"
        );

        proc.state = ProcState::Completed;
        proc.finish_time = Some(finish_time);
    }

    pub fn is_runnable(&self, proc_id: ProcId) -> bool {
        self.procs
            .get(proc_id)
            .is_some_and(|p| p.state == ProcState::Runnable)
    }

    pub fn all_completed(&self) -> bool {
        self.procs.iter().all(|p| p.state == ProcState::Completed)
    }

    pub fn proc(&self, proc_id: ProcId) -> &Process {
        &self.procs[proc_id]
    }

    pub fn proc_mut(&mut self, proc_id: ProcId) -> &mut Process {
        &mut self.procs[proc_id]
    }

    pub fn create_queue(&mut self) -> QueueId {
        self.queues.insert(RunQueue::default())
    }

    fn queue_insert(&mut self, queue_id: QueueId, proc_id: ProcId, at_head: bool) {
        assert!(
            !self.proc_to_queue.contains_key(&proc_id),
            "Process {proc_id} already present in some queue"
        );
        debug_assert!(
            self.is_runnable(proc_id),
            "Process {proc_id} must be runnable when enqueued"
        );

        let queue = self.queues.get_mut(queue_id).expect("Unknown run queue");
        if at_head {
            queue.procs.push_front(proc_id);
        } else {
            queue.procs.push_back(proc_id);
        }

        self.proc_to_queue.insert(proc_id, queue_id);
    }

    pub fn queue_push_back(&mut self, queue_id: QueueId, proc_id: ProcId) {
        self.queue_insert(queue_id, proc_id, false);
    }

    pub fn queue_push_front(&mut self, queue_id: QueueId, proc_id: ProcId) {
        self.queue_insert(queue_id, proc_id, true);
    }

    pub fn queue_pop_front(&mut self, queue_id: QueueId) -> Option<ProcId> {
        let proc_id = self.queues.get_mut(queue_id)?.procs.pop_front()?;

        let removed = self.proc_to_queue.remove(&proc_id);
        debug_assert!(removed.is_some(), "Process {proc_id} missing queue membership");

        Some(proc_id)
    }

    pub fn queue(&self, queue_id: QueueId) -> &RunQueue {
        &self.queues[queue_id]
    }

    pub fn queue_len(&self, queue_id: QueueId) -> usize {
        self.queues.get(queue_id).map_or(0, |q| q.procs.len())
    }

    pub fn queue_of(&self, proc_id: ProcId) -> Option<QueueId> {
        self.proc_to_queue.get(&proc_id).copied()
    }
}
