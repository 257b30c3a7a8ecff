/*!
 * Process Table
 * Fixed-size slot table with one lock per entry
 *
 * Slots are addressed by index. A context holds at most one slot lock at a
 * time: every scan locks, inspects, and releases each slot before moving to
 * the next one.
 */

use super::types::{ProcessInfo, ProcessState};
use crate::core::data_structures::InlineString;
use crate::core::errors::ProcessError;
use crate::core::types::{Pid, SlotId, PROC_NAME_LEN};
use crate::scheduler::SchedState;
use parking_lot::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicU32, Ordering};

/// One process-table entry
#[derive(Debug, Clone)]
pub struct Proc {
    pub pid: Pid,
    pub state: ProcessState,
    pub name: InlineString,
    /// Set by `kill`; the process exits at its next tick
    pub killed: bool,
    pub sched: SchedState,
}

impl Proc {
    fn unused() -> Self {
        Self {
            pid: 0,
            state: ProcessState::Unused,
            name: InlineString::new(),
            killed: false,
            sched: SchedState::new(),
        }
    }

    /// Value copy of the fields exposed by the process-info query
    pub fn info(&self) -> ProcessInfo {
        ProcessInfo {
            pid: self.pid,
            state: self.state,
            queue_level: self.sched.queue_level(),
            ticks_at_level: self.sched.ticks_at_level(),
            lifetime_schedule_count: self.sched.lifetime_schedule_count(),
            name: self.name.clone(),
        }
    }
}

/// The process table
pub struct ProcessTable {
    slots: Box<[Mutex<Proc>]>,
    next_pid: AtomicU32,
}

impl ProcessTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| Mutex::new(Proc::unused())).collect(),
            next_pid: AtomicU32::new(1),
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Lock one slot
    ///
    /// # Panics
    /// If `slot` is not an index into this table.
    #[inline]
    pub fn lock(&self, slot: SlotId) -> MutexGuard<'_, Proc> {
        self.slots[slot].lock()
    }

    /// Claim an unused slot for a new runnable process with fresh scheduling state
    pub fn allocate(&self, name: &str) -> Result<(SlotId, Pid), ProcessError> {
        for slot in 0..self.capacity() {
            let mut proc = self.lock(slot);
            if proc.state != ProcessState::Unused {
                continue;
            }

            let pid = self.next_pid.fetch_add(1, Ordering::Relaxed);
            *proc = Proc {
                pid,
                state: ProcessState::Runnable,
                name: InlineString::truncated(name, PROC_NAME_LEN - 1),
                killed: false,
                sched: SchedState::new(),
            };
            return Ok((slot, pid));
        }

        Err(ProcessError::TableFull {
            capacity: self.capacity(),
        })
    }

    /// Run `f` on the entry holding `pid` (any non-unused state), under its lock
    pub fn with_pid<R>(&self, pid: Pid, f: impl FnOnce(SlotId, &mut Proc) -> R) -> Option<R> {
        for slot in 0..self.capacity() {
            let mut proc = self.lock(slot);
            if proc.state != ProcessState::Unused && proc.pid == pid {
                return Some(f(slot, &mut proc));
            }
        }
        None
    }

    /// Run `f` on every slot in order, one lock at a time
    pub fn for_each(&self, mut f: impl FnMut(SlotId, &mut Proc)) {
        for slot in 0..self.capacity() {
            f(slot, &mut self.lock(slot));
        }
    }

    /// Slot index of `pid`, if it exists
    pub fn find(&self, pid: Pid) -> Option<SlotId> {
        self.with_pid(pid, |slot, _| slot)
    }

    /// Snapshot of `pid` taken under its lock
    pub fn info(&self, pid: Pid) -> Option<ProcessInfo> {
        self.with_pid(pid, |_, proc| proc.info())
    }

    /// Snapshots of every allocated slot
    pub fn all_info(&self) -> Vec<ProcessInfo> {
        let mut infos = Vec::new();
        self.for_each(|_, proc| {
            if proc.state != ProcessState::Unused {
                infos.push(proc.info());
            }
        });
        infos
    }

    /// Move the process in `slot` from `from` to `to`
    pub fn transition(
        &self,
        slot: SlotId,
        from: ProcessState,
        to: ProcessState,
    ) -> Result<Pid, ProcessError> {
        let mut proc = self.lock(slot);
        Self::apply(&mut proc, from, to)
    }

    /// Move `pid` from `from` to `to`
    pub fn transition_pid(
        &self,
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    ) -> Result<Pid, ProcessError> {
        self.with_pid(pid, |_, proc| Self::apply(proc, from, to))
            .unwrap_or(Err(ProcessError::NotFound(pid)))
    }

    /// Mark `pid` killed; a sleeping victim is made runnable so it can exit
    pub fn kill(&self, pid: Pid) -> Result<(), ProcessError> {
        self.with_pid(pid, |_, proc| {
            proc.killed = true;
            if proc.state == ProcessState::Sleeping {
                proc.state = ProcessState::Runnable;
            }
        })
        .ok_or(ProcessError::NotFound(pid))
    }

    /// Release a zombie's slot
    pub fn reap(&self, pid: Pid) -> Result<(), ProcessError> {
        self.with_pid(pid, |_, proc| {
            if proc.state != ProcessState::Zombie {
                return Err(ProcessError::InvalidTransition {
                    pid,
                    from: proc.state,
                    to: ProcessState::Unused,
                });
            }
            *proc = Proc::unused();
            Ok(())
        })
        .unwrap_or(Err(ProcessError::NotFound(pid)))
    }

    fn apply(proc: &mut Proc, from: ProcessState, to: ProcessState) -> Result<Pid, ProcessError> {
        if proc.state != from {
            return Err(ProcessError::InvalidTransition {
                pid: proc.pid,
                from: proc.state,
                to,
            });
        }
        proc.state = to;
        Ok(proc.pid)
    }
}
