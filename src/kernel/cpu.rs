/*!
 * CPU Scheduling
 * Dispatch onto CPUs and timer-tick handling
 */

use super::{CpuState, Kernel};
use crate::core::errors::{KernelError, Result};
use crate::core::types::{CpuId, Pid, SlotId, Tick};
use crate::process::ProcessState;
use crate::scheduler::{Context, Dispatch, TickOutcome};
use parking_lot::Mutex;
use std::sync::atomic::Ordering;
use tracing::{debug, warn};

/// Records the dispatched slot as the CPU's current process before switching
struct CpuContext<'a, C: ?Sized> {
    state: &'a Mutex<CpuState>,
    inner: &'a C,
}

impl<C: Context + ?Sized> Context for CpuContext<'_, C> {
    fn switch_to(&self, dispatch: &Dispatch) {
        self.state.lock().current = Some(dispatch.slot);
        self.inner.switch_to(dispatch);
    }

    fn wait_for_interrupt(&self) {
        self.inner.wait_for_interrupt();
    }
}

impl Kernel {
    /// Give an idle `cpu` the next runnable process
    ///
    /// Returns the pid now running on `cpu`, which is the existing one if
    /// the CPU was busy, or `None` if nothing is runnable.
    pub fn schedule(&self, cpu: CpuId) -> Result<Option<Pid>> {
        let state = self.cpu(cpu)?;
        if let Some(slot) = state.lock().current {
            return Ok(Some(self.table.lock(slot).pid));
        }
        Ok(self.dispatch_on(state).map(|dispatch| dispatch.pid))
    }

    /// Scheduler loop entry for one CPU: block until a process is dispatched
    ///
    /// `ctx` performs the context switch and idles the CPU between scans.
    pub fn run_cpu<C: Context + ?Sized>(&self, cpu: CpuId, ctx: &C) -> Result<Dispatch> {
        let state = self.cpu(cpu)?;
        if state.lock().current.is_some() {
            return Err(KernelError::CpuBusy(cpu));
        }

        let ctx = CpuContext { state, inner: ctx };
        Ok(self.mlfq.select_and_run(&self.table, &ctx))
    }

    /// Advance the global clock and run the periodic boost check
    ///
    /// For kernels whose CPUs charge their own ticks through `cpu_tick`.
    pub fn clock_tick(&self) -> Tick {
        let now = self.advance_clock();
        self.boost_check(now);
        now
    }

    /// Timer interrupt on `cpu`: charge the running process, rescheduling if it must yield
    ///
    /// An idle CPU first picks up a runnable process, which is charged for
    /// this tick. A killed process exits instead of being charged.
    pub fn cpu_tick(&self, cpu: CpuId) -> Result<TickOutcome> {
        let state = self.cpu(cpu)?;
        self.dispatch_if_idle(state);
        Ok(self.charge_current(state))
    }

    /// One global tick: advance the clock, charge every CPU, then check the boost timer
    ///
    /// Idle CPUs are filled before any charging, so a process requeued by one
    /// CPU during this tick is not picked up and charged again by another.
    pub fn tick(&self) -> Tick {
        let now = self.advance_clock();
        for state in &self.cpus {
            self.dispatch_if_idle(state);
        }
        for state in &self.cpus {
            self.charge_current(state);
        }
        self.boost_check(now);
        now
    }

    /// Run `count` global ticks, returning the final tick
    pub fn run_ticks(&self, count: u64) -> Tick {
        (0..count).fold(self.ticks(), |_, _| self.tick())
    }

    #[inline]
    fn advance_clock(&self) -> Tick {
        self.ticks.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn boost_check(&self, now: Tick) {
        self.mlfq.periodic_boost(&self.table, now);
    }

    fn dispatch_on(&self, state: &Mutex<CpuState>) -> Option<Dispatch> {
        let dispatch = self.mlfq.select(&self.table)?;
        state.lock().current = Some(dispatch.slot);
        Some(dispatch)
    }

    fn dispatch_if_idle(&self, state: &Mutex<CpuState>) {
        if state.lock().current.is_none() {
            self.dispatch_on(state);
        }
    }

    /// Charge the process running on a CPU for one tick
    fn charge_current(&self, state: &Mutex<CpuState>) -> TickOutcome {
        let Some(slot) = state.lock().current else {
            return TickOutcome::NotRunning;
        };

        if self.table.lock(slot).killed {
            state.lock().current = None;
            self.exit_slot(slot);
            self.dispatch_on(state);
            return TickOutcome::NotRunning;
        }

        let outcome = self.mlfq.on_tick(&self.table, slot);
        match outcome {
            TickOutcome::NotRunning => {
                state.lock().current = None;
                self.dispatch_on(state);
            }
            outcome if outcome.needs_resched() => {
                state.lock().current = None;
                self.requeue(slot);
                self.dispatch_on(state);
            }
            _ => {}
        }
        outcome
    }

    /// Running -> Runnable for a process this CPU just detached
    pub(super) fn requeue(&self, slot: SlotId) {
        if let Err(e) = self
            .table
            .transition(slot, ProcessState::Running, ProcessState::Runnable)
        {
            warn!(slot, error = %e, "requeue of detached process failed");
        }
    }

    /// Running -> Zombie for a process this CPU just detached
    pub(super) fn exit_slot(&self, slot: SlotId) -> Option<Pid> {
        match self
            .table
            .transition(slot, ProcessState::Running, ProcessState::Zombie)
        {
            Ok(pid) => {
                debug!(pid, "process exited");
                Some(pid)
            }
            Err(e) => {
                warn!(slot, error = %e, "exit of detached process failed");
                None
            }
        }
    }
}
