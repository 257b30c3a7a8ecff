/*!
 * Quantum Tracker
 * Per-tick quantum accounting and demotion of the running process
 *
 * Runs in tick context: no allocation, no logging, one slot lock followed
 * by at most one short statistics update.
 */

use super::types::TickOutcome;
use super::Mlfq;
use crate::core::types::SlotId;
use crate::process::{ProcessState, ProcessTable};

impl Mlfq {
    /// Charge one tick to the process running in `slot`
    ///
    /// A demotion is counted only when the level actually increases; a
    /// process at the lowest-priority level just restarts its window.
    pub fn on_tick(&self, table: &ProcessTable, slot: SlotId) -> TickOutcome {
        let outcome = {
            let mut proc = table.lock(slot);
            if proc.state != ProcessState::Running {
                return TickOutcome::NotRunning;
            }
            proc.sched.charge_tick(&self.config)
        };

        if let TickOutcome::Demoted { .. } = outcome {
            self.stats.record_demotion();
        }
        outcome
    }
}
