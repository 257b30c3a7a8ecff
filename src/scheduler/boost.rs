/*!
 * Boost Engine
 * Periodic and manual resets to the highest priority level
 */

use super::types::BoostTarget;
use super::Mlfq;
use crate::core::errors::ProcessError;
use crate::core::types::{Pid, Tick};
use crate::process::ProcessTable;

impl Mlfq {
    /// Fire the periodic boost if `boost_interval` ticks have passed since the last one
    ///
    /// Called once per tick from tick context. Returns whether it fired; a
    /// firing counts as one boost no matter how many processes it reset.
    pub fn periodic_boost(&self, table: &ProcessTable, now: Tick) -> bool {
        let last = self.boost_timer.last_boost_tick();
        if now.saturating_sub(last) < self.config.boost_interval {
            return false;
        }
        if !self.boost_timer.advance(last, now) {
            return false;
        }

        Self::reset_all(table);
        self.stats.record_boost();
        true
    }

    /// Reset every process to level 0 and count one boost
    ///
    /// Leaves the periodic boost timer alone.
    pub fn boost_all(&self, table: &ProcessTable) {
        Self::reset_all(table);
        self.stats.record_boost();
    }

    /// Reset one process to level 0 without touching the boost count
    pub fn boost_one(&self, table: &ProcessTable, pid: Pid) -> Result<(), ProcessError> {
        table
            .with_pid(pid, |_, proc| proc.sched.boost())
            .ok_or(ProcessError::NotFound(pid))
    }

    /// Manual boost entry point: pid 0 boosts everyone
    pub fn boost(&self, table: &ProcessTable, target: BoostTarget) -> Result<(), ProcessError> {
        match target {
            BoostTarget::All => {
                self.boost_all(table);
                Ok(())
            }
            BoostTarget::Process(pid) => self.boost_one(table, pid),
        }
    }

    fn reset_all(table: &ProcessTable) {
        table.for_each(|_, proc| proc.sched.boost());
    }
}
