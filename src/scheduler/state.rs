/*!
 * Process Scheduling State
 * Per-process MLFQ bookkeeping embedded in each process-table slot
 */

use super::config::MlfqConfig;
use super::types::TickOutcome;
use crate::core::types::{QueueLevel, Tick, MAX_LEVEL};
use serde::{Deserialize, Serialize};

/// MLFQ fields of one process
///
/// Only mutated while the owning slot's lock is held. `ticks_at_level`
/// returns to zero every time `queue_level` changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedState {
    queue_level: QueueLevel,
    ticks_at_level: Tick,
    lifetime_schedule_count: u64,
}

impl SchedState {
    /// Fresh state for a newly created process
    #[inline]
    pub const fn new() -> Self {
        Self {
            queue_level: 0,
            ticks_at_level: 0,
            lifetime_schedule_count: 0,
        }
    }

    /// State already resident at `level`, with an empty quantum window
    pub fn with_level(level: QueueLevel) -> Self {
        assert!(level <= MAX_LEVEL, "queue level {} out of range", level);
        Self {
            queue_level: level,
            ..Self::new()
        }
    }

    #[inline(always)]
    pub const fn queue_level(&self) -> QueueLevel {
        self.queue_level
    }

    #[inline(always)]
    pub const fn ticks_at_level(&self) -> Tick {
        self.ticks_at_level
    }

    #[inline(always)]
    pub const fn lifetime_schedule_count(&self) -> u64 {
        self.lifetime_schedule_count
    }

    /// Count a dispatch, returning the level it happened at
    #[inline]
    pub fn record_dispatch(&mut self) -> QueueLevel {
        self.lifetime_schedule_count += 1;
        self.queue_level
    }

    /// Move back to level 0 with an empty quantum window
    #[inline]
    pub fn boost(&mut self) {
        self.queue_level = 0;
        self.ticks_at_level = 0;
    }

    /// Charge one tick against the current level's quantum
    pub fn charge_tick(&mut self, config: &MlfqConfig) -> TickOutcome {
        debug_assert!(self.queue_level <= MAX_LEVEL);

        self.ticks_at_level += 1;
        if self.ticks_at_level < config.quantum(self.queue_level) {
            return TickOutcome::Continue;
        }

        self.ticks_at_level = 0;
        if self.queue_level == MAX_LEVEL {
            return TickOutcome::Renewed;
        }

        let from = self.queue_level;
        self.queue_level += 1;
        TickOutcome::Demoted {
            from,
            to: self.queue_level,
        }
    }
}
