/*!
 * MLFQ Scheduler
 * Multi-level feedback queue: dispatch, quantum tracking, boosts, statistics
 *
 * Lock discipline:
 * - process scheduling state is only touched under its slot lock
 * - at most one slot lock is held at a time
 * - the statistics lock is taken after slot locks are released, never nested
 */

use crate::core::types::{SlotId, Tick};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

mod analysis;
mod boost;
pub mod config;
mod dispatch;
pub mod state;
pub mod stats;
pub mod traits;
mod tracker;
pub mod types;

// Re-export public API
pub use analysis::{Fairness, FairnessGrade, SchedulerHealth, StatsReport, MIN_SAMPLE_SCHEDULES};
pub use config::MlfqConfig;
pub use state::SchedState;
pub use stats::{SchedulerStats, StatsAggregator};
pub use traits::Context;
pub use types::{BoostTarget, Dispatch, TickOutcome};

/// Tick of the most recent periodic boost
#[derive(Debug, Default)]
pub struct BoostTimer {
    last_boost_tick: AtomicU64,
}

impl BoostTimer {
    #[inline]
    pub fn last_boost_tick(&self) -> Tick {
        self.last_boost_tick.load(Ordering::Acquire)
    }

    /// Advance from `seen` to `now`; false if another context already advanced it
    #[inline]
    fn advance(&self, seen: Tick, now: Tick) -> bool {
        self.last_boost_tick
            .compare_exchange(seen, now, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Scheduler singleton shared by every CPU, the tick handler, and syscalls
pub struct Mlfq {
    config: MlfqConfig,
    stats: StatsAggregator,
    boost_timer: BoostTimer,
    // Slot dispatched most recently; round-robin scans start just after it
    last_dispatched: AtomicUsize,
}

impl Mlfq {
    pub fn new(config: MlfqConfig) -> Self {
        Self {
            config,
            stats: StatsAggregator::new(),
            boost_timer: BoostTimer::default(),
            last_dispatched: AtomicUsize::new(usize::MAX),
        }
    }

    #[inline]
    pub fn config(&self) -> &MlfqConfig {
        &self.config
    }

    /// Consistent copy of the global counters
    #[inline]
    pub fn stats(&self) -> SchedulerStats {
        self.stats.snapshot()
    }

    #[inline]
    pub fn boost_timer(&self) -> &BoostTimer {
        &self.boost_timer
    }

    #[inline]
    fn scan_start(&self, capacity: usize) -> SlotId {
        match self.last_dispatched.load(Ordering::Relaxed) {
            usize::MAX => 0,
            last => (last + 1) % capacity,
        }
    }
}

impl Default for Mlfq {
    fn default() -> Self {
        Self::new(MlfqConfig::default())
    }
}
