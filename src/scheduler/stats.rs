/*!
 * Scheduler Statistics
 * Lock-protected global counters with consistent snapshots
 */

use crate::core::types::{QueueLevel, MAX_LEVEL, NLEVELS};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Global MLFQ counters
///
/// Field order is the wire layout copied out to user space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    /// Successful dispatches
    pub total_schedules: u64,
    /// Boost events (periodic firings and manual boost-all requests)
    pub total_boosts: u64,
    /// Level increases performed by the tick tracker
    pub total_demotions: u64,
    /// Sampled number of live processes resident at each level
    pub level_occupancy: [u64; NLEVELS],
    /// Dispatches per level; always sums to `total_schedules`
    pub level_schedule_count: [u64; NLEVELS],
}

impl SchedulerStats {
    /// Whether the per-level dispatch counts add up to the total
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.level_schedule_count.iter().sum::<u64>() == self.total_schedules
    }
}

/// Writer/reader side of the global statistics
///
/// One mutex guards the whole structure so a snapshot never observes a
/// dispatch counted in the total but not in its level. The lock is never
/// taken while a process lock is held.
#[derive(Debug, Default)]
pub struct StatsAggregator {
    inner: Mutex<SchedulerStats>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a dispatch at `level`
    #[inline]
    pub fn record_schedule(&self, level: QueueLevel) {
        debug_assert!(level <= MAX_LEVEL, "queue level {} out of range", level);
        let mut stats = self.inner.lock();
        stats.total_schedules += 1;
        stats.level_schedule_count[level] += 1;
    }

    #[inline]
    pub fn record_demotion(&self) {
        self.inner.lock().total_demotions += 1;
    }

    #[inline]
    pub fn record_boost(&self) {
        self.inner.lock().total_boosts += 1;
    }

    /// Publish a fresh occupancy sample
    #[inline]
    pub fn record_occupancy(&self, occupancy: [u64; NLEVELS]) {
        self.inner.lock().level_occupancy = occupancy;
    }

    /// Copy of every counter taken in one critical section
    #[inline]
    pub fn snapshot(&self) -> SchedulerStats {
        *self.inner.lock()
    }
}
