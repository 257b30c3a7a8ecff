/*!
 * Statistics Analysis
 * Derived metrics over a statistics snapshot
 */

use super::stats::SchedulerStats;
use crate::core::types::{QueueLevel, NLEVELS};
use serde::{Deserialize, Serialize};

/// Schedules needed before the health verdict means anything
pub const MIN_SAMPLE_SCHEDULES: u64 = 100;

/// How evenly dispatches are spread across levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FairnessGrade {
    /// Max deviation under a tenth of the even share
    Excellent,
    /// Max deviation under a third of the even share
    Good,
    Skewed,
    NoData,
}

/// Spread of dispatches over levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fairness {
    /// Dispatches each level would have under an even split
    pub expected_per_level: u64,
    /// Largest distance of any level from the even split
    pub max_deviation: u64,
    pub grade: FairnessGrade,
}

/// Coarse verdict on whether the MLFQ machinery is exercising itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerHealth {
    InsufficientData,
    /// Nothing ever exhausted a quantum
    NoDemotions,
    /// The periodic boost never fired
    NoBoosts,
    Healthy,
}

/// Summary of a snapshot, suitable for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    pub stats: SchedulerStats,
    pub level_share_percent: [u64; NLEVELS],
    pub demotions_per_mille: u64,
    pub schedules_per_boost: Option<u64>,
    pub fairness: Fairness,
    pub health: SchedulerHealth,
}

impl SchedulerStats {
    /// Share of all dispatches that happened at `level`, in whole percent
    pub fn level_share_percent(&self, level: QueueLevel) -> u64 {
        self.level_schedule_count[level] * 100 / self.total_schedules.max(1)
    }

    /// Demotions per thousand dispatches
    pub fn demotions_per_mille(&self) -> u64 {
        self.total_demotions * 1000 / self.total_schedules.max(1)
    }

    /// Average dispatches between boosts, if any boost happened
    pub fn schedules_per_boost(&self) -> Option<u64> {
        (self.total_boosts > 0).then(|| self.total_schedules / self.total_boosts)
    }

    pub fn fairness(&self) -> Fairness {
        if self.total_schedules == 0 {
            return Fairness {
                expected_per_level: 0,
                max_deviation: 0,
                grade: FairnessGrade::NoData,
            };
        }

        let expected = self.total_schedules / NLEVELS as u64;
        let max_deviation = self
            .level_schedule_count
            .iter()
            .map(|&count| count.abs_diff(expected))
            .max()
            .unwrap_or(0);

        let grade = if max_deviation < expected / 10 {
            FairnessGrade::Excellent
        } else if max_deviation < expected / 3 {
            FairnessGrade::Good
        } else {
            FairnessGrade::Skewed
        };

        Fairness {
            expected_per_level: expected,
            max_deviation,
            grade,
        }
    }

    pub fn health(&self) -> SchedulerHealth {
        if self.total_schedules < MIN_SAMPLE_SCHEDULES {
            SchedulerHealth::InsufficientData
        } else if self.total_demotions == 0 {
            SchedulerHealth::NoDemotions
        } else if self.total_boosts == 0 {
            SchedulerHealth::NoBoosts
        } else {
            SchedulerHealth::Healthy
        }
    }

    pub fn report(&self) -> StatsReport {
        let mut level_share_percent = [0; NLEVELS];
        for (level, share) in level_share_percent.iter_mut().enumerate() {
            *share = self.level_share_percent(level);
        }

        StatsReport {
            stats: *self,
            level_share_percent,
            demotions_per_mille: self.demotions_per_mille(),
            schedules_per_boost: self.schedules_per_boost(),
            fairness: self.fairness(),
            health: self.health(),
        }
    }
}
