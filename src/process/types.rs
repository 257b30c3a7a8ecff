/*!
 * Process Types
 * Common types for process management
 */

use crate::core::data_structures::InlineString;
use crate::core::types::{Pid, QueueLevel};
use serde::{Deserialize, Serialize};

/// Process lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Slot is free
    Unused,
    /// Ready to be dispatched
    Runnable,
    /// Currently executing on a CPU
    Running,
    /// Blocked waiting for an event
    Sleeping,
    /// Exited, waiting to be reaped
    Zombie,
}

impl ProcessState {
    /// Whether a process in this state still participates in scheduling
    #[inline(always)]
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Runnable | Self::Running | Self::Sleeping)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unused => "unused",
            Self::Runnable => "runnable",
            Self::Running => "running",
            Self::Sleeping => "sleeping",
            Self::Zombie => "zombie",
        }
    }
}

/// Value-copy snapshot of a process, as returned by the process-info query
///
/// Field order is the wire layout copied out to user space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessInfo {
    pub pid: Pid,
    pub state: ProcessState,
    pub queue_level: QueueLevel,
    pub ticks_at_level: u64,
    pub lifetime_schedule_count: u64,
    pub name: InlineString,
}
