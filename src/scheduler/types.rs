/*!
 * Scheduler Types
 * Domain types for dispatch, tick accounting, and boosts
 */

use crate::core::types::{Pid, QueueLevel, SlotId};
use serde::{Deserialize, Serialize};

/// A process chosen by the dispatcher and already marked running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub slot: SlotId,
    pub pid: Pid,
    /// Level the process was dispatched from
    pub level: QueueLevel,
}

/// Result of charging one timer tick to the running process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Quantum not yet exhausted
    Continue,
    /// Quantum exhausted at the lowest-priority level; window restarted
    Renewed,
    /// Quantum exhausted; moved one level down
    Demoted { from: QueueLevel, to: QueueLevel },
    /// Slot was no longer running when the tick landed
    NotRunning,
}

impl TickOutcome {
    /// Whether the CPU should give up the process at the end of this tick
    #[inline(always)]
    pub const fn needs_resched(&self) -> bool {
        matches!(self, Self::Renewed | Self::Demoted { .. })
    }
}

/// Target of a boost request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostTarget {
    /// Every process in the table
    All,
    /// One process by pid
    Process(Pid),
}

impl From<Pid> for BoostTarget {
    /// Pid 0 selects every process, as in the boost syscall ABI
    fn from(pid: Pid) -> Self {
        match pid {
            0 => Self::All,
            pid => Self::Process(pid),
        }
    }
}
