/*!
 * Syscall Enum
 * Scheduler system calls and their trap numbers
 */

use crate::core::types::{Pid, UserAddr};
use serde::{Deserialize, Serialize};

/// Scheduler system calls
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "syscall")]
pub enum Syscall {
    /// Copy the caller's process-info record to `addr`
    GetProcInfo { addr: UserAddr },

    /// Boost `pid` to level 0; pid 0 boosts every process
    BoostProc { pid: Pid },

    /// Copy the global scheduler statistics to `addr`
    GetSchedulerStats { addr: UserAddr },
}

impl Syscall {
    pub const SYS_GETPROCINFO: u32 = 22;
    pub const SYS_BOOSTPROC: u32 = 23;
    pub const SYS_GETSCHEDULERSTATS: u32 = 24;

    /// Decode a trap: syscall number plus its single argument register
    pub fn from_raw(number: u32, arg0: u64) -> Option<Self> {
        match number {
            Self::SYS_GETPROCINFO => Some(Self::GetProcInfo { addr: arg0 }),
            Self::SYS_BOOSTPROC => Some(Self::BoostProc {
                // The ABI passes an int; only the low 32 bits are meaningful
                pid: arg0 as u32,
            }),
            Self::SYS_GETSCHEDULERSTATS => Some(Self::GetSchedulerStats { addr: arg0 }),
            _ => None,
        }
    }

    pub const fn number(&self) -> u32 {
        match self {
            Self::GetProcInfo { .. } => Self::SYS_GETPROCINFO,
            Self::BoostProc { .. } => Self::SYS_BOOSTPROC,
            Self::GetSchedulerStats { .. } => Self::SYS_GETSCHEDULERSTATS,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::GetProcInfo { .. } => "getprocinfo",
            Self::BoostProc { .. } => "boostproc",
            Self::GetSchedulerStats { .. } => "getschedulerstats",
        }
    }
}
