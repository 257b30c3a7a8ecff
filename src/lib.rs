/*!
 * MLFQ Kernel Library
 * Multi-level feedback queue scheduler for a small multi-CPU teaching kernel
 */

pub mod core;
pub mod kernel;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod syscalls;
pub mod timer;

// Re-exports
pub use crate::core::errors::{ConfigError, KernelError, ProcessError, Result};
pub use crate::core::types::{CpuId, Pid, QueueLevel, SlotId, Tick, UserAddr, MAX_LEVEL, NLEVELS};
pub use kernel::{Kernel, KernelBuilder, KernelConfig};
pub use monitoring::{init_tracing, SyscallSpan};
pub use process::{ProcessInfo, ProcessState, ProcessTable};
pub use scheduler::{
    BoostTarget, Context, Dispatch, FairnessGrade, Mlfq, MlfqConfig, SchedulerHealth,
    SchedulerStats, StatsReport, TickOutcome,
};
pub use syscalls::{AddressSpace, Syscall, SyscallError, SyscallResult, UserMemory};
pub use timer::TimerTask;
