/*!
 * Core Types
 * Common types used across the kernel
 */

/// Process ID type
pub type Pid = u32;

/// Monotonic timer tick count since boot
pub type Tick = u64;

/// MLFQ priority level (0 is the highest priority)
pub type QueueLevel = usize;

/// Index of a process-table slot
pub type SlotId = usize;

/// Logical CPU identifier
pub type CpuId = usize;

/// User-space virtual address
pub type UserAddr = u64;

/// Number of MLFQ priority levels
pub const NLEVELS: usize = 4;

/// Highest-numbered (lowest priority) queue level
pub const MAX_LEVEL: QueueLevel = NLEVELS - 1;

/// Default process-table capacity
pub const NPROC: usize = 64;

/// Default number of CPUs
pub const NCPU: usize = 1;

/// Size of the process name buffer in the user ABI (including terminator)
pub const PROC_NAME_LEN: usize = 16;
