/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::data_structures::InlineString;
use crate::core::types::Pid;
use crate::process::ProcessState;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export SyscallError from syscalls module
pub use crate::syscalls::types::SyscallError;

/// Process-table errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Process {0} not found")]
    #[diagnostic(
        code(process::not_found),
        help("The process may have exited and been reaped, or never existed.")
    )]
    NotFound(Pid),

    #[error("Process table full ({capacity} slots)")]
    #[diagnostic(
        code(process::table_full),
        help("Reap zombie processes or build the kernel with a larger process table.")
    )]
    TableFull { capacity: usize },

    #[error("Invalid state transition for process {pid}: {from:?} -> {to:?}")]
    #[diagnostic(
        code(process::invalid_transition),
        help("Operation cannot be performed in the current process state.")
    )]
    InvalidTransition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },
}

/// Scheduler configuration errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Quantum for level {level} must be at least one tick")]
    #[diagnostic(code(config::zero_quantum))]
    ZeroQuantum { level: usize },

    #[error("Quantum table must not shrink with level: level {level} has {quantum} < {previous}")]
    #[diagnostic(
        code(config::non_monotonic_quanta),
        help("Lower-priority levels get longer time slices, e.g. 1,2,4,8.")
    )]
    NonMonotonic {
        level: usize,
        quantum: u64,
        previous: u64,
    },

    #[error("Boost interval must be at least one tick")]
    #[diagnostic(code(config::zero_boost_interval))]
    ZeroBoostInterval,

    #[error("Invalid value for {var}: {reason}")]
    #[diagnostic(
        code(config::invalid_env),
        help("Check the KERNEL_MLFQ_* environment variables.")
    )]
    InvalidEnv { var: InlineString, reason: InlineString },

    #[error("Kernel needs at least one {0}")]
    #[diagnostic(code(config::empty_resource))]
    EmptyResource(InlineString),
}

/// Unified kernel error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum KernelError {
    #[error("Process error: {0}")]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error("Syscall error: {0}")]
    #[diagnostic(transparent)]
    Syscall(#[from] SyscallError),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid CPU {cpu} (kernel has {ncpu})")]
    #[diagnostic(code(kernel::invalid_cpu))]
    InvalidCpu { cpu: usize, ncpu: usize },

    #[error("CPU {0} is not running a process")]
    #[diagnostic(code(kernel::cpu_idle))]
    CpuIdle(usize),

    #[error("CPU {0} is already running a process")]
    #[diagnostic(
        code(kernel::cpu_busy),
        help("Yield, sleep, or exit the current process before entering the scheduler loop.")
    )]
    CpuBusy(usize),
}

/// Result type for kernel operations
pub type Result<T> = std::result::Result<T, KernelError>;
