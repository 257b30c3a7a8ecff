/*!
 * Syscall Error Types
 * Defines error types for syscall operations
 */

use crate::core::data_structures::InlineString;
use crate::core::types::{CpuId, Pid, UserAddr};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Syscall operation errors with rich context
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(rename_all = "snake_case", tag = "error_type", content = "details")]
#[non_exhaustive]
pub enum SyscallError {
    /// Destination buffer is not writable in the caller's address space
    #[error("Invalid user address {addr:#x} (+{len} bytes)")]
    #[diagnostic(
        code(syscall::invalid_address),
        help("Pass a pointer to a buffer inside the calling process's memory.")
    )]
    InvalidAddress { addr: UserAddr, len: usize },

    /// No process with the requested pid
    #[error("Process {0} not found")]
    #[diagnostic(code(syscall::process_not_found))]
    ProcessNotFound(Pid),

    /// Syscall issued on a CPU that is not running a process
    #[error("No process running on CPU {0}")]
    #[diagnostic(code(syscall::no_current_process))]
    NoCurrentProcess(CpuId),

    /// Record could not be encoded for copy-out
    #[error("Encoding error: {0}")]
    #[diagnostic(code(syscall::encoding))]
    Encoding(InlineString),
}

impl SyscallError {
    /// Create an invalid address error
    #[inline]
    pub fn invalid_address(addr: UserAddr, len: usize) -> Self {
        Self::InvalidAddress { addr, len }
    }

    /// Create an encoding error
    #[inline]
    pub fn encoding(msg: impl Into<InlineString>) -> Self {
        Self::Encoding(msg.into())
    }
}
