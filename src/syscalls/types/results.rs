/*!
 * Syscall Result Types
 * Result alias and the integer return-value convention seen by user space
 */

use super::errors::SyscallError;

/// Result of a syscall handler
pub type SyscallResult<T> = Result<T, SyscallError>;

/// Value returned to user space on success
pub const SYSCALL_SUCCESS: i64 = 0;

/// Value returned to user space on any failure
pub const SYSCALL_FAILURE: i64 = -1;

/// Collapse a handler result into the value placed in the caller's return register
#[inline]
pub fn syscall_return_value<T>(result: &SyscallResult<T>) -> i64 {
    match result {
        Ok(_) => SYSCALL_SUCCESS,
        Err(_) => SYSCALL_FAILURE,
    }
}
