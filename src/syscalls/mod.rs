/*!
 * Syscalls Module
 * Scheduler system calls, their ABI, and user-memory copy-out
 */

mod scheduler;
pub mod types;
pub mod usermem;
pub mod wire;

// Re-export public API
pub use types::{
    syscall_return_value, Syscall, SyscallError, SyscallResult, SYSCALL_FAILURE, SYSCALL_SUCCESS,
};
pub use usermem::{AddressSpace, UserMemory};
