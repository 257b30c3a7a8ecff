/*!
 * Syscall Types Module
 * Defines the syscall enum, errors, and return-value conventions
 */

mod errors;
mod results;
mod syscall;

// Re-export all public types
pub use errors::SyscallError;
pub use results::{syscall_return_value, SyscallResult, SYSCALL_FAILURE, SYSCALL_SUCCESS};
pub use syscall::Syscall;
