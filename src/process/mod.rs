/*!
 * Process Module
 * Process table, lifecycle states, and per-process snapshots
 */

pub mod table;
pub mod types;

// Re-export for convenience
pub use table::{Proc, ProcessTable};
pub use types::{ProcessInfo, ProcessState};
