/*!
 * Scheduler Traits
 * Seams between the dispatcher and the CPU it runs on
 */

use super::types::Dispatch;

/// Execution context of one CPU's scheduler loop
///
/// The dispatcher picks the process; the context owns the handoff and the
/// idle wait.
pub trait Context {
    /// Hand the CPU to the dispatched process
    fn switch_to(&self, dispatch: &Dispatch);

    /// Idle until an interrupt might have made a process runnable
    fn wait_for_interrupt(&self);
}

impl<C: Context + ?Sized> Context for &C {
    fn switch_to(&self, dispatch: &Dispatch) {
        (**self).switch_to(dispatch)
    }

    fn wait_for_interrupt(&self) {
        (**self).wait_for_interrupt()
    }
}
