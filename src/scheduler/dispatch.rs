/*!
 * Dispatcher
 * Pick the runnable process at the lowest level, round-robin within a level
 */

use super::traits::Context;
use super::types::Dispatch;
use super::Mlfq;
use crate::core::types::{QueueLevel, SlotId, NLEVELS};
use crate::process::{ProcessState, ProcessTable};
use std::sync::atomic::Ordering;

impl Mlfq {
    /// Claim the next process to run, or `None` if nothing is runnable
    ///
    /// The scan starts just after the slot dispatched last, so among
    /// processes tied at the best level the first one met wins. Each slot is
    /// locked on its own; if the chosen process is taken by another CPU
    /// before it can be claimed, the scan is repeated.
    pub fn select(&self, table: &ProcessTable) -> Option<Dispatch> {
        let capacity = table.capacity();
        if capacity == 0 {
            return None;
        }

        loop {
            let start = self.scan_start(capacity);
            let mut best: Option<(QueueLevel, SlotId)> = None;
            let mut occupancy = [0u64; NLEVELS];

            for offset in 0..capacity {
                let slot = (start + offset) % capacity;
                let proc = table.lock(slot);
                if !proc.state.is_live() {
                    continue;
                }

                let level = proc.sched.queue_level();
                occupancy[level] += 1;
                if proc.state == ProcessState::Runnable
                    && best.map_or(true, |(best_level, _)| level < best_level)
                {
                    best = Some((level, slot));
                }
            }

            self.stats.record_occupancy(occupancy);
            let (_, slot) = best?;

            let claimed = {
                let mut proc = table.lock(slot);
                if proc.state == ProcessState::Runnable {
                    proc.state = ProcessState::Running;
                    let level = proc.sched.record_dispatch();
                    Some(Dispatch {
                        slot,
                        pid: proc.pid,
                        level,
                    })
                } else {
                    None
                }
            };

            if let Some(dispatch) = claimed {
                self.last_dispatched.store(slot, Ordering::Relaxed);
                self.stats.record_schedule(dispatch.level);
                return Some(dispatch);
            }
        }
    }

    /// Dispatch the next process and hand the CPU to it, idling until one is runnable
    pub fn select_and_run<C: Context + ?Sized>(&self, table: &ProcessTable, ctx: &C) -> Dispatch {
        loop {
            if let Some(dispatch) = self.select(table) {
                ctx.switch_to(&dispatch);
                return dispatch;
            }
            ctx.wait_for_interrupt();
        }
    }
}
