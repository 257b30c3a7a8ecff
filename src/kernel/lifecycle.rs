/*!
 * Process Lifecycle
 * Creation, voluntary yield, sleep/wakeup, exit, kill, reap, and manual boosts
 */

use super::Kernel;
use crate::core::errors::Result;
use crate::core::types::{CpuId, Pid};
use crate::process::ProcessState;
use crate::scheduler::BoostTarget;
use tracing::{debug, info};

impl Kernel {
    /// Create a runnable process at level 0
    pub fn spawn(&self, name: &str) -> Result<Pid> {
        let (slot, pid) = self.table.allocate(name)?;
        debug!(pid, slot, name, "process created");
        Ok(pid)
    }

    /// Give up the CPU before the quantum runs out
    ///
    /// The process keeps its level and its quantum progress; a process that
    /// always yields early is never demoted.
    pub fn yield_cpu(&self, cpu: CpuId) -> Result<Pid> {
        let slot = self.take_current(cpu)?;
        let pid = self
            .table
            .transition(slot, ProcessState::Running, ProcessState::Runnable)?;
        Ok(pid)
    }

    /// Block the process running on `cpu` until `wakeup`
    pub fn sleep_current(&self, cpu: CpuId) -> Result<Pid> {
        let slot = self.take_current(cpu)?;
        let pid = self
            .table
            .transition(slot, ProcessState::Running, ProcessState::Sleeping)?;
        Ok(pid)
    }

    /// Make a sleeping process runnable again
    pub fn wakeup(&self, pid: Pid) -> Result<()> {
        self.table
            .transition_pid(pid, ProcessState::Sleeping, ProcessState::Runnable)?;
        Ok(())
    }

    /// Terminate the process running on `cpu`, leaving a zombie to reap
    pub fn exit_current(&self, cpu: CpuId) -> Result<Pid> {
        let slot = self.take_current(cpu)?;
        let pid = self
            .table
            .transition(slot, ProcessState::Running, ProcessState::Zombie)?;
        debug!(pid, "process exited");
        Ok(pid)
    }

    /// Mark `pid` for termination at its next tick
    pub fn kill(&self, pid: Pid) -> Result<()> {
        self.table.kill(pid)?;
        info!(pid, "process killed");
        Ok(())
    }

    /// Free a zombie's slot
    pub fn reap(&self, pid: Pid) -> Result<()> {
        self.table.reap(pid)?;
        debug!(pid, "process reaped");
        Ok(())
    }

    /// Manual boost: every process, or one by pid
    pub fn boost(&self, target: BoostTarget) -> Result<()> {
        self.mlfq.boost(&self.table, target)?;
        info!(?target, "manual priority boost");
        Ok(())
    }
}
