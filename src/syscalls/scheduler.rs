/*!
 * Scheduler Syscalls
 * getprocinfo, boostproc, getschedulerstats
 *
 * Records are snapshotted under their lock, encoded, and only then copied
 * out, so no lock is held across the copy and a failed copy writes nothing.
 */

use super::types::{syscall_return_value, Syscall, SyscallError, SyscallResult, SYSCALL_FAILURE};
use super::usermem::UserMemory;
use super::wire;
use crate::core::types::{CpuId, Pid, UserAddr};
use crate::kernel::Kernel;
use crate::monitoring::span_syscall;
use crate::scheduler::BoostTarget;
use tracing::{debug, warn};

impl Kernel {
    /// Copy the calling process's scheduling record to `dst`
    pub fn sys_getprocinfo(
        &self,
        cpu: CpuId,
        dst: UserAddr,
        mem: &mut dyn UserMemory,
    ) -> SyscallResult<()> {
        let slot = self
            .current_slot(cpu)
            .ok()
            .flatten()
            .ok_or(SyscallError::NoCurrentProcess(cpu))?;

        let info = self.table().lock(slot).info();
        let bytes = wire::to_vec(&info)?;
        mem.copy_out(dst, &bytes)
    }

    /// Boost `pid` to level 0, or every process when `pid` is 0
    pub fn sys_boostproc(&self, pid: Pid) -> SyscallResult<()> {
        // Lookup is the only way a boost can fail
        self.boost(BoostTarget::from(pid))
            .map_err(|_| SyscallError::ProcessNotFound(pid))
    }

    /// Copy a consistent snapshot of the global scheduler counters to `dst`
    pub fn sys_getschedulerstats(
        &self,
        dst: UserAddr,
        mem: &mut dyn UserMemory,
    ) -> SyscallResult<()> {
        let stats = self.stats();
        let bytes = wire::to_vec(&stats)?;
        mem.copy_out(dst, &bytes)
    }

    /// Dispatch a decoded syscall issued on `cpu`, returning the user-visible value
    pub fn handle_syscall(&self, cpu: CpuId, syscall: Syscall, mem: &mut dyn UserMemory) -> i64 {
        let caller = self.current(cpu).ok().flatten().unwrap_or(0);
        let span = span_syscall(syscall.name(), caller);
        let _guard = span.enter();

        let result = match syscall {
            Syscall::GetProcInfo { addr } => self.sys_getprocinfo(cpu, addr, mem),
            Syscall::BoostProc { pid } => self.sys_boostproc(pid),
            Syscall::GetSchedulerStats { addr } => self.sys_getschedulerstats(addr, mem),
        };

        match &result {
            Ok(()) => span.record_success(),
            Err(e) => {
                debug!(error = %e, "syscall failed");
                span.record_error(e);
            }
        }

        let ret = syscall_return_value(&result);
        span.record_return(ret);
        ret
    }

    /// Decode and dispatch a raw trap; unknown numbers fail with -1
    pub fn handle_raw_syscall(
        &self,
        cpu: CpuId,
        number: u32,
        arg0: u64,
        mem: &mut dyn UserMemory,
    ) -> i64 {
        match Syscall::from_raw(number, arg0) {
            Some(syscall) => self.handle_syscall(cpu, syscall, mem),
            None => {
                warn!(cpu, number, "unknown syscall");
                SYSCALL_FAILURE
            }
        }
    }
}
