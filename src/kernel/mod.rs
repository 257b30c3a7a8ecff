/*!
 * Kernel
 * Process table, per-CPU state, global tick, and the MLFQ scheduler
 *
 * Every CPU, the tick handler, and the syscall layer share one `Kernel`.
 * A CPU's `current` slot is only changed by code running on that CPU; the
 * CPU lock and a process slot lock are never held together.
 */

mod builder;
mod cpu;
mod lifecycle;

pub use builder::{KernelBuilder, KernelConfig};

use crate::core::errors::{KernelError, Result};
use crate::core::types::{CpuId, Pid, SlotId, Tick};
use crate::process::{ProcessInfo, ProcessTable};
use crate::scheduler::{Mlfq, MlfqConfig, SchedulerStats};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-CPU state
#[derive(Debug, Default, Clone, Copy)]
struct CpuState {
    /// Slot of the process this CPU is running
    current: Option<SlotId>,
}

pub struct Kernel {
    table: ProcessTable,
    mlfq: Mlfq,
    cpus: Box<[Mutex<CpuState>]>,
    ticks: AtomicU64,
}

impl Kernel {
    pub fn builder() -> KernelBuilder {
        KernelBuilder::new()
    }

    pub fn new(config: KernelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            table: ProcessTable::new(config.nproc),
            mlfq: Mlfq::new(config.mlfq),
            cpus: (0..config.ncpu).map(|_| Mutex::new(CpuState::default())).collect(),
            ticks: AtomicU64::new(0),
        })
    }

    #[inline]
    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    #[inline]
    pub fn mlfq(&self) -> &Mlfq {
        &self.mlfq
    }

    #[inline]
    pub fn config(&self) -> &MlfqConfig {
        self.mlfq.config()
    }

    #[inline]
    pub fn ncpu(&self) -> usize {
        self.cpus.len()
    }

    /// Global tick count
    #[inline]
    pub fn ticks(&self) -> Tick {
        self.ticks.load(Ordering::Acquire)
    }

    /// Pid of the process running on `cpu`
    pub fn current(&self, cpu: CpuId) -> Result<Option<Pid>> {
        Ok(self
            .current_slot(cpu)?
            .map(|slot| self.table.lock(slot).pid))
    }

    /// Snapshot of one process, taken under its lock
    pub fn process_info(&self, pid: Pid) -> Option<ProcessInfo> {
        self.table.info(pid)
    }

    /// Snapshots of every allocated process
    pub fn processes(&self) -> Vec<ProcessInfo> {
        self.table.all_info()
    }

    /// Consistent copy of the scheduler counters
    #[inline]
    pub fn stats(&self) -> SchedulerStats {
        self.mlfq.stats()
    }

    fn cpu(&self, cpu: CpuId) -> Result<&Mutex<CpuState>> {
        self.cpus.get(cpu).ok_or(KernelError::InvalidCpu {
            cpu,
            ncpu: self.cpus.len(),
        })
    }

    pub(crate) fn current_slot(&self, cpu: CpuId) -> Result<Option<SlotId>> {
        Ok(self.cpu(cpu)?.lock().current)
    }

    /// Detach and return the process running on `cpu`
    fn take_current(&self, cpu: CpuId) -> Result<SlotId> {
        self.cpu(cpu)?
            .lock()
            .current
            .take()
            .ok_or(KernelError::CpuIdle(cpu))
    }
}

impl std::fmt::Debug for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kernel")
            .field("ncpu", &self.cpus.len())
            .field("nproc", &self.table.capacity())
            .field("ticks", &self.ticks())
            .field("config", self.mlfq.config())
            .finish()
    }
}
