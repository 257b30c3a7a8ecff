/*!
 * Kernel Builder
 * Builder pattern for Kernel construction
 */

use super::Kernel;
use crate::core::errors::{ConfigError, Result};
use crate::core::types::{NCPU, NPROC};
use crate::scheduler::MlfqConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Sizing and scheduler parameters for a kernel instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelConfig {
    pub ncpu: usize,
    pub nproc: usize,
    pub mlfq: MlfqConfig,
}

impl KernelConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.ncpu == 0 {
            return Err(ConfigError::EmptyResource("cpu".into()));
        }
        if self.nproc == 0 {
            return Err(ConfigError::EmptyResource("process slot".into()));
        }
        self.mlfq.validate()
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            ncpu: NCPU,
            nproc: NPROC,
            mlfq: MlfqConfig::default(),
        }
    }
}

/// Builder for Kernel
#[derive(Debug, Default)]
pub struct KernelBuilder {
    config: KernelConfig,
}

impl KernelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of CPUs, each with its own scheduler loop
    pub fn with_cpus(mut self, ncpu: usize) -> Self {
        self.config.ncpu = ncpu;
        self
    }

    /// Number of process-table slots
    pub fn with_process_capacity(mut self, nproc: usize) -> Self {
        self.config.nproc = nproc;
        self
    }

    pub fn with_mlfq(mut self, mlfq: MlfqConfig) -> Self {
        self.config.mlfq = mlfq;
        self
    }

    /// Read scheduler parameters from `KERNEL_MLFQ_*` environment variables
    pub fn with_mlfq_from_env(mut self) -> Result<Self> {
        self.config.mlfq = MlfqConfig::from_env()?;
        Ok(self)
    }

    pub fn build(self) -> Result<Kernel> {
        let kernel = Kernel::new(self.config)?;
        info!(
            ncpu = self.config.ncpu,
            nproc = self.config.nproc,
            quanta = ?self.config.mlfq.quantum_table,
            boost_interval = self.config.mlfq.boost_interval,
            "kernel initialized"
        );
        Ok(kernel)
    }
}
