/*!
 * MLFQ Configuration
 * Quantum table and boost interval
 */

use crate::core::errors::ConfigError;
use crate::core::types::{QueueLevel, Tick, MAX_LEVEL, NLEVELS};
use serde::{Deserialize, Serialize};

/// Environment variable holding the comma-separated quantum table
pub const QUANTA_ENV: &str = "KERNEL_MLFQ_QUANTA";

/// Environment variable holding the periodic boost interval in ticks
pub const BOOST_INTERVAL_ENV: &str = "KERNEL_MLFQ_BOOST_INTERVAL";

/// Default time quantum per level, in ticks
pub const DEFAULT_QUANTUM_TABLE: [Tick; NLEVELS] = [1, 2, 4, 8];

/// Default ticks between periodic boosts
pub const DEFAULT_BOOST_INTERVAL: Tick = 100;

/// Static MLFQ parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MlfqConfig {
    /// Ticks a process may consume at each level before demotion
    pub quantum_table: [Tick; NLEVELS],
    /// Ticks between periodic boosts
    pub boost_interval: Tick,
}

impl MlfqConfig {
    /// Create a validated configuration
    pub fn new(quantum_table: [Tick; NLEVELS], boost_interval: Tick) -> Result<Self, ConfigError> {
        let config = Self {
            quantum_table,
            boost_interval,
        };
        config.validate()?;
        Ok(config)
    }

    /// Build from `KERNEL_MLFQ_QUANTA` / `KERNEL_MLFQ_BOOST_INTERVAL`, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let quanta = std::env::var(QUANTA_ENV).ok();
        let interval = std::env::var(BOOST_INTERVAL_ENV).ok();
        Self::from_values(quanta.as_deref(), interval.as_deref())
    }

    /// Parse from raw string values, as found in the environment
    pub fn from_values(quanta: Option<&str>, interval: Option<&str>) -> Result<Self, ConfigError> {
        let quantum_table = match quanta {
            Some(raw) => parse_quanta(raw)?,
            None => DEFAULT_QUANTUM_TABLE,
        };

        let boost_interval = match interval {
            Some(raw) => raw.trim().parse::<Tick>().map_err(|e| ConfigError::InvalidEnv {
                var: BOOST_INTERVAL_ENV.into(),
                reason: e.to_string().into(),
            })?,
            None => DEFAULT_BOOST_INTERVAL,
        };

        Self::new(quantum_table, boost_interval)
    }

    /// Check quanta are positive and non-decreasing, and the interval is positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut previous = 0;
        for (level, &quantum) in self.quantum_table.iter().enumerate() {
            if quantum == 0 {
                return Err(ConfigError::ZeroQuantum { level });
            }
            if quantum < previous {
                return Err(ConfigError::NonMonotonic {
                    level,
                    quantum,
                    previous,
                });
            }
            previous = quantum;
        }

        if self.boost_interval == 0 {
            return Err(ConfigError::ZeroBoostInterval);
        }

        Ok(())
    }

    /// Time quantum for `level`
    #[inline(always)]
    pub fn quantum(&self, level: QueueLevel) -> Tick {
        debug_assert!(level <= MAX_LEVEL, "queue level {} out of range", level);
        self.quantum_table[level]
    }
}

impl Default for MlfqConfig {
    fn default() -> Self {
        Self {
            quantum_table: DEFAULT_QUANTUM_TABLE,
            boost_interval: DEFAULT_BOOST_INTERVAL,
        }
    }
}

fn parse_quanta(raw: &str) -> Result<[Tick; NLEVELS], ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnv {
        var: QUANTA_ENV.into(),
        reason: reason.into(),
    };

    let values = raw
        .split(',')
        .map(|part| part.trim().parse::<Tick>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| invalid(e.to_string()))?;

    <[Tick; NLEVELS]>::try_from(values.as_slice())
        .map_err(|_| invalid(format!("expected {} values, got {}", NLEVELS, values.len())))
}
