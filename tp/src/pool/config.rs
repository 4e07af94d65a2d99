//! Pool configuration

use serde::{Deserialize, Serialize};

use super::error::PoolError;

/// Pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Max concurrently running task actions
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    4
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl PoolConfig {
    /// Create a configuration with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Validate the configuration, failing fast on misconfiguration
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.capacity == 0 {
            return Err(PoolError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}
