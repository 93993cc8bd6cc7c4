//! Hash table configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{HashtableError, HashtableResult};
use crate::infrastructure::hash::{HashAlgorithm, StringHashProvider};
use crate::types::{
    DEFAULT_BUCKETS, DEFAULT_GROWTH_FACTOR, DEFAULT_SLOTS_PER_BUCKET, MIN_GROWTH_FACTOR,
};

/// Shape of a table, loadable from JSON
///
/// Missing fields fall back to the defaults in [`crate::types`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashtableConfig {
    pub buckets: usize,
    pub slots_per_bucket: usize,
    /// Capacity multiplier applied when the table is full
    pub growth_factor: usize,
    /// Algorithm used by string-keyed tables
    pub hash_algorithm: HashAlgorithm,
}

impl Default for HashtableConfig {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_BUCKETS,
            slots_per_bucket: DEFAULT_SLOTS_PER_BUCKET,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            hash_algorithm: HashAlgorithm::default(),
        }
    }
}

impl HashtableConfig {
    pub fn new(buckets: usize, slots_per_bucket: usize) -> Self {
        Self {
            buckets,
            slots_per_bucket,
            ..Self::default()
        }
    }

    /// Check the construction rules without building a table
    pub fn validate(&self) -> HashtableResult<()> {
        if self.buckets == 0 {
            return Err(HashtableError::InvalidCapacity(
                "the number of buckets must be greater than zero".to_string(),
            ));
        }
        if self.slots_per_bucket == 0 {
            return Err(HashtableError::InvalidCapacity(
                "the number of slots per bucket must be greater than zero".to_string(),
            ));
        }
        if self.growth_factor < MIN_GROWTH_FACTOR {
            return Err(HashtableError::InvalidCapacity(format!(
                "the growth factor must be at least {}",
                MIN_GROWTH_FACTOR
            )));
        }
        self.buckets
            .checked_mul(self.slots_per_bucket)
            .ok_or(HashtableError::CapacityOverflow)?;
        Ok(())
    }

    /// Initial capacity, `buckets * slots_per_bucket`
    pub fn capacity(&self) -> HashtableResult<usize> {
        self.buckets
            .checked_mul(self.slots_per_bucket)
            .ok_or(HashtableError::CapacityOverflow)
    }

    /// Provider for string keys using the configured algorithm
    pub fn string_provider(&self) -> StringHashProvider {
        StringHashProvider::new(self.hash_algorithm)
    }

    pub fn from_json(json: &str) -> HashtableResult<Self> {
        let config: HashtableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> HashtableResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> HashtableResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> HashtableResult<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }
}
