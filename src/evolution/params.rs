use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when a run is configured with unusable values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A parameter is outside its valid range.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Run parameters that control the cellular evolution.
///
/// Unspecified fields fall back to the defaults: a 10x10 torus of 50-feature
/// masks evolved for 100 generations at a 5% per-gene mutation rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub cols: usize,
    /// Genes per feature mask.
    pub num_features: usize,
    /// Number of synchronized whole-grid updates to run.
    pub generations: u32,
    /// Per-gene flip probability applied to every offspring. Range: 0.0-1.0.
    pub mutation_rate: f64,
    /// Master random seed. `None` draws one from entropy at startup;
    /// runs with the same seed and parameters reproduce bit for bit.
    pub rng_seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            num_features: 50,
            generations: 100,
            mutation_rate: 0.05,
            rng_seed: None,
        }
    }
}

impl Params {
    /// Checks every parameter before any computation starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::Invalid("grid dimensions must be non-zero"));
        }
        if self.num_features == 0 {
            return Err(ConfigError::Invalid("num_features must be non-zero"));
        }
        if self.generations == 0 {
            return Err(ConfigError::Invalid("generations must be non-zero"));
        }
        if !self.mutation_rate.is_finite() || !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::Invalid("mutation_rate must be within [0, 1]"));
        }
        Ok(())
    }

    /// Total number of grid cells.
    pub fn population_size(&self) -> usize {
        self.rows * self.cols
    }
}
