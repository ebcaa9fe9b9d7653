use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SEED: u64 = 1234;
pub const DEFAULT_MAX_GRID: f64 = 1_000_000.0;
pub const DEFAULT_NUM_GRID: usize = 1_000_000;
pub const DEFAULT_FLOOR: f64 = 0.1;
pub const DEFAULT_DISUTILITY: f64 = 0.5;
pub const DEFAULT_OUTPUT_PATH: &str = "consumption.npy";

/// Every knob of a run. Defaults reproduce the fixed batch configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// Upper (exclusive) bound of the consumption draw; lower bound is 1.
    pub max_grid: f64,
    /// Number of agents.
    pub num_grid: usize,
    /// Subsistence floor applied to consumption before taking logs.
    pub floor: f64,
    /// Utility cost of working, subtracted from log consumption.
    pub disutility: f64,
    /// Seed of the single RNG stream shared by every stage.
    pub seed: u64,
    /// Destination of the `.npy` output; overwritten on each run.
    pub output_path: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_grid:    DEFAULT_MAX_GRID,
            num_grid:    DEFAULT_NUM_GRID,
            floor:       DEFAULT_FLOOR,
            disutility:  DEFAULT_DISUTILITY,
            seed:        DEFAULT_SEED,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

impl ModelConfig {
    /// Load from a JSON file. Fields absent from the file keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| std::io::Error::new(e.kind(), format!("Cannot read {}: {e}", path.display())))?;
        let config: ModelConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Small configuration for fast tests.
    pub fn default_test() -> Self {
        Self {
            num_grid: 1_000,
            output_path: String::new(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.max_grid.is_finite() || self.max_grid <= 1.0 {
            return Err(SimError::InvalidParameter {
                name:   "max_grid",
                value:  self.max_grid,
                reason: "must be finite and greater than 1",
            });
        }
        if !self.floor.is_finite() || self.floor < 0.0 {
            return Err(SimError::InvalidParameter {
                name:   "floor",
                value:  self.floor,
                reason: "must be finite and non-negative",
            });
        }
        if !self.disutility.is_finite() {
            return Err(SimError::InvalidParameter {
                name:   "disutility",
                value:  self.disutility,
                reason: "must be finite",
            });
        }
        if self.floor == 0.0 {
            log::warn!("floor is 0: log utility is undefined for zero consumption");
        }
        Ok(())
    }
}
