//! Configuration types for the simulator.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Grid dimensions, fixed for the lifetime of an engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of columns
    pub width: i32,
    /// Number of rows
    pub height: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 160,
            height: 160,
        }
    }
}

impl GridConfig {
    /// Number of cells; dimensions must be positive and the product must fit in an `i32`
    pub fn cell_count(&self) -> Result<usize> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}",
                self.height, self.width
            )));
        }
        let cells = self.width.checked_mul(self.height).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "grid of {}x{} cells is too large",
                self.height, self.width
            ))
        })?;
        Ok(cells as usize)
    }
}

/// Engine configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Random seed for reproducible random fills
    pub seed: u64,
    /// Grid dimensions
    pub grid: GridConfig,
    /// Probability that a cell is alive after a random fill (0.0 to 1.0)
    pub alive_probability: f64,
    /// Starting delay between generations (milliseconds)
    pub initial_delay_ms: u64,
    /// Amount the delay changes per speed-up/slow-down
    pub delay_step_ms: u64,
    /// Floor below which the delay never goes
    pub min_delay_ms: u64,
    /// Number of past generations remembered for cycle detection
    pub cycle_history: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            grid: GridConfig::default(),
            alive_probability: 0.5,
            initial_delay_ms: 50,
            delay_step_ms: 10,
            min_delay_ms: 0,
            cycle_history: 10,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        self.grid.cell_count()?;
        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(Error::InvalidConfig(format!(
                "alive_probability must be within [0, 1], got {}",
                self.alive_probability
            )));
        }
        if self.initial_delay_ms < self.min_delay_ms {
            return Err(Error::InvalidConfig(format!(
                "initial_delay_ms ({}) is below min_delay_ms ({})",
                self.initial_delay_ms, self.min_delay_ms
            )));
        }
        Ok(())
    }
}

/// Headless runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Engine configuration
    pub engine: EngineConfig,
    /// Stop after this many generations (runs until quit when unset)
    pub max_generations: Option<u64>,
    /// Print a text frame after every change
    pub render: bool,
    /// Log a population snapshot every N generations
    pub report_interval: u64,
    /// Start advancing generations immediately instead of in edit mode
    pub start_running: bool,
    /// Pause automatically once the grid repeats an earlier generation
    pub pause_on_cycle: bool,
    /// Pixel size of one cell when translating screen coordinates
    pub cell_size: i32,
    /// OpenTelemetry endpoint
    pub otel_endpoint: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            max_generations: None,
            render: true,
            report_interval: 100,
            start_running: false,
            pause_on_cycle: true,
            cell_size: 10,
            otel_endpoint: None,
        }
    }
}

impl RunnerConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: RunnerConfig = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), "Loaded runner configuration");
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;
        if self.cell_size <= 0 {
            return Err(Error::InvalidConfig(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        Ok(())
    }
}
