//! Command-line arguments.

use clap::Parser;
use life_core::{Result, RunnerConfig};
use std::path::PathBuf;

/// Conway's Game of Life on a toroidal grid, driven by line commands on stdin
#[derive(Debug, Parser)]
#[command(name = "life", version)]
pub struct Cli {
    /// Delay between generations in milliseconds
    pub delay: Option<u64>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for random fills
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of columns
    #[arg(long)]
    pub width: Option<i32>,

    /// Number of rows
    #[arg(long)]
    pub height: Option<i32>,

    /// Start from a named pattern, centered
    #[arg(long, conflicts_with = "random")]
    pub pattern: Option<String>,

    /// Start from a random fill
    #[arg(long)]
    pub random: bool,

    /// Start advancing immediately
    #[arg(long)]
    pub run: bool,

    /// Exit after this many generations
    #[arg(long)]
    pub generations: Option<u64>,

    /// Do not print frames
    #[arg(long)]
    pub no_render: bool,
}

impl Cli {
    /// Configuration file (or defaults) with command-line overrides applied
    pub fn runner_config(&self) -> Result<RunnerConfig> {
        let mut config = match &self.config {
            Some(path) => RunnerConfig::from_json_file(path)?,
            None => RunnerConfig::default(),
        };

        if let Some(delay) = self.delay {
            config.engine.initial_delay_ms = delay;
        }
        if let Some(seed) = self.seed {
            config.engine.seed = seed;
        }
        if let Some(width) = self.width {
            config.engine.grid.width = width;
        }
        if let Some(height) = self.height {
            config.engine.grid.height = height;
        }
        if let Some(generations) = self.generations {
            config.max_generations = Some(generations);
        }
        if self.run {
            config.start_running = true;
        }
        if self.no_render {
            config.render = false;
        }

        config.validate()?;
        Ok(config)
    }
}
