//! Simulation engine owning the grid and applying edits and generations.

use crate::grid::Grid;
use crate::history::CycleHistory;
use crate::patterns::Pattern;
use crate::rule;
use life_core::{EngineConfig, Position, Result, RunState};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info, instrument, trace};

/// Summary of one generation transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Generation number after the step
    pub generation: u64,
    /// Live cells after the step
    pub population: usize,
    /// Cells that came alive
    pub births: usize,
    /// Cells that died
    pub deaths: usize,
    /// Set when the new state repeats one seen this many generations ago
    pub cycle_period: Option<u64>,
}

pub struct Simulation {
    grid: Grid,
    config: EngineConfig,
    rng: ChaCha8Rng,
    generation: u64,
    state: RunState,
    delay_ms: u64,
    history: CycleHistory,
}

impl Simulation {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let grid = Grid::from_config(&config.grid)?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        debug!(
            width = grid.width(),
            height = grid.height(),
            seed = config.seed,
            "Created simulation"
        );

        Ok(Self {
            grid,
            rng,
            generation: 0,
            state: RunState::Editing,
            delay_ms: config.initial_delay_ms,
            history: CycleHistory::new(config.cycle_history),
            config,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Pacing delay between generations, in milliseconds
    pub fn delay(&self) -> u64 {
        self.delay_ms
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// Visit every cell in row-major order
    pub fn for_each_cell<F>(&self, mut visit: F)
    where
        F: FnMut(Position, bool),
    {
        for (pos, alive) in self.grid.iter() {
            visit(pos, alive);
        }
    }

    /// Advance one generation.
    ///
    /// Neighbor counts for every cell are taken from the state before the step;
    /// cells are only rewritten once all counts are known.
    #[instrument(level = "trace", skip(self), fields(generation = self.generation))]
    pub fn step(&mut self) -> StepReport {
        if self.history.is_empty() {
            self.history.record(self.generation, self.grid.fingerprint());
        }

        let counts = self.grid.neighbor_counts();

        let mut births = 0;
        let mut deaths = 0;
        for (cell, &count) in self.grid.cells_mut().iter_mut().zip(&counts) {
            let next = rule::next_state(*cell, count);
            match (*cell, next) {
                (false, true) => births += 1,
                (true, false) => deaths += 1,
                _ => {}
            }
            *cell = next;
        }

        self.generation += 1;
        let cycle_period = self.history.record(self.generation, self.grid.fingerprint());

        let report = StepReport {
            generation: self.generation,
            population: self.grid.population(),
            births,
            deaths,
            cycle_period,
        };

        trace!(
            population = report.population,
            births,
            deaths,
            "Generation complete"
        );

        if let Some(period) = cycle_period {
            debug!(
                generation = self.generation,
                period,
                "State repeats an earlier generation"
            );
        }

        report
    }

    /// Flip a single cell, returning its new state
    pub fn toggle_cell(&mut self, pos: Position) -> Result<bool> {
        let alive = self.grid.toggle(pos)?;
        self.history.reset();
        trace!(row = pos.row, col = pos.col, alive, "Toggled cell");
        Ok(alive)
    }

    /// Kill every cell and reset the generation counter
    pub fn clear(&mut self) {
        self.grid.fill(false);
        self.generation = 0;
        self.history.reset();
        debug!("Cleared grid");
    }

    /// Randomize every cell using the engine's seeded generator
    pub fn random_fill(&mut self) {
        self.grid.randomize(self.config.alive_probability, &mut self.rng);
        self.history.reset();
        debug!(
            population = self.grid.population(),
            alive_probability = self.config.alive_probability,
            "Randomized grid"
        );
    }

    /// Clear the grid and place `pattern` with its top-left corner at `origin`
    pub fn load_pattern(&mut self, pattern: &Pattern, origin: Position) -> Result<()> {
        self.grid.get(origin)?;

        self.clear();
        self.grid.stamp(pattern.cells, origin);

        info!(
            pattern = pattern.name,
            row = origin.row,
            col = origin.col,
            "Loaded pattern"
        );
        Ok(())
    }

    /// Switch between editing and running; never advances a generation by itself
    pub fn set_running(&mut self, running: bool) {
        let state = RunState::from(running);
        if state != self.state {
            info!(
                from = ?self.state,
                to = ?state,
                generation = self.generation,
                "Run state changed"
            );
            self.state = state;
        }
    }

    /// Change the pacing delay by `delta` milliseconds, never going below the floor
    pub fn adjust_delay(&mut self, delta: i64) -> u64 {
        let adjusted = if delta.is_negative() {
            self.delay_ms.saturating_sub(delta.unsigned_abs())
        } else {
            self.delay_ms.saturating_add(delta.unsigned_abs())
        };
        self.delay_ms = adjusted.max(self.config.min_delay_ms);

        debug!(delay_ms = self.delay_ms, "Adjusted delay");
        self.delay_ms
    }

    /// Shorten the delay by one configured step
    pub fn speed_up(&mut self) -> u64 {
        let step = i64::try_from(self.config.delay_step_ms).unwrap_or(i64::MAX);
        self.adjust_delay(-step)
    }

    /// Lengthen the delay by one configured step
    pub fn slow_down(&mut self) -> u64 {
        let step = i64::try_from(self.config.delay_step_ms).unwrap_or(i64::MAX);
        self.adjust_delay(step)
    }
}
