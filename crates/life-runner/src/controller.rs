//! Applies user commands and paced steps to the engine.

use crate::command::Command;
use crate::render;
use life_core::{Position, RunnerConfig};
use life_world::{patterns, Grid, Pattern, Simulation, StepReport};
use tracing::{event, info, warn, Level};

/// What the loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Grid or caption changed; redraw
    Changed,
    Unchanged,
    Quit,
}

/// Top-left corner that centers `pattern` on `grid`
pub fn centered(grid: &Grid, pattern: &Pattern) -> Position {
    Position::new(
        ((grid.height() - pattern.height()) / 2).max(0),
        ((grid.width() - pattern.width()) / 2).max(0),
    )
}

pub fn apply(sim: &mut Simulation, config: &RunnerConfig, command: Command) -> Outcome {
    if sim.is_running() && command.is_edit() {
        warn!(?command, "Ignored while the simulation is running; pause with 's' first");
        return Outcome::Unchanged;
    }

    match command {
        Command::Quit => Outcome::Quit,
        Command::StartStop => {
            sim.set_running(!sim.is_running());
            Outcome::Changed
        }
        Command::Step => {
            advance(sim, config);
            Outcome::Changed
        }
        Command::Faster => {
            let delay_ms = sim.speed_up();
            info!(delay_ms, "Delay");
            Outcome::Unchanged
        }
        Command::Slower => {
            let delay_ms = sim.slow_down();
            info!(delay_ms, "Delay");
            Outcome::Unchanged
        }
        Command::Clear => {
            sim.clear();
            Outcome::Changed
        }
        Command::Randomize => {
            sim.clear();
            sim.random_fill();
            Outcome::Changed
        }
        Command::Toggle(pos) => toggle(sim, pos),
        Command::Click { x, y } => toggle(sim, render::cell_at(x, y, config.cell_size)),
        Command::Pattern { name, origin } => {
            let Some(pattern) = patterns::find(&name) else {
                warn!(name = %name, "Unknown pattern; 'l' lists the available ones");
                return Outcome::Unchanged;
            };
            let origin = origin.unwrap_or_else(|| centered(sim.grid(), pattern));
            match sim.load_pattern(pattern, origin) {
                Ok(()) => Outcome::Changed,
                Err(e) => {
                    warn!("Cannot place {}: {}", pattern.name, e);
                    Outcome::Unchanged
                }
            }
        }
        Command::ListPatterns => {
            for pattern in patterns::PATTERNS {
                println!("{} ({}x{})", pattern.name, pattern.height(), pattern.width());
            }
            Outcome::Unchanged
        }
    }
}

fn toggle(sim: &mut Simulation, pos: Position) -> Outcome {
    match sim.toggle_cell(pos) {
        Ok(_) => Outcome::Changed,
        Err(e) => {
            warn!("Cannot toggle cell: {}", e);
            Outcome::Unchanged
        }
    }
}

/// Advance one generation, emitting periodic metrics and pausing on a detected cycle
pub fn advance(sim: &mut Simulation, config: &RunnerConfig) -> StepReport {
    let report = sim.step();

    if config.report_interval > 0 && report.generation % config.report_interval == 0 {
        info!(
            event = "population_metrics",
            generation = report.generation,
            population = report.population,
            births = report.births,
            deaths = report.deaths,
            delay_ms = sim.delay(),
            "Population snapshot"
        );

        event!(
            Level::INFO,
            gauge_name = "population_total",
            gauge_value = report.population,
            generation = report.generation,
            "Population gauge"
        );
    }

    if config.pause_on_cycle && sim.is_running() {
        if let Some(period) = report.cycle_period {
            info!(
                generation = report.generation,
                period,
                population = report.population,
                "Grid settled into a cycle, pausing"
            );
            sim.set_running(false);
        }
    }

    report
}
