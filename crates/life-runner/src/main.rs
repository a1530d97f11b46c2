//! Headless terminal front-end for the Game of Life engine.

mod cli;
mod command;
mod controller;
mod render;
mod telemetry;

use anyhow::{anyhow, Result};
use clap::Parser;
use command::Command;
use controller::Outcome;
use life_core::RunnerConfig;
use life_world::{patterns, Simulation};
use std::io::{BufRead, Write};
use tokio::signal;
use tokio::sync::mpsc;
use tokio::time::{self, Duration, Instant};
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = cli.runner_config()?;

    // Initialize telemetry
    telemetry::init_telemetry(config.otel_endpoint.as_deref())?;

    info!(
        width = config.engine.grid.width,
        height = config.engine.grid.height,
        seed = config.engine.seed,
        delay_ms = config.engine.initial_delay_ms,
        "Starting Life runner"
    );

    let mut sim = Simulation::new(config.engine.clone())?;

    if let Some(name) = &cli.pattern {
        let pattern = patterns::find(name).ok_or_else(|| anyhow!("unknown pattern '{}'", name))?;
        sim.load_pattern(pattern, controller::centered(sim.grid(), pattern))?;
    } else if cli.random {
        sim.random_fill();
    }
    sim.set_running(config.start_running);

    let (tx, rx) = mpsc::channel(32);
    spawn_input_reader(tx);

    let result = run(&mut sim, &config, rx).await;

    info!(
        generation = sim.generation(),
        population = sim.population(),
        "Runner stopped"
    );

    // Shutdown telemetry
    telemetry::shutdown_telemetry();

    result
}

/// Drive the engine until quit, shutdown, input exhaustion while paused, or the generation limit
async fn run(
    sim: &mut Simulation,
    config: &RunnerConfig,
    mut commands: mpsc::Receiver<Command>,
) -> Result<()> {
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut input_open = true;
    let mut next_step = Instant::now();
    let mut was_running = sim.is_running();

    present(sim, config)?;

    loop {
        if reached_limit(sim, config) {
            info!(generation = sim.generation(), "Generation limit reached");
            break;
        }
        if !input_open && !sim.is_running() {
            info!("Input closed while paused");
            break;
        }

        tokio::select! {
            _ = &mut shutdown => break,
            command = commands.recv(), if input_open => match command {
                Some(command) => match controller::apply(sim, config, command) {
                    Outcome::Quit => break,
                    Outcome::Changed => present(sim, config)?,
                    Outcome::Unchanged => {}
                },
                None => input_open = false,
            },
            _ = time::sleep_until(next_step), if sim.is_running() => {
                controller::advance(sim, config);
                next_step = Instant::now() + Duration::from_millis(sim.delay());
                present(sim, config)?;
            }
        }

        if sim.is_running() && !was_running {
            next_step = Instant::now();
        }
        was_running = sim.is_running();
    }

    Ok(())
}

fn reached_limit(sim: &Simulation, config: &RunnerConfig) -> bool {
    config
        .max_generations
        .is_some_and(|limit| sim.generation() >= limit)
}

fn present(sim: &Simulation, config: &RunnerConfig) -> Result<()> {
    if !config.render {
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", render::caption(sim.generation()))?;
    write!(out, "{}", render::frame(sim))?;
    out.flush()?;
    Ok(())
}

/// Read commands on a plain thread so a pending stdin read never holds up runtime shutdown
fn spawn_input_reader(tx: mpsc::Sender<Command>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!("Failed to read stdin: {}", e);
                    break;
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(command) => {
                    if tx.blocking_send(command).is_err() {
                        break;
                    }
                }
                Err(e) => warn!("Ignoring input {:?}: {}", line, e),
            }
        }
        debug!("Input reader finished");
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_core::{EngineConfig, GridConfig, Position};
    use tokio::time::timeout;

    fn headless(max_generations: Option<u64>) -> RunnerConfig {
        RunnerConfig {
            engine: EngineConfig {
                grid: GridConfig {
                    width: 8,
                    height: 8,
                },
                initial_delay_ms: 0,
                ..Default::default()
            },
            max_generations,
            render: false,
            pause_on_cycle: false,
            ..Default::default()
        }
    }

    async fn drive(
        sim: &mut Simulation,
        config: &RunnerConfig,
        commands: mpsc::Receiver<Command>,
    ) -> Result<()> {
        timeout(Duration::from_secs(5), run(sim, config, commands)).await?
    }

    #[tokio::test]
    async fn test_stops_at_generation_limit() {
        let config = headless(Some(7));
        let mut sim = Simulation::new(config.engine.clone()).unwrap();
        sim.set_running(true);

        let (_tx, rx) = mpsc::channel(4);
        drive(&mut sim, &config, rx).await.unwrap();
        assert_eq!(sim.generation(), 7);
    }

    #[tokio::test]
    async fn test_returns_when_input_closes_while_editing() {
        let config = headless(None);
        let mut sim = Simulation::new(config.engine.clone()).unwrap();

        let (tx, rx) = mpsc::channel(4);
        drop(tx);
        drive(&mut sim, &config, rx).await.unwrap();
        assert_eq!(sim.generation(), 0);
        assert!(!sim.is_running());
    }

    #[tokio::test]
    async fn test_commands_then_quit() {
        let config = headless(None);
        let mut sim = Simulation::new(config.engine.clone()).unwrap();

        let (tx, rx) = mpsc::channel(4);
        tx.send(Command::Toggle(Position::new(3, 3))).await.unwrap();
        tx.send(Command::Step).await.unwrap();
        tx.send(Command::Quit).await.unwrap();
        drive(&mut sim, &config, rx).await.unwrap();

        assert_eq!(sim.generation(), 1);
        assert_eq!(sim.population(), 0);
    }

    #[tokio::test]
    async fn test_resumes_pacing_after_start() {
        let config = headless(Some(5));
        let mut sim = Simulation::new(config.engine.clone()).unwrap();

        let (tx, rx) = mpsc::channel(4);
        tx.send(Command::StartStop).await.unwrap();
        drive(&mut sim, &config, rx).await.unwrap();

        assert_eq!(sim.generation(), 5);
        assert!(sim.is_running());
    }

    #[tokio::test]
    async fn test_cycle_pause_ends_run_without_input() {
        let config = RunnerConfig {
            pause_on_cycle: true,
            ..headless(None)
        };
        let mut sim = Simulation::new(config.engine.clone()).unwrap();
        let blinker = patterns::find("blinker").unwrap();
        sim.load_pattern(blinker, Position::new(3, 2)).unwrap();
        sim.set_running(true);

        let (tx, rx) = mpsc::channel(4);
        drop(tx);
        drive(&mut sim, &config, rx).await.unwrap();

        assert_eq!(sim.generation(), 2);
        assert!(!sim.is_running());
    }
}
