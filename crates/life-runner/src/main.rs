//! Headless driver: runs a Game of Life session on a fixed tick cadence and
//! takes control commands from stdin.

mod commands;
mod telemetry;

use anyhow::{Context, Result};
use commands::Command;
use life_core::{RunnerConfig, StepReport};
use life_engine::Session;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(path) => RunnerConfig::from_json_file(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => RunnerConfig::default(),
    };

    telemetry::init_telemetry(config.json_logs)?;

    let mut session = Session::from_config(&config)?;
    info!(
        session_id = %session.id(),
        size = session.size(),
        tick_interval_ms = config.tick_interval_ms,
        running = session.is_running(),
        "Starting Game of Life runner"
    );
    if config.render {
        print!("{}", session.grid());
    }

    let (tx, rx) = mpsc::channel(32);
    tokio::spawn(read_commands(tx));

    let reason = run(&mut session, &config, rx).await;

    info!(
        session_id = %session.id(),
        reason = ?reason,
        generation = session.generation(),
        population = session.grid().population(),
        "Runner finished"
    );
    Ok(())
}

/// Why the tick loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    Quit,
    GenerationLimit,
    InputClosed,
    Signal,
}

fn generation_limit_reached(config: &RunnerConfig, report: &StepReport) -> bool {
    config.max_generations.is_some_and(|max| report.generation >= max)
}

/// Tick loop. The session is owned here, so a step always finishes before
/// the next command or tick is handled.
async fn run(
    session: &mut Session,
    config: &RunnerConfig,
    mut rx: mpsc::Receiver<Command>,
) -> StopReason {
    // First step happens one full interval after start, not immediately.
    let period = Duration::from_millis(config.tick_interval_ms);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut input_open = true;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(report) = session.tick() {
                    if config.render {
                        println!(
                            "generation {} ({} alive, {} changed)",
                            report.generation,
                            report.population,
                            report.changed()
                        );
                        print!("{}", session.grid());
                    }
                    if report.is_terminal() {
                        if let Some(message) = session.message() {
                            println!("{}", message);
                        }
                    }
                    if generation_limit_reached(config, &report) {
                        info!(generation = report.generation, "Generation limit reached");
                        return StopReason::GenerationLimit;
                    }
                }
            }
            command = rx.recv(), if input_open => {
                match command {
                    Some(command) => {
                        if !commands::apply(session, command) {
                            return StopReason::Quit;
                        }
                    }
                    None => input_open = false,
                }
            }
            _ = &mut shutdown => return StopReason::Signal,
        }

        if !input_open && !session.is_running() {
            info!("Input closed and session idle");
            return StopReason::InputClosed;
        }
    }
}

async fn read_commands(tx: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => {
                        if tx.send(command).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => warn!("{}; type 'help' for commands", e),
                }
            }
            Ok(None) => return,
            Err(e) => {
                warn!("Failed to read stdin: {}", e);
                return;
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
