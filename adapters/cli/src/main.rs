#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that pilots an Abyssal expedition from the terminal.

mod assistant;
mod clock;
mod config;
mod hud;
mod input;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::Instant,
};

use abyssal_core::{Command, Event, WELCOME_BANNER};
use abyssal_session::{apply, dispatch, query, Session};
use abyssal_system_missions::MissionCatalog;
use abyssal_world::{load_world, WorldStats};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    assistant::ConsoleAssistant,
    clock::{RealTimeClock, IDLE_POLL},
    config::Settings,
    input::{Input, HELP},
};

/// Pilot a submersible across an abyssal ocean grid.
#[derive(Debug, Parser)]
#[command(name = "abyssal", version)]
struct Args {
    /// Directory holding metadata.json and the cell data tables.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    /// Mission catalog in TOML; the built-in missions are used when absent.
    #[arg(long)]
    missions: Option<PathBuf>,
    /// Settings file in TOML.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed of the biome fact generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Probability of sharing a biome fact after each move.
    #[arg(long)]
    fact_chance: Option<f64>,
    /// Only advance time through explicit `wait` commands; otherwise the
    /// wall clock ticks once per second, even while no command is typed.
    #[arg(long)]
    manual_clock: bool,
}

/// Entry point for the Abyssal command-line interface.
fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "expedition_failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(chance) = args.fact_chance {
        settings.fact_chance = chance;
    }
    if let Some(missions) = &args.missions {
        settings.missions = Some(missions.clone());
    }
    settings.manual_clock |= args.manual_clock;
    Ok(settings)
}

fn run(args: &Args) -> Result<()> {
    let settings = settings(args)?;
    let world = load_world(&args.data_dir)
        .with_context(|| format!("failed to load world from {}", args.data_dir.display()))?;
    let catalog = match &settings.missions {
        Some(path) => MissionCatalog::load(path)
            .with_context(|| format!("failed to load missions from {}", path.display()))?,
        None => MissionCatalog::standard(),
    };

    let stats = WorldStats::compute(&world.grid);
    let summary = hud::world_summary(&world, &stats);
    let mut session = Session::new(world.grid, catalog, settings.session_config())
        .context("failed to start session")?;

    println!("{WELCOME_BANNER}");
    print_lines(summary);
    println!("{HELP}");
    print_lines(hud::status(&session));

    let mut assistant = ConsoleAssistant::new(io::stdout());
    let mut clock = (!settings.manual_clock)
        .then(|| RealTimeClock::starting_at(Instant::now()));
    let mut events = Vec::new();
    let commands = spawn_reader()?;

    loop {
        let received = match clock {
            Some(_) => commands.recv_timeout(IDLE_POLL),
            None => commands.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        events.clear();

        let elapsed = clock
            .as_mut()
            .and_then(|clock| clock.take_elapsed(Instant::now()));
        if let Some(dt) = elapsed {
            apply(&mut session, Command::Tick { dt }, &mut events);
        }

        let line = match received {
            Ok(line) => line.context("failed to read command")?,
            Err(RecvTimeoutError::Timeout) => {
                report(&session, &events, &mut assistant);
                continue;
            }
            Err(RecvTimeoutError::Disconnected) => {
                report(&session, &events, &mut assistant);
                break;
            }
        };

        let mut quit = false;
        match input::parse(&line) {
            Ok(Input::Session(command)) => apply(&mut session, command, &mut events),
            Ok(Input::ListMissions) => print_lines(hud::missions(query::catalog(&session))),
            Ok(Input::Status) => print_lines(hud::status(&session)),
            Ok(Input::Help) => println!("{HELP}"),
            Ok(Input::Quit) => quit = true,
            Ok(Input::Nothing) => {}
            Err(err) => {
                warn!(input = line.trim(), "input_rejected");
                println!("{err}");
            }
        }

        report(&session, &events, &mut assistant);
        if quit {
            break;
        }
    }

    info!(
        elapsed_secs = query::clock(&session).as_secs(),
        "expedition_ended"
    );
    io::stdout().flush().context("failed to flush output")?;
    Ok(())
}

/// Reads stdin on its own thread so real-time ticks keep running while idle.
fn spawn_reader() -> Result<Receiver<io::Result<String>>> {
    let (sender, receiver) = mpsc::channel();
    let _reader = thread::Builder::new()
        .name("stdin".to_owned())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                if sender.send(line).is_err() {
                    break;
                }
            }
        })
        .context("failed to start input reader")?;
    Ok(receiver)
}

fn report<W: Write>(session: &Session, events: &[Event], assistant: &mut ConsoleAssistant<W>) {
    dispatch(session, events, assistant);
    for event in events {
        match event {
            Event::PlayerMoved { .. } => print_lines(hud::status(session)),
            Event::MoveRejected { .. } => {
                println!("The submersible cannot leave the survey area.");
            }
            Event::CellInspected { cell } => {
                if let Some(details) = query::grid(session).cell(*cell) {
                    print_lines(hud::inspect(*cell, details));
                }
            }
            _ => {}
        }
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
