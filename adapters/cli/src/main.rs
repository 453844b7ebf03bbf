#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line driver that plays and replays Dead Grid games.

mod config;
mod transfer;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use dead_grid_board::{self as board, query, Board};
use dead_grid_core::Action;
use dead_grid_system_replay::GameRecord;
use dead_grid_system_spawning::{Config as SpawningConfig, Spawning};
use dead_grid_system_turn::{StepOutcome, TurnEngine};
use log::info;

use crate::config::Settings;

/// Turn-based zombie survival on a grid.
#[derive(Debug, Parser)]
#[command(name = "dead-grid", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plays a game from a starting grid until it ends or the turn budget runs out.
    Run(RunArgs),
    /// Rebuilds a board from a recorded game and prints it.
    Replay(ReplayArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// JSON file holding the starting grid as an array of rows of cell tokens.
    grid: PathBuf,
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum number of turns to play.
    #[arg(long)]
    max_turns: Option<u32>,
    /// Seed for spawn locations.
    #[arg(long)]
    seed: Option<u64>,
    /// Turns between zombie spawns; zero disables spawning.
    #[arg(long)]
    spawn_interval: Option<u32>,
    /// Print the board after every turn.
    #[arg(long)]
    verbose_turns: bool,
    /// Print a transfer string for the finished game.
    #[arg(long)]
    export: bool,
}

#[derive(Debug, Args)]
struct ReplayArgs {
    /// Transfer string produced by `run --export`.
    #[arg(long, conflicts_with_all = ["grid", "actions"])]
    record: Option<String>,
    /// JSON file holding the starting grid.
    #[arg(long, requires = "actions")]
    grid: Option<PathBuf>,
    /// JSON file holding the recorded actions.
    #[arg(long, requires = "grid")]
    actions: Option<PathBuf>,
    /// TOML configuration file supplying the rules the game was played with.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Outcome of a game played by [`play`].
#[derive(Debug)]
struct Report {
    board: Board,
    actions: Vec<Action>,
    turns: u32,
}

/// Entry point for the Dead Grid command-line interface.
fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Run(args) => run(args),
        Command::Replay(args) => replay(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let mut settings = load_settings(args.config.as_ref())?;
    if let Some(max_turns) = args.max_turns {
        settings.max_turns = max_turns;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(interval) = args.spawn_interval {
        settings.spawn_interval = interval;
    }

    let grid = read_grid(&args.grid)?;
    let board = Board::with_config(grid.as_slice(), settings.rules)
        .context("starting grid is invalid")?;
    info!(
        "starting a {:?} game on a {}x{} board",
        board.mode(),
        board.width(),
        board.height()
    );

    let verbose = args.verbose_turns;
    let report = play(board, &settings, |turn, board| {
        if verbose {
            println!("turn {turn}");
            print_board(board);
        }
    })?;

    print_board(&report.board);
    println!("{}", describe(&report.board, report.turns));

    if args.export {
        let record = GameRecord::new(grid, report.actions);
        println!("{}", transfer::encode(&record)?);
    }
    Ok(())
}

fn replay(args: ReplayArgs) -> Result<()> {
    let settings = load_settings(args.config.as_ref())?;
    let record = match (args.record, args.grid, args.actions) {
        (Some(record), _, _) => transfer::decode(&record).context("invalid transfer string")?,
        (None, Some(grid_path), Some(actions_path)) => {
            let contents = fs::read_to_string(&actions_path).with_context(|| {
                format!("failed to read actions at {}", actions_path.display())
            })?;
            let actions: Vec<Action> = serde_json::from_str(&contents).with_context(|| {
                format!("failed to parse actions at {}", actions_path.display())
            })?;
            GameRecord::new(read_grid(&grid_path)?, actions)
        }
        _ => bail!("provide either --record or both --grid and --actions"),
    };

    let board = record
        .replay(settings.rules)
        .context("recorded game does not replay")?;
    print_board(&board);
    println!("{} actions replayed", record.actions.len());
    Ok(())
}

/// Plays until the game ends or `settings.max_turns` turns have been played.
///
/// Spawns are applied before the turn they belong to, so a board that starts
/// without zombies gets one before the first finish check.
fn play(
    mut board: Board,
    settings: &Settings,
    mut on_turn: impl FnMut(u32, &Board),
) -> Result<Report> {
    let mut engine = TurnEngine::new();
    let mut spawning = Spawning::seeded(SpawningConfig::new(
        settings.spawn_interval,
        settings.seed,
    ));
    let mut actions = Vec::new();

    while engine.turns() < settings.max_turns {
        let mut spawns = Vec::new();
        spawning.handle(
            engine.turns(),
            &query::spawn_candidates(&board),
            &mut spawns,
        );
        for spawn in spawns {
            board::apply(&mut board, &spawn, engine.pathfinder_mut())
                .with_context(|| format!("spawn {spawn:?} was rejected"))?;
            actions.push(spawn);
        }

        match engine
            .step(&mut board, &mut actions)
            .with_context(|| format!("turn {} failed", engine.turns() + 1))?
        {
            StepOutcome::Idle => break,
            StepOutcome::Advanced { finished } => {
                on_turn(engine.turns(), &board);
                if finished {
                    break;
                }
            }
        }
    }

    info!(
        "game stopped after {} turns with {} actions",
        engine.turns(),
        actions.len()
    );
    Ok(Report {
        board,
        actions,
        turns: engine.turns(),
    })
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load(path),
        None => Ok(Settings::default()),
    }
}

fn read_grid(path: &Path) -> Result<Vec<Vec<String>>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read grid at {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse grid at {}", path.display()))
}

fn print_board(board: &Board) {
    for row in query::state(board) {
        println!("|{}|", row.concat());
    }
}

fn describe(board: &Board, turns: u32) -> String {
    if board.is_won() {
        format!("players survived after {turns} turns")
    } else if board.finished() {
        format!("all players fell after {turns} turns")
    } else {
        format!("undecided after {turns} turns")
    }
}
