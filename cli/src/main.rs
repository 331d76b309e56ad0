use std::str::FromStr;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use minefield_core as game;
use serde::Serialize;

mod render;

#[derive(Copy, Clone, Debug, PartialEq, ValueEnum)]
enum Preset {
    Easy,
    Normal,
    Hard,
}

impl From<Preset> for game::Difficulty {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Easy => Self::Easy,
            Preset::Normal => Self::Normal,
            Preset::Hard => Self::Hard,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Move {
    Reveal(game::CellIndex),
    Flag(game::CellIndex),
}

impl FromStr for Move {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, index) = s
            .split_once(':')
            .ok_or_else(|| format!("expected r:<index> or f:<index>, got {s:?}"))?;
        let index = index
            .parse()
            .map_err(|err| format!("bad cell index {index:?}: {err}"))?;
        match kind {
            "r" => Ok(Self::Reveal(index)),
            "f" => Ok(Self::Flag(index)),
            _ => Err(format!("unknown move kind {kind:?}, use r or f")),
        }
    }
}

/// Plays a list of moves on a fresh minefield and prints the result.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset
    #[arg(short, long, value_enum, default_value_t = Preset::Normal)]
    difficulty: Preset,

    /// Custom board width, overrides the preset
    #[arg(long, requires_all = ["height", "mines"])]
    width: Option<game::Coord>,

    /// Custom board height
    #[arg(long, requires_all = ["width", "mines"])]
    height: Option<game::Coord>,

    /// Custom mine count
    #[arg(long, requires_all = ["width", "height"])]
    mines: Option<game::CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Keep the first revealed cell and its neighbors free of mines
    #[arg(long)]
    safe_start: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Moves to play in order: r:<index> reveals, f:<index> cycles the flag
    moves: Vec<Move>,
}

impl Args {
    fn difficulty(&self) -> game::Difficulty {
        match (self.width, self.height, self.mines) {
            (Some(width), Some(height), Some(mines)) => game::Difficulty::Custom {
                width,
                height,
                mines,
            },
            _ => self.difficulty.into(),
        }
    }

    fn first_reveal(&self) -> Option<game::CellIndex> {
        self.moves.iter().find_map(|mv| match mv {
            Move::Reveal(index) => Some(*index),
            Move::Flag(_) => None,
        })
    }
}

#[derive(Serialize)]
struct Report {
    seed: u64,
    snapshot: game::Snapshot,
    triggered_mine: Option<game::CellIndex>,
    rows: Vec<String>,
}

fn build_board(args: &Args, seed: u64) -> anyhow::Result<game::Board> {
    let difficulty = args.difficulty();
    let config = difficulty
        .config()
        .with_context(|| format!("invalid board settings {difficulty:?}"))?;

    let mut generator = game::RandomMinefieldGenerator::new(seed);
    if args.safe_start {
        match args.first_reveal() {
            Some(start) => generator = generator.with_start(start, game::StartCell::AlwaysZero),
            None => log::warn!("--safe-start has no effect without a reveal move"),
        }
    }

    Ok(game::Board::new(config, generator)?)
}

fn play(board: &mut game::Board, moves: &[Move]) -> anyhow::Result<()> {
    for (n, mv) in moves.iter().enumerate() {
        if board.is_finished() {
            log::info!("Game already over, ignoring {} remaining move(s)", moves.len() - n);
            break;
        }
        match *mv {
            Move::Reveal(index) => {
                let outcome = board
                    .reveal(index)
                    .with_context(|| format!("move {}: reveal {index}", n + 1))?;
                if outcome.has_update() {
                    log::info!(
                        "reveal {index}: {outcome:?}, {} cell(s) opened",
                        outcome.revealed_count()
                    );
                } else {
                    log::debug!("reveal {index}: no change");
                }
            }
            Move::Flag(index) => {
                let visibility = board
                    .cycle_flag(index)
                    .with_context(|| format!("move {}: flag {index}", n + 1))?;
                log::info!("flag {index}: {visibility:?}");
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {seed}");

    let mut board = build_board(&args, seed)?;
    play(&mut board, &args.moves)?;

    let report = Report {
        seed,
        snapshot: board.snapshot(),
        triggered_mine: board.triggered_mine(),
        rows: render::rows(&board),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for row in &report.rows {
            println!("{row}");
        }
        println!("{}", render::summary(&report.snapshot, seed));
    }

    Ok(())
}
