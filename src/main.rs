//! Othello-Minimax: a fixed-depth Othello agent.
//!
//! ## Usage
//!
//! - `othello-minimax` - Show a demo
//! - `othello-minimax play <SIDE>` - Play one side over stdin/stdout
//! - `othello-minimax demo` - Play a game against a random opponent
//!
//! Logs go to stderr; set `RUST_LOG` or pass `--verbose` to see them.

use std::io;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::info;

use othello_minimax::agent::Agent;
use othello_minimax::board::{Cell, Side};
use othello_minimax::eval::Scoring;
use othello_minimax::playout::play_vs_random;
use othello_minimax::protocol::Session;
use othello_minimax::search::SearchConfig;

/// Othello-Minimax: a fixed-depth Othello minimax agent
#[derive(Parser)]
#[command(name = "othello-minimax")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one side using the line protocol on stdin/stdout
    Play {
        /// Side to play: dark (black) or light (white)
        side: Side,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Play a game against a random opponent
    Demo {
        /// Side the agent plays
        #[arg(long, default_value = "dark")]
        side: Side,
        /// Seed for the random opponent
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Use the shallow testing preset (depth 2, material scoring)
    #[arg(long)]
    testing: bool,
    /// Search depth in plies
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    depth: Option<u32>,
    /// Leaf evaluation: material or positional
    #[arg(long)]
    scoring: Option<Scoring>,
    /// Split root moves across this many worker groups
    #[arg(long, default_value_t = 1)]
    workers: usize,
}

impl SearchArgs {
    fn config(&self) -> SearchConfig {
        let mut config = if self.testing {
            SearchConfig::testing()
        } else {
            SearchConfig::full_strength()
        };
        if let Some(depth) = self.depth {
            config = config.with_depth(depth);
        }
        if let Some(scoring) = self.scoring {
            config = config.with_scoring(scoring);
        }
        config.with_workers(self.workers)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Some(Commands::Play { side, search }) => {
            let agent = Agent::with_config(side, search.config());
            info!("playing {side} with {:?}", agent.config());
            let mut session = Session::new(agent);
            session.run(io::stdin().lock(), io::stdout().lock())
        }
        Some(Commands::Demo { side, seed, search }) => {
            run_demo(side, seed, search.config());
            Ok(())
        }
        None => {
            run_demo(Side::Dark, None, SearchConfig::testing());
            Ok(())
        }
    }
}

fn run_demo(side: Side, seed: Option<u64>, config: SearchConfig) {
    println!("Othello-Minimax: fixed-depth minimax agent\n");

    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let mut agent = Agent::with_config(side, config);

    println!(
        "Agent plays {side} (depth {}, {} scoring) against a random opponent...",
        config.depth, config.scoring
    );
    let record = play_vs_random(&mut agent, &mut rng);

    println!("\n{}", record.board);
    println!(
        "Dark {}  Light {}  Empty {}  ({} moves)",
        record.board.stones(Side::Dark),
        record.board.stones(Side::Light),
        record.board.count(Cell::Empty),
        record.moves.len()
    );
    match record.winner() {
        Some(winner) if winner == side => println!("Agent ({winner}) wins"),
        Some(winner) => println!("Random opponent ({winner}) wins"),
        None => println!("Draw"),
    }
}
