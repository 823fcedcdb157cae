//! Line protocol between the agent and a game controller.
//!
//! The controller starts the engine for one side and waits for the
//! `Init done` handshake. After that, every turn is one line each way:
//!
//! - Input: `<col> <row> <ms_left>`, the opponent's last move and the time
//!   left for this player. A negative coordinate means the opponent passed
//!   (or this is the first turn). `ms_left` of `-1` means no limit.
//! - Output: `<col> <row>` of our move, or `-1 -1` to pass.
//!
//! Output is flushed after every line so the controller can read it
//! synchronously.
//!
//! ## Example
//!
//! ```
//! use std::io::Cursor;
//! use othello_minimax::agent::Agent;
//! use othello_minimax::board::Side;
//! use othello_minimax::protocol::Session;
//! use othello_minimax::search::SearchConfig;
//!
//! let agent = Agent::with_config(Side::Dark, SearchConfig::testing());
//! let mut out = Vec::new();
//! Session::new(agent).run(Cursor::new("-1 -1 -1\n"), &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("Init done\n"));
//! ```

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use log::debug;

use crate::agent::Agent;
use crate::board::{Coord, Move};
use crate::constants::{INIT_DONE, PASS_COORD};

/// One parsed input line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    /// Opponent's last move
    pub opponent_move: Move,
    /// Time left in milliseconds
    pub ms_left: i32,
}

/// Protocol session state.
pub struct Session {
    agent: Agent,
}

impl Session {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Run the protocol loop until end of input.
    ///
    /// A malformed line ends the session with an error.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "{INIT_DONE}").context("failed to write handshake")?;
        output.flush().context("failed to flush handshake")?;

        for (i, line) in input.lines().enumerate() {
            let line = line.context("failed to read turn")?;

            // Skip empty lines
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let turn = parse_turn(line).with_context(|| format!("bad turn on line {}", i + 1))?;
            debug!("turn {}: {turn:?}", i + 1);

            let reply = self.agent.choose_move(turn.opponent_move, turn.ms_left);

            writeln!(output, "{}", format_move(reply)).context("failed to write move")?;
            output.flush().context("failed to flush move")?;
        }

        Ok(())
    }
}

/// Parse `<col> <row> <ms_left>`.
pub fn parse_turn(line: &str) -> Result<Turn> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [col, row, ms_left] = fields.as_slice() else {
        bail!("expected `<col> <row> <ms_left>`, got {line:?}");
    };

    let col: i32 = col.parse().with_context(|| format!("invalid column {col:?}"))?;
    let row: i32 = row.parse().with_context(|| format!("invalid row {row:?}"))?;
    let ms_left: i32 = ms_left
        .parse()
        .with_context(|| format!("invalid time budget {ms_left:?}"))?;

    let opponent_move = Move::from(if col < 0 || row < 0 {
        None
    } else {
        Some(Coord::new(col, row)?)
    });

    Ok(Turn {
        opponent_move,
        ms_left,
    })
}

/// Format a move as `<col> <row>`, with `-1 -1` for a pass.
pub fn format_move(mv: Move) -> String {
    match mv.coord() {
        Some(at) => format!("{} {}", at.col(), at.row()),
        None => format!("{PASS_COORD} {PASS_COORD}"),
    }
}
