//! Othello-Minimax: a fixed-depth Othello (Reversi) playing agent.
//!
//! This crate provides an 8x8 Othello board model and a depth-limited
//! minimax search with material or positional evaluation. An agent driven
//! turn by turn over a simple line protocol keeps its own copy of the game.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, search depths and weight table
//! - [`board`] - Core game logic (cells, legality, captures, move application)
//! - [`eval`] - Static evaluation (material and positional scoring)
//! - [`search`] - Minimax search and root move selection
//! - [`agent`] - Per-game agent owning the authoritative board
//! - [`protocol`] - Line protocol for game controllers
//! - [`playout`] - Random opponent and self-play games
//!
//! ## Example
//!
//! ```
//! use othello_minimax::agent::Agent;
//! use othello_minimax::board::{Move, Side};
//! use othello_minimax::search::SearchConfig;
//!
//! // Play the first move of a game as dark
//! let mut agent = Agent::with_config(Side::Dark, SearchConfig::testing());
//! let mv = agent.choose_move(Move::Pass, -1);
//! assert_ne!(mv, Move::Pass);
//! println!("{}", agent.board());
//! ```

pub mod agent;
pub mod board;
pub mod constants;
pub mod eval;
pub mod playout;
pub mod protocol;
pub mod search;
