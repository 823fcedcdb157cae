//! Random-move opponent and self-play games.
//!
//! A playout pits an [`Agent`] against an opponent that picks uniformly
//! among its legal moves. The driver keeps its own copy of the board and
//! reports each opponent move to the agent on the agent's next turn, the
//! same way a game controller would.

use fastrand::Rng;

use crate::agent::Agent;
use crate::board::{Board, Move, Side};
use crate::constants::NO_TIME_LIMIT;

/// A legal move for `side` picked uniformly at random, or a pass.
pub fn random_move(board: &Board, side: Side, rng: &mut Rng) -> Move {
    let moves = board.legal_moves(side);
    if moves.is_empty() {
        Move::Pass
    } else {
        Move::Place(moves[rng.usize(..moves.len())])
    }
}

/// A finished game.
pub struct GameRecord {
    /// Final position
    pub board: Board,
    /// Every move in order, passes included
    pub moves: Vec<(Side, Move)>,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Side> {
        self.board.winner()
    }
}

/// Play one game between `agent` and a random opponent, starting from the
/// agent's current board with dark to move. The game ends after two
/// consecutive passes.
pub fn play_vs_random(agent: &mut Agent, rng: &mut Rng) -> GameRecord {
    let mut board = agent.board().clone();
    let mut moves = Vec::new();
    let mut to_move = Side::Dark;
    let mut unreported = Move::Pass;
    let mut passes = 0;

    while passes < 2 {
        let mv = if to_move == agent.side() {
            agent.choose_move(unreported, NO_TIME_LIMIT)
        } else {
            let mv = random_move(&board, to_move, rng);
            unreported = mv;
            mv
        };
        board.apply_move(mv, to_move);

        passes = if mv == Move::Pass { passes + 1 } else { 0 };
        moves.push((to_move, mv));
        to_move = to_move.opponent();
    }

    GameRecord { board, moves }
}
