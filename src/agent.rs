//! The playing agent.
//!
//! An [`Agent`] owns the authoritative board for one game. Each turn it is
//! told the opponent's last move, replies with its own, and keeps the board
//! in step with both.

use log::{info, warn};

use crate::board::{Board, Move, Side};
use crate::constants::NO_TIME_LIMIT;
use crate::search::{SearchConfig, best_move};

/// Agent state for a single game.
pub struct Agent {
    side: Side,
    board: Board,
    config: SearchConfig,
}

impl Agent {
    /// Create a full-strength agent playing `side` from the standard opening.
    pub fn new(side: Side) -> Self {
        Self::with_config(side, SearchConfig::default())
    }

    pub fn with_config(side: Side, config: SearchConfig) -> Self {
        Self {
            side,
            board: Board::new(),
            config,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The authoritative board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access to the authoritative board, e.g. to
    /// [`Board::reset`] it to a test position.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Apply the opponent's last move, then choose, apply and return our
    /// own. `Move::Pass` as input means the opponent passed or this is the
    /// first turn; as output it means we have no legal move.
    ///
    /// `ms_left` is the remaining time budget ([`NO_TIME_LIMIT`] for none).
    /// It is logged but does not influence the search.
    pub fn choose_move(&mut self, opponent_move: Move, ms_left: i32) -> Move {
        let opponent = self.side.opponent();
        if !self.board.apply_move(opponent_move, opponent) && opponent_move != Move::Pass {
            warn!("ignoring illegal {opponent} move {opponent_move}");
        }

        let budget = if ms_left == NO_TIME_LIMIT {
            "unlimited".to_string()
        } else {
            format!("{ms_left}ms")
        };
        info!(
            "{} to move after {opponent} {opponent_move}, time left {budget}",
            self.side
        );

        let Some(choice) = best_move(&self.board, self.side, &self.config) else {
            info!("{} has no legal move, passing", self.side);
            return Move::Pass;
        };

        let mv = Move::from(choice.coord);
        self.board.apply_move(mv, self.side);
        info!("{} plays {mv} (score {})", self.side, choice.score);
        mv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;

    #[test]
    fn test_first_move_as_dark() {
        let mut agent = Agent::with_config(Side::Dark, SearchConfig::testing());
        assert_eq!(agent.config(), &SearchConfig::testing());
        assert_eq!(agent.side(), Side::Dark);
        let mv = agent.choose_move(Move::Pass, NO_TIME_LIMIT);

        let Move::Place(at) = mv else {
            panic!("dark always has a move at the opening");
        };
        assert!(Board::new().is_legal(mv, Side::Dark));
        assert_eq!(agent.board().state_at(at), crate::board::Cell::Dark);
        assert_eq!(agent.board().stones(Side::Dark), 4);
    }

    #[test]
    fn test_reply_as_light_applies_both_moves() {
        let mut agent = Agent::with_config(Side::Light, SearchConfig::testing());
        let opening = Move::Place(Coord::new(3, 2).unwrap());
        let reply = agent.choose_move(opening, 30_000);

        let mut expected = Board::new();
        assert!(expected.apply_move(opening, Side::Dark));
        assert!(expected.is_legal(reply, Side::Light));
        assert!(expected.apply_move(reply, Side::Light));
        assert_eq!(agent.board(), &expected);
    }
}
