//! Static evaluation of positions.
//!
//! Two interchangeable scoring modes are provided. Both are total and
//! deterministic, and both score from a fixed `perspective` side:
//! positive is good for `perspective`, negative is good for its opponent.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::{Board, Cell, Coord, Side};
use crate::constants::POSITIONAL_WEIGHTS;

/// How a frontier position is scored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scoring {
    /// Stone-count differential
    Material,
    /// Sum of [`POSITIONAL_WEIGHTS`] over owned cells, minus the opponent's
    #[default]
    Positional,
}

impl Scoring {
    /// Score `board` from `perspective`'s point of view.
    pub fn score(self, board: &Board, perspective: Side) -> i32 {
        match self {
            Scoring::Material => material(board, perspective),
            Scoring::Positional => positional(board, perspective),
        }
    }
}

fn material(board: &Board, perspective: Side) -> i32 {
    board.stones(perspective) as i32 - board.stones(perspective.opponent()) as i32
}

fn positional(board: &Board, perspective: Side) -> i32 {
    let own = Cell::from(perspective);
    let other = Cell::from(perspective.opponent());
    Coord::all()
        .map(|at| {
            let weight = POSITIONAL_WEIGHTS[at.row()][at.col()];
            match board.state_at(at) {
                c if c == own => weight,
                c if c == other => -weight,
                _ => 0,
            }
        })
        .sum()
}

/// Error returned when a scoring mode name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid scoring mode {0:?}: expected material or positional")]
pub struct ParseScoringError(String);

impl FromStr for Scoring {
    type Err = ParseScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "material" => Ok(Scoring::Material),
            "positional" | "heuristic" => Ok(Scoring::Positional),
            _ => Err(ParseScoringError(s.to_string())),
        }
    }
}

impl fmt::Display for Scoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scoring::Material => write!(f, "material"),
            Scoring::Positional => write!(f, "positional"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Move;

    #[test]
    fn test_opening_is_balanced() {
        let board = Board::new();
        for scoring in [Scoring::Material, Scoring::Positional] {
            assert_eq!(scoring.score(&board, Side::Dark), 0);
            assert_eq!(scoring.score(&board, Side::Light), 0);
        }
    }

    #[test]
    fn test_material_after_first_move() {
        let mut board = Board::new();
        board.apply_move(Move::Place(Coord::new(3, 2).unwrap()), Side::Dark);
        assert_eq!(Scoring::Material.score(&board, Side::Dark), 3);
        assert_eq!(Scoring::Material.score(&board, Side::Light), -3);
    }

    #[test]
    fn test_positional_is_antisymmetric() {
        let board = Board::from_diagram(
            "X . . . . . . O
             . X . . . . . .
             . . O X . . . .
             . . . O X . . .
             . . . X O . . .
             . . . . . . . .
             . O . . . . . .
             . . . . . . . X",
        )
        .unwrap();
        let dark = Scoring::Positional.score(&board, Side::Dark);
        let light = Scoring::Positional.score(&board, Side::Light);
        assert_eq!(dark, -light);
    }

    #[test]
    fn test_positional_rewards_corners() {
        let corner = Board::from_diagram(
            "X . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . O",
        )
        .unwrap();
        assert_eq!(Scoring::Positional.score(&corner, Side::Dark), 0);

        let x_square = Board::from_diagram(
            "X . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . O .
             . . . . . . . .",
        )
        .unwrap();
        assert_eq!(Scoring::Positional.score(&x_square, Side::Dark), 150);
    }

    #[test]
    fn test_scoring_parse() {
        assert_eq!("Material".parse::<Scoring>(), Ok(Scoring::Material));
        assert_eq!("positional".parse::<Scoring>(), Ok(Scoring::Positional));
        assert!("random".parse::<Scoring>().is_err());
    }
}
