//! Othello board representation and move execution.
//!
//! This module provides the core game logic:
//! - An 8x8 grid of cells with running per-state counts
//! - Legality checking via the bracketing rule in all 8 directions
//! - Capture resolution and move application
//! - Terminal-state detection (neither side can move)
//!
//! Coordinates are a validated value type, so every grid access after
//! construction of a [`Coord`] is in range.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{DIRECTIONS, N, NUM_CELLS};

// =============================================================================
// Sides and cells
// =============================================================================

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Dark,
    Light,
}

impl Side {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Dark => Side::Light,
            Side::Light => Side::Dark,
        }
    }
}

/// Error returned when a side name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid side {0:?}: expected dark, light, black or white")]
pub struct ParseSideError(String);

impl FromStr for Side {
    type Err = ParseSideError;

    /// Accepts `dark`/`black` and `light`/`white`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" | "black" => Ok(Side::Dark),
            "light" | "white" => Ok(Side::Light),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Dark => write!(f, "dark"),
            Side::Light => write!(f, "light"),
        }
    }
}

/// State of a single board cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Light,
    Dark,
}

impl Cell {
    /// Slot in the board's running count table.
    #[inline]
    fn slot(self) -> usize {
        match self {
            Cell::Empty => 0,
            Cell::Light => 1,
            Cell::Dark => 2,
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Light => 'O',
            Cell::Dark => 'X',
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::Dark => Cell::Dark,
            Side::Light => Cell::Light,
        }
    }
}

// =============================================================================
// Coordinates and moves
// =============================================================================

/// A coordinate given to [`Coord::new`] that lies off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("coordinate ({col}, {row}) is off the {n}x{n} board", n = N)]
pub struct CoordError {
    pub col: i32,
    pub row: i32,
}

/// An on-board cell address. Column 0 is the left edge, row 0 the top.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    col: u8,
    row: u8,
}

impl Coord {
    /// Build a coordinate, rejecting anything outside `0..8`.
    pub fn new(col: i32, row: i32) -> Result<Coord, CoordError> {
        let range = 0..N as i32;
        if range.contains(&col) && range.contains(&row) {
            Ok(Coord {
                col: col as u8,
                row: row as u8,
            })
        } else {
            Err(CoordError { col, row })
        }
    }

    #[inline]
    pub fn col(self) -> usize {
        self.col as usize
    }

    #[inline]
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Step one cell in direction `(d_col, d_row)`, or `None` at the edge.
    #[inline]
    pub fn offset(self, d_col: i8, d_row: i8) -> Option<Coord> {
        Coord::new(
            self.col as i32 + d_col as i32,
            self.row as i32 + d_row as i32,
        )
        .ok()
    }

    /// Every cell in scan order: row by row, left to right within a row.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..N as u8).flat_map(|row| (0..N as u8).map(move |col| Coord { col, row }))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// A placement, or a pass when the side to move has nowhere to play.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Place(Coord),
    Pass,
}

impl Move {
    /// The target cell, if this is a placement.
    pub fn coord(self) -> Option<Coord> {
        match self {
            Move::Place(at) => Some(at),
            Move::Pass => None,
        }
    }
}

impl From<Coord> for Move {
    fn from(at: Coord) -> Self {
        Move::Place(at)
    }
}

impl From<Option<Coord>> for Move {
    fn from(at: Option<Coord>) -> Self {
        at.map_or(Move::Pass, Move::Place)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place(at) => write!(f, "{at}"),
            Move::Pass => write!(f, "pass"),
        }
    }
}

/// Result of validating a move: whether it is legal and which
/// opponent stones it would flip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capture {
    pub valid: bool,
    pub captured: Vec<Coord>,
}

// =============================================================================
// Board
// =============================================================================

/// Error parsing a board diagram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("unexpected character {0:?} in board diagram")]
    UnexpectedChar(char),
    #[error("board diagram has {0} cells, expected {expected}", expected = NUM_CELLS)]
    WrongLength(usize),
}

/// An Othello position.
///
/// `counts` tracks how many cells are empty, light and dark. It is kept in
/// step with `cells` on every placement and always sums to 64.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Grid indexed `[row][col]`
    cells: [[Cell; N]; N],
    /// Running counts indexed by [`Cell::slot`]
    counts: [usize; 3],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard opening: light on the main-diagonal centre cells,
    /// dark on the other two.
    pub fn new() -> Self {
        let mut board = Board {
            cells: [[Cell::Empty; N]; N],
            counts: [NUM_CELLS, 0, 0],
        };
        let mid = N as i32 / 2;
        for (col, row, side) in [
            (mid - 1, mid - 1, Side::Light),
            (mid, mid, Side::Light),
            (mid - 1, mid, Side::Dark),
            (mid, mid - 1, Side::Dark),
        ] {
            if let Ok(at) = Coord::new(col, row) {
                board.set(at, side);
            }
        }
        board
    }

    /// Build a board from a raw grid indexed `[row][col]`.
    pub fn from_cells(grid: &[[Cell; N]; N]) -> Self {
        let mut board = Board::new();
        board.reset(grid);
        board
    }

    /// Parse a diagram of `X` (dark), `O` (light) and `.` (empty) cells,
    /// row by row. Whitespace is ignored.
    pub fn from_diagram(text: &str) -> Result<Self, BoardParseError> {
        let mut grid = [[Cell::Empty; N]; N];
        let mut n = 0;
        for ch in text.chars().filter(|c| !c.is_whitespace()) {
            let cell = match ch {
                '.' => Cell::Empty,
                'X' | 'x' => Cell::Dark,
                'O' | 'o' => Cell::Light,
                other => return Err(BoardParseError::UnexpectedChar(other)),
            };
            if n < NUM_CELLS {
                grid[n / N][n % N] = cell;
            }
            n += 1;
        }
        if n != NUM_CELLS {
            return Err(BoardParseError::WrongLength(n));
        }
        Ok(Board::from_cells(&grid))
    }

    /// Install an arbitrary configuration, legal or not, and recount
    /// every state from scratch.
    pub fn reset(&mut self, grid: &[[Cell; N]; N]) {
        self.cells = *grid;
        self.counts = [0; 3];
        for cell in self.cells.iter().flatten() {
            self.counts[cell.slot()] += 1;
        }
    }

    /// The raw grid, indexed `[row][col]`.
    pub fn cells(&self) -> &[[Cell; N]; N] {
        &self.cells
    }

    #[inline]
    pub fn state_at(&self, at: Coord) -> Cell {
        self.cells[at.row()][at.col()]
    }

    #[inline]
    pub fn is_occupied(&self, at: Coord) -> bool {
        self.state_at(at) != Cell::Empty
    }

    /// Number of cells currently in `state`.
    #[inline]
    pub fn count(&self, state: Cell) -> usize {
        self.counts[state.slot()]
    }

    /// Number of stones owned by `side`.
    #[inline]
    pub fn stones(&self, side: Side) -> usize {
        self.count(Cell::from(side))
    }

    /// Place `side` at `at`, moving one unit between the running counts.
    fn set(&mut self, at: Coord, side: Side) {
        let previous = self.state_at(at);
        let next = Cell::from(side);
        self.counts[previous.slot()] -= 1;
        self.counts[next.slot()] += 1;
        self.cells[at.row()][at.col()] = next;
    }

    /// Length of the run of opponent stones starting next to `from` in
    /// direction `(d_col, d_row)` that is closed off by a stone of `side`.
    /// Zero when the run is empty or hits an empty cell or the edge.
    fn bracketed_run(&self, from: Coord, d_col: i8, d_row: i8, side: Side) -> usize {
        let own = Cell::from(side);
        let other = Cell::from(side.opponent());
        let mut len = 0;
        let mut cursor = from.offset(d_col, d_row);
        while let Some(at) = cursor {
            match self.state_at(at) {
                c if c == other => len += 1,
                c if c == own => return len,
                _ => return 0,
            }
            cursor = at.offset(d_col, d_row);
        }
        0
    }

    fn is_legal_placement(&self, at: Coord, side: Side) -> bool {
        !self.is_occupied(at)
            && DIRECTIONS
                .iter()
                .any(|&(dc, dr)| self.bracketed_run(at, dc, dr, side) > 0)
    }

    /// Whether `mv` is legal for `side`. A pass is legal only when `side`
    /// has no placement available.
    pub fn is_legal(&self, mv: Move, side: Side) -> bool {
        match mv {
            Move::Place(at) => self.is_legal_placement(at, side),
            Move::Pass => !self.has_legal_move(side),
        }
    }

    /// Validate `mv` for `side` and collect every opponent stone it flips,
    /// across all 8 directions. Reads the board as it is before the move.
    pub fn captures(&self, mv: Move, side: Side) -> Capture {
        let at = match mv {
            Move::Place(at) => at,
            Move::Pass => {
                return Capture {
                    valid: !self.has_legal_move(side),
                    captured: Vec::new(),
                };
            }
        };
        if self.is_occupied(at) {
            return Capture::default();
        }

        let mut captured = Vec::new();
        for &(dc, dr) in &DIRECTIONS {
            let len = self.bracketed_run(at, dc, dr, side);
            let mut cursor = at;
            for _ in 0..len {
                match cursor.offset(dc, dr) {
                    Some(next) => {
                        captured.push(next);
                        cursor = next;
                    }
                    None => break,
                }
            }
        }
        Capture {
            valid: !captured.is_empty(),
            captured,
        }
    }

    /// Play `mv` for `side`, flipping captured stones.
    ///
    /// Returns `true` if the board changed. Passes and illegal moves leave
    /// the board untouched and return `false`.
    pub fn apply_move(&mut self, mv: Move, side: Side) -> bool {
        let Move::Place(at) = mv else {
            return false;
        };
        let capture = self.captures(mv, side);
        if !capture.valid {
            return false;
        }
        for &flipped in &capture.captured {
            self.set(flipped, side);
        }
        self.set(at, side);
        debug_assert_eq!(self.counts.iter().sum::<usize>(), NUM_CELLS);
        true
    }

    /// All legal placements for `side`, in scan order.
    pub fn legal_moves(&self, side: Side) -> Vec<Coord> {
        Coord::all()
            .filter(|&at| self.is_legal_placement(at, side))
            .collect()
    }

    pub fn has_legal_move(&self, side: Side) -> bool {
        Coord::all().any(|at| self.is_legal_placement(at, side))
    }

    /// The game is over when neither side can place a stone. This is not
    /// the same as the board being full.
    pub fn is_terminal(&self) -> bool {
        !(self.has_legal_move(Side::Dark) || self.has_legal_move(Side::Light))
    }

    /// The side with more stones, or `None` on a tie.
    pub fn winner(&self) -> Option<Side> {
        let dark = self.stones(Side::Dark);
        let light = self.stones(Side::Light);
        match dark.cmp(&light) {
            std::cmp::Ordering::Greater => Some(Side::Dark),
            std::cmp::Ordering::Less => Some(Side::Light),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{} ", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(col: i32, row: i32) -> Coord {
        Coord::new(col, row).unwrap()
    }

    #[test]
    fn test_initial_position() {
        let board = Board::new();
        assert_eq!(board.state_at(at(3, 3)), Cell::Light);
        assert_eq!(board.state_at(at(4, 4)), Cell::Light);
        assert_eq!(board.state_at(at(3, 4)), Cell::Dark);
        assert_eq!(board.state_at(at(4, 3)), Cell::Dark);
        assert_eq!(board.count(Cell::Empty), 60);
        assert_eq!(board.count(Cell::Light), 2);
        assert_eq!(board.count(Cell::Dark), 2);
    }

    #[test]
    fn test_coord_bounds() {
        assert!(Coord::new(0, 0).is_ok());
        assert!(Coord::new(7, 7).is_ok());
        assert_eq!(Coord::new(8, 0), Err(CoordError { col: 8, row: 0 }));
        assert_eq!(Coord::new(0, -1), Err(CoordError { col: 0, row: -1 }));
        assert_eq!(at(0, 0).offset(-1, 0), None);
        assert_eq!(at(0, 0).offset(1, 1), Some(at(1, 1)));
    }

    #[test]
    fn test_scan_order_is_row_major() {
        let cells: Vec<Coord> = Coord::all().take(9).collect();
        assert_eq!(cells[0], at(0, 0));
        assert_eq!(cells[7], at(7, 0));
        assert_eq!(cells[8], at(0, 1));
        assert_eq!(Coord::all().count(), NUM_CELLS);
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!("Black".parse::<Side>(), Ok(Side::Dark));
        assert_eq!("white".parse::<Side>(), Ok(Side::Light));
        assert_eq!("DARK".parse::<Side>(), Ok(Side::Dark));
        assert!("green".parse::<Side>().is_err());
        assert_eq!(Side::Dark.opponent(), Side::Light);
    }

    #[test]
    fn test_initial_legal_moves_for_dark() {
        let board = Board::new();
        let moves = board.legal_moves(Side::Dark);
        assert_eq!(moves, vec![at(3, 2), at(2, 3), at(5, 4), at(4, 5)]);
    }

    #[test]
    fn test_apply_flips_and_updates_counts() {
        let mut board = Board::new();
        assert!(board.apply_move(Move::Place(at(3, 2)), Side::Dark));

        assert_eq!(board.state_at(at(3, 2)), Cell::Dark);
        assert_eq!(board.state_at(at(3, 3)), Cell::Dark);
        assert_eq!(board.stones(Side::Dark), 4);
        assert_eq!(board.stones(Side::Light), 1);
        assert_eq!(board.count(Cell::Empty), 59);
    }

    #[test]
    fn test_illegal_apply_is_noop() {
        let mut board = Board::new();
        let before = board.clone();

        assert!(!board.apply_move(Move::Place(at(0, 0)), Side::Dark));
        assert!(!board.apply_move(Move::Place(at(3, 3)), Side::Dark));
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_conversions() {
        assert_eq!(Move::from(at(2, 5)), Move::Place(at(2, 5)));
        assert_eq!(Move::from(Some(at(2, 5))), Move::Place(at(2, 5)));
        assert_eq!(Move::from(None::<Coord>), Move::Pass);
        assert_eq!(Move::Place(at(2, 5)).coord(), Some(at(2, 5)));
        assert_eq!(Move::Pass.coord(), None);
    }

    #[test]
    fn test_pass_legality() {
        let board = Board::new();
        assert!(!board.is_legal(Move::Pass, Side::Dark));
        let capture = board.captures(Move::Pass, Side::Dark);
        assert!(!capture.valid);
        assert!(capture.captured.is_empty());
    }

    #[test]
    fn test_diagram_round_trip() {
        let board = Board::new();
        let parsed = Board::from_diagram(&board.to_string()).unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_diagram_errors() {
        assert_eq!(
            Board::from_diagram("...."),
            Err(BoardParseError::WrongLength(4))
        );
        assert_eq!(
            Board::from_diagram("..?"),
            Err(BoardParseError::UnexpectedChar('?'))
        );
    }

    #[test]
    fn test_winner() {
        let mut board = Board::new();
        assert_eq!(board.winner(), None);
        board.apply_move(Move::Place(at(3, 2)), Side::Dark);
        assert_eq!(board.winner(), Some(Side::Dark));
    }
}
