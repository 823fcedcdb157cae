//! Constants for board geometry, search depths, and evaluation weights.
//!
//! The board is a plain 8x8 grid addressed by `(col, row)`, both in `0..8`.
//! Row 0 is the top of the board as printed.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Othello is always played on 8x8.
pub const N: usize = 8;

/// Total number of cells on the board.
pub const NUM_CELLS: usize = N * N;

/// Compass directions as `(d_col, d_row)` offsets.
/// Order: NW, W, SW, N, S, NE, E, SE
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// =============================================================================
// Search Parameters
// =============================================================================

/// Search depth (plies) used in testing mode.
pub const TESTING_DEPTH: u32 = 2;

/// Search depth (plies) used in full-strength mode.
pub const FULL_DEPTH: u32 = 4;

// =============================================================================
// Positional Evaluation
// =============================================================================

/// Positional weight of each cell, indexed `[row][col]`.
///
/// Corners are worth the most, edges are worth something, and the cells
/// that hand a corner to the opponent (X- and C-squares) are penalised.
/// The table is symmetric under all eight board symmetries.
pub const POSITIONAL_WEIGHTS: [[i32; N]; N] = [
    [100, -20, 10, 5, 5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [10, -2, -1, -1, -1, -1, -2, 10],
    [5, -2, -1, -1, -1, -1, -2, 5],
    [5, -2, -1, -1, -1, -1, -2, 5],
    [10, -2, -1, -1, -1, -1, -2, 10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10, 5, 5, 10, -20, 100],
];

// =============================================================================
// Protocol
// =============================================================================

/// Handshake line written once the agent is ready.
pub const INIT_DONE: &str = "Init done";

/// Coordinate written (twice) for a pass.
pub const PASS_COORD: i32 = -1;

/// Time budget value meaning "no limit".
pub const NO_TIME_LIMIT: i32 = -1;
