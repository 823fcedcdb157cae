//! Depth-limited minimax search.
//!
//! The search is plain minimax with no pruning or caching:
//! - Every ply owns its own board clone, so siblings never alias
//! - Leaves are scored with a [`Scoring`] mode from the root side's
//!   perspective, at every depth
//! - A side with no reply ends the line immediately instead of searching
//!   through a pass
//!
//! At the root each candidate move is searched independently. Candidates
//! can optionally be split into groups searched on a `rayon` pool; the
//! result is the same as the single-threaded search.

use log::{debug, trace};
use rayon::prelude::*;

use crate::board::{Board, Coord, Move, Side};
use crate::constants::{FULL_DEPTH, TESTING_DEPTH};
use crate::eval::Scoring;

/// Role of a search node when combining its children's scores.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// The opponent of the root picks the reply; take the minimum.
    Min,
    /// The root side picks the reply; take the maximum.
    Max,
}

impl Node {
    #[inline]
    pub fn flip(self) -> Node {
        match self {
            Node::Min => Node::Max,
            Node::Max => Node::Min,
        }
    }

    #[inline]
    fn combine(self, a: i32, b: i32) -> i32 {
        match self {
            Node::Min => a.min(b),
            Node::Max => a.max(b),
        }
    }
}

/// Search parameters fixed for the lifetime of an agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched, counting the root move itself
    pub depth: u32,
    /// Leaf evaluation
    pub scoring: Scoring,
    /// Number of groups the root candidates are split into (1 = sequential)
    pub workers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::full_strength()
    }
}

impl SearchConfig {
    /// Shallow search with material scoring, for tests.
    pub fn testing() -> Self {
        Self {
            depth: TESTING_DEPTH,
            scoring: Scoring::Material,
            workers: 1,
        }
    }

    /// Full-depth search with positional scoring.
    pub fn full_strength() -> Self {
        Self {
            depth: FULL_DEPTH,
            scoring: Scoring::Positional,
            workers: 1,
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}

/// The move picked at the root and its minimax score.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    pub coord: Coord,
    pub score: i32,
}

/// Play `mv` for `side` on `board`, then score the result by searching
/// `depth` further plies.
///
/// `node` is the role of this call when it combines the replies of
/// `side`'s opponent. Scores are always from `root`'s perspective.
/// When `depth` is zero or the opponent has no reply, the position after
/// `mv` is evaluated directly.
pub fn minimax(
    mut board: Board,
    mv: Move,
    side: Side,
    depth: u32,
    node: Node,
    root: Side,
    scoring: Scoring,
) -> i32 {
    board.apply_move(mv, side);
    if depth == 0 {
        return scoring.score(&board, root);
    }

    let opponent = side.opponent();
    let replies = board.legal_moves(opponent);
    if replies.is_empty() {
        trace!("{opponent} has no reply after {mv}, evaluating early");
        return scoring.score(&board, root);
    }

    replies
        .into_iter()
        .map(|reply| {
            minimax(
                board.clone(),
                Move::Place(reply),
                opponent,
                depth - 1,
                node.flip(),
                root,
                scoring,
            )
        })
        .reduce(|a, b| node.combine(a, b))
        .unwrap_or_else(|| scoring.score(&board, root))
}

/// Score a single root candidate.
fn score_candidate(board: &Board, side: Side, at: Coord, config: &SearchConfig) -> i32 {
    minimax(
        board.clone(),
        Move::Place(at),
        side,
        config.depth.saturating_sub(1),
        Node::Min,
        side,
        config.scoring,
    )
}

/// Best of `candidates` in order; ties keep the earliest.
fn best_of(
    board: &Board,
    side: Side,
    candidates: &[Coord],
    config: &SearchConfig,
) -> Option<Choice> {
    let mut best: Option<Choice> = None;
    for &coord in candidates {
        let score = score_candidate(board, side, coord, config);
        debug!("candidate {coord} for {side} scores {score}");
        if best.is_none_or(|b| score > b.score) {
            best = Some(Choice { coord, score });
        }
    }
    best
}

/// Split `candidates` into contiguous groups, search each group on the
/// rayon pool, and reduce the group winners in scan order.
fn best_of_split(
    board: &Board,
    side: Side,
    candidates: &[Coord],
    config: &SearchConfig,
) -> Option<Choice> {
    let group_len = candidates.len().div_ceil(config.workers.max(1));
    let winners: Vec<Option<Choice>> = candidates
        .par_chunks(group_len)
        .map(|group| best_of(board, side, group, config))
        .collect();
    winners
        .into_iter()
        .flatten()
        .reduce(|best, c| if c.score > best.score { c } else { best })
}

/// Pick the best move for `side` on `board`, or `None` if `side` has no
/// legal placement. The root always maximizes.
pub fn best_move(board: &Board, side: Side, config: &SearchConfig) -> Option<Choice> {
    let candidates = board.legal_moves(side);
    if candidates.is_empty() {
        return None;
    }

    let choice = if config.workers > 1 && candidates.len() > 1 {
        best_of_split(board, side, &candidates, config)
    } else {
        best_of(board, side, &candidates, config)
    };
    if let Some(c) = choice {
        debug!(
            "{side} picks {} with score {} out of {} candidates (depth {}, {})",
            c.coord,
            c.score,
            candidates.len(),
            config.depth,
            config.scoring
        );
    }
    choice
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(col: i32, row: i32) -> Coord {
        Coord::new(col, row).unwrap()
    }

    #[test]
    fn test_node_flip() {
        assert_eq!(Node::Min.flip(), Node::Max);
        assert_eq!(Node::Max.flip(), Node::Min);
        assert_eq!(Node::Min.combine(3, -2), -2);
        assert_eq!(Node::Max.combine(3, -2), 3);
    }

    #[test]
    fn test_depth_zero_is_direct_evaluation() {
        let board = Board::new();
        let mv = Move::Place(at(3, 2));
        let mut after = board.clone();
        after.apply_move(mv, Side::Dark);

        for scoring in [Scoring::Material, Scoring::Positional] {
            let searched = minimax(
                board.clone(),
                mv,
                Side::Dark,
                0,
                Node::Min,
                Side::Dark,
                scoring,
            );
            assert_eq!(searched, scoring.score(&after, Side::Dark));
        }
    }

    #[test]
    fn test_no_reply_evaluates_at_any_depth() {
        // Dark takes the only light stone; light is left without a reply
        let board = Board::from_diagram(
            "X O . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . .",
        )
        .unwrap();
        let mv = Move::Place(at(2, 0));
        let mut after = board.clone();
        assert!(after.apply_move(mv, Side::Dark));
        assert!(!after.has_legal_move(Side::Light));

        for scoring in [Scoring::Material, Scoring::Positional] {
            let expected = scoring.score(&after, Side::Dark);
            for depth in 1..=4 {
                let searched = minimax(
                    board.clone(),
                    mv,
                    Side::Dark,
                    depth,
                    Node::Min,
                    Side::Dark,
                    scoring,
                );
                assert_eq!(searched, expected, "depth {depth}, {scoring}");
            }
        }
    }

    #[test]
    fn test_one_ply_takes_worst_reply() {
        // After dark plays (3,2), light's three replies each leave 3-3.
        let board = Board::new();
        let score = minimax(
            board,
            Move::Place(at(3, 2)),
            Side::Dark,
            1,
            Node::Min,
            Side::Dark,
            Scoring::Material,
        );
        assert_eq!(score, 0);
    }

    #[test]
    fn test_config_presets() {
        let testing = SearchConfig::testing();
        assert_eq!(testing.depth, TESTING_DEPTH);
        assert_eq!(testing.scoring, Scoring::Material);
        let full = SearchConfig::default();
        assert_eq!(full.depth, FULL_DEPTH);
        assert_eq!(full.scoring, Scoring::Positional);
        assert_eq!(full.with_workers(0).workers, 1);
    }

    #[test]
    fn test_best_move_none_without_candidates() {
        let board = Board::from_diagram(
            "X X X X X X X X
             X X X X X X X X
             X X X X X X X X
             X X X X X X X X
             X X X X X X X X
             X X X X X X X X
             X X X X X X X X
             X X X X X X X .",
        )
        .unwrap();
        assert_eq!(best_move(&board, Side::Light, &SearchConfig::testing()), None);
    }
}
