//! # Evaluation Module
//!
//! Static evaluation of a board from the point of view of the colour the
//! whole search is run for ("self").
//!
//! ## Scoring Strategy
//! 1. **Terminal**: a side with no discs left has lost outright (±5000).
//! 2. **Midgame** (some square still empty): positional weights, mobility
//!    and exposed opponent discs, but only while self is positionally ahead.
//!    When behind, the positional differential alone is returned.
//! 3. **Full board**: the raw disc differential.
//!
//! The weight table is derived per call from the corner state, so
//! evaluation is a pure function of its inputs.

use crate::core::board::{step, BOARD_SIZE};
use crate::core::{Board, Cell, Color, DIRECTIONS};
use crate::logic::legal_moves;

/// Score for a position where self has no discs left.
pub const LOSS_SCORE: i32 = -5000;
/// Score for a position where the opponent has no discs left.
pub const WIN_SCORE: i32 = 5000;

const MOBILITY_WEIGHT: i32 = 10;
const EDGE_WEIGHT: i32 = 15;
/// Weight given to squares next to a corner once that corner is taken.
const CAPTURED_CORNER_NEIGHBOUR: i32 = 15;

#[rustfmt::skip]
const BASE_WEIGHTS: [i32; BOARD_SIZE] = [
    0,   0,   0,  0,  0,  0,  0,   0,   0, 0,
    0, 150, -40, 20, 10, 10, 20, -40, 150, 0,
    0, -40,-180, -5, -5, -5, -5,-180, -40, 0,
    0,  20,  -5, 15,  3,  3, 15,  -5,  20, 0,
    0,  10,  -5,  3,  3,  3,  3,  -5,  10, 0,
    0,  10,  -5,  3,  3,  3,  3,  -5,  10, 0,
    0,  20,  -5, 15,  3,  3, 15,  -5,  20, 0,
    0, -40,-180, -5, -5, -5, -5,-180, -40, 0,
    0, 150, -40, 20, 10, 10, 20, -40, 150, 0,
    0,   0,   0,  0,  0,  0,  0,   0,   0, 0,
];

/// Each corner with its two orthogonal neighbours and its diagonal one.
const CORNERS: [(usize, [usize; 3]); 4] = [
    (11, [12, 21, 22]),
    (18, [17, 28, 27]),
    (81, [71, 82, 72]),
    (88, [87, 78, 77]),
];

/// Positional weights for one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    weights: [i32; BOARD_SIZE],
}

impl Default for WeightTable {
    fn default() -> Self {
        WeightTable {
            weights: BASE_WEIGHTS,
        }
    }
}

impl WeightTable {
    /// Base table with every captured corner's neighbours revised upward.
    pub fn for_board(board: &Board) -> Self {
        let mut table = Self::default();
        for (corner, neighbours) in CORNERS.iter() {
            if board.get(*corner) != Cell::Empty {
                for &n in neighbours {
                    table.weights[n] = CAPTURED_CORNER_NEIGHBOUR;
                }
            }
        }
        table
    }

    #[inline]
    pub fn get(&self, index: usize) -> i32 {
        self.weights[index]
    }
}

/// Breakdown of a midgame evaluation, kept for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Features {
    pub positional: i32,
    pub mobility: i32,
    pub opponent_mobility: i32,
    pub exposed_edges: i32,
    pub disc_diff: i32,
    pub empties: usize,
}

/// Collects the features of `board` for `me`.
pub fn features(board: &Board, me: Color) -> Features {
    let opp = me.opponent();
    let table = WeightTable::for_board(board);

    let mut f = Features {
        mobility: legal_moves(board, me).len() as i32,
        opponent_mobility: legal_moves(board, opp).len() as i32,
        disc_diff: board.count(me) as i32 - board.count(opp) as i32,
        ..Features::default()
    };

    for i in Board::squares() {
        let cell = board.get(i);
        if cell.is(me) {
            f.positional += table.get(i);
        } else if cell.is(opp) {
            f.positional -= table.get(i);
            if DIRECTIONS
                .iter()
                .any(|&dir| board.get(step(i, dir)) == Cell::Empty)
            {
                f.exposed_edges += 1;
            }
        } else if cell == Cell::Empty {
            f.empties += 1;
        }
    }
    f
}

/// Evaluates `board` for `me`. Higher is better for `me`.
pub fn evaluate(board: &Board, me: Color) -> i32 {
    // Terminal check comes before any heuristic work.
    if board.count(me) == 0 {
        return LOSS_SCORE;
    }
    if board.count(me.opponent()) == 0 {
        return WIN_SCORE;
    }

    let f = features(board, me);
    if f.empties == 0 {
        return f.disc_diff;
    }

    if f.positional > 0 {
        f.positional + MOBILITY_WEIGHT * f.mobility + EDGE_WEIGHT * f.exposed_edges + f.disc_diff
            - MOBILITY_WEIGHT * f.opponent_mobility
    } else {
        f.positional
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_is_balanced() {
        let board = Board::new();
        // Symmetric position: positional differential is zero, so the
        // defensive branch returns it unchanged.
        assert_eq!(evaluate(&board, Color::Black), 0);
        assert_eq!(evaluate(&board, Color::White), 0);
    }

    #[test]
    fn test_terminal_scores() {
        let no_white = Board::from_rows(&[
            "b.......", "........", "........", "........", "........", "........",
            "........", "........",
        ]);
        assert_eq!(evaluate(&no_white, Color::White), LOSS_SCORE);
        assert_eq!(evaluate(&no_white, Color::Black), WIN_SCORE);
    }

    #[test]
    fn test_loss_below_any_live_position() {
        let live = Board::from_rows(&[
            "wwwwwwww", "wwwwwwww", "wwwwwwww", "wwwwwwww", "wwwwwwww", "wwwwwwww",
            "wwwwwwww", "wwwwwww.",
        ]);
        let mut live = live;
        live.set(11, Cell::Black);
        let dead = Board::from_rows(&[
            "wwwwwwww", "wwwwwwww", "wwwwwwww", "wwwwwwww", "wwwwwwww", "wwwwwwww",
            "wwwwwwww", "wwwwwww.",
        ]);
        assert!(evaluate(&dead, Color::Black) < evaluate(&live, Color::Black));
    }

    #[test]
    fn test_full_board_is_disc_differential() {
        // Corners all black would dominate any weighting; the full-board rule
        // must ignore them.
        let board = Board::from_rows(&[
            "bwwwwwwb", "wwwwwwww", "wwwwwwww", "wwwwwwww", "wwwwwwww", "wwwwwwww",
            "wwwwwwww", "bwwwwwwb",
        ]);
        assert!(board.is_full());
        assert_eq!(evaluate(&board, Color::Black), 4 - 60);
        assert_eq!(evaluate(&board, Color::White), 60 - 4);
    }

    #[test]
    fn test_corner_capture_revises_neighbours() {
        let plain = WeightTable::for_board(&Board::new());
        assert_eq!(plain.get(12), -40);
        assert_eq!(plain.get(22), -180);
        assert_eq!(plain.get(78), -40);

        let board = Board::from_rows(&[
            "w.......", "........", "........", "...wb...", "...bw...", "........",
            "........", ".......b",
        ]);
        let revised = WeightTable::for_board(&board);
        for i in [12, 21, 22, 87, 78, 77] {
            assert_eq!(revised.get(i), 15, "square {}", i);
        }
        // Untaken corners keep their punitive neighbours.
        assert_eq!(revised.get(17), -40);
        assert_eq!(revised.get(72), -180);
    }

    #[test]
    fn test_ahead_uses_full_formula() {
        let board = Board::from_rows(&[
            "b.......", "........", "........", "...wb...", "...bw...", "........",
            "........", "........",
        ]);
        let f = features(&board, Color::Black);
        assert_eq!(f.positional, 150);
        assert_eq!(f.disc_diff, 1);
        assert_eq!(f.exposed_edges, 2);
        let expected = f.positional + 10 * f.mobility + 15 * f.exposed_edges + f.disc_diff
            - 10 * f.opponent_mobility;
        assert_eq!(evaluate(&board, Color::Black), expected);
        // From white's side the position is behind, so only weights count.
        assert_eq!(evaluate(&board, Color::White), -150);
    }
}
