use super::config::{SearchConfig, MIN_WINDOW};
use super::eval;
use crate::core::{Board, Color, Move};
use crate::logic::{apply_move, legal_moves};

/// Picks the root depth from the root side's branching factor: deeper when
/// the tree is narrow, shallower when it is wide.
pub fn search_depth(branching: usize) -> u8 {
    if (8..15).contains(&branching) {
        5
    } else if branching >= 15 {
        4
    } else if (3..8).contains(&branching) {
        6
    } else {
        7
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub leaves: u64,
}

/// Alpha-beta searcher for one fixed colour ("self").
///
/// Nodes are labelled by the colour that just moved. At a node where self
/// moved, the opponent replies and the bound tightens as a minimum (beta);
/// where the opponent moved, self replies and it tightens as a maximum
/// (alpha).
pub struct Searcher {
    me: Color,
    window: i32,
    depth_cap: Option<u8>,
    stats: SearchStats,
}

impl Searcher {
    /// Windows narrower than [`MIN_WINDOW`] are widened to it.
    pub fn new(me: Color, config: &SearchConfig) -> Self {
        Self {
            me,
            window: config.window.max(MIN_WINDOW),
            depth_cap: config.depth_cap,
            stats: SearchStats::default(),
        }
    }

    pub fn color(&self) -> Color {
        self.me
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Root depth for `board`, from self's branching factor and the cap.
    pub fn root_depth(&self, board: &Board) -> u8 {
        let depth = search_depth(legal_moves(board, self.me).len());
        match self.depth_cap {
            Some(cap) => depth.min(cap),
            None => depth,
        }
    }

    /// Scores root move `mv` for self on `board` with the full window.
    pub fn score_root_move(&mut self, board: &Board, mv: Move) -> i32 {
        self.stats = SearchStats::default();
        let depth = self.root_depth(board);
        self.search(board, mv, -self.window, self.window, self.me, depth)
    }

    /// Applies `mv` for `color` to a copy of `board` and returns the bound
    /// for the resulting node.
    pub fn search(
        &mut self,
        board: &Board,
        mv: Move,
        mut alpha: i32,
        mut beta: i32,
        color: Color,
        depth: u8,
    ) -> i32 {
        self.stats.nodes += 1;

        let mut next = *board;
        apply_move(&mut next, mv, color);

        if depth == 0 {
            self.stats.leaves += 1;
            return eval::evaluate(&next, self.me);
        }

        let replies = legal_moves(&next, color.opponent());
        if replies.is_empty() {
            self.stats.leaves += 1;
            return eval::evaluate(&next, self.me);
        }

        for reply in replies {
            let val = self.search(&next, reply, alpha, beta, color.opponent(), depth - 1);

            if color == self.me {
                beta = beta.min(val);
            } else {
                alpha = alpha.max(val);
            }

            if alpha >= beta {
                break;
            }
        }

        if color == self.me {
            beta
        } else {
            alpha
        }
    }
}
