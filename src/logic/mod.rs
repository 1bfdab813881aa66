use crate::core::board::{is_playable, step};
use crate::core::{Board, Cell, Color, Move, DIRECTIONS};
use crate::error::EngineError;

/// True iff `index` lies in the 8x8 interior.
pub fn is_playable_square(index: usize) -> bool {
    is_playable(index)
}

/// Walks a run of opponent discs starting at `square` and returns the
/// same-colour disc closing it, if any.
fn find_bracketing_piece(board: &Board, mut square: usize, dir: isize, color: Color) -> Option<usize> {
    let opp = color.opponent();
    while board.get(square).is(opp) {
        square = step(square, dir);
    }
    if board.get(square).is(color) {
        Some(square)
    } else {
        None
    }
}

/// Index of the bracketing piece if playing `mv` would flip along `dir`.
pub fn would_flip(board: &Board, mv: Move, dir: isize, color: Color) -> Option<usize> {
    let next = step(mv.index(), dir);
    if board.get(next).is(color.opponent()) {
        find_bracketing_piece(board, step(next, dir), dir, color)
    } else {
        None
    }
}

pub fn is_legal(board: &Board, mv: Move, color: Color) -> bool {
    board.get(mv.index()) == Cell::Empty
        && DIRECTIONS
            .iter()
            .any(|&dir| would_flip(board, mv, dir, color).is_some())
}

/// 合法手生成 (row-major order). Empty means the side must pass.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    Board::squares()
        .map(Move::from_index)
        .filter(|&mv| is_legal(board, mv, color))
        .collect()
}

pub fn has_legal_move(board: &Board, color: Color) -> bool {
    Board::squares()
        .map(Move::from_index)
        .any(|mv| is_legal(board, mv, color))
}

/// Places a disc and flips every bracketed run. The move must be legal;
/// use [`try_apply_move`] when that is not already known.
pub fn apply_move(board: &mut Board, mv: Move, color: Color) {
    board.set(mv.index(), color.cell());
    for &dir in DIRECTIONS.iter() {
        if let Some(bracketer) = would_flip(board, mv, dir, color) {
            let mut c = step(mv.index(), dir);
            while c != bracketer {
                board.set(c, color.cell());
                c = step(c, dir);
            }
        }
    }
}

/// 移動適用 with a legality check.
pub fn try_apply_move(board: &mut Board, mv: Move, color: Color) -> Result<(), EngineError> {
    if !is_legal(board, mv, color) {
        return Err(EngineError::IllegalMove { mv, color });
    }
    apply_move(board, mv, color);
    Ok(())
}

/// Neither side can move: the game is over.
pub fn is_game_over(board: &Board) -> bool {
    !has_legal_move(board, Color::Black) && !has_legal_move(board, Color::White)
}
