#[cfg(test)]
mod tests {
    use crate::core::board::step;
    use crate::core::{Board, Cell, Color, Move, DIRECTIONS};
    use crate::logic::{apply_move, is_game_over, is_legal, legal_moves, would_flip};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    /// Plays random legal moves to the end, calling `check` before each one.
    fn random_playout(seed: u64, mut check: impl FnMut(&Board, Color, Move)) -> Board {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new();
        let mut color = Color::Black;
        let mut passes = 0;
        while passes < 2 {
            let moves = legal_moves(&board, color);
            match moves.choose(&mut rng) {
                Some(&mv) => {
                    check(&board, color, mv);
                    apply_move(&mut board, mv, color);
                    passes = 0;
                }
                None => passes += 1,
            }
            color = color.opponent();
        }
        board
    }

    /// Squares a move should flip, computed ray by ray.
    fn expected_flips(board: &Board, mv: Move, color: Color) -> Vec<usize> {
        let mut flips = Vec::new();
        for &dir in DIRECTIONS.iter() {
            if let Some(bracketer) = would_flip(board, mv, dir, color) {
                let mut sq = step(mv.index(), dir);
                while sq != bracketer {
                    flips.push(sq);
                    sq = step(sq, dir);
                }
            }
        }
        flips.sort_unstable();
        flips
    }

    #[test]
    fn test_flips_match_bracketed_runs() {
        for seed in 0..20 {
            random_playout(seed, |board, color, mv| {
                let expected = expected_flips(board, mv, color);
                assert!(!expected.is_empty(), "legal move {} flips nothing", mv);

                let mut after = *board;
                apply_move(&mut after, mv, color);
                let mut changed: Vec<usize> = Board::squares()
                    .filter(|&i| i != mv.index() && board.get(i) != after.get(i))
                    .collect();
                changed.sort_unstable();
                assert_eq!(changed, expected);
                for &sq in &changed {
                    assert_eq!(board.get(sq), color.opponent().cell());
                    assert_eq!(after.get(sq), color.cell());
                }
                assert_eq!(after.get(mv.index()), color.cell());
            });
        }
    }

    #[test]
    fn test_disc_counts_are_conserved() {
        for seed in 100..120 {
            random_playout(seed, |board, color, mv| {
                let flips = expected_flips(board, mv, color).len();
                let mut after = *board;
                apply_move(&mut after, mv, color);
                assert_eq!(after.count(color), board.count(color) + 1 + flips);
                assert_eq!(
                    after.count(color.opponent()),
                    board.count(color.opponent()) - flips
                );
                assert_eq!(after.empties() + 1, board.empties());
            });
        }
    }

    #[test]
    fn test_legal_moves_are_exactly_the_flipping_squares() {
        for seed in 200..210 {
            random_playout(seed, |board, color, _| {
                let legal = legal_moves(board, color);
                for sq in Board::squares() {
                    let mv = Move::new(sq).unwrap();
                    let flips = board.get(sq) == Cell::Empty
                        && !expected_flips(board, mv, color).is_empty();
                    assert_eq!(legal.contains(&mv), flips);
                    assert_eq!(is_legal(board, mv, color), flips);
                }
            });
        }
    }

    #[test]
    fn test_playouts_end_in_terminal_positions() {
        for seed in 300..330 {
            let mut placed = 0;
            let board = random_playout(seed, |_, _, _| placed += 1);
            assert!(is_game_over(&board));
            assert!(placed <= 60);
            assert_eq!(
                board.count(Color::Black) + board.count(Color::White) + board.empties(),
                64
            );
            // Border cells never change.
            assert!((0..100)
                .filter(|&i| !crate::logic::is_playable_square(i))
                .all(|i| board.get(i) == Cell::Outer));
        }
    }
}
