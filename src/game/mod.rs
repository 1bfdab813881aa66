use crate::core::{Action, Board, Color};
use crate::error::EngineError;
use crate::logic::{has_legal_move, try_apply_move};
use crate::player::PlayerController;
use serde::{Deserialize, Serialize};

/// Referee-side game state.
#[derive(Debug, Clone)]
pub struct Game {
    pub board: Board,
    pub current_player: Color,
    pub history: Vec<Action>,
    consecutive_passes: u8,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Board::new())
    }
}

impl Game {
    pub fn new(board: Board) -> Self {
        Game {
            board,
            current_player: Color::Black,
            history: Vec::new(),
            consecutive_passes: 0,
        }
    }

    /// Plays `action` for the side to move. A pass is only legal when that
    /// side has no move.
    pub fn play(&mut self, action: Action) -> Result<(), EngineError> {
        let color = self.current_player;
        match action {
            Action::Play(mv) => {
                try_apply_move(&mut self.board, mv, color)?;
                self.consecutive_passes = 0;
            }
            Action::Pass => {
                if has_legal_move(&self.board, color) {
                    return Err(EngineError::ProtocolViolation(format!(
                        "{} passed with legal moves available",
                        color
                    )));
                }
                self.consecutive_passes += 1;
            }
        }
        self.history.push(action);
        self.current_player = color.opponent();
        Ok(())
    }

    pub fn is_over(&self) -> bool {
        self.consecutive_passes >= 2 || self.board.is_full()
    }

    /// Side with more discs, `None` on a draw.
    pub fn leader(&self) -> Option<Color> {
        let black = self.board.count(Color::Black);
        let white = self.board.count(Color::White);
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn summary(&self, forfeit: Option<(Color, String)>) -> GameSummary {
        let winner = match &forfeit {
            Some((loser, _)) => Some(loser.opponent()),
            None => self.leader(),
        };
        GameSummary {
            winner,
            black_discs: self.board.count(Color::Black),
            white_discs: self.board.count(Color::White),
            moves: self.history.iter().map(|a| a.to_notation()).collect(),
            forfeit: forfeit.map(|(loser, reason)| format!("{} forfeits: {}", loser, reason)),
            final_board: self.board,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    pub winner: Option<Color>,
    pub black_discs: usize,
    pub white_discs: usize,
    pub moves: Vec<String>,
    pub forfeit: Option<String>,
    pub final_board: Board,
}

/// Plays a whole game between two local controllers. A controller that
/// errors or returns an illegal action forfeits.
pub fn play_local(
    black: &mut dyn PlayerController,
    white: &mut dyn PlayerController,
) -> GameSummary {
    let mut game = Game::default();
    while !game.is_over() {
        let color = game.current_player;
        let controller: &mut dyn PlayerController = match color {
            Color::Black => &mut *black,
            Color::White => &mut *white,
        };
        let action = match controller.choose_move(&game.board, color) {
            Ok(action) => action,
            Err(e) => return game.summary(Some((color, e.to_string()))),
        };
        log::debug!("{} ({}) plays {}", controller.name(), color, action);
        if let Err(e) = game.play(action) {
            return game.summary(Some((color, e.to_string())));
        }
    }
    game.summary(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Scheduler;
    use crate::core::Move;
    use crate::player::ai::SearchConfig;
    use crate::player::RandomAI;

    #[test]
    fn test_pass_with_moves_is_rejected() {
        let mut game = Game::default();
        assert!(game.play(Action::Pass).is_err());
        assert!(game.history.is_empty());
        game.play(Action::Play(Move::from_notation("23").unwrap()))
            .unwrap();
        assert_eq!(game.current_player, Color::White);
    }

    #[test]
    fn test_two_passes_end_game() {
        let board = Board::from_rows(&[
            "bb......", "........", "........", "........", "........", "........",
            "........", "........",
        ]);
        let mut game = Game::new(board);
        game.play(Action::Pass).unwrap();
        assert!(!game.is_over());
        game.play(Action::Pass).unwrap();
        assert!(game.is_over());
        let summary = game.summary(None);
        assert_eq!(summary.winner, Some(Color::Black));
        assert_eq!(summary.moves, vec!["pass", "pass"]);
    }

    #[test]
    fn test_random_vs_random_finishes() {
        let mut a = RandomAI::with_seed("a", 11);
        let mut b = RandomAI::with_seed("b", 12);
        let summary = play_local(&mut a, &mut b);
        assert!(summary.forfeit.is_none());
        assert!(summary.black_discs + summary.white_discs <= 64);
        assert!(summary.moves.len() >= 9);
    }

    #[test]
    fn test_engine_plays_only_legal_moves() {
        let config = SearchConfig {
            depth_cap: Some(1),
            ..SearchConfig::default()
        };
        let mut engine = Scheduler::new(2, config);
        let mut random = RandomAI::with_seed("r", 5);
        let summary = play_local(&mut engine, &mut random);
        assert!(summary.forfeit.is_none(), "{:?}", summary.forfeit);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"moves\""));
    }
}
