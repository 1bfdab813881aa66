use crate::core::{Action, Board, Color};

/// プレイヤー操作のtrait
pub trait PlayerController: Send {
    /// Picks an action for `color` on `board`; `Action::Pass` only when
    /// `color` has no legal move.
    fn choose_move(&mut self, board: &Board, color: Color) -> anyhow::Result<Action>;
    fn name(&self) -> &str;
}
