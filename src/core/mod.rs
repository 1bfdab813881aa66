pub mod board;
pub mod r#move;
pub mod serialization;
pub mod types;

pub use board::{Board, DIRECTIONS};
pub use r#move::{Action, Move, PASS};
pub use types::{Cell, Color};
