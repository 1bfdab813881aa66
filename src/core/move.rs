use super::board::is_playable;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal the arbiter uses for a pass in both directions.
pub const PASS: &str = "pass";

/// A square on the padded 10x10 grid, always inside the 8x8 region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move(usize);

impl Move {
    pub fn new(index: usize) -> Result<Self, EngineError> {
        if is_playable(index) {
            Ok(Move(index))
        } else {
            Err(EngineError::OffBoard(index))
        }
    }

    /// Only for indices already known to be interior (board scans).
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(is_playable(index));
        Move(index)
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// 0-based (row, col) inside the 8x8 region.
    pub fn row_col(self) -> (usize, usize) {
        (self.0 / 10 - 1, self.0 % 10 - 1)
    }

    pub fn from_row_col(row: usize, col: usize) -> Result<Self, EngineError> {
        if row > 7 || col > 7 {
            return Err(EngineError::BadNotation(format!("{}{}", row, col)));
        }
        Move::new(10 * (row + 1) + col + 1)
    }

    /// Two-digit "rc" string understood by the arbiter.
    pub fn to_notation(self) -> String {
        let (row, col) = self.row_col();
        format!("{}{}", row, col)
    }

    pub fn from_notation(s: &str) -> Result<Self, EngineError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(EngineError::BadNotation(s.to_string()));
        }
        let row = (bytes[0] - b'0') as usize;
        let col = (bytes[1] - b'0') as usize;
        Move::from_row_col(row, col).map_err(|_| EngineError::BadNotation(s.to_string()))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

/// 指し手 or パス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Play(Move),
    Pass,
}

impl Action {
    pub fn to_notation(self) -> String {
        match self {
            Action::Play(mv) => mv.to_notation(),
            Action::Pass => PASS.to_string(),
        }
    }

    pub fn from_notation(s: &str) -> Result<Self, EngineError> {
        if s == PASS {
            Ok(Action::Pass)
        } else {
            Move::from_notation(s).map(Action::Play)
        }
    }

    pub fn as_move(self) -> Option<Move> {
        match self {
            Action::Play(mv) => Some(mv),
            Action::Pass => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notation_matches_grid() {
        let corner = Move::new(11).unwrap();
        assert_eq!(corner.to_notation(), "00");
        let far = Move::new(88).unwrap();
        assert_eq!(far.to_notation(), "77");
        assert_eq!(Move::from_notation("23").unwrap().index(), 34);
        assert_eq!(Move::from_notation("54").unwrap().index(), 65);
    }

    #[test]
    fn test_rejects_border_and_garbage() {
        assert_eq!(Move::new(10), Err(EngineError::OffBoard(10)));
        assert_eq!(Move::new(19), Err(EngineError::OffBoard(19)));
        assert_eq!(Move::new(250), Err(EngineError::OffBoard(250)));
        assert!(Move::from_notation("8a").is_err());
        assert!(Move::from_notation("08").is_err());
        assert!(Move::from_notation("123").is_err());
    }

    #[test]
    fn test_action_pass_literal() {
        assert_eq!(Action::from_notation("pass"), Ok(Action::Pass));
        assert_eq!(Action::Pass.to_notation(), "pass");
        let mv = Move::from_notation("45").unwrap();
        assert_eq!(Action::from_notation("45"), Ok(Action::Play(mv)));
        assert_eq!(Action::Play(mv).as_move(), Some(mv));
    }
}
