use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 手番の色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black, // 先手, wire value 1
    White, // 後手, wire value 2
}

impl Default for Color {
    fn default() -> Self {
        Color::Black
    }
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Decodes the colour byte sent by the arbiter (1 = black, 2 = white).
    pub fn from_wire(value: u8) -> Result<Color, EngineError> {
        match value {
            1 => Ok(Color::Black),
            2 => Ok(Color::White),
            other => Err(EngineError::InvalidPlayer(other)),
        }
    }

    pub fn to_wire(self) -> u8 {
        match self {
            Color::Black => 1,
            Color::White => 2,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// 盤面のマス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Black,
    White,
    /// Border square around the 8x8 region; never playable.
    Outer,
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl Cell {
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Black => 'b',
            Cell::White => 'w',
            Cell::Outer => '?',
        }
    }

    pub fn is(self, color: Color) -> bool {
        self == color.cell()
    }
}
