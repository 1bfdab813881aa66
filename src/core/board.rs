use super::types::{Cell, Color};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Padded grid width (8 playable columns plus a border on each side).
pub const WIDTH: usize = 10;
pub const BOARD_SIZE: usize = WIDTH * WIDTH;

/// First and last interior indices in row-major order.
pub const FIRST_SQUARE: usize = 11;
pub const LAST_SQUARE: usize = 88;

/// Grid-index deltas for the eight compass directions, in scan order.
pub const DIRECTIONS: [isize; 8] = [-11, -10, -9, -1, 1, 9, 10, 11];

pub fn is_playable(index: usize) -> bool {
    (FIRST_SQUARE..=LAST_SQUARE).contains(&index) && (1..=8).contains(&(index % WIDTH))
}

/// Steps one square in `dir`. Callers only step from squares whose neighbours
/// exist, which the sentinel border guarantees for every interior square.
#[inline]
pub fn step(index: usize, dir: isize) -> usize {
    index.wrapping_add_signed(dir)
}

/// 盤面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "crate::core::serialization")]
    cells: [Cell; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Starting position: two discs of each colour in the centre.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.cells[44] = Cell::White;
        board.cells[45] = Cell::Black;
        board.cells[54] = Cell::Black;
        board.cells[55] = Cell::White;
        board
    }

    /// Sentinel border with an empty interior.
    pub fn empty() -> Self {
        let mut cells = [Cell::Outer; BOARD_SIZE];
        for (i, cell) in cells.iter_mut().enumerate() {
            if is_playable(i) {
                *cell = Cell::Empty;
            }
        }
        Board { cells }
    }

    /// Builds a board from eight rows of `.`, `b`, `w`. Used by tests and
    /// diagnostics; unknown glyphs become empty squares.
    pub fn from_rows(rows: &[&str; 8]) -> Self {
        let mut board = Self::empty();
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().take(8).enumerate() {
                board.cells[10 * (r + 1) + c + 1] = match ch {
                    'b' | 'B' => Cell::Black,
                    'w' | 'W' => Cell::White,
                    _ => Cell::Empty,
                };
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Interior squares only; the border is read-only after construction.
    pub fn set(&mut self, index: usize, cell: Cell) {
        debug_assert!(is_playable(index) && cell != Cell::Outer);
        self.cells[index] = cell;
    }

    /// Interior indices in row-major order.
    pub fn squares() -> impl Iterator<Item = usize> {
        (FIRST_SQUARE..=LAST_SQUARE).filter(|&i| is_playable(i))
    }

    pub fn count(&self, color: Color) -> usize {
        Self::squares().filter(|&i| self.cells[i].is(color)).count()
    }

    pub fn empties(&self) -> usize {
        Self::squares().filter(|&i| self.cells[i] == Cell::Empty).count()
    }

    pub fn is_full(&self) -> bool {
        self.empties() == 0
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "   1 2 3 4 5 6 7 8 [{}={} {}={}]",
            Cell::Black.glyph(),
            self.count(Color::Black),
            Cell::White.glyph(),
            self.count(Color::White)
        )?;
        for row in 1..=8 {
            write!(f, "{}  ", row)?;
            for col in 1..=8 {
                write!(f, "{} ", self.cells[col + WIDTH * row].glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
