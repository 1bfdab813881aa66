//! Board cells as a 100-character glyph string (`?` border, `.bw` interior).
//! serde has no impls for arrays this long.

use super::board::{is_playable, BOARD_SIZE};
use super::types::Cell;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(cells: &[Cell; BOARD_SIZE], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let text: String = cells.iter().map(|c| c.glyph()).collect();
    serializer.serialize_str(&text)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<[Cell; BOARD_SIZE], D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    if text.chars().count() != BOARD_SIZE {
        return Err(D::Error::custom(format!(
            "expected {} cells, got {}",
            BOARD_SIZE,
            text.chars().count()
        )));
    }

    let mut cells = [Cell::Outer; BOARD_SIZE];
    for (i, ch) in text.chars().enumerate() {
        let cell = match ch {
            '.' => Cell::Empty,
            'b' => Cell::Black,
            'w' => Cell::White,
            '?' => Cell::Outer,
            other => return Err(D::Error::custom(format!("bad cell glyph {:?}", other))),
        };
        if is_playable(i) == (cell == Cell::Outer) {
            return Err(D::Error::custom(format!("cell {} breaks the border layout", i)));
        }
        cells[i] = cell;
    }
    Ok(cells)
}
