// Built-in map and the plain-text map format.
//
//   # comment
//   11111
//   10201
//   11111
//
// One line per row, one digit per cell. Spaces and commas between cells
// are ignored, so `1, 0, 0, 1` works as well.

use super::grid::{Grid, GridError, Material};

pub const DEFAULT_TILE_SIZE: f32 = 64.0;

const ROWS: usize = 13;
const COLS: usize = 20;

#[rustfmt::skip]
pub const DEFAULT_MAP: [[Material; COLS]; ROWS] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 2, 0, 3, 0, 4, 0, 2, 0, 3, 0, 4, 0, 2, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 3, 3, 3, 3, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

impl Grid {
    /// The built-in 20×13 level at the default tile size.
    pub fn default_map() -> Self {
        Self::from_rows(&DEFAULT_MAP, DEFAULT_TILE_SIZE).expect("built-in map is rectangular")
    }

    /// Parse the text format described at the top of this file.
    pub fn parse(text: &str, tile_size: f32) -> Result<Self, GridError> {
        let mut rows: Vec<Vec<Material>> = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let row = rows.len();
            let mut cells = Vec::with_capacity(line.len());
            for ch in line.chars().filter(|c| !c.is_whitespace() && *c != ',') {
                let m = ch.to_digit(10).ok_or(GridError::BadCell {
                    row,
                    col: cells.len(),
                    ch,
                })?;
                cells.push(m as Material);
            }
            rows.push(cells);
        }

        Self::from_rows(&rows, tile_size)
    }
}
