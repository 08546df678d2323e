use glam::{Vec2, vec2};
use thiserror::Error;

/// Cell code: 0 = walkable, anything else selects a wall texture.
pub type Material = u8;

/// The one passable cell code.
pub const EMPTY: Material = 0;

/// Things that can go wrong when building a grid.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid must have at least one row and one column")]
    Empty,

    #[error("grid is {rows}x{cols} but {found} cells were supplied")]
    CellCount {
        rows: usize,
        cols: usize,
        found: usize,
    },

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unexpected character `{ch}` at row {row}, column {col}")]
    BadCell { row: usize, col: usize, ch: char },

    #[error("tile size must be positive and finite, got {0}")]
    BadTileSize(f32),
}

/// Immutable tile map, row-major (`cells[row * cols + col]`).
///
/// World space spans `[0, cols·tile) × [0, rows·tile)` with +y pointing
/// *down* the map (row index grows with y). Everything outside that box
/// is solid.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tile_size: f32,
    cells: Vec<Material>,
}

impl Grid {
    /// Build a grid from a flat row-major cell vector.
    pub fn new(
        rows: usize,
        cols: usize,
        tile_size: f32,
        cells: Vec<Material>,
    ) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(GridError::BadTileSize(tile_size));
        }
        if cells.len() != rows * cols {
            return Err(GridError::CellCount {
                rows,
                cols,
                found: cells.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            tile_size,
            cells,
        })
    }

    /// Build a grid from nested rows; every row must have the same length.
    pub fn from_rows<R: AsRef<[Material]>>(rows: &[R], tile_size: f32) -> Result<Self, GridError> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != cols {
                return Err(GridError::Ragged {
                    row,
                    expected: cols,
                    found: r.len(),
                });
            }
            cells.extend_from_slice(r);
        }
        Self::new(rows.len(), cols, tile_size, cells)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// World extent along x.
    #[inline]
    pub fn width(&self) -> f32 {
        self.cols as f32 * self.tile_size
    }

    /// World extent along y.
    #[inline]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Centre of the world box.
    pub fn centre(&self) -> Vec2 {
        vec2(self.width(), self.height()) * 0.5
    }

    /// True when `p` lies inside the half-open world box. NaN is outside.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x < self.width() && p.y >= 0.0 && p.y < self.height()
    }

    /// Cell code at `(row, col)`, `None` past the edges.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Option<Material> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// `(row, col)` of the cell holding world point `p`.
    pub fn cell_of(&self, p: Vec2) -> Option<(usize, usize)> {
        if !self.contains(p) {
            return None;
        }
        let col = (p.x / self.tile_size).floor() as usize;
        let row = (p.y / self.tile_size).floor() as usize;
        // f32 rounding can land exactly on the far edge
        Some((row.min(self.rows - 1), col.min(self.cols - 1)))
    }

    /// Material under world point `p`; `None` outside the world box.
    pub fn material_at(&self, p: Vec2) -> Option<Material> {
        self.cell_of(p)
            .and_then(|(row, col)| self.cell(row, col))
    }

    /// Solid test used by both the caster and the collision check.
    /// Out of bounds counts as solid.
    #[inline]
    pub fn is_wall_at(&self, p: Vec2) -> bool {
        self.material_at(p).is_none_or(|m| m != EMPTY)
    }

    /// Every cell as `(row, col, material)`, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Material)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &m)| (i / self.cols, i % self.cols, m))
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
