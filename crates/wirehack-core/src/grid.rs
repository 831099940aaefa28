use crate::tile::{Tile, TileShape};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned by bounds-checked grid and controller operations.
///
/// Out-of-range input ultimately originates from player-facing UI, so it is
/// reported rather than panicking; callers treat it as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    /// A (row, column) pair outside the grid.
    Cell { row: usize, col: usize },
    /// A flat option index outside the puzzle.
    Option { index: usize },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::Cell { row, col } => {
                write!(f, "cell ({}, {}) is outside the grid", row, col)
            }
            IndexError::Option { index } => {
                write!(f, "option index {} is outside the puzzle", index)
            }
        }
    }
}

impl std::error::Error for IndexError {}

/// Fixed-size row-major tile storage for one wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    rows: usize,
    columns: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create a grid filled with horizontal straights.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            tiles: vec![Tile::default(); rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    /// Flattened index of a cell: `row * columns + col`.
    pub fn flat_index(&self, row: usize, col: usize) -> usize {
        row * self.columns + col
    }

    fn check(&self, row: usize, col: usize) -> Result<usize, IndexError> {
        if row < self.rows && col < self.columns {
            Ok(self.flat_index(row, col))
        } else {
            debug!(
                "rejected access to ({}, {}) in a {}x{} grid",
                row, col, self.rows, self.columns
            );
            Err(IndexError::Cell { row, col })
        }
    }

    /// Fetch a tile, bounds-checked.
    pub fn get(&self, row: usize, col: usize) -> Result<Tile, IndexError> {
        self.check(row, col).map(|idx| self.tiles[idx])
    }

    /// Replace a tile's shape, bounds-checked.
    pub fn set_shape(&mut self, row: usize, col: usize, shape: TileShape) -> Result<(), IndexError> {
        let idx = self.check(row, col)?;
        self.tiles[idx].set_shape(shape);
        Ok(())
    }

    /// Replace a tile's rotation (reduced mod 4), bounds-checked.
    pub fn set_rotation(&mut self, row: usize, col: usize, rotation: u8) -> Result<(), IndexError> {
        let idx = self.check(row, col)?;
        self.tiles[idx].set_rotation(rotation);
        Ok(())
    }

    /// Fetch a tile without bounds checking. Internal callers stay inside
    /// the grid by construction.
    pub(crate) fn tile_unchecked(&self, row: usize, col: usize) -> Tile {
        self.tiles[row * self.columns + col]
    }

    /// Overwrite a tile without bounds checking.
    pub(crate) fn set_unchecked(&mut self, row: usize, col: usize, tile: Tile) {
        let idx = row * self.columns + col;
        self.tiles[idx] = tile;
    }

    pub(crate) fn tile_mut_unchecked(&mut self, row: usize, col: usize) -> &mut Tile {
        let idx = row * self.columns + col;
        &mut self.tiles[idx]
    }

    pub(crate) fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }
}

/// One wire of a puzzle: a grid plus its cached lit mask, the pristine
/// reference assignment captured after generation, and the sabotage counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire {
    grid: TileGrid,
    lit: Vec<bool>,
    reference: Vec<Tile>,
    mistakes: u32,
}

impl Wire {
    pub(crate) fn new(rows: usize, columns: usize) -> Self {
        let grid = TileGrid::new(rows, columns);
        let lit = vec![false; grid.cell_count()];
        Self {
            grid,
            lit,
            reference: Vec::new(),
            mistakes: 0,
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    /// Whether the tile at (row, col) is reachable from the entry edge.
    pub fn is_lit(&self, row: usize, col: usize) -> Result<bool, IndexError> {
        if row < self.grid.rows() && col < self.grid.columns() {
            Ok(self.lit[self.grid.flat_index(row, col)])
        } else {
            debug!(
                "rejected lit query for ({}, {}) in a {}x{} grid",
                row,
                col,
                self.grid.rows(),
                self.grid.columns()
            );
            Err(IndexError::Cell { row, col })
        }
    }

    /// The reference (solved) tile at (row, col), captured before jumbling.
    pub fn reference(&self, row: usize, col: usize) -> Result<Tile, IndexError> {
        if row < self.grid.rows() && col < self.grid.columns() && !self.reference.is_empty() {
            Ok(self.reference[self.grid.flat_index(row, col)])
        } else {
            Err(IndexError::Cell { row, col })
        }
    }

    /// Number of on-path tiles deliberately mis-rotated by the last jumble.
    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub(crate) fn lit_unchecked(&self, row: usize, col: usize) -> bool {
        self.lit[self.grid.flat_index(row, col)]
    }

    pub(crate) fn lit_mask(&self) -> &[bool] {
        &self.lit
    }

    pub(crate) fn set_lit_mask(&mut self, lit: Vec<bool>) {
        debug_assert_eq!(lit.len(), self.grid.cell_count());
        self.lit = lit;
    }

    pub(crate) fn add_mistake(&mut self) {
        self.mistakes += 1;
    }

    pub(crate) fn reset_mistakes(&mut self) {
        self.mistakes = 0;
    }

    /// Snapshot the current assignment as the wire's reference state.
    pub(crate) fn capture_reference(&mut self) {
        self.reference = self.grid.tiles().to_vec();
    }

    /// Restore the reference assignment and clear lit/mistake state.
    pub(crate) fn restore_reference(&mut self) {
        if self.reference.is_empty() {
            return;
        }
        self.grid.tiles_mut().copy_from_slice(&self.reference);
        self.lit.fill(false);
        self.mistakes = 0;
    }
}
