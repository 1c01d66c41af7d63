use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::direction::Direction;

/// A cell on the game grid
///
/// Coordinates are signed so a candidate head one step past the edge can be
/// represented and rejected by the bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }

    /// The neighbouring cell in a direction
    pub fn neighbour(&self, direction: Direction) -> Self {
        let (dcol, drow) = direction.delta();
        self.moved_by(dcol, drow)
    }
}

/// Discretization of the pixel screen into square cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    columns: i32,
    rows: i32,
    cell_size: i32,
}

impl Grid {
    /// Grid for a screen of `width x height` pixels split into `cell_size` cells
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        Self {
            columns: (width / cell_size) as i32,
            rows: (height / cell_size) as i32,
            cell_size: cell_size as i32,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.screen_width, config.screen_height, config.cell_size)
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        (self.columns * self.rows) as usize
    }

    /// Check if a cell is within the grid bounds
    pub fn contains(&self, cell: Cell) -> bool {
        cell.col >= 0 && cell.col < self.columns && cell.row >= 0 && cell.row < self.rows
    }

    /// Cell covering the given pixel; pixels left of or above the screen map to
    /// negative coordinates
    pub fn cell_at_pixel(&self, x: i32, y: i32) -> Cell {
        Cell::new(x.div_euclid(self.cell_size), y.div_euclid(self.cell_size))
    }

    /// Top-left pixel of a cell
    pub fn pixel_of(&self, cell: Cell) -> (i32, i32) {
        (cell.col * self.cell_size, cell.row * self.cell_size)
    }

    /// The cell containing the screen centre
    pub fn centre(&self) -> Cell {
        Cell::new(self.columns / 2, self.rows / 2)
    }

    /// Uniformly random cell inside the grid
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(
            rng.gen_range(0..self.columns),
            rng.gen_range(0..self.rows),
        )
    }

    /// Iterate over every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.columns).map(move |col| Cell::new(col, row)))
    }
}
