//! Food and obstacles placed on the grid

use super::grid::Cell;

/// A food item on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub cell: Cell,
    /// Bonus food is worth more points and has its own sound and glyph
    pub bonus: bool,
}

impl Food {
    pub fn regular(cell: Cell) -> Self {
        Self { cell, bonus: false }
    }

    pub fn bonus(cell: Cell) -> Self {
        Self { cell, bonus: true }
    }

    /// Check if a cell matches the food position
    pub fn is_at(&self, cell: Cell) -> bool {
        self.cell == cell
    }
}

/// Axis-aligned block of cells, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub min: Cell,
    pub max: Cell,
}

impl CellRect {
    pub fn new(min: Cell, max: Cell) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.col >= self.min.col
            && cell.col <= self.max.col
            && cell.row >= self.min.row
            && cell.row <= self.max.row
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.min.row..=self.max.row)
            .flat_map(move |row| (self.min.col..=self.max.col).map(move |col| Cell::new(col, row)))
    }
}

/// Something the snake must not run into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstacle {
    /// A single randomly placed cell
    Cell(Cell),
    /// A rectangular wall section
    Block(CellRect),
}

impl Obstacle {
    /// Check if the obstacle covers a cell
    pub fn covers(&self, cell: Cell) -> bool {
        match self {
            Obstacle::Cell(own) => *own == cell,
            Obstacle::Block(rect) => rect.contains(cell),
        }
    }

    /// Every cell the obstacle covers
    pub fn cells(&self) -> Vec<Cell> {
        match self {
            Obstacle::Cell(own) => vec![*own],
            Obstacle::Block(rect) => rect.cells().collect(),
        }
    }
}
