//! Placement of food and obstacles on free cells
//!
//! Every random placement goes through [`sample_until`], which retries a
//! random draw a bounded number of times and fails with
//! [`GameError::PlacementExhausted`] past the cap.

use rand::Rng;

use super::entity::{CellRect, Obstacle};
use super::error::{GameError, GameResult};
use super::grid::{Cell, Grid};
use super::snake::Snake;

/// Cells a new entity must not be placed on
#[derive(Debug, Clone, Copy)]
pub struct Exclusions<'a> {
    snake: &'a Snake,
    obstacles: &'a [Obstacle],
    reserved: &'a [Cell],
}

impl<'a> Exclusions<'a> {
    pub fn new(snake: &'a Snake, obstacles: &'a [Obstacle]) -> Self {
        Self {
            snake,
            obstacles,
            reserved: &[],
        }
    }

    /// Additionally exclude a set of reserved cells
    pub fn with_reserved(mut self, reserved: &'a [Cell]) -> Self {
        self.reserved = reserved;
        self
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.snake.occupies(cell)
            || self.obstacles.iter().any(|obstacle| obstacle.covers(cell))
            || self.reserved.contains(&cell)
    }
}

/// Draw samples until one is accepted, giving up after `max_attempts` draws
pub fn sample_until<T, R, S, A>(
    rng: &mut R,
    max_attempts: usize,
    mut sample: S,
    mut accept: A,
) -> GameResult<T>
where
    R: Rng + ?Sized,
    S: FnMut(&mut R) -> T,
    A: FnMut(&T) -> bool,
{
    for _ in 0..max_attempts {
        let candidate = sample(rng);
        if accept(&candidate) {
            return Ok(candidate);
        }
    }

    Err(GameError::PlacementExhausted {
        attempts: max_attempts,
    })
}

/// Pick a random cell of the grid that is not excluded
pub fn place_entity<R: Rng + ?Sized>(
    grid: &Grid,
    rng: &mut R,
    exclusions: &Exclusions<'_>,
    max_attempts: usize,
) -> GameResult<Cell> {
    sample_until(
        rng,
        max_attempts,
        |rng| grid.random_cell(rng),
        |cell| !exclusions.contains(*cell),
    )
}

/// Place `count` single-cell obstacles away from the snake and each other
pub fn random_obstacles<R: Rng + ?Sized>(
    grid: &Grid,
    rng: &mut R,
    snake: &Snake,
    count: usize,
    max_attempts: usize,
) -> GameResult<Vec<Obstacle>> {
    let mut obstacles = Vec::with_capacity(count);

    for _ in 0..count {
        let cell = place_entity(
            grid,
            rng,
            &Exclusions::new(snake, &obstacles),
            max_attempts,
        )?;
        obstacles.push(Obstacle::Cell(cell));
    }

    Ok(obstacles)
}

/// Four wall blocks of `thickness` cells lining the edge of the grid
///
/// The blocks do not overlap: top and bottom span the full width, left and
/// right fill the rows in between.
pub fn border_walls(grid: &Grid, thickness: u32) -> Vec<Obstacle> {
    let t = thickness as i32;
    let last_col = grid.columns() - 1;
    let last_row = grid.rows() - 1;

    [
        CellRect::new(Cell::new(0, 0), Cell::new(last_col, t - 1)),
        CellRect::new(Cell::new(0, last_row - t + 1), Cell::new(last_col, last_row)),
        CellRect::new(Cell::new(0, t), Cell::new(t - 1, last_row - t)),
        CellRect::new(Cell::new(last_col - t + 1, t), Cell::new(last_col, last_row - t)),
    ]
    .into_iter()
    .map(Obstacle::Block)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    #[test]
    fn test_placed_cell_avoids_exclusions() {
        let grid = Grid::new(100, 100, 20);
        let snake = Snake::new(Cell::new(2, 2), Direction::Right, 3);
        let obstacles = vec![Obstacle::Cell(Cell::new(4, 4))];
        let reserved = [Cell::new(0, 0)];
        let exclusions = Exclusions::new(&snake, &obstacles).with_reserved(&reserved);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..200 {
            let cell = place_entity(&grid, &mut rng, &exclusions, 1_000).unwrap();
            assert!(grid.contains(cell));
            assert!(!snake.occupies(cell));
            assert_ne!(cell, Cell::new(4, 4));
            assert_ne!(cell, Cell::new(0, 0));
        }
    }

    #[test]
    fn test_placement_exhausted_on_full_grid() {
        let grid = Grid::new(40, 20, 20);
        let snake = Snake::from_segments([Cell::new(0, 0), Cell::new(1, 0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let result = place_entity(&grid, &mut rng, &Exclusions::new(&snake, &[]), 50);

        assert_eq!(result, Err(GameError::PlacementExhausted { attempts: 50 }));
    }

    #[test]
    fn test_sample_until_counts_attempts() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut draws = 0;
        let result = sample_until(
            &mut rng,
            5,
            |_| {
                draws += 1;
                draws
            },
            |value| *value == 3,
        );
        assert_eq!(result, Ok(3));
    }

    #[test]
    fn test_random_obstacles_are_distinct_and_clear_of_snake() {
        let grid = Grid::new(800, 600, 20);
        let snake = Snake::new(grid.centre(), Direction::Right, 3);
        let mut rng = StdRng::seed_from_u64(42);

        let obstacles = random_obstacles(&grid, &mut rng, &snake, 10, 10_000).unwrap();

        assert_eq!(obstacles.len(), 10);
        let cells: HashSet<Cell> = obstacles.iter().flat_map(|o| o.cells()).collect();
        assert_eq!(cells.len(), 10);
        assert!(cells.iter().all(|cell| !snake.occupies(*cell)));
    }

    #[test]
    fn test_border_walls_line_the_edge() {
        let grid = Grid::new(800, 600, 20);
        let walls = border_walls(&grid, 1);

        let cells: Vec<Cell> = walls.iter().flat_map(|wall| wall.cells()).collect();
        let unique: HashSet<Cell> = cells.iter().copied().collect();
        assert_eq!(cells.len(), unique.len());
        assert_eq!(unique.len(), 2 * 40 + 2 * 28);

        for cell in grid.cells() {
            let on_edge = cell.col == 0 || cell.row == 0 || cell.col == 39 || cell.row == 29;
            assert_eq!(unique.contains(&cell), on_edge, "{:?}", cell);
        }
    }

    #[test]
    fn test_thick_border_walls() {
        let grid = Grid::new(200, 200, 20);
        let walls = border_walls(&grid, 2);
        let covered = grid
            .cells()
            .filter(|cell| walls.iter().any(|wall| wall.covers(*cell)))
            .count();
        // 10x10 grid minus the free 6x6 interior
        assert_eq!(covered, 100 - 36);
    }
}
