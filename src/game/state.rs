use super::config::Level;
use super::direction::Direction;
use super::entity::{Food, Obstacle};
use super::grid::{Cell, Grid};
use super::snake::Snake;

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Snake left the grid
    Wall,
    /// Snake hit an obstacle or a wall block
    Obstacle,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    /// Direction used by the last tick
    pub direction: Direction,
    /// Direction requested for the next tick
    pub pending_direction: Option<Direction>,
    pub food: Food,
    pub obstacles: Vec<Obstacle>,
    pub level: Level,
    pub score: u32,
    pub steps: u32,
    pub is_alive: bool,
    pub collision: Option<Collision>,
}

impl GameState {
    /// Create a new game state
    pub fn new(
        grid: Grid,
        snake: Snake,
        direction: Direction,
        food: Food,
        obstacles: Vec<Obstacle>,
    ) -> Self {
        Self {
            grid,
            snake,
            direction,
            pending_direction: None,
            food,
            obstacles,
            level: Level::One,
            score: 0,
            steps: 0,
            is_alive: true,
            collision: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        self.grid.contains(cell)
    }

    /// Check if a cell is covered by any obstacle
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.iter().any(|obstacle| obstacle.covers(cell))
    }

    /// Request a direction change for the next tick
    ///
    /// A request for the exact reverse of the current direction is rejected
    /// and leaves any earlier request in place.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Direction the next tick will move in
    pub fn heading(&self) -> Direction {
        self.pending_direction.unwrap_or(self.direction)
    }
}
