use std::collections::VecDeque;

use super::direction::Direction;
use super::error::{GameError, GameResult};
use super::grid::Cell;

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: VecDeque<Cell>,
}

impl Snake {
    /// Create a snake with its head at `head` and the rest of the body
    /// trailing behind it, opposite to `direction`
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let (dcol, drow) = direction.reversed().delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(dcol * i, drow * i))
            .collect();

        Self { body }
    }

    /// Create a snake from explicit segments, head first
    pub fn from_segments(segments: impl IntoIterator<Item = Cell>) -> GameResult<Self> {
        let body: VecDeque<Cell> = segments.into_iter().collect();
        if body.is_empty() {
            return Err(GameError::EmptySnake);
        }
        Ok(Self { body })
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Candidate head one cell ahead in `direction`; does not move the snake
    pub fn step(&self, direction: Direction) -> Cell {
        self.head().neighbour(direction)
    }

    /// Prepend `new_head`, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);

        if !grow {
            self.body.pop_back();
        }
    }

    /// Check if any segment, head included, is on `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Check if any segment behind the head is on `cell`
    pub fn occupies_body(&self, cell: Cell) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == cell)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
