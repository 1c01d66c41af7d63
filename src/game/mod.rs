//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal modes drive it one tick at a time.

pub mod config;
pub mod direction;
pub mod engine;
pub mod entity;
pub mod error;
pub mod grid;
pub mod placement;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use config::{GameConfig, Level, MAX_SCREEN_SIDE, MIN_CELL_SIZE, Rules};
pub use direction::Direction;
pub use engine::{GameEngine, SoundCue, TickOutcome};
pub use entity::{CellRect, Food, Obstacle};
pub use error::{GameError, GameResult};
pub use grid::{Cell, Grid};
pub use snake::Snake;
pub use state::{Collision, GameState};
