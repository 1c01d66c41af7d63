//! Game engine errors

use thiserror::Error;

/// Errors that can occur while setting up or advancing a game
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid game configuration: {0}")]
    InvalidConfig(String),

    #[error("No free cell found after {attempts} placement attempts")]
    PlacementExhausted { attempts: usize },

    #[error("A snake needs at least one segment")]
    EmptySnake,
}

pub type GameResult<T> = Result<T, GameError>;
