//! Arcade Snake - a grid-based Snake game for the terminal
//!
//! This library provides:
//! - Core game logic (game module): grid, snake, placement, rules engine
//! - Menu and pause state machine (session module)
//! - TUI rendering and input mapping (render, input modules)
//! - Arcade and classic game loops (modes module)

pub mod config_file;
pub mod game;
pub mod input;
pub mod logger;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
