//! Detective Quest: The Manor Mystery
//!
//! A single-player deduction game: walk the rooms of a manor, collect the
//! clues you stumble upon, and accuse the culprit once you think you have
//! enough on them.
//!
//! # Game Mechanics
//!
//! - **Exploration**: Descend through the manor one room at a time, left or right
//! - **Clues**: Every room may hide one clue, catalogued alphabetically
//! - **Accusation**: A suspect is convicted with at least two clues against them
//!
//! # Architecture
//!
//! - `data` - Room tree, clue catalog, suspect index, scenario datasets
//! - `game` - Session state, navigation controller, accusation evaluator
//! - `tui` - Terminal user interface with ratatui
//! - `config` - Settings file and environment overrides

pub mod config;
pub mod data;
pub mod game;
pub mod tui;

pub use data::*;
pub use game::Game;

/// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the game
pub type Result<T> = anyhow::Result<T>;

/// Custom error types
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Invalid game state: {0}")]
    InvalidState(String),

    #[error("Suspect index needs at least one bucket")]
    EmptyBucketTable,

    #[error("Allocation failed while building {0}")]
    AllocationFailed(&'static str),
}
