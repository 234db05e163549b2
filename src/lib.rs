//! # Delve
//!
//! Procedural dungeon floors for a tile-based, turn-based roguelike.
//!
//! ## Architecture Overview
//!
//! The crate is the algorithmic core of the game. Rendering, inventory, and
//! content files live elsewhere and only consume what this crate produces:
//!
//! - **Generation**: rooms are laid out on a fixed grid, linked into a weighted
//!   room graph, carved into corridors with doors, and given a stairs block in
//!   the room furthest from the start.
//! - **Floor**: the dungeon-level object owning the tile grid, rooms, doors,
//!   and room graph for one depth.
//! - **Turns**: a round-robin scheduler hands each enemy one decision per game
//!   turn; an adaptive policy maps depth to an intelligence tier, and a grid
//!   BFS supplies the next step toward the player.
//!
//! Every source of randomness is an explicit `StdRng`, so a seed fully
//! determines a floor.

pub mod game;
pub mod generation;
pub mod utils;

pub use game::*;
pub use generation::*;
pub use utils::*;

/// Core error type for the Delve engine.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration violates a generation precondition
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Floor state is invalid
    #[error("Invalid floor state: {0}")]
    InvalidState(String),

    /// Generation produced a floor that fails validation
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Floor layout constants.
pub mod config {
    /// Default grid width in tiles
    pub const DEFAULT_GRID_WIDTH: u32 = 25;

    /// Default grid height in tiles
    pub const DEFAULT_GRID_HEIGHT: u32 = 18;

    /// Default number of rooms per floor
    pub const DEFAULT_ROOM_COUNT: usize = 8;

    /// Smallest side a room may have, before and after clamping
    pub const MIN_ROOM_SIDE: u32 = 3;

    /// Minimum Manhattan distance between the player and a fresh spawn
    pub const SAFE_SPAWN_DISTANCE: u32 = 3;
}
