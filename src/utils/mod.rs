//! # Utilities Module
//!
//! Graph algorithms and grid pathfinding shared by generation and gameplay.

pub mod graph;
pub mod pathfinding;

pub use graph::*;
pub use pathfinding::*;
