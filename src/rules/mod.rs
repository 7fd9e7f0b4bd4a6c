//! Board engine trait for game implementations.
//!
//! Games implement `BoardEngine` to define:
//! - The starting position
//! - Which moves are legal and what they capture
//! - When a move ends the game
//!
//! The registry calls into `BoardEngine` but never interprets the board
//! directly.

pub mod engine;

pub use engine::{BoardEngine, IllegalMove, MoveOutcome};
