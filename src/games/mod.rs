//! Reference game implementations.
//!
//! - `checkers`: standard 8x8 checkers, the engine the registry ships with

pub mod checkers;
