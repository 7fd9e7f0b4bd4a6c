//! Standard 8x8 checkers as a `BoardEngine`.
//!
//! Rules implemented:
//! - Black moves first; men step one square diagonally forward
//! - A jump over an adjacent opponent piece captures it (one jump per move)
//! - A man reaching the far row becomes a king and may move backwards
//! - A player with no pieces or no legal move has lost
//!
//! Captures are not mandatory and multi-jumps are played as separate moves.

mod board;

pub use board::{Board, Piece, BOARD_SIZE, INITIAL_BOARD};

use crate::core::{Color, Pos};
use crate::rules::{BoardEngine, IllegalMove, MoveOutcome};

/// Checkers rules. Stateless: the board travels in the game record.
#[derive(Clone, Copy, Debug, Default)]
pub struct Checkers;

impl Checkers {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BoardEngine for Checkers {
    fn initial_board(&self) -> String {
        INITIAL_BOARD.to_string()
    }

    fn apply_move(
        &self,
        board: &str,
        from: Pos,
        to: Pos,
        mover: Color,
    ) -> Result<MoveOutcome, IllegalMove> {
        let mut parsed = Board::parse(board)?;
        parsed.play(from, to, mover)
    }
}
