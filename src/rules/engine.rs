//! Board engine trait for game implementations.
//!
//! The registry never interprets a board. It hands the serialized board,
//! the move and the mover's colour to a `BoardEngine` and stores whatever
//! comes back.

use thiserror::Error;

use crate::core::{Color, Pos};

/// Why a move was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("position {0} is off the board")]
    OffBoard(Pos),

    #[error("no piece at {0}")]
    NoPiece(Pos),

    #[error("piece at {pos} belongs to {owner}, not {mover}")]
    NotYourPiece { pos: Pos, owner: Color, mover: Color },

    #[error("destination {0} is occupied")]
    Occupied(Pos),

    #[error("{from} to {to} is not a legal step or jump")]
    InvalidStep { from: Pos, to: Pos },

    #[error("board does not parse: {0}")]
    BadBoard(String),
}

/// Result of an accepted move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Serialized board after the move.
    pub board: String,
    /// Square of the captured piece, if the move was a jump.
    pub captured: Option<Pos>,
    /// Set when the move ended the game.
    pub winner: Option<Color>,
}

/// Board engine trait.
///
/// ## Implementation Notes
///
/// - `apply_move` must be a pure function of its inputs: the registry
///   replays it on dry runs and relies on identical results.
/// - Turn order is enforced by the registry, not the engine.
pub trait BoardEngine {
    /// Serialized starting position.
    fn initial_board(&self) -> String;

    /// Validate `from -> to` for `mover` on `board` and return the result.
    fn apply_move(
        &self,
        board: &str,
        from: Pos,
        to: Pos,
        mover: Color,
    ) -> Result<MoveOutcome, IllegalMove>;
}
