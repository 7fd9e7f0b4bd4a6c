//! Error type surfaced by registry transitions.
//!
//! A transition that returns an error has not mutated anything: the store
//! snapshot is discarded and any applied transfer has been reversed.

use thiserror::Error;

use super::ids::{AccountId, Coin, GameId};
use crate::escrow::LedgerError;
use crate::rules::IllegalMove;
use crate::store::StoreError;

/// Errors returned by create, move and reject.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No active game has this id.
    #[error("game not found: {id}")]
    NotFound {
        /// The id as submitted.
        id: String,
    },

    /// The caller is not a player of this game.
    #[error("{caller} is not a player of game {game}")]
    Unauthorized {
        caller: AccountId,
        game: GameId,
    },

    /// The game is in a state that does not allow this transition.
    #[error("invalid transition on game {game}: {reason}")]
    InvalidTransition {
        game: GameId,
        reason: String,
    },

    /// The board engine refused the move.
    #[error("illegal move in game {game}: {source}")]
    IllegalMove {
        game: GameId,
        #[source]
        source: IllegalMove,
    },

    /// A required transfer was refused for lack of funds.
    #[error("insufficient funds: {account} needs {needed}, has {available}")]
    InsufficientFunds {
        account: AccountId,
        needed: Coin,
        available: u64,
    },

    /// A required transfer touched an account the ledger does not accept.
    #[error("invalid account: {account}")]
    InvalidAccount { account: AccountId },

    /// The request failed stateless validation.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Persisted state could not be read back.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RegistryError {
    /// Creates a new not-found error.
    #[must_use]
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// Creates a new invalid-transition error.
    #[must_use]
    pub fn invalid_transition(game: GameId, reason: impl Into<String>) -> Self {
        Self::InvalidTransition {
            game,
            reason: reason.into(),
        }
    }

    /// Creates a new invalid-request error.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// True for errors raised by the ledger rather than by validation.
    #[must_use]
    pub fn is_ledger_failure(&self) -> bool {
        matches!(
            self,
            Self::InsufficientFunds { .. } | Self::InvalidAccount { .. }
        )
    }
}

impl From<LedgerError> for RegistryError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds {
                account,
                needed,
                available,
            } => Self::InsufficientFunds {
                account,
                needed,
                available,
            },
            LedgerError::InvalidAccount { account } => Self::InvalidAccount { account },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_conversion() {
        let err: RegistryError = LedgerError::InsufficientFunds {
            account: AccountId::new("bob"),
            needed: Coin::new(11, "stake"),
            available: 3,
        }
        .into();

        assert!(err.is_ledger_failure());
        assert_eq!(
            err.to_string(),
            "insufficient funds: bob needs 11stake, has 3"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(RegistryError::not_found("42").to_string(), "game not found: 42");
        assert_eq!(
            RegistryError::invalid_transition(GameId::new(1), "already played").to_string(),
            "invalid transition on game 1: already played"
        );
        assert!(!RegistryError::invalid_request("empty red").is_ledger_failure());
    }
}
