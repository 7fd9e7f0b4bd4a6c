//! Escrow: wager custody on top of an external ledger.
//!
//! The ledger itself is external and specified only by the [`Ledger`]
//! trait: an atomic "move N units of token T from A to B" primitive.
//! [`InMemoryBank`] is a reference ledger for tests and local runs.
//!
//! [`EscrowSession`] gives the transfer primitive game semantics (collect,
//! refund, payout, void settlement) and journals what it applied so a
//! failed transition can be unwound.

mod bank;
mod session;

pub use bank::InMemoryBank;
pub use session::EscrowSession;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{AccountId, Coin, Denom};

/// Ledger refusal of a single transfer. Nothing moved.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("insufficient funds: {account} needs {needed}, has {available}")]
    InsufficientFunds {
        account: AccountId,
        needed: Coin,
        available: u64,
    },

    #[error("invalid account: {account}")]
    InvalidAccount { account: AccountId },
}

/// Atomic fund movement primitive.
pub trait Ledger {
    /// Move `coin` from `from` to `to`, or fail having moved nothing.
    fn transfer(&mut self, from: &AccountId, to: &AccountId, coin: &Coin) -> Result<(), LedgerError>;

    /// Balance of `account` in `denom`.
    fn balance(&self, account: &AccountId, denom: &Denom) -> u64;
}

/// One applied fund movement.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transfer {
    pub sender: AccountId,
    pub recipient: AccountId,
    pub coin: Coin,
}

impl Transfer {
    pub fn new(sender: AccountId, recipient: AccountId, coin: Coin) -> Self {
        Self {
            sender,
            recipient,
            coin,
        }
    }

    /// The transfer that undoes this one.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            sender: self.recipient.clone(),
            recipient: self.sender.clone(),
            coin: self.coin.clone(),
        }
    }
}

impl std::fmt::Display for Transfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.coin, self.sender, self.recipient)
    }
}
