//! Reference in-memory ledger.

use rustc_hash::{FxHashMap, FxHashSet};

use super::{Ledger, LedgerError};
use crate::core::{AccountId, Coin, Denom};

/// Multi-denomination balance sheet with optional blocked accounts.
///
/// ## Usage
///
/// ```
/// use checkers_registry::core::{AccountId, Coin, Denom};
/// use checkers_registry::escrow::{InMemoryBank, Ledger};
///
/// let mut bank = InMemoryBank::new().with_balance("alice", Coin::new(50, "stake"));
/// bank.transfer(&AccountId::new("alice"), &AccountId::new("bob"), &Coin::new(20, "stake"))
///     .unwrap();
///
/// assert_eq!(bank.balance(&AccountId::new("bob"), &Denom::new("stake")), 20);
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryBank {
    balances: FxHashMap<(AccountId, Denom), u64>,
    blocked: FxHashSet<AccountId>,
}

impl InMemoryBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account at setup time.
    #[must_use]
    pub fn with_balance(mut self, account: impl Into<AccountId>, coin: Coin) -> Self {
        self.mint(&account.into(), &coin);
        self
    }

    /// Create funds out of thin air.
    pub fn mint(&mut self, account: &AccountId, coin: &Coin) {
        let entry = self
            .balances
            .entry((account.clone(), coin.denom.clone()))
            .or_insert(0);
        *entry = entry.saturating_add(coin.amount);
    }

    /// Refuse every transfer touching `account`.
    pub fn block(&mut self, account: impl Into<AccountId>) {
        self.blocked.insert(account.into());
    }

    pub fn unblock(&mut self, account: &AccountId) {
        self.blocked.remove(account);
    }

    /// Sum of all balances in `denom`.
    #[must_use]
    pub fn total_supply(&self, denom: &Denom) -> u64 {
        self.balances
            .iter()
            .filter(|((_, d), _)| d == denom)
            .map(|(_, amount)| *amount)
            .sum()
    }

    fn check_account(&self, account: &AccountId) -> Result<(), LedgerError> {
        if account.is_empty() || self.blocked.contains(account) {
            return Err(LedgerError::InvalidAccount {
                account: account.clone(),
            });
        }
        Ok(())
    }
}

impl Ledger for InMemoryBank {
    fn transfer(&mut self, from: &AccountId, to: &AccountId, coin: &Coin) -> Result<(), LedgerError> {
        self.check_account(from)?;
        self.check_account(to)?;

        let available = self.balance(from, &coin.denom);
        if available < coin.amount {
            return Err(LedgerError::InsufficientFunds {
                account: from.clone(),
                needed: coin.clone(),
                available,
            });
        }

        self.balances
            .insert((from.clone(), coin.denom.clone()), available - coin.amount);
        self.mint(to, coin);
        Ok(())
    }

    fn balance(&self, account: &AccountId, denom: &Denom) -> u64 {
        self.balances
            .get(&(account.clone(), denom.clone()))
            .copied()
            .unwrap_or(0)
    }
}
