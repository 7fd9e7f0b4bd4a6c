//! Journaled escrow operations for a single transition.
//!
//! Every transfer the session applies is recorded. A transition that fails
//! after moving funds calls [`EscrowSession::rollback`], which applies the
//! reverse transfers newest first. A transition that succeeds calls
//! [`EscrowSession::commit`] and gets the journal back for event emission.
//!
//! Zero-amount operations never reach the ledger, so a zero wager never
//! triggers a balance check.

use smallvec::SmallVec;
use tracing::{error, warn};

use super::{Ledger, LedgerError, Transfer};
use crate::core::{AccountId, Coin};
use crate::store::GameRecord;

/// Journal capacity before spilling: a transition moves at most two antes.
type Journal = SmallVec<[Transfer; 2]>;

/// Escrow operations scoped to one transition.
pub struct EscrowSession<'l, L: Ledger + ?Sized> {
    ledger: &'l mut L,
    holding: AccountId,
    applied: Journal,
}

impl<'l, L: Ledger + ?Sized> EscrowSession<'l, L> {
    /// Open a session against `ledger` with `holding` as custodian.
    pub fn new(ledger: &'l mut L, holding: AccountId) -> Self {
        Self {
            ledger,
            holding,
            applied: SmallVec::new(),
        }
    }

    /// The custodian account.
    #[must_use]
    pub fn holding(&self) -> &AccountId {
        &self.holding
    }

    /// Transfers applied so far, oldest first.
    #[must_use]
    pub fn applied(&self) -> &[Transfer] {
        &self.applied
    }

    fn apply(
        &mut self,
        from: AccountId,
        to: AccountId,
        coin: &Coin,
    ) -> Result<Option<Transfer>, LedgerError> {
        if coin.is_zero() {
            return Ok(None);
        }
        self.ledger.transfer(&from, &to, coin)?;
        let transfer = Transfer::new(from, to, coin.clone());
        self.applied.push(transfer.clone());
        Ok(Some(transfer))
    }

    /// Player antes `coin` into the holding account.
    pub fn collect_wager(
        &mut self,
        from: &AccountId,
        coin: &Coin,
    ) -> Result<Option<Transfer>, LedgerError> {
        let holding = self.holding.clone();
        self.apply(from.clone(), holding, coin)
    }

    /// Holding account returns a player's own ante.
    pub fn refund_wager(
        &mut self,
        to: &AccountId,
        coin: &Coin,
    ) -> Result<Option<Transfer>, LedgerError> {
        let holding = self.holding.clone();
        self.apply(holding, to.clone(), coin)
    }

    /// Holding account pays the whole pot to the winner in one transfer.
    pub fn payout(&mut self, to: &AccountId, pot: &Coin) -> Result<Option<Transfer>, LedgerError> {
        let holding = self.holding.clone();
        self.apply(holding, to.clone(), pot)
    }

    /// No-contest settlement: every player who anted gets their own ante
    /// back, one transfer each.
    pub fn settle_void(&mut self, game: &GameRecord) -> Result<Vec<Transfer>, LedgerError> {
        let ante = game.wager_coin();
        let mut refunds = Vec::new();
        for color in game.paid_colors() {
            if let Some(transfer) = self.refund_wager(game.player(color), &ante)? {
                refunds.push(transfer);
            }
        }
        Ok(refunds)
    }

    /// Keep everything applied and hand back the journal.
    pub fn commit(self) -> Vec<Transfer> {
        self.applied.into_vec()
    }

    /// Undo everything applied, newest first.
    ///
    /// Returns the reversals the ledger refused. Those funds are stranded
    /// and need operator attention; they are also logged at `error`.
    pub fn rollback(mut self) -> Vec<Transfer> {
        let mut stranded = Vec::new();
        while let Some(transfer) = self.applied.pop() {
            let undo = transfer.reversed();
            warn!(transfer = %transfer, "rolling back escrow transfer");
            if let Err(err) = self.ledger.transfer(&undo.sender, &undo.recipient, &undo.coin) {
                error!(transfer = %undo, error = %err, "escrow rollback refused by ledger");
                stranded.push(undo);
            }
        }
        stranded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, Denom};
    use crate::escrow::InMemoryBank;
    use crate::store::record::fixtures::record;

    const HOLDING: &str = "checkers-module";

    fn acct(s: &str) -> AccountId {
        AccountId::new(s)
    }

    fn stake(bank: &InMemoryBank, who: &str) -> u64 {
        bank.balance(&acct(who), &Denom::new("stake"))
    }

    fn funded() -> InMemoryBank {
        InMemoryBank::new()
            .with_balance("bob", Coin::new(100, "stake"))
            .with_balance("carol", Coin::new(100, "stake"))
    }

    #[test]
    fn test_collect_and_refund() {
        let mut bank = funded();
        let mut escrow = EscrowSession::new(&mut bank, acct(HOLDING));

        let collected = escrow.collect_wager(&acct("carol"), &Coin::new(11, "stake")).unwrap();
        assert_eq!(
            collected,
            Some(Transfer::new(acct("carol"), acct(HOLDING), Coin::new(11, "stake")))
        );
        escrow.refund_wager(&acct("carol"), &Coin::new(11, "stake")).unwrap();
        assert_eq!(escrow.commit().len(), 2);

        assert_eq!(stake(&bank, "carol"), 100);
        assert_eq!(stake(&bank, HOLDING), 0);
    }

    #[test]
    fn test_zero_amount_never_touches_ledger() {
        // Nobody has any funds, yet a zero ante succeeds.
        let mut bank = InMemoryBank::new();
        let mut escrow = EscrowSession::new(&mut bank, acct(HOLDING));

        assert_eq!(escrow.collect_wager(&acct("carol"), &Coin::new(0, "stake")).unwrap(), None);
        assert!(escrow.applied().is_empty());
    }

    #[test]
    fn test_settle_void_refunds_each_ante() {
        let mut bank = funded().with_balance(HOLDING, Coin::new(22, "stake"));
        let mut game = record(1);
        game.set_paid(Color::Black, true);
        game.set_paid(Color::Red, true);

        let mut escrow = EscrowSession::new(&mut bank, acct(HOLDING));
        let refunds = escrow.settle_void(&game).unwrap();
        escrow.commit();

        assert_eq!(refunds.len(), 2);
        assert_eq!(refunds[0].recipient, acct("carol"));
        assert_eq!(refunds[1].recipient, acct("bob"));
        assert_eq!(stake(&bank, "carol"), 111);
        assert_eq!(stake(&bank, "bob"), 111);
        assert_eq!(stake(&bank, HOLDING), 0);
    }

    #[test]
    fn test_settle_void_without_antes() {
        let mut bank = InMemoryBank::new();
        let mut escrow = EscrowSession::new(&mut bank, acct(HOLDING));

        assert!(escrow.settle_void(&record(1)).unwrap().is_empty());
    }

    #[test]
    fn test_rollback_restores_balances() {
        let mut bank = funded();
        let mut escrow = EscrowSession::new(&mut bank, acct(HOLDING));

        escrow.collect_wager(&acct("carol"), &Coin::new(11, "stake")).unwrap();
        escrow.collect_wager(&acct("bob"), &Coin::new(11, "stake")).unwrap();
        let err = escrow.payout(&acct("bob"), &Coin::new(500, "stake")).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));

        assert!(escrow.rollback().is_empty());
        assert_eq!(stake(&bank, "carol"), 100);
        assert_eq!(stake(&bank, "bob"), 100);
        assert_eq!(stake(&bank, HOLDING), 0);
    }

    /// Accepts money from anyone but refuses to pay `refuse_to`.
    struct OneWayBank {
        inner: InMemoryBank,
        refuse_to: AccountId,
    }

    impl Ledger for OneWayBank {
        fn transfer(&mut self, from: &AccountId, to: &AccountId, coin: &Coin) -> Result<(), LedgerError> {
            if *to == self.refuse_to {
                return Err(LedgerError::InvalidAccount { account: to.clone() });
            }
            self.inner.transfer(from, to, coin)
        }

        fn balance(&self, account: &AccountId, denom: &Denom) -> u64 {
            self.inner.balance(account, denom)
        }
    }

    #[test]
    fn test_rollback_reports_stranded_funds() {
        let mut bank = OneWayBank {
            inner: funded(),
            refuse_to: acct("carol"),
        };
        let mut escrow = EscrowSession::new(&mut bank, acct(HOLDING));
        escrow.collect_wager(&acct("carol"), &Coin::new(11, "stake")).unwrap();
        escrow.collect_wager(&acct("bob"), &Coin::new(11, "stake")).unwrap();

        let stranded = escrow.rollback();

        assert_eq!(
            stranded,
            vec![Transfer::new(acct(HOLDING), acct("carol"), Coin::new(11, "stake"))]
        );
        assert_eq!(stake(&bank.inner, "bob"), 100);
        assert_eq!(stake(&bank.inner, HOLDING), 11);
    }
}
