//! Deadline enforcement.
//!
//! The FIFO is ordered by creation, and every game shares the same turn
//! duration, so in the default configuration the head is the game whose
//! deadline was set longest ago. `on_tick` forfeits from the head while
//! the head is expired and stops at the first game that is not.
//!
//! Each forfeiture is its own transition. When settlement fails the game
//! is still removed (so the next tick cannot trip over it again) and the
//! escrow it holds is reported as an anomaly instead of being moved.

use tracing::{error, info};

use super::{Receipt, Registry, Tx};
use crate::core::{AccountId, Event, GameId, RegistryError, Timestamp, Winner};
use crate::escrow::{Ledger, Transfer};
use crate::rules::BoardEngine;
use crate::store::{GameRecord, GameStore};

/// Outcome of one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Final records of the games forfeited and settled, in FIFO order,
    /// winner set. None of them is in the store any more.
    pub forfeited: Vec<GameRecord>,

    /// Games (or queue states) that need operator attention.
    pub anomalies: Vec<ForfeitAnomaly>,
}

impl TickReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}

/// A forfeiture that could not settle, or a queue that could not be read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForfeitAnomaly {
    /// The game concerned. `None` when the queue head itself was unreadable.
    pub game: Option<GameId>,

    /// What went wrong.
    pub error: String,

    /// Transfers the settlement should have made. The funds are still in
    /// the holding account.
    pub unsettled: Vec<Transfer>,
}

/// Winner of a forfeited game.
///
/// Before both sides have moved at most one ante is in escrow and nobody
/// wins. Afterwards the side that let the clock run out loses.
#[must_use]
pub fn forfeit_winner(game: &GameRecord) -> Winner {
    if game.move_count < 2 {
        Winner::NoContest
    } else {
        Winner::Color(game.turn.opponent())
    }
}

/// Transfers that settle a forfeit of `game` from `holding`.
fn settlement_plan(game: &GameRecord, winner: Winner, holding: &AccountId) -> Vec<Transfer> {
    let transfers = match winner {
        Winner::Color(color) => vec![Transfer::new(
            holding.clone(),
            game.player(color).clone(),
            game.pot(),
        )],
        Winner::None | Winner::NoContest => game
            .paid_colors()
            .map(|color| Transfer::new(holding.clone(), game.player(color).clone(), game.wager_coin()))
            .collect(),
    };
    transfers.into_iter().filter(|t| !t.coin.is_zero()).collect()
}

impl<L, B, S> Registry<L, B, S>
where
    L: Ledger,
    B: BoardEngine,
    S: GameStore + Clone,
{
    /// Forfeit every game at the head of the FIFO whose deadline is
    /// strictly before `now`.
    ///
    /// Never fails as a whole: problems with individual games are logged
    /// and collected in [`TickReport::anomalies`]. Calling it twice with the
    /// same `now` does nothing the second time.
    pub fn on_tick(&mut self, now: Timestamp) -> Receipt<TickReport> {
        let mut report = TickReport::default();
        let mut events = Vec::new();

        loop {
            let id = match self.expired_head(now) {
                Ok(Some(id)) => id,
                Ok(None) => break,
                Err(err) => {
                    error!(error = %err, "expiry scan halted: queue head unreadable");
                    report.anomalies.push(ForfeitAnomaly {
                        game: None,
                        error: err.to_string(),
                        unsettled: Vec::new(),
                    });
                    break;
                }
            };

            match self.transact(|tx| tx.forfeit(id)) {
                Ok(receipt) => {
                    events.extend(receipt.events);
                    report.forfeited.push(receipt.value);
                }
                Err(err) => {
                    error!(game = %id, error = %err, "forfeit settlement failed");
                    match self.transact(|tx| tx.discard(id)) {
                        Ok(receipt) => {
                            events.extend(receipt.events);
                            report.anomalies.push(ForfeitAnomaly {
                                game: Some(id),
                                error: err.to_string(),
                                unsettled: receipt.value,
                            });
                        }
                        Err(discard_err) => {
                            // The head cannot be moved, so nothing behind it can be reached.
                            error!(game = %id, error = %discard_err, "expiry scan halted: game cannot be removed");
                            report.anomalies.push(ForfeitAnomaly {
                                game: Some(id),
                                error: discard_err.to_string(),
                                unsettled: Vec::new(),
                            });
                            break;
                        }
                    }
                }
            }
        }

        Receipt {
            value: report,
            events,
        }
    }

    fn expired_head(&self, now: Timestamp) -> Result<Option<GameId>, RegistryError> {
        let next = self.store.require_next_game()?;
        let Some(head) = next.fifo_head else {
            return Ok(None);
        };
        let game = self.store.get_linked(head)?;
        Ok(game.is_expired(now).then_some(head))
    }
}

impl<S: GameStore, L: Ledger + ?Sized, B> Tx<'_, S, L, B> {
    /// Settle and remove an expired game.
    fn forfeit(&mut self, id: GameId) -> Result<GameRecord, RegistryError> {
        let mut game = self.load_id(id)?;
        let winner = forfeit_winner(&game);

        match winner {
            Winner::Color(color) => {
                let pot = game.pot();
                let champion = game.player(color).clone();
                self.payout(&champion, &pot)?;
            }
            Winner::None | Winner::NoContest => self.settle_void(&game)?,
        }

        game.winner = winner;
        self.retire(&mut game)?;
        info!(game = %id, winner = %winner, moves = game.move_count, "game forfeited");
        self.emit(Event::GameForfeited { index: id, winner });
        Ok(game)
    }

    /// Remove an expired game without moving its escrow. Returns the
    /// settlement that was skipped.
    fn discard(&mut self, id: GameId) -> Result<Vec<Transfer>, RegistryError> {
        let mut game = self.load_id(id)?;
        let winner = forfeit_winner(&game);
        let unsettled = settlement_plan(&game, winner, self.escrow.holding());

        game.winner = winner;
        self.retire(&mut game)?;
        self.emit(Event::GameForfeited { index: id, winner });
        Ok(unsettled)
    }
}
