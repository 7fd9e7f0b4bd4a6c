//! The game registry: lifecycle state machine, escrow and expiry.
//!
//! ## Transitions
//!
//! Every transition (create, move, reject, and each forfeiture inside a
//! tick) runs inside a [`Tx`]:
//!
//! 1. the store is cloned (O(1), persistent map) and the counter read;
//! 2. the transition mutates the clone and moves funds through an
//!    [`EscrowSession`], appending events as it goes;
//! 3. on success the clone replaces the live store and the events are
//!    returned in a [`Receipt`]; on failure the clone is dropped and the
//!    escrow journal is reversed.
//!
//! A caller therefore never observes a partially applied transition.
//!
//! ## Example
//!
//! ```
//! use checkers_registry::core::{Coin, RegistryConfig, Timestamp};
//! use checkers_registry::escrow::InMemoryBank;
//! use checkers_registry::registry::{MsgCreateGame, MsgPlayMove, Registry};
//!
//! let bank = InMemoryBank::new().with_balance("carol", Coin::new(100, "stake"));
//! let mut registry = Registry::new(RegistryConfig::default(), bank);
//! let now = Timestamp::from_secs(1_000);
//!
//! let created = registry
//!     .create_game(MsgCreateGame::new("alice", "bob", "carol", 11), now)
//!     .unwrap();
//! assert_eq!(created.value.id_value, "1");
//!
//! // Black (carol) moves first and antes on that move.
//! registry
//!     .play_move(MsgPlayMove::new("carol", "1", (1, 2), (2, 3)), now)
//!     .unwrap();
//! assert_eq!(registry.game_by_id("1").unwrap().unwrap().move_count, 1);
//! ```

mod msgs;
mod lifecycle;
mod expiry;

pub use msgs::{
    CanPlayMove, MsgCreateGame, MsgCreateGameResponse, MsgPlayMove, MsgPlayMoveResponse,
    MsgRejectGame, MsgRejectGameResponse,
};
pub use expiry::{forfeit_winner, ForfeitAnomaly, TickReport};

use tracing::warn;

use crate::core::{AccountId, Coin, Event, GameId, RegistryConfig, RegistryError, StringEvent};
use crate::escrow::{EscrowSession, Ledger, Transfer};
use crate::games::checkers::Checkers;
use crate::rules::BoardEngine;
use crate::store::{fifo, GameRecord, GameStore, GenesisError, GenesisState, MemoryStore, NextGame};

/// Result of a committed transition: its return value plus the events it
/// emitted, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt<T> {
    pub value: T,
    pub events: Vec<Event>,
}

impl<T> Receipt<T> {
    /// Events flattened to their key/value form.
    #[must_use]
    pub fn stringify_events(&self, module: &str) -> Vec<StringEvent> {
        self.events.iter().map(|e| e.stringify(module)).collect()
    }

    /// Transfer events only.
    pub fn transfers(&self) -> impl Iterator<Item = &Event> {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Transfer { .. }))
    }
}

/// Registry of active wagered games.
///
/// Owns the store, the ledger handle and the board engine exclusively.
#[derive(Clone, Debug)]
pub struct Registry<L, B = Checkers, S = MemoryStore> {
    config: RegistryConfig,
    store: S,
    ledger: L,
    engine: B,
}

impl<L: Ledger> Registry<L, Checkers, MemoryStore> {
    /// Registry with the checkers engine and an empty in-memory store.
    pub fn new(config: RegistryConfig, ledger: L) -> Self {
        Self::with_parts(config, MemoryStore::new(), ledger, Checkers::new())
    }
}

impl<L: Ledger, B: BoardEngine> Registry<L, B, MemoryStore> {
    /// Registry loaded from a validated genesis state.
    pub fn from_genesis(
        config: RegistryConfig,
        genesis: &GenesisState,
        ledger: L,
        engine: B,
    ) -> Result<Self, GenesisError> {
        genesis.validate()?;
        let store = genesis.to_store()?;
        Ok(Self::with_parts(config, store, ledger, engine))
    }
}

impl<L, B, S> Registry<L, B, S>
where
    L: Ledger,
    B: BoardEngine,
    S: GameStore + Clone,
{
    /// Assemble a registry from its parts.
    pub fn with_parts(config: RegistryConfig, store: S, ledger: L, engine: B) -> Self {
        Self {
            config,
            store,
            ledger,
            engine,
        }
    }

    /// Give up ownership of the parts. The inverse of [`Registry::with_parts`].
    pub fn into_parts(self) -> (RegistryConfig, S, L, B) {
        (self.config, self.store, self.ledger, self.engine)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn engine(&self) -> &B {
        &self.engine
    }

    // === Queries ===

    /// Active game by id.
    pub fn game(&self, id: GameId) -> Result<Option<GameRecord>, RegistryError> {
        Ok(self.store.get(id)?)
    }

    /// Active game by its wire id. An unparsable id reads as not found.
    pub fn game_by_id(&self, id_value: &str) -> Result<Option<GameRecord>, RegistryError> {
        match id_value.parse::<GameId>() {
            Ok(id) => self.game(id),
            Err(_) => Ok(None),
        }
    }

    /// The counter singleton.
    pub fn next_game(&self) -> Result<NextGame, RegistryError> {
        Ok(self.store.require_next_game()?)
    }

    /// Active games from oldest to newest in FIFO order.
    pub fn active_games(&self) -> Result<Vec<GameRecord>, RegistryError> {
        let next = self.next_game()?;
        let ids = fifo::walk(&self.store, &next)?;
        let mut games = Vec::with_capacity(ids.len());
        for id in ids {
            games.push(self.store.get_linked(id)?);
        }
        Ok(games)
    }

    /// Snapshot of the whole registry state.
    pub fn export_genesis(&self) -> Result<GenesisState, RegistryError> {
        Ok(GenesisState::from_store(&self.store)?)
    }

    // === Transactions ===

    /// Run `op` against a snapshot and commit it only if it succeeds.
    fn transact<T>(
        &mut self,
        op: impl FnOnce(&mut Tx<'_, S, L, B>) -> Result<T, RegistryError>,
    ) -> Result<Receipt<T>, RegistryError> {
        let store = self.store.clone();
        let next = store.require_next_game()?;
        let mut tx = Tx {
            store,
            next,
            escrow: EscrowSession::new(&mut self.ledger, self.config.holding_account.clone()),
            events: Vec::new(),
            config: &self.config,
            engine: &self.engine,
        };

        let result = op(&mut tx).and_then(|value| {
            let next = tx.next;
            tx.store.set_next_game(&next)?;
            Ok(value)
        });

        match result {
            Ok(value) => {
                let Tx {
                    store,
                    escrow,
                    events,
                    ..
                } = tx;
                escrow.commit();
                self.store = store;
                Ok(Receipt { value, events })
            }
            Err(err) => {
                let applied = tx.escrow.applied().len();
                let stranded = tx.escrow.rollback();
                if applied > 0 {
                    warn!(error = %err, reversed = applied, stranded = stranded.len(), "transition rolled back");
                }
                Err(err)
            }
        }
    }
}

/// Working state of one transition.
pub(crate) struct Tx<'a, S, L: Ledger + ?Sized, B> {
    pub(crate) store: S,
    pub(crate) next: NextGame,
    pub(crate) escrow: EscrowSession<'a, L>,
    pub(crate) events: Vec<Event>,
    pub(crate) config: &'a RegistryConfig,
    pub(crate) engine: &'a B,
}

impl<'a, S: GameStore, L: Ledger + ?Sized, B> Tx<'a, S, L, B> {
    pub(crate) fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    fn emit_transfer(&mut self, transfer: Option<Transfer>) {
        if let Some(Transfer {
            sender,
            recipient,
            coin,
        }) = transfer
        {
            self.emit(Event::Transfer {
                sender,
                recipient,
                coin,
            });
        }
    }

    /// Active game by wire id, or `NotFound`.
    pub(crate) fn load(&self, id_value: &str) -> Result<GameRecord, RegistryError> {
        let id: GameId = id_value
            .parse()
            .map_err(|_| RegistryError::not_found(id_value))?;
        self.load_id(id)
    }

    pub(crate) fn load_id(&self, id: GameId) -> Result<GameRecord, RegistryError> {
        self.store.get(id)?.ok_or_else(|| RegistryError::not_found(id))
    }

    pub(crate) fn collect_wager(&mut self, from: &AccountId, coin: &Coin) -> Result<(), RegistryError> {
        let transfer = self.escrow.collect_wager(from, coin)?;
        self.emit_transfer(transfer);
        Ok(())
    }

    pub(crate) fn payout(&mut self, to: &AccountId, pot: &Coin) -> Result<(), RegistryError> {
        let transfer = self.escrow.payout(to, pot)?;
        self.emit_transfer(transfer);
        Ok(())
    }

    pub(crate) fn settle_void(&mut self, game: &GameRecord) -> Result<(), RegistryError> {
        for transfer in self.escrow.settle_void(game)? {
            self.emit_transfer(Some(transfer));
        }
        Ok(())
    }

    /// Terminal step shared by every resolution: unlink and delete.
    pub(crate) fn retire(&mut self, game: &mut GameRecord) -> Result<(), RegistryError> {
        fifo::remove(&mut self.store, &mut self.next, game)?;
        self.store.delete(game.index);
        Ok(())
    }
}
