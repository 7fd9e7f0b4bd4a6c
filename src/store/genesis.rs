//! Genesis import/export.
//!
//! A `GenesisState` is the full persisted state of the registry: the
//! counter singleton plus every active game. It round-trips through JSON
//! and is validated before it is loaded.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{fifo, GameRecord, GameStore, MemoryStore, NextGame, StoreError};
use crate::core::GameId;

/// Reasons a genesis state is refused.
#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("duplicated index for storedGame: {0}")]
    DuplicateIndex(GameId),

    #[error("game {index} is not below the next id {next}")]
    IndexNotAllocated { index: GameId, next: u64 },

    #[error("game {0} already has a winner")]
    Resolved(GameId),

    #[error("fifo does not cover the stored games: {0}")]
    Queue(String),

    #[error("genesis json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Serializable snapshot of the whole registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub next_game: NextGame,
    pub stored_game_list: Vec<GameRecord>,
}

impl GenesisState {
    /// Check the invariants the registry relies on.
    pub fn validate(&self) -> Result<(), GenesisError> {
        let mut seen = FxHashSet::default();
        for game in &self.stored_game_list {
            if !seen.insert(game.index) {
                return Err(GenesisError::DuplicateIndex(game.index));
            }
            if game.index.raw() >= self.next_game.id_value {
                return Err(GenesisError::IndexNotAllocated {
                    index: game.index,
                    next: self.next_game.id_value,
                });
            }
            if game.winner.is_decided() {
                return Err(GenesisError::Resolved(game.index));
            }
        }

        // Every stored game must sit in the queue exactly once.
        let store = self.to_store()?;
        let linked = fifo::walk(&store, &self.next_game)
            .map_err(|err| GenesisError::Queue(err.to_string()))?;
        if linked.len() != self.stored_game_list.len() {
            return Err(GenesisError::Queue(format!(
                "{} games linked, {} stored",
                linked.len(),
                self.stored_game_list.len()
            )));
        }
        Ok(())
    }

    /// Load into a fresh store without validating.
    pub fn to_store(&self) -> Result<MemoryStore, StoreError> {
        let mut store = MemoryStore::empty();
        store.set_next_game(&self.next_game)?;
        for game in &self.stored_game_list {
            store.set(game)?;
        }
        Ok(store)
    }

    /// Snapshot any store.
    pub fn from_store<S: GameStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        Ok(Self {
            next_game: store.require_next_game()?,
            stored_game_list: store.records()?,
        })
    }

    pub fn to_json(&self) -> Result<String, GenesisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, GenesisError> {
        Ok(serde_json::from_str(json)?)
    }
}
