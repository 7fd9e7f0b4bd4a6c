//! Game record store and the expiry FIFO laid over it.
//!
//! The store is a plain key-value mapping: it never validates. Callers in
//! the registry keep the invariants:
//!
//! - a record is stored iff it is linked into the FIFO iff it has no winner;
//! - `NextGame` always points at the two ends of the FIFO.
//!
//! ## Arena layout
//!
//! The FIFO is a doubly-linked list whose nodes are the stored records
//! themselves. `before_id` / `after_id` are ids into the store, and the
//! `NextGame` singleton holds the head and tail ids. See [`fifo`].

pub mod record;
pub mod memory;
pub mod fifo;
pub mod genesis;

pub use record::{GameRecord, NextGame, MAX_WAGER};
pub use memory::MemoryStore;
pub use genesis::{GenesisError, GenesisState};

use thiserror::Error;

use crate::core::GameId;

/// Failures reading or writing persisted state.
///
/// A missing key is never an error; it reads as `None`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A stored value could not be encoded or decoded.
    #[error("codec failure for {key}: {source}")]
    Codec {
        key: String,
        #[source]
        source: bincode::Error,
    },

    /// The counter singleton is missing.
    #[error("next-game counter is missing")]
    MissingCounter,

    /// A FIFO link points at a record that is not stored.
    #[error("dangling fifo link to game {0}")]
    DanglingLink(GameId),

    /// The FIFO linkage is inconsistent.
    #[error("corrupt fifo: {0}")]
    CorruptQueue(String),
}

/// Keyed persistence for game records and the counter singleton.
pub trait GameStore {
    /// Read a record. Missing reads as `Ok(None)`.
    fn get(&self, id: GameId) -> Result<Option<GameRecord>, StoreError>;

    /// Insert or overwrite a record.
    fn set(&mut self, record: &GameRecord) -> Result<(), StoreError>;

    /// Remove a record. Removing a missing record is a no-op.
    fn delete(&mut self, id: GameId);

    /// Read the counter singleton.
    fn next_game(&self) -> Result<Option<NextGame>, StoreError>;

    /// Overwrite the counter singleton.
    fn set_next_game(&mut self, next: &NextGame) -> Result<(), StoreError>;

    /// All stored records in ascending id order.
    fn records(&self) -> Result<Vec<GameRecord>, StoreError>;

    /// Read a record that a link says must exist.
    fn get_linked(&self, id: GameId) -> Result<GameRecord, StoreError> {
        self.get(id)?.ok_or(StoreError::DanglingLink(id))
    }

    /// Read the counter singleton, which must exist.
    fn require_next_game(&self) -> Result<NextGame, StoreError> {
        self.next_game()?.ok_or(StoreError::MissingCounter)
    }
}
