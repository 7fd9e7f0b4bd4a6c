//! In-memory key-value store.
//!
//! Values are `bincode`-encoded under prefixed byte keys, the same way a
//! durable KV backend would hold them. The map is an `im::OrdMap`, so
//! cloning the store is O(1): the registry snapshots it before every
//! transition and swaps the snapshot in only on commit.
//!
//! ## Usage
//!
//! ```
//! use checkers_registry::store::{GameStore, MemoryStore, NextGame};
//!
//! let store = MemoryStore::new();
//! assert_eq!(store.next_game().unwrap(), Some(NextGame::default()));
//! assert!(store.records().unwrap().is_empty());
//! ```

use im::OrdMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{GameRecord, GameStore, NextGame, StoreError};
use crate::core::GameId;

const STORED_GAME_PREFIX: &[u8] = b"StoredGame/value/";
const NEXT_GAME_KEY: &[u8] = b"NextGame/value/";

/// Persistent-map backed store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    kv: OrdMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStore {
    /// Create a store holding the genesis counter and no games.
    #[must_use]
    pub fn new() -> Self {
        let mut kv = OrdMap::new();
        // Genesis counter always encodes.
        if let Ok(bytes) = bincode::serialize(&NextGame::default()) {
            kv.insert(NEXT_GAME_KEY.to_vec(), bytes);
        }
        Self { kv }
    }

    /// Create a store with nothing in it, not even the counter.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of raw keys, counter included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kv.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kv.is_empty()
    }

    /// Overwrite a raw value. Used to simulate a damaged backend.
    pub fn put_raw(&mut self, id: GameId, bytes: Vec<u8>) {
        self.kv.insert(game_key(id), bytes);
    }

    fn read<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>, StoreError> {
        match self.kv.get(key) {
            Some(bytes) => bincode::deserialize(bytes)
                .map(Some)
                .map_err(|source| codec_error(key, source)),
            None => Ok(None),
        }
    }

    fn write<T: Serialize>(&mut self, key: Vec<u8>, value: &T) -> Result<(), StoreError> {
        let bytes = bincode::serialize(value).map_err(|source| codec_error(&key, source))?;
        self.kv.insert(key, bytes);
        Ok(())
    }
}

fn game_key(id: GameId) -> Vec<u8> {
    let mut key = Vec::with_capacity(STORED_GAME_PREFIX.len() + 8);
    key.extend_from_slice(STORED_GAME_PREFIX);
    // Big-endian keeps the map ordered by numeric id.
    key.extend_from_slice(&id.raw().to_be_bytes());
    key
}

fn codec_error(key: &[u8], source: bincode::Error) -> StoreError {
    StoreError::Codec {
        key: String::from_utf8_lossy(key).into_owned(),
        source,
    }
}

impl GameStore for MemoryStore {
    fn get(&self, id: GameId) -> Result<Option<GameRecord>, StoreError> {
        self.read(&game_key(id))
    }

    fn set(&mut self, record: &GameRecord) -> Result<(), StoreError> {
        self.write(game_key(record.index), record)
    }

    fn delete(&mut self, id: GameId) {
        self.kv.remove(&game_key(id));
    }

    fn next_game(&self) -> Result<Option<NextGame>, StoreError> {
        self.read(NEXT_GAME_KEY)
    }

    fn set_next_game(&mut self, next: &NextGame) -> Result<(), StoreError> {
        self.write(NEXT_GAME_KEY.to_vec(), next)
    }

    fn records(&self) -> Result<Vec<GameRecord>, StoreError> {
        self.kv
            .iter()
            .filter(|(key, _)| key.starts_with(STORED_GAME_PREFIX))
            .map(|(key, bytes)| {
                bincode::deserialize(bytes).map_err(|source| codec_error(key, source))
            })
            .collect()
    }
}
