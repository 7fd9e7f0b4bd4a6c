//! # checkers-registry
//!
//! A registry of wagered two-player checkers games with escrowed stakes and
//! deadline-based forfeiture.
//!
//! ## Design Principles
//!
//! 1. **All or Nothing**: Every transition (create, move, reject, or one
//!    forfeiture inside a tick) either commits completely or leaves the
//!    store and the ledger exactly as they were.
//!
//! 2. **Board Agnostic**: The registry stores the board as an opaque string
//!    and asks a `BoardEngine` whether a move is legal. Checkers is the
//!    reference engine, not a dependency of the state machine.
//!
//! 3. **Events as Output**: Transitions return their events as an ordered
//!    list instead of writing to a global sink.
//!
//! ## Architecture
//!
//! - **Arena FIFO**: Active games form a doubly-linked list threaded through
//!   their own records by id. The list head is always the game that has
//!   waited longest, so a tick only ever looks at the head.
//!
//! - **Persistent Data Structures**: O(1) store snapshots via `im-rs`, so a
//!   failed transition simply drops its snapshot.
//!
//! - **Escrow Journal**: Fund movements are journaled and reversed newest
//!   first when a transition fails after moving funds.
//!
//! ## Modules
//!
//! - `core`: Ids, coins, colours, configuration, events, errors
//! - `store`: Game records, key-value store, expiry FIFO, genesis
//! - `escrow`: Ledger trait, in-memory bank, escrow sessions
//! - `rules`: BoardEngine trait for game implementations
//! - `games`: Reference engines (checkers)
//! - `registry`: Lifecycle state machine and expiry processing

pub mod core;
pub mod store;
pub mod escrow;
pub mod rules;
pub mod games;
pub mod registry;

// Re-export commonly used types
pub use crate::core::{
    AccountId, Coin, Denom, GameId, Timestamp,
    Color, Pos, Winner,
    RegistryConfig,
    Event, StringEvent, Attribute,
    RegistryError,
};

pub use crate::store::{GameRecord, GameStore, GenesisState, MemoryStore, NextGame, StoreError};

pub use crate::escrow::{EscrowSession, InMemoryBank, Ledger, LedgerError, Transfer};

pub use crate::rules::{BoardEngine, IllegalMove, MoveOutcome};

pub use crate::games::checkers::Checkers;

pub use crate::registry::{
    CanPlayMove, ForfeitAnomaly, Receipt, Registry, TickReport,
    MsgCreateGame, MsgCreateGameResponse,
    MsgPlayMove, MsgPlayMoveResponse,
    MsgRejectGame, MsgRejectGameResponse,
};
