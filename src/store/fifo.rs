//! Expiry FIFO: a doubly-linked list threaded through the stored records.
//!
//! The caller holds the record being linked or unlinked (it is usually
//! about to be written or deleted anyway) and the `NextGame` singleton.
//! Neighbour records are read from and written back to the store here.
//! The caller persists both the held record and `NextGame` afterwards.
//!
//! ```text
//!  fifo_head                                    fifo_tail
//!     |                                             |
//!     v                                             v
//!   [ 1 ] --after--> [ 2 ] --after--> [ 4 ] --after--> -1
//!    -1 <--before--        <--before--
//! ```

use tracing::debug;

use super::{GameRecord, GameStore, NextGame, StoreError};
use crate::core::GameId;

/// Attach `game` at the tail.
///
/// `game` must not currently be linked.
pub fn append<S: GameStore + ?Sized>(
    store: &mut S,
    next: &mut NextGame,
    game: &mut GameRecord,
) -> Result<(), StoreError> {
    match next.fifo_tail {
        None => {
            game.before_id = None;
            next.fifo_head = Some(game.index);
        }
        Some(tail_id) => {
            let mut tail = store.get_linked(tail_id)?;
            tail.after_id = Some(game.index);
            store.set(&tail)?;
            game.before_id = Some(tail_id);
        }
    }
    game.after_id = None;
    next.fifo_tail = Some(game.index);

    debug!(game = %game.index, before = ?game.before_id, "fifo append");
    Ok(())
}

/// Splice `game` out from wherever it sits.
pub fn remove<S: GameStore + ?Sized>(
    store: &mut S,
    next: &mut NextGame,
    game: &mut GameRecord,
) -> Result<(), StoreError> {
    match game.before_id {
        Some(before_id) => {
            let mut before = store.get_linked(before_id)?;
            before.after_id = game.after_id;
            store.set(&before)?;
        }
        None => {
            if next.fifo_head != Some(game.index) {
                return Err(StoreError::CorruptQueue(format!(
                    "game {} has no predecessor but is not the head",
                    game.index
                )));
            }
            next.fifo_head = game.after_id;
        }
    }

    match game.after_id {
        Some(after_id) => {
            let mut after = store.get_linked(after_id)?;
            after.before_id = game.before_id;
            store.set(&after)?;
        }
        None => {
            if next.fifo_tail != Some(game.index) {
                return Err(StoreError::CorruptQueue(format!(
                    "game {} has no successor but is not the tail",
                    game.index
                )));
            }
            next.fifo_tail = game.before_id;
        }
    }

    debug!(game = %game.index, "fifo remove");
    game.before_id = None;
    game.after_id = None;
    Ok(())
}

/// Move `game` to the tail.
pub fn requeue<S: GameStore + ?Sized>(
    store: &mut S,
    next: &mut NextGame,
    game: &mut GameRecord,
) -> Result<(), StoreError> {
    if next.fifo_tail == Some(game.index) {
        return Ok(());
    }
    remove(store, next, game)?;
    append(store, next, game)
}

/// Ids from head to tail.
///
/// Fails on a dangling link, a broken back-link, a cycle, or a walk that
/// does not end at `fifo_tail`.
pub fn walk<S: GameStore + ?Sized>(store: &S, next: &NextGame) -> Result<Vec<GameId>, StoreError> {
    let mut ids = Vec::new();
    let mut prev: Option<GameId> = None;
    let mut cursor = next.fifo_head;

    while let Some(id) = cursor {
        // Ids are unique and below the counter, so a longer walk has looped.
        if ids.len() as u64 >= next.id_value {
            return Err(StoreError::CorruptQueue(format!("cycle through game {id}")));
        }
        let game = store.get_linked(id)?;
        if game.before_id != prev {
            return Err(StoreError::CorruptQueue(format!(
                "game {id} points back to {} instead of {}",
                GameId::link_str(game.before_id),
                GameId::link_str(prev)
            )));
        }
        ids.push(id);
        prev = Some(id);
        cursor = game.after_id;
    }

    if prev != next.fifo_tail {
        return Err(StoreError::CorruptQueue(format!(
            "walk ended at {} but tail is {}",
            GameId::link_str(prev),
            GameId::link_str(next.fifo_tail)
        )));
    }
    Ok(ids)
}

/// Ids from tail to head.
pub fn walk_back<S: GameStore + ?Sized>(
    store: &S,
    next: &NextGame,
) -> Result<Vec<GameId>, StoreError> {
    let mut ids = Vec::new();
    let mut cursor = next.fifo_tail;

    while let Some(id) = cursor {
        if ids.len() as u64 >= next.id_value {
            return Err(StoreError::CorruptQueue(format!("cycle through game {id}")));
        }
        let game = store.get_linked(id)?;
        ids.push(id);
        cursor = game.before_id;
    }
    Ok(ids)
}
