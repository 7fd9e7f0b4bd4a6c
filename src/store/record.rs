//! Persisted records: one `GameRecord` per active game plus the `NextGame`
//! counter singleton.

use serde::{Deserialize, Serialize};

use crate::core::{AccountId, Coin, Color, Denom, GameId, Timestamp, Winner};

/// Largest wager accepted, so that a two-sided pot always fits in `u64`.
pub const MAX_WAGER: u64 = u64::MAX / 2;

/// Stored state of one active game.
///
/// Players, wager and denomination never change after creation. `board`,
/// `turn`, `move_count` and `deadline` change on accepted moves. `winner` is
/// written once, right before the record is deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub creator: AccountId,
    pub index: GameId,

    /// Serialized board, owned by the board engine.
    pub board: String,

    /// Colour due to move next.
    pub turn: Color,

    pub red: AccountId,
    pub black: AccountId,

    /// Accepted moves so far.
    pub move_count: u64,

    /// FIFO neighbour towards the head (older).
    pub before_id: Option<GameId>,

    /// FIFO neighbour towards the tail (newer).
    pub after_id: Option<GameId>,

    /// The next move must happen no later than this.
    pub deadline: Timestamp,

    pub winner: Winner,

    /// Per-player ante.
    pub wager: u64,
    pub denom: Denom,

    /// Black has anted into the holding account.
    pub black_paid: bool,

    /// Red has anted into the holding account.
    pub red_paid: bool,
}

impl GameRecord {
    /// Account playing `color`.
    #[must_use]
    pub fn player(&self, color: Color) -> &AccountId {
        match color {
            Color::Black => &self.black,
            Color::Red => &self.red,
        }
    }

    /// Colour played by `account`, if it is a player of this game.
    #[must_use]
    pub fn color_of(&self, account: &AccountId) -> Option<Color> {
        if *account == self.black {
            Some(Color::Black)
        } else if *account == self.red {
            Some(Color::Red)
        } else {
            None
        }
    }

    #[must_use]
    pub fn has_paid(&self, color: Color) -> bool {
        match color {
            Color::Black => self.black_paid,
            Color::Red => self.red_paid,
        }
    }

    pub fn set_paid(&mut self, color: Color, paid: bool) {
        match color {
            Color::Black => self.black_paid = paid,
            Color::Red => self.red_paid = paid,
        }
    }

    /// Colours that have anted, black first.
    pub fn paid_colors(&self) -> impl Iterator<Item = Color> + '_ {
        [Color::Black, Color::Red]
            .into_iter()
            .filter(move |c| self.has_paid(*c))
    }

    /// Whether `color` has already made a move.
    ///
    /// Black moves on even counts, so it has moved once `move_count >= 1`;
    /// red once `move_count >= 2`.
    #[must_use]
    pub fn has_moved(&self, color: Color) -> bool {
        match color {
            Color::Black => self.move_count >= 1,
            Color::Red => self.move_count >= 2,
        }
    }

    /// One player's ante.
    #[must_use]
    pub fn wager_coin(&self) -> Coin {
        Coin::new(self.wager, self.denom.clone())
    }

    /// Everything currently held in escrow for this game.
    #[must_use]
    pub fn pot(&self) -> Coin {
        let antes = self.paid_colors().count() as u64;
        Coin::new(self.wager.saturating_mul(antes), self.denom.clone())
    }

    /// The deadline has strictly passed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.deadline < now
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.winner.is_decided()
    }
}

/// Counter singleton: next id to assign and the FIFO ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextGame {
    pub id_value: u64,
    pub fifo_head: Option<GameId>,
    pub fifo_tail: Option<GameId>,
}

impl Default for NextGame {
    /// Genesis value: ids start at 1, queue empty.
    fn default() -> Self {
        Self {
            id_value: 1,
            fifo_head: None,
            fifo_tail: None,
        }
    }
}

impl NextGame {
    /// Take the next id and advance the counter.
    pub fn allocate(&mut self) -> GameId {
        let id = GameId::new(self.id_value);
        self.id_value += 1;
        id
    }

    #[must_use]
    pub fn is_queue_empty(&self) -> bool {
        self.fifo_head.is_none()
    }
}
