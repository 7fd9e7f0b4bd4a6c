//! Entry-point messages and their responses.
//!
//! Each message carries only stateless validation (`validate_basic`);
//! everything that needs the store happens inside the transition.

use serde::{Deserialize, Serialize};

use crate::core::{AccountId, Denom, GameId, Pos, RegistryError};
use crate::games::checkers::BOARD_SIZE;
use crate::store::MAX_WAGER;

/// Create a game between `red` and `black`, registered by `creator`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCreateGame {
    pub creator: AccountId,
    pub red: AccountId,
    pub black: AccountId,
    /// Per-player ante.
    pub wager: u64,
    /// Wager denomination; the native token when `None`.
    pub token: Option<Denom>,
}

impl MsgCreateGame {
    pub fn new(
        creator: impl Into<AccountId>,
        red: impl Into<AccountId>,
        black: impl Into<AccountId>,
        wager: u64,
    ) -> Self {
        Self {
            creator: creator.into(),
            red: red.into(),
            black: black.into(),
            wager,
            token: None,
        }
    }

    /// Wager in a token other than the native one.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<Denom>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn validate_basic(&self) -> Result<(), RegistryError> {
        for (role, account) in [("creator", &self.creator), ("red", &self.red), ("black", &self.black)] {
            if account.is_empty() {
                return Err(RegistryError::invalid_request(format!("{role} address is empty")));
            }
        }
        if self.red == self.black {
            return Err(RegistryError::invalid_request("red and black must be different players"));
        }
        if self.wager > MAX_WAGER {
            return Err(RegistryError::invalid_request(format!(
                "wager {} exceeds {MAX_WAGER}",
                self.wager
            )));
        }
        if matches!(&self.token, Some(denom) if denom.as_str().trim().is_empty()) {
            return Err(RegistryError::invalid_request("token is empty"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCreateGameResponse {
    pub id_value: String,
}

/// Move a piece in game `id_value`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgPlayMove {
    pub creator: AccountId,
    pub id_value: String,
    pub from_x: u64,
    pub from_y: u64,
    pub to_x: u64,
    pub to_y: u64,
}

impl MsgPlayMove {
    pub fn new(
        creator: impl Into<AccountId>,
        id_value: impl Into<String>,
        from: (u64, u64),
        to: (u64, u64),
    ) -> Self {
        Self {
            creator: creator.into(),
            id_value: id_value.into(),
            from_x: from.0,
            from_y: from.1,
            to_x: to.0,
            to_y: to.1,
        }
    }

    pub fn validate_basic(&self) -> Result<(), RegistryError> {
        if self.creator.is_empty() {
            return Err(RegistryError::invalid_request("creator address is empty"));
        }
        check_id_value(&self.id_value)?;
        let coords = [
            ("fromX", self.from_x),
            ("fromY", self.from_y),
            ("toX", self.to_x),
            ("toY", self.to_y),
        ];
        for (name, value) in coords {
            if value >= u64::from(BOARD_SIZE) {
                return Err(RegistryError::invalid_request(format!(
                    "{name} {value} is off the board"
                )));
            }
        }
        Ok(())
    }

    /// Source square. Only meaningful after `validate_basic`.
    #[must_use]
    pub fn from(&self) -> Pos {
        Pos::new(self.from_x as u8, self.from_y as u8)
    }

    /// Destination square. Only meaningful after `validate_basic`.
    #[must_use]
    pub fn to(&self) -> Pos {
        Pos::new(self.to_x as u8, self.to_y as u8)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgPlayMoveResponse {
    pub id_value: String,
    /// `-1` when nothing was captured.
    pub captured_x: i64,
    pub captured_y: i64,
    /// `b`, `r`, or `*` while the game goes on.
    pub winner: String,
}

/// Decline to play game `id_value`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRejectGame {
    pub creator: AccountId,
    pub id_value: String,
}

impl MsgRejectGame {
    pub fn new(creator: impl Into<AccountId>, id_value: impl Into<String>) -> Self {
        Self {
            creator: creator.into(),
            id_value: id_value.into(),
        }
    }

    pub fn validate_basic(&self) -> Result<(), RegistryError> {
        if self.creator.is_empty() {
            return Err(RegistryError::invalid_request("creator address is empty"));
        }
        check_id_value(&self.id_value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRejectGameResponse {}

/// Dry-run answer for a prospective move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanPlayMove {
    pub possible: bool,
    /// `ok`, or why the move would be refused.
    pub reason: String,
}

impl CanPlayMove {
    pub(crate) fn yes() -> Self {
        Self {
            possible: true,
            reason: "ok".to_string(),
        }
    }

    pub(crate) fn no(reason: impl ToString) -> Self {
        Self {
            possible: false,
            reason: reason.to_string(),
        }
    }
}

fn check_id_value(id_value: &str) -> Result<(), RegistryError> {
    id_value
        .parse::<GameId>()
        .map(|_| ())
        .map_err(|_| RegistryError::invalid_request(format!("game id {id_value:?} is not a number")))
}
