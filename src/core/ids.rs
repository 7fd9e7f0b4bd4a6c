//! Identifier and value types shared by every layer.
//!
//! ## GameId
//!
//! Games are numbered from 1 by the `NextGame` counter. On the wire an id is
//! a decimal string, and an absent FIFO link is the sentinel `-1`. Inside the
//! crate an absent link is `Option::<GameId>::None`; use [`GameId::link_str`]
//! to render the wire form.
//!
//! ## Usage
//!
//! ```
//! use checkers_registry::core::GameId;
//!
//! let id: GameId = "7".parse().unwrap();
//! assert_eq!(id, GameId::new(7));
//! assert_eq!(GameId::link_str(Some(id)), "7");
//! assert_eq!(GameId::link_str(None), "-1");
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Wire form of an absent FIFO link.
pub const NO_LINK: &str = "-1";

/// Unique, monotonically increasing game identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl GameId {
    /// Create a new game ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Render an optional link the way it appears on the wire.
    #[must_use]
    pub fn link_str(link: Option<GameId>) -> String {
        match link {
            Some(id) => id.to_string(),
            None => NO_LINK.to_string(),
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GameId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(GameId)
    }
}

/// Ledger account identifier (player address or module account).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    /// Create an account ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the address string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty addresses are never valid participants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Token denomination.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Denom(pub String);

impl Denom {
    /// Create a denomination.
    pub fn new(denom: impl Into<String>) -> Self {
        Self(denom.into())
    }

    /// Borrow the denomination string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Denom {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An amount of a single token.
///
/// Displays as `<amount><denom>`, e.g. `11stake`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub amount: u64,
    pub denom: Denom,
}

impl Coin {
    /// Create a coin.
    pub fn new(amount: u64, denom: impl Into<Denom>) -> Self {
        Self {
            amount,
            denom: denom.into(),
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Block time in whole seconds since the Unix epoch.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Create a timestamp from Unix seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Unix seconds.
    #[must_use]
    pub const fn secs(self) -> u64 {
        self.0
    }

    /// Timestamp `duration` later, saturating at the end of time.
    #[must_use]
    pub fn after(self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration.as_secs()))
    }

    /// Timestamp `duration` earlier, saturating at the epoch.
    #[must_use]
    pub fn before(self, duration: Duration) -> Self {
        Self(self.0.saturating_sub(duration.as_secs()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
