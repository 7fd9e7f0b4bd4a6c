//! Registry configuration.
//!
//! The registry is configured once at startup with a `RegistryConfig`.
//! Defaults match a chain whose native token is `stake` and whose games
//! must see a move at least once a day.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ids::{AccountId, Denom};

/// Default module name reported in `message` events.
pub const DEFAULT_MODULE_NAME: &str = "checkers";

/// Default native denomination used when a game names no token.
pub const DEFAULT_NATIVE_DENOM: &str = "stake";

/// Default module holding account.
pub const DEFAULT_HOLDING_ACCOUNT: &str = "checkers-module";

/// Default time a player has to make the next move.
pub const DEFAULT_MAX_TURN_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Complete registry configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Name written as the `module` attribute of message events.
    pub module_name: String,

    /// Denomination used for wagers created without a token.
    pub native_denom: Denom,

    /// Account custodying all collected antes until settlement.
    pub holding_account: AccountId,

    /// How long a player has to move before the game can be forfeited.
    pub max_turn_duration: Duration,

    /// Send a game to the FIFO tail after every accepted move.
    ///
    /// Off by default: games stay in creation order and the expiry scan
    /// stops at the oldest game that is still live.
    pub requeue_on_move: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            module_name: DEFAULT_MODULE_NAME.to_string(),
            native_denom: Denom::new(DEFAULT_NATIVE_DENOM),
            holding_account: AccountId::new(DEFAULT_HOLDING_ACCOUNT),
            max_turn_duration: DEFAULT_MAX_TURN_DURATION,
            requeue_on_move: false,
        }
    }
}

impl RegistryConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the module name.
    #[must_use]
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }

    /// Set the native denomination.
    #[must_use]
    pub fn with_native_denom(mut self, denom: impl Into<Denom>) -> Self {
        self.native_denom = denom.into();
        self
    }

    /// Set the holding account.
    #[must_use]
    pub fn with_holding_account(mut self, account: impl Into<AccountId>) -> Self {
        self.holding_account = account.into();
        self
    }

    /// Set the per-move deadline.
    #[must_use]
    pub fn with_max_turn_duration(mut self, duration: Duration) -> Self {
        self.max_turn_duration = duration;
        self
    }

    /// Re-queue games at the FIFO tail on every accepted move.
    #[must_use]
    pub fn requeue_on_move(mut self) -> Self {
        self.requeue_on_move = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.module_name, "checkers");
        assert_eq!(config.native_denom, Denom::new("stake"));
        assert_eq!(config.max_turn_duration, Duration::from_secs(86_400));
        assert!(!config.requeue_on_move);
    }

    #[test]
    fn test_builder() {
        let config = RegistryConfig::new()
            .with_module_name("draughts")
            .with_native_denom("uatom")
            .with_holding_account("escrow")
            .with_max_turn_duration(Duration::from_secs(60))
            .requeue_on_move();

        assert_eq!(config.module_name, "draughts");
        assert_eq!(config.native_denom.as_str(), "uatom");
        assert_eq!(config.holding_account.as_str(), "escrow");
        assert_eq!(config.max_turn_duration.as_secs(), 60);
        assert!(config.requeue_on_move);
    }
}
