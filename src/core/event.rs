//! Events emitted by registry transitions.
//!
//! Every transition returns its events as an ordered list. Consumers that
//! need the flattened key/value form call [`Event::stringify`], which
//! preserves the attribute keys, their order and their casing exactly.
//!
//! ## Event kinds
//!
//! | event | type | attributes |
//! |---|---|---|
//! | `GameCreated` | `message` | module, action, Creator, Index, Red, Black, Wager, Token |
//! | `MovePlayed` | `message` | module, action, Creator, IdValue, CapturedX, CapturedY, Winner |
//! | `GameRejected` | `message` | module, action, Creator, IdValue |
//! | `GameForfeited` | `message` | module, action, IdValue, Winner |
//! | `Transfer` | `transfer` | recipient, sender, amount |

use serde::{Deserialize, Serialize};

use super::color::{Pos, Winner};
use super::ids::{AccountId, Coin, Denom, GameId};

pub const EVENT_TYPE_MESSAGE: &str = "message";
pub const EVENT_TYPE_TRANSFER: &str = "transfer";

pub const ACTION_GAME_CREATED: &str = "NewGameCreated";
pub const ACTION_MOVE_PLAYED: &str = "MovePlayed";
pub const ACTION_GAME_REJECTED: &str = "GameRejected";
pub const ACTION_GAME_FORFEITED: &str = "GameForfeited";

/// Rendered coordinate when a move captured nothing.
pub const NO_CAPTURE: &str = "-1";

/// Something observable that happened during a transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    GameCreated {
        creator: AccountId,
        index: GameId,
        red: AccountId,
        black: AccountId,
        wager: u64,
        denom: Denom,
    },
    MovePlayed {
        creator: AccountId,
        index: GameId,
        captured: Option<Pos>,
        winner: Winner,
    },
    GameRejected {
        creator: AccountId,
        index: GameId,
    },
    GameForfeited {
        index: GameId,
        winner: Winner,
    },
    Transfer {
        sender: AccountId,
        recipient: AccountId,
        coin: Coin,
    },
}

/// A single key/value pair of a stringified event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl ToString) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }
}

/// Flattened event as a replicated-ledger consumer sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringEvent {
    pub ty: String,
    pub attributes: Vec<Attribute>,
}

impl Event {
    /// Event type: `message` for lifecycle events, `transfer` for fund movements.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Transfer { .. } => EVENT_TYPE_TRANSFER,
            _ => EVENT_TYPE_MESSAGE,
        }
    }

    /// Game the event refers to, if any.
    #[must_use]
    pub fn game_id(&self) -> Option<GameId> {
        match self {
            Event::GameCreated { index, .. }
            | Event::MovePlayed { index, .. }
            | Event::GameRejected { index, .. }
            | Event::GameForfeited { index, .. } => Some(*index),
            Event::Transfer { .. } => None,
        }
    }

    /// Flatten into ordered attributes. `module` fills the `module` key of
    /// message events.
    #[must_use]
    pub fn stringify(&self, module: &str) -> StringEvent {
        let attributes = match self {
            Event::GameCreated {
                creator,
                index,
                red,
                black,
                wager,
                denom,
            } => vec![
                Attribute::new("module", module),
                Attribute::new("action", ACTION_GAME_CREATED),
                Attribute::new("Creator", creator),
                Attribute::new("Index", index),
                Attribute::new("Red", red),
                Attribute::new("Black", black),
                Attribute::new("Wager", wager),
                Attribute::new("Token", denom),
            ],
            Event::MovePlayed {
                creator,
                index,
                captured,
                winner,
            } => {
                let (cx, cy) = match captured {
                    Some(pos) => (pos.x.to_string(), pos.y.to_string()),
                    None => (NO_CAPTURE.to_string(), NO_CAPTURE.to_string()),
                };
                vec![
                    Attribute::new("module", module),
                    Attribute::new("action", ACTION_MOVE_PLAYED),
                    Attribute::new("Creator", creator),
                    Attribute::new("IdValue", index),
                    Attribute::new("CapturedX", cx),
                    Attribute::new("CapturedY", cy),
                    Attribute::new("Winner", winner),
                ]
            }
            Event::GameRejected { creator, index } => vec![
                Attribute::new("module", module),
                Attribute::new("action", ACTION_GAME_REJECTED),
                Attribute::new("Creator", creator),
                Attribute::new("IdValue", index),
            ],
            Event::GameForfeited { index, winner } => vec![
                Attribute::new("module", module),
                Attribute::new("action", ACTION_GAME_FORFEITED),
                Attribute::new("IdValue", index),
                Attribute::new("Winner", winner),
            ],
            Event::Transfer {
                sender,
                recipient,
                coin,
            } => vec![
                Attribute::new("recipient", recipient),
                Attribute::new("sender", sender),
                Attribute::new("amount", coin),
            ],
        };

        StringEvent {
            ty: self.event_type().to_string(),
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Color;

    fn keys(event: &StringEvent) -> Vec<&str> {
        event.attributes.iter().map(|a| a.key.as_str()).collect()
    }

    #[test]
    fn test_forfeit_stringify() {
        let event = Event::GameForfeited {
            index: GameId::new(1),
            winner: Winner::NoContest,
        }
        .stringify("checkers");

        assert_eq!(event.ty, "message");
        assert_eq!(
            event.attributes,
            vec![
                Attribute::new("module", "checkers"),
                Attribute::new("action", "GameForfeited"),
                Attribute::new("IdValue", "1"),
                Attribute::new("Winner", "*"),
            ]
        );
    }

    #[test]
    fn test_transfer_stringify() {
        let event = Event::Transfer {
            sender: AccountId::new("checkers-module"),
            recipient: AccountId::new("carol"),
            coin: Coin::new(11, "stake"),
        }
        .stringify("checkers");

        assert_eq!(event.ty, "transfer");
        assert_eq!(keys(&event), vec!["recipient", "sender", "amount"]);
        assert_eq!(event.attributes[2].value, "11stake");
    }

    #[test]
    fn test_move_played_without_capture() {
        let event = Event::MovePlayed {
            creator: AccountId::new("carol"),
            index: GameId::new(4),
            captured: None,
            winner: Winner::None,
        }
        .stringify("checkers");

        assert_eq!(
            keys(&event),
            vec!["module", "action", "Creator", "IdValue", "CapturedX", "CapturedY", "Winner"]
        );
        assert_eq!(event.attributes[4].value, "-1");
        assert_eq!(event.attributes[5].value, "-1");
        assert_eq!(event.attributes[6].value, "*");
    }

    #[test]
    fn test_move_played_with_capture_and_winner() {
        let event = Event::MovePlayed {
            creator: AccountId::new("bob"),
            index: GameId::new(2),
            captured: Some(Pos::new(3, 4)),
            winner: Winner::Color(Color::Red),
        }
        .stringify("checkers");

        assert_eq!(event.attributes[4].value, "3");
        assert_eq!(event.attributes[5].value, "4");
        assert_eq!(event.attributes[6].value, "r");
    }

    #[test]
    fn test_game_id() {
        let created = Event::GameCreated {
            creator: AccountId::new("alice"),
            index: GameId::new(9),
            red: AccountId::new("bob"),
            black: AccountId::new("carol"),
            wager: 0,
            denom: Denom::new("stake"),
        };
        assert_eq!(created.game_id(), Some(GameId::new(9)));
        assert_eq!(created.stringify("checkers").attributes[1].value, "NewGameCreated");
    }
}
