//! Player colours, game outcomes and board positions.

use serde::{Deserialize, Serialize};

/// Wire form of "no winner": used both for an undecided game and for a
/// no-contest forfeit.
pub const NO_WINNER: &str = "*";

/// Side of the board. Black moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
}

impl Color {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Color::Black => Color::Red,
            Color::Red => Color::Black,
        }
    }

    /// Single-letter wire form (`b` / `r`).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Color::Black => "b",
            Color::Red => "r",
        }
    }

    /// Parse the single-letter wire form.
    #[must_use]
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "b" => Some(Color::Black),
            "r" => Some(Color::Red),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Outcome recorded on a game.
///
/// `None` is the only non-terminal value. Every other value is assigned
/// exactly once, immediately before the record leaves the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    #[default]
    None,
    Color(Color),
    /// Forfeited before both sides had anted: nobody wins, antes go back.
    NoContest,
}

impl Winner {
    #[must_use]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Winner::None)
    }

    /// Wire form: `b`, `r` or `*`.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Winner::Color(color) => color.symbol(),
            Winner::None | Winner::NoContest => NO_WINNER,
        }
    }
}

impl From<Color> for Winner {
    fn from(color: Color) -> Self {
        Winner::Color(color)
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Square on the 8x8 board. `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

impl Pos {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
