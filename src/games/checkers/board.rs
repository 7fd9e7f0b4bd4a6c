//! 8x8 checkers board and move rules.
//!
//! ## Serialized form
//!
//! Eight rows separated by `|`, row `y = 0` first, each row eight squares
//! with column `x = 0` first. `b` / `r` are men, `B` / `R` kings, `*` is an
//! empty square. Black starts on rows 0-2 and moves towards higher `y`; red
//! starts on rows 5-7 and moves towards lower `y`.

use crate::core::{Color, Pos};
use crate::rules::{IllegalMove, MoveOutcome};

pub const BOARD_SIZE: u8 = 8;

const ROW_SEP: char = '|';
const EMPTY: char = '*';

pub const INITIAL_BOARD: &str =
    "*b*b*b*b|b*b*b*b*|*b*b*b*b|********|********|r*r*r*r*|*r*r*r*r|r*r*r*r*";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub king: bool,
}

impl Piece {
    fn from_char(c: char) -> Option<Option<Self>> {
        let piece = match c {
            EMPTY => return Some(None),
            'b' => Piece { color: Color::Black, king: false },
            'r' => Piece { color: Color::Red, king: false },
            'B' => Piece { color: Color::Black, king: true },
            'R' => Piece { color: Color::Red, king: true },
            _ => return None,
        };
        Some(Some(piece))
    }

    fn to_char(self) -> char {
        match (self.color, self.king) {
            (Color::Black, false) => 'b',
            (Color::Red, false) => 'r',
            (Color::Black, true) => 'B',
            (Color::Red, true) => 'R',
        }
    }

    /// Row direction a man of this colour advances in.
    fn forward(self) -> i8 {
        match self.color {
            Color::Black => 1,
            Color::Red => -1,
        }
    }

    fn can_move_in(self, dy: i8) -> bool {
        self.king || dy.signum() == self.forward()
    }
}

/// Parsed board, indexed `[y][x]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    pub fn parse(s: &str) -> Result<Self, IllegalMove> {
        let mut squares = [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        let rows: Vec<&str> = s.split(ROW_SEP).collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(IllegalMove::BadBoard(format!("expected 8 rows, got {}", rows.len())));
        }
        for (y, row) in rows.iter().enumerate() {
            let chars: Vec<char> = row.chars().collect();
            if chars.len() != BOARD_SIZE as usize {
                return Err(IllegalMove::BadBoard(format!("row {y} has {} squares", chars.len())));
            }
            for (x, c) in chars.into_iter().enumerate() {
                squares[y][x] = Piece::from_char(c)
                    .ok_or_else(|| IllegalMove::BadBoard(format!("unknown square {c:?}")))?;
            }
        }
        Ok(Self { squares })
    }

    pub fn serialize(&self) -> String {
        self.squares
            .iter()
            .map(|row| {
                row.iter()
                    .map(|sq| sq.map_or(EMPTY, Piece::to_char))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join(&ROW_SEP.to_string())
    }

    /// Piece on `pos`. Off-board squares read as empty.
    #[must_use]
    pub fn get(&self, pos: Pos) -> Option<Piece> {
        self.squares
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
            .copied()
            .flatten()
    }

    fn set(&mut self, pos: Pos, piece: Option<Piece>) {
        self.squares[pos.y as usize][pos.x as usize] = piece;
    }

    pub fn count(&self, color: Color) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|sq| matches!(sq, Some(p) if p.color == color))
            .count()
    }

    fn offset(pos: Pos, dx: i8, dy: i8) -> Option<Pos> {
        let x = pos.x as i8 + dx;
        let y = pos.y as i8 + dy;
        let range = 0..BOARD_SIZE as i8;
        (range.contains(&x) && range.contains(&y)).then(|| Pos::new(x as u8, y as u8))
    }

    /// Whether `color` has at least one step or jump available.
    pub fn has_any_move(&self, color: Color) -> bool {
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let from = Pos::new(x, y);
                if !matches!(self.get(from), Some(p) if p.color == color) {
                    continue;
                }
                for (dx, dy) in [(1, 1), (-1, 1), (1, -1), (-1, -1)] {
                    for dist in [1, 2] {
                        if let Some(to) = Self::offset(from, dx * dist, dy * dist) {
                            if self.check_move(from, to, color).is_ok() {
                                return true;
                            }
                        }
                    }
                }
            }
        }
        false
    }

    /// Validate a move and return the captured square, if any.
    fn check_move(&self, from: Pos, to: Pos, mover: Color) -> Result<Option<Pos>, IllegalMove> {
        for pos in [from, to] {
            if pos.x >= BOARD_SIZE || pos.y >= BOARD_SIZE {
                return Err(IllegalMove::OffBoard(pos));
            }
        }
        let piece = self.get(from).ok_or(IllegalMove::NoPiece(from))?;
        if piece.color != mover {
            return Err(IllegalMove::NotYourPiece {
                pos: from,
                owner: piece.color,
                mover,
            });
        }
        if self.get(to).is_some() {
            return Err(IllegalMove::Occupied(to));
        }

        let dx = to.x as i8 - from.x as i8;
        let dy = to.y as i8 - from.y as i8;
        let invalid = IllegalMove::InvalidStep { from, to };
        if dx.abs() != dy.abs() || !piece.can_move_in(dy) {
            return Err(invalid);
        }

        match dx.abs() {
            1 => Ok(None),
            2 => {
                let over = Self::offset(from, dx / 2, dy / 2).ok_or(invalid.clone())?;
                match self.get(over) {
                    Some(p) if p.color != mover => Ok(Some(over)),
                    _ => Err(invalid),
                }
            }
            _ => Err(invalid),
        }
    }

    /// Validate and apply a move.
    pub fn play(&mut self, from: Pos, to: Pos, mover: Color) -> Result<MoveOutcome, IllegalMove> {
        let captured = self.check_move(from, to, mover)?;
        let mut piece = self.get(from).ok_or(IllegalMove::NoPiece(from))?;

        let last_row = match mover {
            Color::Black => BOARD_SIZE - 1,
            Color::Red => 0,
        };
        if to.y == last_row {
            piece.king = true;
        }

        self.set(from, None);
        self.set(to, Some(piece));
        if let Some(over) = captured {
            self.set(over, None);
        }

        let opponent = mover.opponent();
        let winner = (self.count(opponent) == 0 || !self.has_any_move(opponent)).then_some(mover);

        Ok(MoveOutcome {
            board: self.serialize(),
            captured,
            winner,
        })
    }
}
