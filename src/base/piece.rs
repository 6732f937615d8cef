use super::error::{Error, Result};
use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

/// A piece standing on the board, written in the host's two-letter notation (`bq`, `wk`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    pub const BLACK_QUEEN: Piece = Piece::new(Color::Black, Role::Queen);

    pub const fn new(color: Color, role: Role) -> Self {
        Piece { color, role }
    }

    /// Unicode chess glyph used by the board widget.
    pub fn glyph(self) -> char {
        match (self.color, self.role) {
            (Color::White, Role::King) => '♔',
            (Color::White, Role::Queen) => '♕',
            (Color::White, Role::Rook) => '♖',
            (Color::White, Role::Bishop) => '♗',
            (Color::White, Role::Knight) => '♘',
            (Color::White, Role::Pawn) => '♙',
            (Color::Black, Role::King) => '♚',
            (Color::Black, Role::Queen) => '♛',
            (Color::Black, Role::Rook) => '♜',
            (Color::Black, Role::Bishop) => '♝',
            (Color::Black, Role::Knight) => '♞',
            (Color::Black, Role::Pawn) => '♟',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = match self.color {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let role = match self.role {
            Role::King => 'k',
            Role::Queen => 'q',
            Role::Rook => 'r',
            Role::Bishop => 'b',
            Role::Knight => 'n',
            Role::Pawn => 'p',
        };
        write!(f, "{color}{role}")
    }
}

impl FromStr for Piece {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let &[color, role] = s.as_bytes() else {
            return Err(Error::InvalidPiece(s.to_owned()));
        };
        let color = match color {
            b'w' => Color::White,
            b'b' => Color::Black,
            _ => return Err(Error::InvalidPiece(s.to_owned())),
        };
        let role = match role {
            b'k' => Role::King,
            b'q' => Role::Queen,
            b'r' => Role::Rook,
            b'b' => Role::Bishop,
            b'n' => Role::Knight,
            b'p' => Role::Pawn,
            _ => return Err(Error::InvalidPiece(s.to_owned())),
        };
        Ok(Piece { color, role })
    }
}
