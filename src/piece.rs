use crate::color::Color;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represent a chess piece as a very simple enum
#[derive(PartialEq, Eq, Ord, PartialOrd, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// How many piece types are there?
pub const NUM_PIECES: usize = 6;

/// An array representing each piece type, in order of ascending value.
pub const ALL_PIECES: [Piece; NUM_PIECES] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King,
];

/// How many ways can I promote?
pub const NUM_PROMOTION_PIECES: usize = 4;

/// What pieces can I promote to?
pub const PROMOTION_PIECES: [Piece; NUM_PROMOTION_PIECES] =
    [Piece::Queen, Piece::Knight, Piece::Rook, Piece::Bishop];

impl Piece {
    /// Convert the `Piece` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Can a pawn become this piece?
    #[inline]
    pub fn is_promotion_piece(&self) -> bool {
        PROMOTION_PIECES.contains(self)
    }

    /// Convert a piece with a color to a FEN letter: uppercase for white, lowercase for black.
    ///
    /// ```
    /// use chess_rules::{Piece, Color};
    ///
    /// assert_eq!(Piece::Knight.to_string(Color::White), "N");
    /// assert_eq!(Piece::Knight.to_string(Color::Black), "n");
    /// ```
    #[inline]
    pub fn to_string(&self, color: Color) -> String {
        let piece = format!("{}", self);
        if color == Color::White {
            piece.to_uppercase()
        } else {
            piece
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                Piece::Pawn => "p",
                Piece::Knight => "n",
                Piece::Bishop => "b",
                Piece::Rook => "r",
                Piece::Queen => "q",
                Piece::King => "k",
            }
        )
    }
}

/// A piece that is standing on the board: its type and its owner.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ColoredPiece {
    pub piece: Piece,
    pub color: Color,
}

impl ColoredPiece {
    #[inline]
    pub fn new(piece: Piece, color: Color) -> ColoredPiece {
        ColoredPiece { piece, color }
    }

    /// Read a FEN piece letter.  Returns `None` for anything that is not one of `pnbrqk` in either
    /// case.
    ///
    /// ```
    /// use chess_rules::{ColoredPiece, Piece, Color};
    ///
    /// assert_eq!(ColoredPiece::from_char('Q'), Some(ColoredPiece::new(Piece::Queen, Color::White)));
    /// assert_eq!(ColoredPiece::from_char('p'), Some(ColoredPiece::new(Piece::Pawn, Color::Black)));
    /// assert_eq!(ColoredPiece::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<ColoredPiece> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        Some(ColoredPiece::new(piece, color))
    }
}

impl fmt::Display for ColoredPiece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.piece.to_string(self.color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_letters_round_trip() {
        for piece in ALL_PIECES.iter() {
            for color in [Color::White, Color::Black].iter() {
                let cp = ColoredPiece::new(*piece, *color);
                let letter = format!("{}", cp).chars().next().unwrap();
                assert_eq!(ColoredPiece::from_char(letter), Some(cp));
            }
        }
    }

    #[test]
    fn only_minor_and_major_pieces_promote() {
        assert!(!Piece::Pawn.is_promotion_piece());
        assert!(!Piece::King.is_promotion_piece());
        assert!(Piece::Queen.is_promotion_piece());
        assert!(Piece::Knight.is_promotion_piece());
    }
}
