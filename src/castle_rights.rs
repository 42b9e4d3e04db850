use crate::color::Color;
use crate::square::Square;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// What castle rights does a particular player have?
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum CastleRights {
    NoRights,
    KingSide,
    QueenSide,
    Both,
}

/// How many different types of `CastleRights` are there?
pub const NUM_CASTLE_RIGHTS: usize = 4;

/// Enumerate all castle rights.
pub const ALL_CASTLE_RIGHTS: [CastleRights; NUM_CASTLE_RIGHTS] = [
    CastleRights::NoRights,
    CastleRights::KingSide,
    CastleRights::QueenSide,
    CastleRights::Both,
];

// Index into `ALL_CASTLE_RIGHTS` lost when a piece leaves (or is captured on) each square.
const CASTLES_PER_SQUARE: [[u8; 64]; 2] = [
    [
        2, 0, 0, 0, 3, 0, 0, 1, // 1
        0, 0, 0, 0, 0, 0, 0, 0, // 2
        0, 0, 0, 0, 0, 0, 0, 0, // 3
        0, 0, 0, 0, 0, 0, 0, 0, // 4
        0, 0, 0, 0, 0, 0, 0, 0, // 5
        0, 0, 0, 0, 0, 0, 0, 0, // 6
        0, 0, 0, 0, 0, 0, 0, 0, // 7
        0, 0, 0, 0, 0, 0, 0, 0, // 8
    ],
    [
        0, 0, 0, 0, 0, 0, 0, 0, // 1
        0, 0, 0, 0, 0, 0, 0, 0, // 2
        0, 0, 0, 0, 0, 0, 0, 0, // 3
        0, 0, 0, 0, 0, 0, 0, 0, // 4
        0, 0, 0, 0, 0, 0, 0, 0, // 5
        0, 0, 0, 0, 0, 0, 0, 0, // 6
        0, 0, 0, 0, 0, 0, 0, 0, // 7
        2, 0, 0, 0, 3, 0, 0, 1, // 8
    ],
];

impl CastleRights {
    /// Can I castle kingside?
    #[inline]
    pub fn has_kingside(&self) -> bool {
        self.to_index() & 1 == 1
    }

    /// Can I castle queenside?
    #[inline]
    pub fn has_queenside(&self) -> bool {
        self.to_index() & 2 == 2
    }

    /// Which rights does `color` lose when a piece moves off `sq`, or is captured on it?
    ///
    /// ```
    /// use chess_rules::{CastleRights, Color, Square};
    ///
    /// assert_eq!(CastleRights::square_to_castle_rights(Color::White, Square::E1), CastleRights::Both);
    /// assert_eq!(CastleRights::square_to_castle_rights(Color::Black, Square::A8), CastleRights::QueenSide);
    /// assert_eq!(CastleRights::square_to_castle_rights(Color::Black, Square::H1), CastleRights::NoRights);
    /// ```
    #[inline]
    pub fn square_to_castle_rights(color: Color, sq: Square) -> CastleRights {
        CastleRights::from_index(CASTLES_PER_SQUARE[color.to_index()][sq.to_index()] as usize)
    }

    /// Squares between the king and the kingside rook; they must be empty to castle.
    pub fn kingside_squares(color: Color) -> [Square; 2] {
        let rank = color.to_my_backrank();
        [Square::make_square(rank, 5), Square::make_square(rank, 6)]
    }

    /// Squares between the king and the queenside rook; they must be empty to castle.
    pub fn queenside_squares(color: Color) -> [Square; 3] {
        let rank = color.to_my_backrank();
        [
            Square::make_square(rank, 1),
            Square::make_square(rank, 2),
            Square::make_square(rank, 3),
        ]
    }

    /// Where the king starts.
    #[inline]
    pub fn king_home(color: Color) -> Square {
        Square::make_square(color.to_my_backrank(), 4)
    }

    /// Where the kingside rook starts.
    #[inline]
    pub fn kingside_rook_home(color: Color) -> Square {
        Square::make_square(color.to_my_backrank(), 7)
    }

    /// Where the queenside rook starts.
    #[inline]
    pub fn queenside_rook_home(color: Color) -> Square {
        Square::make_square(color.to_my_backrank(), 0)
    }

    /// Remove castle rights, and return a new `CastleRights`.
    #[inline]
    pub fn remove(&self, remove: CastleRights) -> CastleRights {
        CastleRights::from_index(self.to_index() & !remove.to_index())
    }

    /// Add some castle rights, and return a new `CastleRights`.
    #[inline]
    pub fn add(&self, add: CastleRights) -> CastleRights {
        CastleRights::from_index(self.to_index() | add.to_index())
    }

    /// Which of `other` do I also have?
    #[inline]
    pub fn intersect(&self, other: CastleRights) -> CastleRights {
        CastleRights::from_index(self.to_index() & other.to_index())
    }

    /// Convert `CastleRights` to `usize` for table lookups
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Convert `usize` to `CastleRights`.  Only the low two bits are read.
    #[inline]
    pub fn from_index(i: usize) -> CastleRights {
        ALL_CASTLE_RIGHTS[i & 3]
    }

    /// Convert the castle rights to an FEN compatible string.
    ///
    /// ```
    /// use chess_rules::{CastleRights, Color};
    ///
    /// assert_eq!(CastleRights::NoRights.to_string(Color::White), "");
    /// assert_eq!(CastleRights::Both.to_string(Color::Black), "kq");
    /// assert_eq!(CastleRights::KingSide.to_string(Color::White), "K");
    /// assert_eq!(CastleRights::QueenSide.to_string(Color::Black), "q");
    /// ```
    pub fn to_string(&self, color: Color) -> String {
        let result = match *self {
            CastleRights::NoRights => "",
            CastleRights::KingSide => "k",
            CastleRights::QueenSide => "q",
            CastleRights::Both => "kq",
        };

        if color == Color::White {
            result.to_uppercase()
        } else {
            result.to_string()
        }
    }

    /// Read one side's rights out of a FEN castling field.  Letters other than `KQkq` are
    /// ignored, so `-` gives no rights.
    ///
    /// ```
    /// use chess_rules::{CastleRights, Color};
    ///
    /// assert_eq!(CastleRights::from_fen_field("KQk", Color::White), CastleRights::Both);
    /// assert_eq!(CastleRights::from_fen_field("KQk", Color::Black), CastleRights::KingSide);
    /// assert_eq!(CastleRights::from_fen_field("-", Color::Black), CastleRights::NoRights);
    /// ```
    pub fn from_fen_field(field: &str, color: Color) -> CastleRights {
        let (king, queen) = match color {
            Color::White => ('K', 'Q'),
            Color::Black => ('k', 'q'),
        };
        let mut rights = CastleRights::NoRights;
        if field.contains(king) {
            rights = rights.add(CastleRights::KingSide);
        }
        if field.contains(queen) {
            rights = rights.add(CastleRights::QueenSide);
        }
        rights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_are_inverse() {
        for a in ALL_CASTLE_RIGHTS.iter() {
            for b in ALL_CASTLE_RIGHTS.iter() {
                let removed = a.intersect(*b);
                assert_eq!(a.remove(removed).add(removed), *a);
            }
        }
    }

    #[test]
    fn rook_corners_map_to_their_side() {
        assert_eq!(
            CastleRights::square_to_castle_rights(Color::White, Square::H1),
            CastleRights::KingSide
        );
        assert_eq!(
            CastleRights::square_to_castle_rights(Color::White, Square::A1),
            CastleRights::QueenSide
        );
        assert_eq!(
            CastleRights::square_to_castle_rights(Color::Black, Square::E8),
            CastleRights::Both
        );
        assert_eq!(
            CastleRights::square_to_castle_rights(Color::White, Square::D4),
            CastleRights::NoRights
        );
    }

    #[test]
    fn castle_paths() {
        assert_eq!(
            CastleRights::kingside_squares(Color::Black),
            [Square::F8, Square::G8]
        );
        assert_eq!(
            CastleRights::queenside_squares(Color::White),
            [Square::B1, Square::C1, Square::D1]
        );
    }
}
