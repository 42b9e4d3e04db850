use crate::castle_rights::CastleRights;
use crate::piece::{ColoredPiece, Piece};
use crate::square::Square;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Special handling a move needs when it is applied or taken back.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum MoveKind {
    Normal,
    /// The captured pawn is beside the source square, not on the destination.
    EnPassant,
    /// The rook jumps from the h-file to the f-file.
    CastleKingside,
    /// The rook jumps from the a-file to the d-file.
    CastleQueenside,
    /// The pawn lands on the last rank.  The new piece type is chosen when the move is applied.
    Promotion,
}

/// Represent a ChessMove in memory
///
/// A move is a complete record of a transition: besides the squares it remembers which piece
/// moved, what (if anything) it captured, and which castle rights it took away from either side.
/// That is everything `Board::undo_last_move` needs to put the board back exactly.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ChessMove {
    piece: ColoredPiece,
    source: Square,
    dest: Square,
    kind: MoveKind,
    captured: Option<Piece>,
    castle_rights_removed: CastleRights,
    opponent_castle_rights_removed: CastleRights,
}

impl ChessMove {
    /// Create a new chess move that removes no castle rights.
    #[inline]
    pub fn new(
        piece: ColoredPiece,
        source: Square,
        dest: Square,
        kind: MoveKind,
        captured: Option<Piece>,
    ) -> ChessMove {
        ChessMove {
            piece,
            source,
            dest,
            kind,
            captured,
            castle_rights_removed: CastleRights::NoRights,
            opponent_castle_rights_removed: CastleRights::NoRights,
        }
    }

    /// Attach the castle rights this move takes away from the mover and from the opponent.
    #[inline]
    pub fn with_castle_rights_removed(
        mut self,
        mine: CastleRights,
        theirs: CastleRights,
    ) -> ChessMove {
        self.castle_rights_removed = mine;
        self.opponent_castle_rights_removed = theirs;
        self
    }

    /// Get the piece that moves, as it was before the move (a promoting pawn is still a pawn).
    #[inline]
    pub fn get_piece(&self) -> ColoredPiece {
        self.piece
    }

    /// Get the source square (square the piece is currently on).
    #[inline]
    pub fn get_source(&self) -> Square {
        self.source
    }

    /// Get the destination square (square the piece is going to).
    #[inline]
    pub fn get_dest(&self) -> Square {
        self.dest
    }

    #[inline]
    pub fn get_kind(&self) -> MoveKind {
        self.kind
    }

    /// Get the type of the captured piece (maybe).
    #[inline]
    pub fn get_captured(&self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.kind == MoveKind::Promotion
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.kind == MoveKind::CastleKingside || self.kind == MoveKind::CastleQueenside
    }

    /// Is this a pawn advancing two squares?
    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.piece == Piece::Pawn
            && (self.source.get_rank() as i8 - self.dest.get_rank() as i8).abs() == 2
    }

    /// Castle rights the mover loses by making this move.
    #[inline]
    pub fn castle_rights_removed(&self) -> CastleRights {
        self.castle_rights_removed
    }

    /// Castle rights the opponent loses, which happens when a rook is captured at home.
    #[inline]
    pub fn opponent_castle_rights_removed(&self) -> CastleRights {
        self.opponent_castle_rights_removed
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.source, self.dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn display_is_coordinate_notation() {
        let m = ChessMove::new(
            ColoredPiece::new(Piece::Pawn, Color::White),
            Square::E2,
            Square::E4,
            MoveKind::Normal,
            None,
        );
        assert_eq!(format!("{}", m), "e2e4");
        assert!(m.is_double_pawn_push());
        assert!(!m.is_capture());
    }

    #[test]
    fn rights_deltas_default_to_nothing() {
        let m = ChessMove::new(
            ColoredPiece::new(Piece::Rook, Color::Black),
            Square::H8,
            Square::H1,
            MoveKind::Normal,
            Some(Piece::Rook),
        );
        assert_eq!(m.castle_rights_removed(), CastleRights::NoRights);
        let m = m.with_castle_rights_removed(CastleRights::KingSide, CastleRights::KingSide);
        assert_eq!(m.castle_rights_removed(), CastleRights::KingSide);
        assert_eq!(m.opponent_castle_rights_removed(), CastleRights::KingSide);
        assert!(m.is_capture());
    }
}
