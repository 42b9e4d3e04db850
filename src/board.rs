use crate::castle_rights::CastleRights;
use crate::chess_move::{ChessMove, MoveKind};
use crate::color::{Color, ALL_COLORS, NUM_COLORS};
use crate::error::Error;
use crate::fen::Fen;
use crate::movegen::{pseudo_legal_moves, GenMode, MoveGen};
use crate::piece::{ColoredPiece, Piece, PROMOTION_PIECES};
use crate::square::{Square, ALL_SQUARES};
use log::debug;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// A representation of a chess board.  That's why you're here, right?
///
/// The board is an 8x8 grid of squares, each either empty or holding one `ColoredPiece`.  Along
/// with the grid it keeps where each king stands, whose turn it is, each side's castle rights and
/// the last move played, which is all that en passant and the single level of undo need.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Board {
    squares: [[Option<ColoredPiece>; 8]; 8],
    king_squares: [Square; NUM_COLORS],
    side_to_move: Color,
    castle_rights: [CastleRights; NUM_COLORS],
    last_move: Option<ChessMove>,
}

/// What is the status of this game?
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BoardStatus {
    Ongoing,
    Stalemate,
    Checkmate,
}

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

/// Construct the initial position.
impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::new()
    }
}

impl Board {
    /// Construct the standard starting position.
    ///
    /// ```
    /// use chess_rules::{Board, Color, Piece, Square};
    ///
    /// let board = Board::new();
    /// assert_eq!(board.piece_on(Square::D1), Some(Piece::Queen));
    /// assert_eq!(board.color_on(Square::D8), Some(Color::Black));
    /// assert_eq!(board.side_to_move(), Color::White);
    /// ```
    pub fn new() -> Board {
        let mut board = Board::empty();
        for color in ALL_COLORS.iter() {
            let back = color.to_my_backrank();
            let second = color.to_second_rank();
            for file in 0..8u8 {
                board.set_occupant(
                    Square::make_square(back, file),
                    Some(ColoredPiece::new(BACK_RANK[file as usize], *color)),
                );
                board.set_occupant(
                    Square::make_square(second, file),
                    Some(ColoredPiece::new(Piece::Pawn, *color)),
                );
            }
            board.king_squares[color.to_index()] = CastleRights::king_home(*color);
            board.castle_rights[color.to_index()] = CastleRights::Both;
        }
        board
    }

    /// A board with nothing on it, white to move and no castle rights.  The king squares point
    /// at the home squares until kings are placed.
    pub(crate) fn empty() -> Board {
        Board {
            squares: [[None; 8]; 8],
            king_squares: [Square::E1, Square::E8],
            side_to_move: Color::White,
            castle_rights: [CastleRights::NoRights; NUM_COLORS],
            last_move: None,
        }
    }

    /// What is on a particular square?
    #[inline]
    pub fn occupant(&self, sq: Square) -> Option<ColoredPiece> {
        self.squares[sq.get_file() as usize][sq.get_rank() as usize]
    }

    /// What piece is on a particular `Square`?  Is there even one?
    ///
    /// ```
    /// use chess_rules::{Board, Piece, Square};
    ///
    /// let board = Board::default();
    /// assert_eq!(board.piece_on(Square::G1), Some(Piece::Knight));
    /// assert_eq!(board.piece_on(Square::E4), None);
    /// ```
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.occupant(sq).map(|p| p.piece)
    }

    /// What color piece is on a particular square?
    #[inline]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.occupant(sq).map(|p| p.color)
    }

    #[inline]
    pub(crate) fn set_occupant(&mut self, sq: Square, occupant: Option<ColoredPiece>) {
        self.squares[sq.get_file() as usize][sq.get_rank() as usize] = occupant;
    }

    /// Where is the king of `color`?
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.to_index()]
    }

    #[inline]
    pub(crate) fn set_king_square(&mut self, color: Color, sq: Square) {
        self.king_squares[color.to_index()] = sq;
    }

    /// Who's turn is it?
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// Grab the `CastleRights` for a particular side.
    ///
    /// ```
    /// use chess_rules::{Board, CastleRights, Color};
    ///
    /// let board = Board::default();
    /// assert_eq!(board.castle_rights(Color::White), CastleRights::Both);
    /// ```
    #[inline]
    pub fn castle_rights(&self, color: Color) -> CastleRights {
        self.castle_rights[color.to_index()]
    }

    #[inline]
    pub(crate) fn set_castle_rights(&mut self, color: Color, rights: CastleRights) {
        self.castle_rights[color.to_index()] = rights;
    }

    /// My castle rights.
    #[inline]
    pub fn my_castle_rights(&self) -> CastleRights {
        self.castle_rights(self.side_to_move)
    }

    /// The opponents castle rights.
    #[inline]
    pub fn their_castle_rights(&self) -> CastleRights {
        self.castle_rights(!self.side_to_move)
    }

    /// The most recent move, if any.  This is what en passant is decided from and what
    /// `undo_last_move` takes back.
    #[inline]
    pub fn last_move(&self) -> Option<ChessMove> {
        self.last_move
    }

    #[inline]
    pub(crate) fn set_last_move(&mut self, m: Option<ChessMove>) {
        self.last_move = m;
    }

    /// The rook's jump for a castling move: where it starts and where it lands.
    fn castle_rook_squares(kind: MoveKind, color: Color) -> Option<(Square, Square)> {
        let rank = color.to_my_backrank();
        match kind {
            MoveKind::CastleKingside => Some((
                CastleRights::kingside_rook_home(color),
                Square::make_square(rank, 5),
            )),
            MoveKind::CastleQueenside => Some((
                CastleRights::queenside_rook_home(color),
                Square::make_square(rank, 3),
            )),
            _ => None,
        }
    }

    /// The square of the pawn an en passant move takes: the destination file on the source rank.
    #[inline]
    fn en_passant_victim(m: &ChessMove) -> Square {
        Square::make_square(m.get_source().get_rank(), m.get_dest().get_file())
    }

    /// Apply a move to the board.  The side to move is left alone.
    ///
    /// The move is trusted: it must have come from the move generator for this very position.
    /// A promotion placed this way leaves the pawn on the last rank; use `promote_pawn` to
    /// choose the new piece.
    ///
    /// ```
    /// use chess_rules::{Board, MoveGen, Piece, Square};
    ///
    /// let mut board = Board::default();
    /// let m = MoveGen::new_legal(&board, Square::E2).move_to(Square::E4).unwrap();
    ///
    /// board.make_move(&m);
    /// assert_eq!(board.piece_on(Square::E4), Some(Piece::Pawn));
    /// assert_eq!(board.piece_on(Square::E2), None);
    /// assert_eq!(board.last_move(), Some(m));
    /// ```
    pub fn make_move(&mut self, m: &ChessMove) {
        let mover = m.get_piece();
        let color = mover.color;

        match m.get_kind() {
            MoveKind::EnPassant => self.set_occupant(Board::en_passant_victim(m), None),
            kind @ MoveKind::CastleKingside | kind @ MoveKind::CastleQueenside => {
                if let Some((home, landing)) = Board::castle_rook_squares(kind, color) {
                    let rook = self.occupant(home);
                    self.set_occupant(landing, rook);
                    self.set_occupant(home, None);
                }
            }
            MoveKind::Normal | MoveKind::Promotion => {}
        }

        self.set_occupant(m.get_dest(), Some(mover));
        self.set_occupant(m.get_source(), None);
        if mover.piece == Piece::King {
            self.set_king_square(color, m.get_dest());
        }

        self.castle_rights[color.to_index()] =
            self.castle_rights(color).remove(m.castle_rights_removed());
        self.castle_rights[(!color).to_index()] =
            self.castle_rights(!color).remove(m.opponent_castle_rights_removed());
        self.last_move = Some(*m);

        debug_assert!(self.king_is_cached(color));
    }

    /// Apply a promotion and turn the pawn into `piece`.
    ///
    /// ```
    /// use chess_rules::{Board, Error, MoveGen, Piece, Square};
    /// use std::str::FromStr;
    ///
    /// let mut board = Board::from_str("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    /// let m = MoveGen::new_legal(&board, Square::A7).move_to(Square::A8).unwrap();
    ///
    /// assert_eq!(
    ///     board.promote_pawn(&m, Piece::King),
    ///     Err(Error::InvalidPromotion { piece: Piece::King })
    /// );
    /// board.promote_pawn(&m, Piece::Knight).unwrap();
    /// assert_eq!(board.piece_on(Square::A8), Some(Piece::Knight));
    /// ```
    pub fn promote_pawn(&mut self, m: &ChessMove, piece: Piece) -> Result<(), Error> {
        if !piece.is_promotion_piece() {
            return Err(Error::InvalidPromotion { piece });
        }
        self.apply_promotion(m, piece);
        Ok(())
    }

    fn apply_promotion(&mut self, m: &ChessMove, piece: Piece) {
        self.make_move(m);
        self.set_occupant(
            m.get_dest(),
            Some(ColoredPiece::new(piece, m.get_piece().color)),
        );
    }

    /// The exact inverse of `make_move` (or `promote_pawn`), leaving `prev` as the last move.
    pub(crate) fn unmake_move(&mut self, m: &ChessMove, prev: Option<ChessMove>) {
        let mover = m.get_piece();
        let color = mover.color;

        match m.get_kind() {
            MoveKind::EnPassant => {
                self.set_occupant(m.get_dest(), None);
                self.set_occupant(
                    Board::en_passant_victim(m),
                    Some(ColoredPiece::new(Piece::Pawn, !color)),
                );
            }
            kind => {
                if let Some((home, landing)) = Board::castle_rook_squares(kind, color) {
                    let rook = self.occupant(landing);
                    self.set_occupant(home, rook);
                    self.set_occupant(landing, None);
                }
                self.set_occupant(
                    m.get_dest(),
                    m.get_captured().map(|p| ColoredPiece::new(p, !color)),
                );
            }
        }

        self.set_occupant(m.get_source(), Some(mover));
        if mover.piece == Piece::King {
            self.set_king_square(color, m.get_source());
        }

        self.castle_rights[color.to_index()] =
            self.castle_rights(color).add(m.castle_rights_removed());
        self.castle_rights[(!color).to_index()] =
            self.castle_rights(!color).add(m.opponent_castle_rights_removed());
        self.last_move = prev;

        debug_assert!(self.king_is_cached(color) && self.king_is_cached(!color));
    }

    /// Take back the last move, making `prev` the last move again.  Only one move can be taken
    /// back: the board does not remember anything older than its last move, so the caller
    /// supplies it.
    ///
    /// A board loaded from a FEN with an en-passant target already has a last move, the double
    /// push that produced the target, so it can be undone even though it was never played here.
    ///
    /// ```
    /// use chess_rules::{Board, Error, MoveGen, Square};
    ///
    /// let start = Board::default();
    /// let mut board = start;
    /// let m = MoveGen::new_legal(&board, Square::G1).move_to(Square::F3).unwrap();
    ///
    /// board.make_move(&m);
    /// assert_eq!(board.undo_last_move(None), Ok(m));
    /// assert_eq!(board, start);
    /// assert_eq!(board.undo_last_move(None), Err(Error::NothingToUndo));
    /// ```
    pub fn undo_last_move(&mut self, prev: Option<ChessMove>) -> Result<ChessMove, Error> {
        let m = self.last_move.ok_or(Error::NothingToUndo)?;
        self.unmake_move(&m, prev);
        Ok(m)
    }

    /// Does the king cache of `color` agree with the squares?
    fn king_is_cached(&self, color: Color) -> bool {
        self.occupant(self.king_square(color)) == Some(ColoredPiece::new(Piece::King, color))
    }

    /// Is `sq` attacked by any piece of the side opposing `color`?
    ///
    /// ```
    /// use chess_rules::{Board, Color, Square};
    ///
    /// let board = Board::default();
    /// // the knight on g8 covers f6, nothing black covers e5
    /// assert!(board.is_square_attacked(Square::F6, Color::White));
    /// assert!(!board.is_square_attacked(Square::E5, Color::White));
    /// ```
    pub fn is_square_attacked(&self, sq: Square, color: Color) -> bool {
        ALL_SQUARES.iter().any(|src| {
            self.color_on(*src) == Some(!color)
                && pseudo_legal_moves(self, *src, GenMode::Attacks)
                    .iter()
                    .any(|m| m.get_dest() == sq)
        })
    }

    /// Is the king of `color` attacked?
    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color)
    }

    /// Can `color` make any move at all?
    pub fn does_side_have_legal_moves(&self, color: Color) -> bool {
        ALL_SQUARES
            .iter()
            .any(|sq| self.color_on(*sq) == Some(color) && MoveGen::new_legal(self, *sq).len() > 0)
    }

    /// Is `color` checkmated?
    ///
    /// With `do_check_detection` unset the caller vouches that `color` is in check, and only the
    /// absence of legal moves is looked at.
    ///
    /// ```
    /// use chess_rules::{Board, Color};
    /// use std::str::FromStr;
    ///
    /// // fool's mate
    /// let board = Board::from_str("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
    /// assert!(board.is_in_checkmate(Color::White, true));
    /// assert!(!board.is_in_checkmate(Color::Black, true));
    /// ```
    pub fn is_in_checkmate(&self, color: Color, do_check_detection: bool) -> bool {
        if do_check_detection && !self.is_in_check(color) {
            return false;
        }
        !self.does_side_have_legal_moves(color)
    }

    /// Is `color` stalemated?
    ///
    /// With `do_check_detection` unset the caller vouches that `color` is not in check.
    pub fn is_in_stalemate(&self, color: Color, do_check_detection: bool) -> bool {
        if do_check_detection && self.is_in_check(color) {
            return false;
        }
        !self.does_side_have_legal_moves(color)
    }

    /// Is this game Ongoing, is it Stalemate, or is it Checkmate?
    ///
    /// ```
    /// use chess_rules::{Board, BoardStatus};
    ///
    /// assert_eq!(Board::default().status(), BoardStatus::Ongoing);
    /// ```
    pub fn status(&self) -> BoardStatus {
        let color = self.side_to_move;
        if self.does_side_have_legal_moves(color) {
            BoardStatus::Ongoing
        } else if self.is_in_check(color) {
            BoardStatus::Checkmate
        } else {
            BoardStatus::Stalemate
        }
    }

    /// The legal moves of the piece on `sq`, whichever side it belongs to.
    #[inline]
    pub fn legal_moves(&self, sq: Square) -> MoveGen {
        MoveGen::new_legal(self, sq)
    }

    /// Every legal move of the side to move.
    ///
    /// ```
    /// use chess_rules::Board;
    ///
    /// assert_eq!(Board::default().all_legal_moves().len(), 20);
    /// ```
    pub fn all_legal_moves(&self) -> Vec<ChessMove> {
        ALL_SQUARES
            .iter()
            .filter(|sq| self.color_on(**sq) == Some(self.side_to_move))
            .flat_map(|sq| MoveGen::new_legal(self, *sq))
            .collect()
    }

    /// Play the side to move's piece from `from` to `to` and pass the turn.
    ///
    /// A pawn reaching the last rank becomes `promotion`, or a queen if none is given.
    ///
    /// ```
    /// use chess_rules::{Board, Color, Error, Piece, Square};
    ///
    /// let mut board = Board::default();
    /// assert_eq!(
    ///     board.move_piece(Square::E7, Square::E5, None),
    ///     Err(Error::NotSideToMove { color: Color::Black })
    /// );
    /// assert_eq!(
    ///     board.move_piece(Square::E2, Square::E5, None),
    ///     Err(Error::IllegalMove { from: Square::E2, to: Square::E5 })
    /// );
    ///
    /// board.move_piece(Square::E2, Square::E4, None).unwrap();
    /// assert_eq!(board.side_to_move(), Color::Black);
    /// assert_eq!(board.piece_on(Square::E4), Some(Piece::Pawn));
    /// ```
    pub fn move_piece(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<ChessMove, Error> {
        let mover = self
            .occupant(from)
            .ok_or(Error::EmptySquare { square: from })?;
        if mover.color != self.side_to_move {
            return Err(Error::NotSideToMove { color: mover.color });
        }

        let m = self
            .legal_moves(from)
            .move_to(to)
            .ok_or(Error::IllegalMove { from, to })?;

        if m.is_promotion() {
            self.promote_pawn(&m, promotion.unwrap_or(Piece::Queen))?;
        } else {
            self.make_move(&m);
        }
        self.side_to_move = !self.side_to_move;

        debug!("{} played {}", mover.color, m);
        Ok(m)
    }

    /// Take back the last committed move and hand the turn back.
    ///
    /// ```
    /// use chess_rules::{Board, Square};
    ///
    /// let mut board = Board::default();
    /// board.move_piece(Square::B1, Square::C3, None).unwrap();
    /// board.take_back(None).unwrap();
    /// assert_eq!(board, Board::default());
    /// ```
    ///
    /// The double push behind a FEN en-passant target counts as the last move.  `Game` refuses
    /// to take it back, the board does not:
    ///
    /// ```
    /// use chess_rules::{Board, Color, Piece, Square};
    /// use std::str::FromStr;
    ///
    /// let mut board = Board::from_str("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").unwrap();
    /// let m = board.take_back(None).unwrap();
    /// assert_eq!((m.get_source(), m.get_dest()), (Square::E2, Square::E4));
    /// assert_eq!(board.piece_on(Square::E2), Some(Piece::Pawn));
    /// assert_eq!(board.side_to_move(), Color::White);
    /// ```
    pub fn take_back(&mut self, prev: Option<ChessMove>) -> Result<ChessMove, Error> {
        let m = self.undo_last_move(prev)?;
        self.side_to_move = !self.side_to_move;
        debug!("took back {}", m);
        Ok(m)
    }

    /// Count the leaves of the legal move tree `depth` plies deep.  Each promotion counts once
    /// per piece it can promote to.
    ///
    /// ```
    /// use chess_rules::Board;
    ///
    /// assert_eq!(Board::default().perft(2), 400);
    /// ```
    pub fn perft(&self, depth: usize) -> usize {
        let mut scratch = *self;
        scratch.perft_in_place(depth)
    }

    fn perft_in_place(&mut self, depth: usize) -> usize {
        if depth == 0 {
            return 1;
        }

        let color = self.side_to_move;
        let prev = self.last_move;
        let mut result = 0;

        for sq in ALL_SQUARES.iter() {
            if self.color_on(*sq) != Some(color) {
                continue;
            }
            for m in MoveGen::new_legal(self, *sq) {
                if m.is_promotion() {
                    for piece in PROMOTION_PIECES.iter() {
                        if depth == 1 {
                            result += 1;
                            continue;
                        }
                        self.apply_promotion(&m, *piece);
                        result += self.perft_after_move(&m, prev, depth);
                    }
                } else if depth == 1 {
                    result += 1;
                } else {
                    self.make_move(&m);
                    result += self.perft_after_move(&m, prev, depth);
                }
            }
        }

        result
    }

    /// Recurse below a move that has just been made, then take it back.
    fn perft_after_move(&mut self, m: &ChessMove, prev: Option<ChessMove>, depth: usize) -> usize {
        self.side_to_move = !self.side_to_move;
        let result = self.perft_in_place(depth - 1);
        self.side_to_move = !self.side_to_move;
        self.unmake_move(m, prev);
        result
    }

    /// Run a perft-test and panic if the count is wrong.
    #[cfg(test)]
    pub(crate) fn perft_test(fen: &str, depth: usize, result: usize) {
        let board = Board::from_str(fen).expect("valid fen");
        assert_eq!(board.perft(depth), result, "perft({}) of {}", depth, fen);
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Board::try_from(&Fen::from_str(value)?)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                match self.occupant(Square::make_square(rank, file)) {
                    Some(p) => write!(f, " {} ", p)?,
                    None => write!(f, " . ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   A  B  C  D  E  F  G  H")?;
        if self.side_to_move == Color::White {
            writeln!(f, "Whites Turn")
        } else {
            writeln!(f, "Blacks Turn")
        }
    }
}
