use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::chess_move::{ChessMove, MoveKind};
use crate::color::Color;
use crate::piece::{ColoredPiece, Piece};
use crate::square::Square;
use arrayvec::ArrayVec;

/// The most moves one piece can have.  A queen in the middle of an empty board has 27.
pub const MAX_PIECE_MOVES: usize = 32;

/// The moves of a single piece.  Owned by whoever asked for them.
pub type MoveList = ArrayVec<ChessMove, MAX_PIECE_MOVES>;

/// What are the moves being generated for?
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GenMode {
    /// Every pseudo-legal move, castling and en passant included.
    All,
    /// Only the squares a piece attacks.  Castling is skipped, so that looking for attackers
    /// never asks whether the *opponent* could castle, and pawns report both diagonals whether or
    /// not anything stands there.
    Attacks,
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub trait PieceType {
    /// Push every pseudo-legal move of the `color` piece of this type on `src` into `moves`.
    fn pseudo_legals(board: &Board, src: Square, color: Color, mode: GenMode, moves: &mut MoveList);
}

pub struct PawnType;
pub struct BishopType;
pub struct KnightType;
pub struct RookType;
pub struct QueenType;
pub struct KingType;

/// Build the move of `piece` from `src` to `dest`, recording what it captures and which castle
/// rights it takes from either side.  Rights deltas only ever contain rights that are set right
/// now, so that restoring them on undo is exact.
pub fn build_move(
    board: &Board,
    piece: ColoredPiece,
    src: Square,
    dest: Square,
    kind: MoveKind,
) -> ChessMove {
    let color = piece.color;
    let captured = match kind {
        MoveKind::EnPassant => Some(Piece::Pawn),
        _ => board.piece_on(dest),
    };

    let mine = board
        .castle_rights(color)
        .intersect(CastleRights::square_to_castle_rights(color, src));
    let theirs = if captured.is_some() {
        board
            .castle_rights(!color)
            .intersect(CastleRights::square_to_castle_rights(!color, dest))
    } else {
        CastleRights::NoRights
    };

    ChessMove::new(piece, src, dest, kind, captured).with_castle_rights_removed(mine, theirs)
}

/// One-step movers (knight, king): the target must be empty or hold an enemy.
fn step_moves(
    board: &Board,
    piece: ColoredPiece,
    src: Square,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in offsets {
        if let Some(dest) = src.offset(df, dr) {
            match board.occupant(dest) {
                Some(other) if other.color == piece.color => {}
                _ => moves.push(build_move(board, piece, src, dest, MoveKind::Normal)),
            }
        }
    }
}

/// Cast a ray in each direction until it leaves the board or hits a piece.  An enemy piece ends
/// the ray as a capture; a friendly piece ends it without one.
fn slide_moves(
    board: &Board,
    piece: ColoredPiece,
    src: Square,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in directions {
        let mut cur = src;
        while let Some(dest) = cur.offset(df, dr) {
            match board.occupant(dest) {
                None => {
                    moves.push(build_move(board, piece, src, dest, MoveKind::Normal));
                    cur = dest;
                }
                Some(other) => {
                    if other.color != piece.color {
                        moves.push(build_move(board, piece, src, dest, MoveKind::Normal));
                    }
                    break;
                }
            }
        }
    }
}

impl PawnType {
    /// Where could the pawn on `src` capture en passant, if anywhere?
    ///
    /// The pawn being captured must have just made a double push, which means it is the board's
    /// `last_move`, and it must be standing right beside `src`.
    pub fn en_passant_dest(board: &Board, src: Square, color: Color) -> Option<Square> {
        let last = board.last_move()?;
        if last.get_piece() != ColoredPiece::new(Piece::Pawn, !color) || !last.is_double_pawn_push()
        {
            return None;
        }

        let passed = last.get_dest();
        let file_gap = (passed.get_file() as i8 - src.get_file() as i8).abs();
        if passed.get_rank() != src.get_rank() || file_gap != 1 {
            return None;
        }

        passed
            .forward(color)
            .filter(|dest| board.occupant(*dest).is_none())
    }
}

impl PieceType for PawnType {
    fn pseudo_legals(board: &Board, src: Square, color: Color, mode: GenMode, moves: &mut MoveList) {
        let piece = ColoredPiece::new(Piece::Pawn, color);
        let kind_for = |dest: Square| {
            if dest.get_rank() == color.to_their_backrank() {
                MoveKind::Promotion
            } else {
                MoveKind::Normal
            }
        };

        for &df in [-1i8, 1].iter() {
            if let Some(dest) = src.offset(df, color.pawn_direction()) {
                match board.occupant(dest) {
                    Some(other) if other.color != color => {
                        moves.push(build_move(board, piece, src, dest, kind_for(dest)))
                    }
                    None if mode == GenMode::Attacks => {
                        moves.push(build_move(board, piece, src, dest, MoveKind::Normal))
                    }
                    _ => {}
                }
            }
        }

        if mode == GenMode::Attacks {
            return;
        }

        if let Some(one) = src.forward(color) {
            if board.occupant(one).is_none() {
                moves.push(build_move(board, piece, src, one, kind_for(one)));

                if src.get_rank() == color.to_second_rank() {
                    if let Some(two) = one.forward(color) {
                        if board.occupant(two).is_none() {
                            moves.push(build_move(board, piece, src, two, MoveKind::Normal));
                        }
                    }
                }
            }
        }

        if let Some(dest) = PawnType::en_passant_dest(board, src, color) {
            moves.push(build_move(board, piece, src, dest, MoveKind::EnPassant));
        }
    }
}

impl PieceType for KnightType {
    fn pseudo_legals(board: &Board, src: Square, color: Color, _mode: GenMode, moves: &mut MoveList) {
        let piece = ColoredPiece::new(Piece::Knight, color);
        step_moves(board, piece, src, &KNIGHT_OFFSETS, moves);
    }
}

impl PieceType for BishopType {
    fn pseudo_legals(board: &Board, src: Square, color: Color, _mode: GenMode, moves: &mut MoveList) {
        let piece = ColoredPiece::new(Piece::Bishop, color);
        slide_moves(board, piece, src, &BISHOP_DIRECTIONS, moves);
    }
}

impl PieceType for RookType {
    fn pseudo_legals(board: &Board, src: Square, color: Color, _mode: GenMode, moves: &mut MoveList) {
        let piece = ColoredPiece::new(Piece::Rook, color);
        slide_moves(board, piece, src, &ROOK_DIRECTIONS, moves);
    }
}

impl PieceType for QueenType {
    fn pseudo_legals(board: &Board, src: Square, color: Color, _mode: GenMode, moves: &mut MoveList) {
        let piece = ColoredPiece::new(Piece::Queen, color);
        slide_moves(board, piece, src, &BISHOP_DIRECTIONS, moves);
        slide_moves(board, piece, src, &ROOK_DIRECTIONS, moves);
    }
}

impl KingType {
    /// Add castling moves for the king on `src`.
    ///
    /// We can castle on a side iff:
    ///  * the `Board` structure says we still have that right.
    ///  * the king is on its home square and our rook is in that corner.
    ///  * the squares between the king and the rook are empty.
    ///  * the king is not in check, and neither the square it crosses nor the one it lands on is
    ///    attacked.
    fn castles(board: &Board, src: Square, color: Color, moves: &mut MoveList) {
        let rights = board.castle_rights(color);
        if rights == CastleRights::NoRights || src != CastleRights::king_home(color) {
            return;
        }

        let rook = Some(ColoredPiece::new(Piece::Rook, color));
        let king = ColoredPiece::new(Piece::King, color);
        let empty = |sq: &Square| board.occupant(*sq).is_none();
        let safe = |sq: &Square| !board.is_square_attacked(*sq, color);

        if board.is_square_attacked(src, color) {
            return;
        }

        let kingside = CastleRights::kingside_squares(color);
        if rights.has_kingside()
            && board.occupant(CastleRights::kingside_rook_home(color)) == rook
            && kingside.iter().all(empty)
            && kingside.iter().all(safe)
        {
            moves.push(build_move(
                board,
                king,
                src,
                kingside[1],
                MoveKind::CastleKingside,
            ));
        }

        // the b-file square has to be empty, but the king never crosses it
        let queenside = CastleRights::queenside_squares(color);
        if rights.has_queenside()
            && board.occupant(CastleRights::queenside_rook_home(color)) == rook
            && queenside.iter().all(empty)
            && queenside[1..].iter().all(safe)
        {
            moves.push(build_move(
                board,
                king,
                src,
                queenside[1],
                MoveKind::CastleQueenside,
            ));
        }
    }
}

impl PieceType for KingType {
    fn pseudo_legals(board: &Board, src: Square, color: Color, mode: GenMode, moves: &mut MoveList) {
        let piece = ColoredPiece::new(Piece::King, color);
        step_moves(board, piece, src, &KING_OFFSETS, moves);

        if mode == GenMode::All {
            KingType::castles(board, src, color, moves);
        }
    }
}

/// Generate the pseudo-legal moves (moves that *may* leave you in check) of whatever piece
/// stands on `src`.  An empty square has no moves.
pub fn pseudo_legal_moves(board: &Board, src: Square, mode: GenMode) -> MoveList {
    let mut moves = MoveList::new();
    if let Some(ColoredPiece { piece, color }) = board.occupant(src) {
        match piece {
            Piece::Pawn => PawnType::pseudo_legals(board, src, color, mode, &mut moves),
            Piece::Knight => KnightType::pseudo_legals(board, src, color, mode, &mut moves),
            Piece::Bishop => BishopType::pseudo_legals(board, src, color, mode, &mut moves),
            Piece::Rook => RookType::pseudo_legals(board, src, color, mode, &mut moves),
            Piece::Queen => QueenType::pseudo_legals(board, src, color, mode, &mut moves),
            Piece::King => KingType::pseudo_legals(board, src, color, mode, &mut moves),
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dests(board: &Board, src: Square, mode: GenMode) -> Vec<Square> {
        let mut result: Vec<Square> = pseudo_legal_moves(board, src, mode)
            .iter()
            .map(|m| m.get_dest())
            .collect();
        result.sort();
        result
    }

    #[test]
    fn knight_in_the_corner() {
        let board = Board::new();
        assert_eq!(dests(&board, Square::B1, GenMode::All), vec![Square::A3, Square::C3]);
    }

    #[test]
    fn rook_ray_stops_at_pieces() {
        let board = Board::from_str("4k3/8/8/1p1R2P1/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            dests(&board, Square::D5, GenMode::All),
            vec![
                Square::D1,
                Square::D2,
                Square::D3,
                Square::D4,
                Square::B5,
                Square::C5,
                Square::E5,
                Square::F5,
                Square::D6,
                Square::D7,
                Square::D8,
            ]
        );
    }

    #[test]
    fn queen_in_the_middle_of_an_empty_board() {
        let board = Board::from_str("k7/8/8/8/3Q4/8/8/7K w - - 0 1").unwrap();
        assert_eq!(pseudo_legal_moves(&board, Square::D4, GenMode::All).len(), 27);
    }

    #[test]
    fn pawn_pushes_and_captures() {
        let board = Board::from_str("4k3/8/8/8/8/2n5/3P4/4K3 w - - 0 1").unwrap();
        assert_eq!(
            dests(&board, Square::D2, GenMode::All),
            vec![Square::C3, Square::D3, Square::D4]
        );
        let capture = pseudo_legal_moves(&board, Square::D2, GenMode::All)
            .into_iter()
            .find(|m| m.get_dest() == Square::C3)
            .unwrap();
        assert_eq!(capture.get_captured(), Some(Piece::Knight));
    }

    #[test]
    fn blocked_pawn_cannot_double_push() {
        let board = Board::from_str("4k3/8/8/8/3n4/8/3P4/4K3 w - - 0 1").unwrap();
        assert_eq!(dests(&board, Square::D2, GenMode::All), vec![Square::D3]);
    }

    #[test]
    fn pawn_attacks_ignore_occupancy() {
        let board = Board::from_str("4k3/8/8/8/8/8/3P4/4K3 w - - 0 1").unwrap();
        assert_eq!(
            dests(&board, Square::D2, GenMode::Attacks),
            vec![Square::C3, Square::E3]
        );
    }

    #[test]
    fn pawn_on_seventh_promotes() {
        let board = Board::from_str("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let moves = pseudo_legal_moves(&board, Square::A7, GenMode::All);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| m.get_kind() == MoveKind::Promotion));
    }

    #[test]
    fn capturing_a_rook_at_home_removes_their_right() {
        let board = Board::from_str("r3k3/1B6/8/8/8/8/8/4K3 w q - 0 1").unwrap();
        let capture = pseudo_legal_moves(&board, Square::B7, GenMode::All)
            .into_iter()
            .find(|m| m.get_dest() == Square::A8)
            .unwrap();
        assert_eq!(capture.get_captured(), Some(Piece::Rook));
        assert_eq!(capture.castle_rights_removed(), CastleRights::NoRights);
        assert_eq!(
            capture.opponent_castle_rights_removed(),
            CastleRights::QueenSide
        );
    }

    #[test]
    fn king_move_removes_only_rights_that_are_set() {
        let board = Board::from_str("4k3/8/8/8/8/8/8/R3K2R w Q - 0 1").unwrap();
        let m = pseudo_legal_moves(&board, Square::E1, GenMode::All)
            .into_iter()
            .find(|m| m.get_dest() == Square::E2)
            .unwrap();
        assert_eq!(m.castle_rights_removed(), CastleRights::QueenSide);
    }

    #[test]
    fn no_castling_in_attack_mode() {
        let board = Board::from_str("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(pseudo_legal_moves(&board, Square::E1, GenMode::All)
            .iter()
            .any(|m| m.is_castle()));
        assert!(!pseudo_legal_moves(&board, Square::E1, GenMode::Attacks)
            .iter()
            .any(|m| m.is_castle()));
    }

    #[test]
    fn empty_square_has_no_moves() {
        assert!(pseudo_legal_moves(&Board::new(), Square::E4, GenMode::All).is_empty());
    }
}
