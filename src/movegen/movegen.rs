use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::movegen::piece_type::{pseudo_legal_moves, GenMode, MoveList};
use crate::square::Square;
use std::iter::ExactSizeIterator;

/// The legal moves of one piece.
///
/// This is what a UI asks for when the user picks up a piece: every square it may go to.
///
/// ```
/// use chess_rules::{Board, MoveGen, Square};
///
/// let board = Board::default();
///
/// // the knight on g1 may go to f3 or h3
/// let moves = MoveGen::new_legal(&board, Square::G1);
/// assert_eq!(moves.len(), 2);
///
/// // the bishop on c1 is boxed in
/// assert_eq!(MoveGen::new_legal(&board, Square::C1).len(), 0);
/// ```
pub struct MoveGen {
    moves: MoveList,
    index: usize,
}

/// Does `m` keep the mover's king out of check?
///
/// The move is made on `scratch`, the king is looked at, and the move is taken back again.  The
/// caller's board is never touched: only the scratch copy ever sits in the in-between position.
fn leaves_king_safe(scratch: &mut Board, m: &ChessMove) -> bool {
    #[cfg(debug_assertions)]
    let before = *scratch;

    let prev = scratch.last_move();
    scratch.make_move(m);
    let safe = !scratch.is_in_check(m.get_piece().color);
    scratch.unmake_move(m, prev);

    #[cfg(debug_assertions)]
    debug_assert!(*scratch == before, "undoing {} did not restore the board", m);

    safe
}

impl MoveGen {
    /// Create a new `MoveGen` structure, only generating legal moves for the piece on `src`.
    pub fn new_legal(board: &Board, src: Square) -> MoveGen {
        let mut scratch = *board;
        let moves = pseudo_legal_moves(board, src, GenMode::All)
            .into_iter()
            .filter(|m| leaves_king_safe(&mut scratch, m))
            .collect();
        MoveGen { moves, index: 0 }
    }

    /// Create a new `MoveGen` structure with every pseudo-legal move of the piece on `src`,
    /// including ones that leave its own king in check.
    pub fn new_pseudo_legal(board: &Board, src: Square) -> MoveGen {
        MoveGen {
            moves: pseudo_legal_moves(board, src, GenMode::All),
            index: 0,
        }
    }

    /// Every generated move, including ones the iterator has already returned.
    pub fn as_slice(&self) -> &[ChessMove] {
        &self.moves
    }

    /// Give up the moves as an owned list.
    pub fn into_move_list(self) -> MoveList {
        self.moves
    }

    /// Find the move landing on `dest`, if there is one.
    pub fn move_to(&self, dest: Square) -> Option<ChessMove> {
        self.moves.iter().find(|m| m.get_dest() == dest).copied()
    }
}

impl ExactSizeIterator for MoveGen {
    /// Give the exact length of this iterator
    fn len(&self) -> usize {
        self.moves.len() - self.index
    }
}

impl Iterator for MoveGen {
    type Item = ChessMove;

    /// Give a size_hint to some functions that need it
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    /// Find the next chess move.
    fn next(&mut self) -> Option<ChessMove> {
        let result = self.moves.get(self.index).copied();
        if result.is_some() {
            self.index += 1;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_move::MoveKind;
    use crate::square::ALL_SQUARES;
    use std::str::FromStr;

    fn legal_count(fen: &str, src: Square) -> usize {
        MoveGen::new_legal(&Board::from_str(fen).expect("valid fen"), src).len()
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin() {
        // the knight on e2 is pinned against the king by the rook on e8
        assert_eq!(legal_count("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1", Square::E2), 0);
        assert_eq!(
            MoveGen::new_pseudo_legal(
                &Board::from_str("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap(),
                Square::E2
            )
            .len(),
            6
        );
    }

    #[test]
    fn pinned_slider_may_move_along_the_pin() {
        // the rook on e4 can slide between the kings line and take the queen
        let board = Board::from_str("4q1k1/8/8/8/4R3/8/8/4K3 w - - 0 1").unwrap();
        let dests: Vec<Square> = MoveGen::new_legal(&board, Square::E4)
            .map(|m| m.get_dest())
            .collect();
        assert_eq!(dests.len(), 6);
        assert!(dests.iter().all(|sq| sq.get_file() == 4));
    }

    #[test]
    fn king_cannot_step_into_check() {
        // the rook on a2 covers the whole second rank
        let board = Board::from_str("4k3/8/8/8/8/8/r7/4K3 w - - 0 1").unwrap();
        let dests: Vec<Square> = MoveGen::new_legal(&board, Square::E1)
            .map(|m| m.get_dest())
            .collect();
        assert_eq!(dests.len(), 2);
        assert!(dests.contains(&Square::D1));
        assert!(dests.contains(&Square::F1));
    }

    #[test]
    fn in_check_only_answers_to_the_check_are_legal() {
        // the bishop on b4 checks the king on e1 along b4-c3-d2
        let board = Board::from_str("4k3/8/8/8/1b6/5N2/4P3/R3K3 w Q - 0 1").unwrap();
        assert!(board.is_in_check(crate::Color::White));
        let knight: Vec<Square> = MoveGen::new_legal(&board, Square::F3)
            .map(|m| m.get_dest())
            .collect();
        assert_eq!(knight, vec![Square::D2]);
        assert_eq!(MoveGen::new_legal(&board, Square::E2).len(), 0);
        // no castling out of check
        assert!(!MoveGen::new_legal(&board, Square::E1).any(|m| m.is_castle()));
    }

    #[test]
    fn castling_through_an_attacked_square_is_illegal() {
        // the rook on f8 covers f1, so white cannot castle kingside but can castle queenside
        let board = Board::from_str("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let kinds: Vec<MoveKind> = MoveGen::new_legal(&board, Square::E1)
            .map(|m| m.get_kind())
            .collect();
        assert!(!kinds.contains(&MoveKind::CastleKingside));
        assert!(kinds.contains(&MoveKind::CastleQueenside));
    }

    #[test]
    fn queenside_castling_ignores_attacks_on_the_b_file() {
        let board = Board::from_str("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        assert!(MoveGen::new_legal(&board, Square::E1)
            .any(|m| m.get_kind() == MoveKind::CastleQueenside));
    }

    #[test]
    fn generating_moves_leaves_the_board_alone() {
        let board =
            Board::from_str("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        let copy = board;
        for sq in ALL_SQUARES.iter() {
            let _ = MoveGen::new_legal(&board, *sq).count();
        }
        assert!(board == copy);
    }

    #[test]
    fn iterator_reports_remaining_length() {
        let board = Board::default();
        let mut moves = MoveGen::new_legal(&board, Square::E2);
        assert_eq!(moves.len(), 2);
        moves.next();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves.as_slice().len(), 2);
        assert!(moves.move_to(Square::E4).is_some());
    }
}
