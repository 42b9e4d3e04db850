//! # Rules of chess
//!
//! An authoritative 8x8 board with the rules of standard chess: per-piece move generation,
//! legality filtering, check, checkmate and stalemate, castling, en passant, promotion, a single
//! level of undo, and FEN in and out.
//!
//! ```
//! use chess_rules::{Board, BoardStatus, Square};
//!
//! let mut board = Board::default();
//! board.move_piece(Square::E2, Square::E4, None).unwrap();
//! board.move_piece(Square::E7, Square::E5, None).unwrap();
//! assert_eq!(board.status(), BoardStatus::Ongoing);
//! ```

mod board;
pub use crate::board::*;

mod castle_rights;
pub use crate::castle_rights::*;

mod chess_move;
pub use crate::chess_move::*;

mod color;
pub use crate::color::*;

mod error;
pub use crate::error::*;

mod fen;
pub use crate::fen::*;

mod game;
pub use crate::game::*;

mod movegen;
pub use crate::movegen::*;

mod piece;
pub use crate::piece::*;

mod square;
pub use crate::square::*;
