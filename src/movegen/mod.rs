mod piece_type;
pub use self::piece_type::{
    build_move, pseudo_legal_moves, BishopType, GenMode, KingType, KnightType, MoveList, PawnType,
    PieceType, QueenType, RookType, MAX_PIECE_MOVES,
};

#[allow(clippy::module_inception)]
mod movegen;
pub use self::movegen::MoveGen;
