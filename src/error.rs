use crate::color::Color;
use crate::piece::Piece;
use crate::square::Square;
use failure::Fail;

/// Sometimes, bad stuff happens.
#[derive(Clone, Debug, Fail, PartialEq)]
pub enum Error {
    /// The FEN string is invalid
    #[fail(display = "Invalid FEN string: {}", fen)]
    InvalidFen { fen: String },

    /// The board built from a FEN string was found to be invalid
    #[fail(
        display = "The board specified did not pass sanity checks.  Are you sure each side has exactly one king?"
    )]
    InvalidBoard,

    /// An attempt was made to convert a string not equal to "a1"-"h8" to a square
    #[fail(display = "The string specified does not contain a valid algebraic notation square")]
    InvalidSquare,

    /// A move was requested from a square that holds no piece
    #[fail(display = "There is no piece on {}", square)]
    EmptySquare { square: Square },

    /// A move was requested for the side that is not on move
    #[fail(display = "It is not {}'s turn to move", color)]
    NotSideToMove { color: Color },

    /// The requested move is not in the legal move list
    #[fail(display = "{} to {} is not a legal move", from, to)]
    IllegalMove { from: Square, to: Square },

    /// Pawns only promote to a queen, rook, bishop or knight
    #[fail(display = "A pawn cannot promote to a {}", piece)]
    InvalidPromotion { piece: Piece },

    /// Only the most recent move can be taken back, and only once
    #[fail(display = "There is no move to take back")]
    NothingToUndo,

    /// A move was requested before a piece was selected
    #[fail(display = "No piece is selected")]
    NothingSelected,

    /// The game already has a result
    #[fail(display = "The game is over")]
    GameOver,
}
