use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::chess_move::{ChessMove, MoveKind};
use crate::color::{Color, ALL_COLORS, NUM_COLORS};
use crate::error::Error;
use crate::piece::{ColoredPiece, Piece};
use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};
use log::debug;

use std::convert::TryFrom;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// A position as written in Forsyth-Edwards Notation.
///
/// `Fen` sits between text and `Board`: it can be parsed from a string, printed back, built from a
/// board, and turned into a board.  Unlike `Board` it also keeps the halfmove clock and the
/// fullmove number.
///
/// ```
/// use chess_rules::{Board, Fen};
/// use std::convert::TryFrom;
/// use std::str::FromStr;
///
/// let fen = Fen::from_str("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
/// assert_eq!(Board::try_from(&fen).unwrap(), Board::default());
/// assert_eq!(format!("{}", Fen::from(&Board::default())), format!("{}", fen));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Fen {
    pieces: [Option<ColoredPiece>; NUM_SQUARES],
    side_to_move: Color,
    castle_rights: [CastleRights; NUM_COLORS],
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Fen {
    /// An empty position, white to move.
    pub fn new() -> Fen {
        Fen {
            pieces: [None; NUM_SQUARES],
            side_to_move: Color::White,
            castle_rights: [CastleRights::NoRights, CastleRights::NoRights],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub fn castle_rights(&self, color: Color) -> CastleRights {
        self.castle_rights[color.to_index()]
    }

    pub fn set_castle_rights(&mut self, color: Color, castle_rights: CastleRights) {
        self.castle_rights[color.to_index()] = castle_rights;
    }

    /// The square a pawn skipped over with a double push, if any.
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn set_en_passant(&mut self, ep: Option<Square>) {
        self.en_passant = ep;
    }

    /// Half moves since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Starts at 1 and goes up after every black move.
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// The double push that leaves `target` behind, as it must have been played on `board`.
    fn double_push_over(board: &Board, target: Square) -> Option<ChessMove> {
        let pusher = !board.side_to_move();
        let pawn = ColoredPiece::new(Piece::Pawn, pusher);
        let source = target.backward(pusher)?;
        let dest = target.forward(pusher)?;

        if source.get_rank() != pusher.to_second_rank()
            || board.occupant(dest) != Some(pawn)
            || board.occupant(target).is_some()
            || board.occupant(source).is_some()
        {
            return None;
        }
        Some(ChessMove::new(pawn, source, dest, MoveKind::Normal, None))
    }
}

impl Default for Fen {
    fn default() -> Fen {
        Fen::from(&Board::default())
    }
}

impl Index<Square> for Fen {
    type Output = Option<ColoredPiece>;

    fn index(&self, index: Square) -> &Self::Output {
        &self.pieces[index.to_index()]
    }
}

impl IndexMut<Square> for Fen {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.pieces[index.to_index()]
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in (0..8u8).rev() {
            let mut count = 0;
            for file in 0..8u8 {
                match self[Square::make_square(rank, file)] {
                    Some(piece) => {
                        if count != 0 {
                            write!(f, "{}", count)?;
                            count = 0;
                        }
                        write!(f, "{}", piece)?;
                    }
                    None => count += 1,
                }
            }

            if count != 0 {
                write!(f, "{}", count)?;
            }
            if rank != 0 {
                write!(f, "/")?;
            }
        }

        if self.side_to_move == Color::White {
            write!(f, " w ")?;
        } else {
            write!(f, " b ")?;
        }

        write!(
            f,
            "{}{}",
            self.castle_rights(Color::White).to_string(Color::White),
            self.castle_rights(Color::Black).to_string(Color::Black)
        )?;
        if self.castle_rights(Color::White) == CastleRights::NoRights
            && self.castle_rights(Color::Black) == CastleRights::NoRights
        {
            write!(f, "-")?;
        }

        match self.en_passant {
            Some(sq) => write!(f, " {}", sq)?,
            None => write!(f, " -")?,
        }

        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}

impl FromStr for Fen {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            debug!("rejecting FEN {:?}", value);
            Error::InvalidFen {
                fen: value.to_string(),
            }
        };

        let tokens: Vec<&str> = value.split_whitespace().collect();
        if tokens.len() < 4 || tokens.len() > 6 {
            return Err(invalid());
        }

        let mut fen = Fen::new();

        let rows: Vec<&str> = tokens[0].split('/').collect();
        if rows.len() != 8 {
            return Err(invalid());
        }
        for (row, rank) in rows.iter().zip((0..8u8).rev()) {
            let mut file = 0u8;
            for c in row.chars() {
                match c {
                    '1'..='8' => file += c as u8 - b'0',
                    _ => {
                        let piece = ColoredPiece::from_char(c).ok_or_else(invalid)?;
                        if file >= 8 {
                            return Err(invalid());
                        }
                        fen[Square::make_square(rank, file)] = Some(piece);
                        file += 1;
                    }
                }
                if file > 8 {
                    return Err(invalid());
                }
            }
            if file != 8 {
                return Err(invalid());
            }
        }

        fen.side_to_move = if tokens[1] == "w" {
            Color::White
        } else {
            Color::Black
        };

        for color in ALL_COLORS.iter() {
            fen.set_castle_rights(*color, CastleRights::from_fen_field(tokens[2], *color));
        }

        fen.en_passant = match tokens[3] {
            "-" => None,
            sq => Some(Square::from_str(sq).map_err(|_| invalid())?),
        };

        if let Some(clock) = tokens.get(4) {
            fen.halfmove_clock = clock.parse().map_err(|_| invalid())?;
        }
        if let Some(number) = tokens.get(5) {
            fen.fullmove_number = number.parse().map_err(|_| invalid())?;
        }

        Ok(fen)
    }
}

impl From<&Board> for Fen {
    fn from(board: &Board) -> Self {
        let mut fen = Fen::new();
        for sq in ALL_SQUARES.iter() {
            fen[*sq] = board.occupant(*sq);
        }
        fen.side_to_move = board.side_to_move();
        for color in ALL_COLORS.iter() {
            fen.set_castle_rights(*color, board.castle_rights(*color));
        }
        fen.en_passant = board
            .last_move()
            .filter(|m| m.is_double_pawn_push())
            .and_then(|m| m.get_source().forward(m.get_piece().color));
        fen
    }
}

impl From<Board> for Fen {
    fn from(board: Board) -> Self {
        (&board).into()
    }
}

impl TryFrom<&Fen> for Board {
    type Error = Error;

    fn try_from(fen: &Fen) -> Result<Self, Self::Error> {
        let mut board = Board::empty();
        let mut kings = [0usize; NUM_COLORS];

        for sq in ALL_SQUARES.iter() {
            if let Some(piece) = fen[*sq] {
                board.set_occupant(*sq, Some(piece));
                if piece.piece == Piece::King {
                    board.set_king_square(piece.color, *sq);
                    kings[piece.color.to_index()] += 1;
                }
            }
        }

        if kings != [1, 1] {
            debug!("rejecting {}: {:?} kings", fen, kings);
            return Err(Error::InvalidBoard);
        }

        board.set_side_to_move(fen.side_to_move());
        for color in ALL_COLORS.iter() {
            board.set_castle_rights(*color, fen.castle_rights(*color));
        }

        if let Some(target) = fen.en_passant() {
            let push = Fen::double_push_over(&board, target).ok_or_else(|| {
                debug!("rejecting {}: no pawn just passed {}", fen, target);
                Error::InvalidFen {
                    fen: format!("{}", fen),
                }
            })?;
            board.set_last_move(Some(push));
        }

        Ok(board)
    }
}

impl TryFrom<Fen> for Board {
    type Error = Error;

    fn try_from(fen: Fen) -> Result<Self, Self::Error> {
        Board::try_from(&fen)
    }
}
