use crate::board::{Board, BoardStatus};
use crate::chess_move::ChessMove;
use crate::color::Color;
use crate::error::Error;
use crate::movegen::MoveList;
use crate::piece::Piece;
use crate::square::Square;
use log::debug;
use std::str::FromStr;

/// Contains all actions supported within the game
#[derive(Copy, Clone, PartialEq, Debug, Eq)]
pub enum Action {
    MakeMove(ChessMove),
    TakeBack(ChessMove),
    Resign(Color),
}

/// What was the result of this game?
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Debug, Hash)]
pub enum GameResult {
    WhiteCheckmates,
    WhiteResigns,
    BlackCheckmates,
    BlackResigns,
    Stalemate,
}

/// For UIs, store a game object which follows the way a person plays: pick up a piece, see where
/// it can go, put it down, and maybe take the move back.
///
/// Only the most recent move can be taken back, and only once.
///
/// ```
/// use chess_rules::{Game, GameResult, Square};
///
/// let mut game = Game::new();
/// for (from, to) in [(Square::F2, Square::F3), (Square::E7, Square::E5),
///                    (Square::G2, Square::G4), (Square::D8, Square::H4)].iter() {
///     game.select(*from).unwrap();
///     game.make_move(*to, None).unwrap();
/// }
/// assert_eq!(game.result(), Some(GameResult::BlackCheckmates));
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    selected: Option<(Square, MoveList)>,
    resigned: Option<Color>,
    take_back_to: Option<Option<ChessMove>>,
    actions: Vec<Action>,
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl Game {
    /// Create a new `Game` with the initial position.
    ///
    /// ```
    /// use chess_rules::{Game, Board};
    ///
    /// let game = Game::new();
    /// assert_eq!(game.current_position(), Board::default());
    /// ```
    pub fn new() -> Game {
        Game::new_with_board(Board::default())
    }

    /// Create a new `Game` with a specific starting position.
    pub fn new_with_board(board: Board) -> Game {
        Game {
            board,
            selected: None,
            resigned: None,
            take_back_to: None,
            actions: vec![],
        }
    }

    /// Get the current position on the board from the `Game` object.
    #[inline]
    pub fn current_position(&self) -> Board {
        self.board
    }

    /// Who's turn is it to move?
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Get all actions made in this game (moves, take backs and resignations)
    pub fn actions(&self) -> &Vec<Action> {
        &self.actions
    }

    /// Which square is picked up, if any?
    pub fn selected(&self) -> Option<Square> {
        self.selected.as_ref().map(|(sq, _)| *sq)
    }

    /// Pick up the piece on `sq` and get the moves it may make.
    ///
    /// ```
    /// use chess_rules::{Color, Error, Game, Square};
    ///
    /// let mut game = Game::new();
    /// assert_eq!(game.select(Square::B1).unwrap().len(), 2);
    /// assert_eq!(game.select(Square::B8), Err(Error::NotSideToMove { color: Color::Black }));
    /// assert_eq!(game.select(Square::B4), Err(Error::EmptySquare { square: Square::B4 }));
    /// ```
    pub fn select(&mut self, sq: Square) -> Result<&[ChessMove], Error> {
        self.selected = None;
        if self.result().is_some() {
            return Err(Error::GameOver);
        }

        let piece = self
            .board
            .occupant(sq)
            .ok_or(Error::EmptySquare { square: sq })?;
        if piece.color != self.side_to_move() {
            return Err(Error::NotSideToMove { color: piece.color });
        }

        let moves = self.board.legal_moves(sq).into_move_list();
        Ok(self.selected.insert((sq, moves)).1.as_slice())
    }

    /// Drop the selected piece without moving it.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Move the selected piece to `dest`.  A pawn reaching the last rank becomes `promotion`, or a
    /// queen.
    pub fn make_move(&mut self, dest: Square, promotion: Option<Piece>) -> Result<ChessMove, Error> {
        if self.result().is_some() {
            return Err(Error::GameOver);
        }

        let (from, moves) = self.selected.as_ref().ok_or(Error::NothingSelected)?;
        let from = *from;
        if !moves.iter().any(|m| m.get_dest() == dest) {
            return Err(Error::IllegalMove { from, to: dest });
        }

        let prev = self.board.last_move();
        let m = self.board.move_piece(from, dest, promotion)?;
        self.take_back_to = Some(prev);
        self.selected = None;
        self.actions.push(Action::MakeMove(m));
        Ok(m)
    }

    /// Take back the last move.  A second take back in a row is refused.
    ///
    /// ```
    /// use chess_rules::{Board, Error, Game, Square};
    ///
    /// let mut game = Game::new();
    /// game.select(Square::E2).unwrap();
    /// game.make_move(Square::E4, None).unwrap();
    ///
    /// game.take_back().unwrap();
    /// assert_eq!(game.current_position(), Board::default());
    /// assert_eq!(game.take_back(), Err(Error::NothingToUndo));
    /// ```
    pub fn take_back(&mut self) -> Result<ChessMove, Error> {
        if self.resigned.is_some() {
            return Err(Error::GameOver);
        }

        let prev = self.take_back_to.ok_or(Error::NothingToUndo)?;
        let m = self.board.take_back(prev)?;
        self.take_back_to = None;
        self.selected = None;
        self.actions.push(Action::TakeBack(m));
        Ok(m)
    }

    /// `color` resigns the game
    ///
    /// ```
    /// use chess_rules::{Game, GameResult, Color};
    ///
    /// let mut game = Game::new();
    /// game.resign(Color::White).unwrap();
    /// assert_eq!(game.result(), Some(GameResult::WhiteResigns));
    /// ```
    pub fn resign(&mut self, color: Color) -> Result<(), Error> {
        if self.result().is_some() {
            return Err(Error::GameOver);
        }
        debug!("{} resigns", color);
        self.resigned = Some(color);
        self.selected = None;
        self.actions.push(Action::Resign(color));
        Ok(())
    }

    /// What is the status of this game?
    ///
    /// ```
    /// use chess_rules::Game;
    ///
    /// let game = Game::new();
    /// assert!(game.result().is_none());
    /// ```
    pub fn result(&self) -> Option<GameResult> {
        match self.resigned {
            Some(Color::White) => return Some(GameResult::WhiteResigns),
            Some(Color::Black) => return Some(GameResult::BlackResigns),
            None => {}
        }

        match self.board.status() {
            BoardStatus::Checkmate => {
                if self.side_to_move() == Color::White {
                    Some(GameResult::BlackCheckmates)
                } else {
                    Some(GameResult::WhiteCheckmates)
                }
            }
            BoardStatus::Stalemate => Some(GameResult::Stalemate),
            BoardStatus::Ongoing => None,
        }
    }
}

impl FromStr for Game {
    type Err = Error;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        Ok(Game::new_with_board(Board::from_str(fen)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn play(game: &mut Game, moves: &[(Square, Square)]) {
        for (from, to) in moves.iter() {
            game.select(*from).expect("own piece");
            game.make_move(*to, None).expect("legal move");
        }
    }

    #[test]
    fn invalid_fen_is_an_error() {
        assert!(Game::from_str("Invalid FEN").is_err());
        assert!(Game::from_str("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_ok());
    }

    #[test]
    fn select_lists_destinations() {
        let mut game = Game::new();
        let mut dests: Vec<Square> = game
            .select(Square::E2)
            .unwrap()
            .iter()
            .map(|m| m.get_dest())
            .collect();
        dests.sort();
        assert_eq!(dests, vec![Square::E3, Square::E4]);
        assert_eq!(game.selected(), Some(Square::E2));
        game.deselect();
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn moving_needs_a_selection_and_a_highlighted_square() {
        let mut game = Game::new();
        assert_eq!(game.make_move(Square::E4, None), Err(Error::NothingSelected));

        game.select(Square::E2).unwrap();
        assert_eq!(
            game.make_move(Square::E5, None),
            Err(Error::IllegalMove {
                from: Square::E2,
                to: Square::E5
            })
        );
        assert_eq!(game.current_position(), Board::default());

        game.make_move(Square::E4, None).unwrap();
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn only_one_move_can_be_taken_back() {
        let mut game = Game::new();
        play(
            &mut game,
            &[(Square::E2, Square::E4), (Square::E7, Square::E5)],
        );
        let after_e4 = {
            let mut board = Board::default();
            board.move_piece(Square::E2, Square::E4, None).unwrap();
            board
        };

        let m = game.take_back().unwrap();
        assert_eq!(m.get_source(), Square::E7);
        assert_eq!(game.current_position(), after_e4);
        assert_eq!(game.take_back(), Err(Error::NothingToUndo));

        // a new move can be taken back again
        play(&mut game, &[(Square::D7, Square::D5)]);
        assert!(game.take_back().is_ok());
        assert_eq!(game.actions().len(), 5);
    }

    #[test]
    fn taking_back_restores_en_passant() {
        let mut game = Game::new();
        play(
            &mut game,
            &[
                (Square::E2, Square::E4),
                (Square::A7, Square::A6),
                (Square::E4, Square::E5),
                (Square::D7, Square::D5),
                (Square::H2, Square::H3),
            ],
        );
        game.take_back().unwrap();
        assert!(game
            .select(Square::E5)
            .unwrap()
            .iter()
            .any(|m| m.get_dest() == Square::D6));
    }

    #[test]
    fn promotion_through_the_game() {
        let mut game = Game::from_str("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        game.select(Square::B7).unwrap();
        game.make_move(Square::B8, Some(Piece::Knight)).unwrap();
        assert_eq!(game.current_position().piece_on(Square::B8), Some(Piece::Knight));
    }

    #[test]
    fn stalemate_ends_the_game() {
        let mut game = Game::from_str("k7/8/8/1Q6/8/8/8/7K w - - 0 1").unwrap();
        play(&mut game, &[(Square::B5, Square::B6)]);
        assert_eq!(game.result(), Some(GameResult::Stalemate));
        assert_eq!(game.select(Square::A8), Err(Error::GameOver));
    }

    #[test]
    fn checkmate_by_white() {
        let mut game = Game::from_str("k7/8/1K6/8/8/8/8/7R w - - 0 1").unwrap();
        play(&mut game, &[(Square::H1, Square::H8)]);
        assert_eq!(game.result(), Some(GameResult::WhiteCheckmates));
        assert_eq!(game.resign(Color::Black), Err(Error::GameOver));
    }

    #[test]
    fn resigning_ends_the_game() {
        let mut game = Game::new();
        game.resign(Color::Black).unwrap();
        assert_eq!(game.result(), Some(GameResult::BlackResigns));
        assert_eq!(game.select(Square::E2), Err(Error::GameOver));
        assert_eq!(game.take_back(), Err(Error::GameOver));
        assert_eq!(game.actions(), &vec![Action::Resign(Color::Black)]);
    }
}
