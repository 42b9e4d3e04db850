#[macro_use]
extern crate bencher;

use bencher::Bencher;
use chess_rules::{Board, MoveGen, Square};
use std::str::FromStr;

const MIDDLEGAME_FEN: &str = "rn1qkb1r/pbp2ppp/1p2p3/3n4/8/2N2NP1/PP1PPPBP/R1BQ1RK1 b kq - 1 7";

// This is a helper function to remove boilerplate code from all the perft_* benchmarks
fn board_perft(bench: &mut Bencher, fen: &str, depth: usize, count: usize) {
    let pos = Board::from_str(fen).expect("Valid FEN");

    bench.iter(|| assert_eq!(pos.perft(depth), count));
}

fn board_all_legal_moves(bench: &mut Bencher) {
    let pos = Board::from_str(MIDDLEGAME_FEN).expect("valid fen");
    bench.iter(|| assert_eq!(pos.all_legal_moves().len(), 39));
}

fn board_legal_moves_one_piece(bench: &mut Bencher) {
    let pos = Board::from_str(MIDDLEGAME_FEN).expect("valid fen");
    bench.iter(|| assert_eq!(MoveGen::new_legal(&pos, Square::D8).len(), 7));
}

fn board_move_and_take_back(bench: &mut Bencher) {
    let pos = Board::from_str(MIDDLEGAME_FEN).expect("valid fen");
    bench.iter(|| {
        let mut board = pos;
        board
            .move_piece(Square::F8, Square::E7, None)
            .expect("legal move");
        board.take_back(pos.last_move()).expect("a move to take back");
        assert_eq!(board, pos);
    });
}

fn perft_initial_board(bench: &mut Bencher) {
    board_perft(
        bench,
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        3,
        8902,
    );
}

fn perft_en_passant_board(bench: &mut Bencher) {
    board_perft(bench, "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3, 2812);
}

fn perft_promotion_board(bench: &mut Bencher) {
    board_perft(
        bench,
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        2,
        264,
    );
}

fn perft_castles_board(bench: &mut Bencher) {
    board_perft(
        bench,
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        2,
        1486,
    );
}

fn perft_kiwipete_board(bench: &mut Bencher) {
    board_perft(
        bench,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        2,
        2039,
    );
}

benchmark_group!(
    benches,
    board_all_legal_moves,
    board_legal_moves_one_piece,
    board_move_and_take_back,
    perft_initial_board,
    perft_castles_board,
    perft_en_passant_board,
    perft_promotion_board,
    perft_kiwipete_board,
);

benchmark_main!(benches);
