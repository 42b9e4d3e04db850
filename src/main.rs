use chess_rules::{Board, Error};
use clap::Parser;
use std::str::FromStr;
use std::time::Instant;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Parser, Debug)]
#[command(name = "perft")]
#[command(about = "Count the leaves of the legal move tree of a position")]
struct Args {
    /// Position to count from, in FEN
    #[arg(default_value = START_FEN)]
    fen: String,

    /// Depth in plies
    #[arg(default_value_t = 4)]
    depth: usize,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    let board = Board::from_str(&args.fen)?;

    print!("{}", board);
    let start = Instant::now();
    println!("Perft {}: {}", args.depth, board.perft(args.depth));
    println!("Performed in {} seconds", start.elapsed().as_secs_f64());
    Ok(())
}
