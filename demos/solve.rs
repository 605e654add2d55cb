//! Command-line front end for the solver.
//!
//! Reads a puzzle from a JSON file (`{"grid": [[...], ...], "diagonal":
//! false}`), solves it, and prints the result as an ASCII grid. This is the
//! kind of external collaborator the library expects: it produces a raw
//! grid, calls the solver, and distinguishes an invalid puzzle from an
//! unsolvable one.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sudoku_csp::solver::{
    board::Puzzle,
    search::Searcher,
    solution,
    stats::render_stats_table,
};

#[derive(Parser, Debug)]
#[command(about = "Solve a standard or diagonal (X) Sudoku puzzle")]
struct Args {
    /// Path to a JSON puzzle file.
    puzzle: PathBuf,

    /// Enforce the diagonal constraints regardless of the file's setting.
    #[arg(long)]
    diagonal: bool,

    /// Print solver statistics after solving.
    #[arg(long)]
    stats: bool,
}

fn print_grid(grid: &[Vec<u8>]) {
    let cols = grid.first().map_or(0, Vec::len);
    println!("{}", "===".repeat(cols + 2));
    for (i, row) in grid.iter().enumerate() {
        if i % 3 == 0 && i != 0 {
            println!("||{}--||", "---".repeat(cols));
        }
        print!("||");
        for (j, &value) in row.iter().enumerate() {
            if value == 0 {
                print!("   ");
            } else {
                print!("{value:^3}");
            }
            if j % 3 == 2 && j != cols - 1 {
                print!("|");
            }
        }
        println!("||");
    }
    println!("{}", "===".repeat(cols + 2));
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let file = match File::open(&args.puzzle) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("cannot open {}: {err}", args.puzzle.display());
            return ExitCode::FAILURE;
        }
    };
    let mut puzzle: Puzzle = match serde_json::from_reader(file) {
        Ok(puzzle) => puzzle,
        Err(err) => {
            eprintln!("cannot parse {}: {err}", args.puzzle.display());
            return ExitCode::FAILURE;
        }
    };
    puzzle.diagonal |= args.diagonal;

    let board = match puzzle.into_board() {
        Ok(board) => board,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut searcher = Searcher::new(&board);
    match searcher.solve() {
        Some(assignment) => {
            print_grid(&solution::to_grid(&board, &assignment));
            if args.stats {
                println!("{}", render_stats_table(searcher.stats()));
            }
            ExitCode::SUCCESS
        }
        None => {
            println!("No solution");
            print_grid(board.grid());
            ExitCode::FAILURE
        }
    }
}
