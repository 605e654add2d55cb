//! A constraint-propagation Sudoku solver for standard 9x9 and diagonal
//! ("X") variants.
//!
//! The puzzle is modelled as a constraint satisfaction problem: each cell is
//! a variable with a candidate domain, and rows, columns, boxes, and
//! (optionally) the two main diagonals are all-different constraint groups.
//! Solving combines three propagation passes (AC-3 arc consistency,
//! forced-single detection, and naked-subset elimination) with a
//! backtracking search guided by minimum-remaining-values and
//! least-constraining-value heuristics. Propagation is re-run at every
//! branch of the search, so most reasonable puzzles are solved with little
//! or no backtracking.
//!
//! # Core Concepts
//!
//! - **[`Board`]**: the validated grid plus the precomputed neighbour
//!   relation and constraint groups. Immutable after construction.
//! - **[`DomainStore`]**: the candidate set of every cell, with
//!   snapshot/restore support for backtracking.
//! - **[`Propagator`]**: the pruning passes, each run to a fixed point.
//! - **[`Searcher`]**: the backtracking search, and the owner of all
//!   snapshot/restore transactions.
//!
//! An unsolvable puzzle is a normal outcome, reported as `None`; the only
//! error is [`InvalidPuzzle`], raised when the input grid has the wrong
//! shape or out-of-range values.
//!
//! # Example
//!
//! ```
//! use sudoku_csp::solver::{
//!     board::{Board, BoardVariant},
//!     search::Searcher,
//!     solution,
//! };
//!
//! // A solved grid with one cell blanked out.
//! let grid: Vec<Vec<u8>> = vec![
//!     vec![5, 3, 0, 6, 7, 8, 9, 1, 2],
//!     vec![6, 7, 2, 1, 9, 5, 3, 4, 8],
//!     vec![1, 9, 8, 3, 4, 2, 5, 6, 7],
//!     vec![8, 5, 9, 7, 6, 1, 4, 2, 3],
//!     vec![4, 2, 6, 8, 5, 3, 7, 9, 1],
//!     vec![7, 1, 3, 9, 2, 4, 8, 5, 6],
//!     vec![9, 6, 1, 5, 3, 7, 2, 8, 4],
//!     vec![2, 8, 7, 4, 1, 9, 6, 3, 5],
//!     vec![3, 4, 5, 2, 8, 6, 1, 7, 9],
//! ];
//!
//! let board = Board::new(grid, BoardVariant::Standard).unwrap();
//! let mut searcher = Searcher::new(&board);
//! let assignment = searcher.solve().expect("puzzle has a solution");
//!
//! let solved = solution::to_grid(&board, &assignment);
//! assert_eq!(solved[0][2], 4);
//! ```
//!
//! [`Board`]: solver::board::Board
//! [`DomainStore`]: solver::domains::DomainStore
//! [`Propagator`]: solver::propagate::Propagator
//! [`Searcher`]: solver::search::Searcher
//! [`InvalidPuzzle`]: error::InvalidPuzzle

pub mod error;
pub mod solver;
