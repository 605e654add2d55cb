//! Strategies for choosing which unassigned cell to branch on next.

use std::cmp::Reverse;

use crate::solver::{
    board::Board, cell::Cell, domains::DomainStore, solution::Assignment,
};

/// A trait for variable-selection heuristics.
///
/// Implementors choose the next unassigned cell for the searcher to branch
/// on. Selection must be deterministic for a given store and assignment so
/// that test fixtures are reproducible.
pub trait VariableSelectionHeuristic {
    /// Returns the next cell to assign, or `None` when every cell is
    /// already assigned.
    fn select_variable(
        &self,
        board: &Board,
        store: &DomainStore,
        assignment: &Assignment,
    ) -> Option<Cell>;
}

/// Selects the first unassigned cell in row-major order.
pub struct SelectFirstHeuristic;

impl VariableSelectionHeuristic for SelectFirstHeuristic {
    fn select_variable(
        &self,
        board: &Board,
        _store: &DomainStore,
        assignment: &Assignment,
    ) -> Option<Cell> {
        board
            .cells()
            .iter()
            .copied()
            .find(|cell| !assignment.contains_key(cell))
    }
}

/// Minimum remaining values with a degree tie-break.
///
/// Picks the unassigned cell with the smallest domain ("fail first"); ties
/// go to the cell with the most neighbours, and any remaining ties resolve
/// to the lowest `(row, col)` so runs are reproducible.
pub struct MinimumRemainingValuesHeuristic;

impl VariableSelectionHeuristic for MinimumRemainingValuesHeuristic {
    fn select_variable(
        &self,
        board: &Board,
        store: &DomainStore,
        assignment: &Assignment,
    ) -> Option<Cell> {
        board
            .cells()
            .iter()
            .copied()
            .filter(|cell| !assignment.contains_key(cell))
            .min_by_key(|cell| {
                (
                    store.get(cell).len(),
                    Reverse(board.neighbours(*cell).len()),
                    cell.row,
                    cell.col,
                )
            })
    }
}

/// Selects an unassigned cell at random. Mostly useful for shaking the
/// search out of pathological orderings in experiments.
pub struct RandomVariableHeuristic;

impl VariableSelectionHeuristic for RandomVariableHeuristic {
    fn select_variable(
        &self,
        board: &Board,
        _store: &DomainStore,
        assignment: &Assignment,
    ) -> Option<Cell> {
        use rand::seq::IteratorRandom;

        board
            .cells()
            .iter()
            .copied()
            .filter(|cell| !assignment.contains_key(cell))
            .choose(&mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{
        MinimumRemainingValuesHeuristic, RandomVariableHeuristic, SelectFirstHeuristic,
        VariableSelectionHeuristic,
    };
    use crate::solver::{
        board::{Board, BoardVariant},
        cell::Cell,
        domains::DomainStore,
        solution::Assignment,
    };

    fn empty_board(variant: BoardVariant) -> Board {
        Board::new(vec![vec![0; 9]; 9], variant).unwrap()
    }

    #[test]
    fn select_first_walks_row_major() {
        let board = empty_board(BoardVariant::Standard);
        let store = DomainStore::new(&board);
        let mut assignment = Assignment::new();
        assignment.insert(Cell::new(0, 0, false), 1);
        assignment.insert(Cell::new(0, 1, false), 2);

        let picked = SelectFirstHeuristic
            .select_variable(&board, &store, &assignment)
            .unwrap();
        assert_eq!(picked, Cell::new(0, 2, false));
    }

    #[test]
    fn mrv_prefers_the_narrowest_domain() {
        let board = empty_board(BoardVariant::Standard);
        let mut store = DomainStore::new(&board);
        let narrow = Cell::new(5, 6, false);
        for v in 1..=6 {
            store.remove(&narrow, v);
        }

        let picked = MinimumRemainingValuesHeuristic
            .select_variable(&board, &store, &Assignment::new())
            .unwrap();
        assert_eq!(picked, narrow);
    }

    #[test]
    fn mrv_breaks_ties_by_degree_then_position() {
        // On a diagonal board all domains are equal, so degree decides:
        // (4, 4) sits on both diagonals and has the most neighbours.
        let board = empty_board(BoardVariant::Diagonal);
        let store = DomainStore::new(&board);

        let picked = MinimumRemainingValuesHeuristic
            .select_variable(&board, &store, &Assignment::new())
            .unwrap();
        assert_eq!(picked, Cell::new(4, 4, false));

        // On a standard board every degree is 20, so position decides.
        let board = empty_board(BoardVariant::Standard);
        let store = DomainStore::new(&board);
        let picked = MinimumRemainingValuesHeuristic
            .select_variable(&board, &store, &Assignment::new())
            .unwrap();
        assert_eq!(picked, Cell::new(0, 0, false));
    }

    #[test]
    fn random_selection_stays_within_unassigned_cells() {
        let board = empty_board(BoardVariant::Standard);
        let store = DomainStore::new(&board);

        // Everything but the last row is assigned, so any draw must land
        // there.
        let mut assignment = Assignment::new();
        for &cell in board.cells() {
            if cell.row != 8 {
                assignment.insert(cell, 1);
            }
        }

        for _ in 0..20 {
            let picked = RandomVariableHeuristic
                .select_variable(&board, &store, &assignment)
                .unwrap();
            assert_eq!(picked.row, 8);
            assert!(!assignment.contains_key(&picked));
        }
    }

    #[test]
    fn random_selection_exhausts_like_the_others() {
        let board = empty_board(BoardVariant::Standard);
        let store = DomainStore::new(&board);
        let mut assignment = Assignment::new();
        for &cell in board.cells() {
            assignment.insert(cell, 1);
        }
        assert!(RandomVariableHeuristic
            .select_variable(&board, &store, &assignment)
            .is_none());
    }

    #[test]
    fn exhausted_assignment_selects_nothing() {
        let board = empty_board(BoardVariant::Standard);
        let store = DomainStore::new(&board);
        let mut assignment = Assignment::new();
        for &cell in board.cells() {
            assignment.insert(cell, 1);
        }
        assert!(MinimumRemainingValuesHeuristic
            .select_variable(&board, &store, &assignment)
            .is_none());
    }
}
