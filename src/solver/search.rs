use tracing::debug;

use crate::{
    error::Result,
    solver::{
        board::{Board, BoardVariant},
        domains::DomainStore,
        heuristics::{
            value::{LeastConstrainingValueHeuristic, ValueOrderingHeuristic},
            variable::{MinimumRemainingValuesHeuristic, VariableSelectionHeuristic},
        },
        propagate::{Propagation, Propagator},
        solution::{self, Assignment},
        stats::SearchStats,
    },
};

/// Heuristic-guided backtracking search over propagated domains.
///
/// The searcher owns the domain store and is the only component that takes
/// and restores snapshots: one snapshot before each tentative assignment,
/// restored before the next candidate value is tried. Each branch re-enters
/// the full propagation pipeline, so the search runs on domains that are
/// always at a fixed point.
pub struct Searcher<'a> {
    board: &'a Board,
    propagator: Propagator<'a>,
    store: DomainStore,
    variable_heuristic: Box<dyn VariableSelectionHeuristic>,
    value_heuristic: Box<dyn ValueOrderingHeuristic>,
    stats: SearchStats,
}

impl<'a> Searcher<'a> {
    /// A searcher with the default heuristics: minimum remaining values
    /// (degree tie-break) and least constraining value.
    pub fn new(board: &'a Board) -> Self {
        Self::with_heuristics(
            board,
            Box::new(MinimumRemainingValuesHeuristic),
            Box::new(LeastConstrainingValueHeuristic),
        )
    }

    pub fn with_heuristics(
        board: &'a Board,
        variable_heuristic: Box<dyn VariableSelectionHeuristic>,
        value_heuristic: Box<dyn ValueOrderingHeuristic>,
    ) -> Self {
        Self {
            board,
            propagator: Propagator::new(board),
            store: DomainStore::new(board),
            variable_heuristic,
            value_heuristic,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Runs propagation and backtracking to completion.
    ///
    /// `None` is the normal unsatisfiable outcome: propagation found a
    /// contradiction or the search exhausted every branch.
    pub fn solve(&mut self) -> Option<Assignment> {
        let result = self.propagate_and_search();
        debug!(
            nodes = self.stats.nodes_visited,
            backtracks = self.stats.backtracks,
            solved = result.is_some(),
            "search finished"
        );
        result
    }

    /// The full pipeline, re-entered at every branch of the search:
    /// propagate to a fixed point, run one naked-subset pass, propagate
    /// again, then hand the singleton cells to the backtracker.
    fn propagate_and_search(&mut self) -> Option<Assignment> {
        if self.propagate_to_fixed_point().failed() {
            return None;
        }
        if self
            .propagator
            .eliminate_naked_subsets(&mut self.store, &mut self.stats)
            .failed()
        {
            return None;
        }
        // Subset elimination may unlock further propagation.
        if self.propagate_to_fixed_point().failed() {
            return None;
        }

        let mut assignment = Assignment::new();
        for &cell in self.board.cells() {
            if let Some(value) = self.store.singleton_value(&cell) {
                assignment.insert(cell, value);
            }
        }
        self.backtrack(assignment)
    }

    /// Alternates AC-3 and forced singles until neither changes anything.
    fn propagate_to_fixed_point(&mut self) -> Propagation {
        loop {
            let ac3 = self
                .propagator
                .enforce_arc_consistency(&mut self.store, &mut self.stats);
            if ac3.failed() {
                return Propagation::Contradiction;
            }
            let singles = self
                .propagator
                .find_forced_singles(&mut self.store, &mut self.stats);
            if singles.failed() {
                return Propagation::Contradiction;
            }
            if !ac3.changed() && !singles.changed() {
                return Propagation::Unchanged;
            }
        }
    }

    fn backtrack(&mut self, mut assignment: Assignment) -> Option<Assignment> {
        self.stats.nodes_visited += 1;

        if solution::is_complete(self.board, &assignment) {
            return Some(assignment);
        }

        let cell = self
            .variable_heuristic
            .select_variable(self.board, &self.store, &assignment)?;

        for value in
            self.value_heuristic
                .order_values(cell, self.board, &self.store, &assignment)
        {
            assignment.insert(cell, value);
            if solution::is_consistent(self.board, &assignment) {
                let snapshot = self.store.snapshot();
                self.store.collapse(&cell, value);
                if let Some(found) = self.propagate_and_search() {
                    return Some(found);
                }
                self.store.restore(snapshot);
            }
            assignment.remove(&cell);
            self.stats.backtracks += 1;
        }

        None
    }
}

/// Solves a raw grid end to end: board construction, propagation, search.
///
/// Returns the completed grid, or `Ok(None)` when the puzzle has no
/// solution. Construction failures (wrong shape, out-of-range values)
/// surface as [`crate::error::Error`].
pub fn solve_grid(grid: Vec<Vec<u8>>, variant: BoardVariant) -> Result<Option<Vec<Vec<u8>>>> {
    let board = Board::new(grid, variant)?;
    let mut searcher = Searcher::new(&board);
    let solved = searcher
        .solve()
        .map(|assignment| solution::to_grid(&board, &assignment));
    Ok(solved)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{solve_grid, Searcher};
    use crate::solver::{
        board::{Board, BoardVariant},
        heuristics::{
            value::{IdentityValueHeuristic, LeastConstrainingValueHeuristic},
            variable::{RandomVariableHeuristic, SelectFirstHeuristic},
        },
        solution,
    };

    pub type Grid = [[u8; 9]; 9];

    pub const CLASSIC_PUZZLE: Grid = [
        [5, 3, 0, 0, 7, 0, 0, 0, 0],
        [6, 0, 0, 1, 9, 5, 0, 0, 0],
        [0, 9, 8, 0, 0, 0, 0, 6, 0],
        [8, 0, 0, 0, 6, 0, 0, 0, 3],
        [4, 0, 0, 8, 0, 3, 0, 0, 1],
        [7, 0, 0, 0, 2, 0, 0, 0, 6],
        [0, 6, 0, 0, 0, 0, 2, 8, 0],
        [0, 0, 0, 4, 1, 9, 0, 0, 5],
        [0, 0, 0, 0, 8, 0, 0, 7, 9],
    ];

    pub const CLASSIC_SOLUTION: Grid = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    pub fn to_vec(grid: Grid) -> Vec<Vec<u8>> {
        grid.iter().map(|row| row.to_vec()).collect()
    }

    /// Structural validity: clues preserved, and every row, column, box
    /// (and diagonal, when requested) contains each value exactly once.
    pub fn is_valid_solution(puzzle: &Grid, solved: &[Vec<u8>], diagonal: bool) -> bool {
        for r in 0..9 {
            for c in 0..9 {
                if puzzle[r][c] != 0 && puzzle[r][c] != solved[r][c] {
                    return false;
                }
                if solved[r][c] == 0 || solved[r][c] > 9 {
                    return false;
                }
            }
        }

        for i in 0..9 {
            let mut row_digits = std::collections::HashSet::new();
            let mut col_digits = std::collections::HashSet::new();
            for j in 0..9 {
                if !row_digits.insert(solved[i][j]) || !col_digits.insert(solved[j][i]) {
                    return false;
                }
            }
        }

        for br in 0..3 {
            for bc in 0..3 {
                let mut box_digits = std::collections::HashSet::new();
                for r in (br * 3)..(br * 3 + 3) {
                    for c in (bc * 3)..(bc * 3 + 3) {
                        if !box_digits.insert(solved[r][c]) {
                            return false;
                        }
                    }
                }
            }
        }

        if diagonal {
            let mut main = std::collections::HashSet::new();
            let mut anti = std::collections::HashSet::new();
            for i in 0..9 {
                if !main.insert(solved[i][i]) || !anti.insert(solved[i][8 - i]) {
                    return false;
                }
            }
        }

        true
    }

    #[test]
    fn solves_the_classic_puzzle() {
        let _ = tracing_subscriber::fmt::try_init();

        let solved = solve_grid(to_vec(CLASSIC_PUZZLE), BoardVariant::Standard)
            .unwrap()
            .expect("classic puzzle has a solution");
        assert_eq!(solved, to_vec(CLASSIC_SOLUTION));
    }

    #[test]
    fn solves_the_empty_grid() {
        let solved = solve_grid(vec![vec![0; 9]; 9], BoardVariant::Standard)
            .unwrap()
            .expect("the empty grid has completions");
        assert!(is_valid_solution(&[[0; 9]; 9], &solved, false));
    }

    #[test]
    fn fills_a_single_missing_cell() {
        let mut grid = to_vec(CLASSIC_SOLUTION);
        grid[0][2] = 0;

        let solved = solve_grid(grid, BoardVariant::Standard)
            .unwrap()
            .expect("one hole in a valid solution is solvable");
        assert_eq!(solved[0][2], 4);
        assert_eq!(solved, to_vec(CLASSIC_SOLUTION));
    }

    #[test]
    fn reports_duplicate_givens_as_unsatisfiable() {
        let mut grid = to_vec(CLASSIC_PUZZLE);
        grid[0][8] = 5; // second 5 in the first row

        let result = solve_grid(grid, BoardVariant::Standard).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn rejects_misshapen_grids_before_solving() {
        let grid = vec![vec![0; 9]; 8];
        assert!(solve_grid(grid, BoardVariant::Standard).is_err());
    }

    #[test]
    fn diagonal_mode_rejects_diagonal_clashes() {
        // The classic solution is valid under standard rules but repeats 7
        // on the main diagonal, so diagonal mode must refuse it.
        let grid = to_vec(CLASSIC_SOLUTION);
        assert!(solve_grid(grid.clone(), BoardVariant::Diagonal)
            .unwrap()
            .is_none());
        assert_eq!(
            solve_grid(grid.clone(), BoardVariant::Standard).unwrap(),
            Some(grid)
        );
    }

    #[test]
    fn diagonal_mode_solves_the_empty_grid() {
        let solved = solve_grid(vec![vec![0; 9]; 9], BoardVariant::Diagonal)
            .unwrap()
            .expect("empty X-Sudoku has completions");
        assert!(is_valid_solution(&[[0; 9]; 9], &solved, true));
    }

    #[test]
    fn solved_assignments_pass_the_consistency_check() {
        let board = Board::new(to_vec(CLASSIC_PUZZLE), BoardVariant::Standard).unwrap();
        let mut searcher = Searcher::new(&board);
        let assignment = searcher.solve().expect("classic puzzle has a solution");

        assert!(solution::is_complete(&board, &assignment));
        assert!(solution::is_consistent(&board, &assignment));
    }

    #[test]
    fn given_cells_survive_solving() {
        let board = Board::new(to_vec(CLASSIC_PUZZLE), BoardVariant::Standard).unwrap();
        let mut searcher = Searcher::new(&board);
        let assignment = searcher.solve().unwrap();

        for &cell in board.cells() {
            if cell.is_given {
                assert_eq!(assignment.get(&cell), Some(&board.value(cell)));
            }
        }
    }

    #[test]
    fn heuristics_do_not_affect_the_unique_solution() {
        let board = Board::new(to_vec(CLASSIC_PUZZLE), BoardVariant::Standard).unwrap();
        let mut searcher = Searcher::with_heuristics(
            &board,
            Box::new(SelectFirstHeuristic),
            Box::new(IdentityValueHeuristic),
        );
        let assignment = searcher.solve().unwrap();
        assert_eq!(
            solution::to_grid(&board, &assignment),
            to_vec(CLASSIC_SOLUTION)
        );
    }

    #[test]
    fn random_variable_selection_still_solves() {
        // The classic puzzle has a unique solution, so any branching order
        // must arrive at it.
        let board = Board::new(to_vec(CLASSIC_PUZZLE), BoardVariant::Standard).unwrap();
        let mut searcher = Searcher::with_heuristics(
            &board,
            Box::new(RandomVariableHeuristic),
            Box::new(LeastConstrainingValueHeuristic),
        );
        let assignment = searcher.solve().expect("classic puzzle has a solution");
        assert_eq!(
            solution::to_grid(&board, &assignment),
            to_vec(CLASSIC_SOLUTION)
        );
    }

    #[test]
    fn stats_record_the_work_done() {
        let board = Board::new(to_vec(CLASSIC_PUZZLE), BoardVariant::Standard).unwrap();
        let mut searcher = Searcher::new(&board);
        searcher.solve().unwrap();

        let stats = searcher.stats();
        assert!(stats.nodes_visited >= 1);
        assert!(stats.revisions > 0);
        assert!(stats.prunings > 0);
    }
}
