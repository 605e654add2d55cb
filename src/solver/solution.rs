use im::HashMap;

use crate::solver::{board::Board, cell::Cell};

/// Committed values for some or all cells. Persistent map, so clones taken
/// across recursive search calls share structure.
pub type Assignment = HashMap<Cell, u8>;

/// True when every cell on the board has a committed value.
pub fn is_complete(board: &Board, assignment: &Assignment) -> bool {
    assignment.len() == board.cells().len()
}

/// True when no two neighbouring cells share a committed value.
pub fn is_consistent(board: &Board, assignment: &Assignment) -> bool {
    assignment.iter().all(|(cell, value)| {
        board
            .neighbours(*cell)
            .iter()
            .all(|n| assignment.get(n) != Some(value))
    })
}

/// Renders an assignment as a `rows x cols` grid, with zero for any cell
/// the assignment does not cover.
pub fn to_grid(board: &Board, assignment: &Assignment) -> Vec<Vec<u8>> {
    let mut grid = vec![vec![0; board.cols()]; board.rows()];
    for (cell, &value) in assignment.iter() {
        grid[cell.row][cell.col] = value;
    }
    grid
}
