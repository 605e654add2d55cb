use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// One position on the board.
///
/// Identity is the `(row, col)` pair alone. `is_given` records whether the
/// cell carried a clue in the input grid; it never participates in equality,
/// hashing, or ordering, so a given and a non-given cell at the same position
/// are the same key in any map or set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub is_given: bool,
}

impl Cell {
    pub fn new(row: usize, col: usize, is_given: bool) -> Self {
        Self { row, col, is_given }
    }

    /// Index of the 3x3 box containing this cell.
    pub fn box_index(&self) -> usize {
        (self.row / 3) * 3 + self.col / 3
    }

    pub fn on_main_diagonal(&self) -> bool {
        self.row == self.col
    }

    pub fn on_anti_diagonal(&self, size: usize) -> bool {
        self.row + self.col == size - 1
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.col == other.col
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.row, self.col).hash(state);
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
