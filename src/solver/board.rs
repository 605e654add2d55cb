use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{
    error::{InvalidPuzzle, Result},
    solver::cell::Cell,
};

/// Which family of constraints the board enforces.
///
/// `Diagonal` adds the two main diagonals as constraint groups on top of the
/// standard rows, columns, and boxes ("X-Sudoku").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardVariant {
    #[default]
    Standard,
    Diagonal,
}

/// Raw puzzle input as supplied by an external caller (form handler, file,
/// test fixture). `0` denotes an empty cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puzzle {
    pub grid: Vec<Vec<u8>>,
    #[serde(default)]
    pub diagonal: bool,
}

impl Puzzle {
    pub fn into_board(self) -> Result<Board> {
        let variant = if self.diagonal {
            BoardVariant::Diagonal
        } else {
            BoardVariant::Standard
        };
        Board::new(self.grid, variant)
    }
}

/// An immutable puzzle board: the validated grid, the cells, and the
/// precomputed neighbour relation and constraint groups.
///
/// Two distinct cells are neighbours when they share a row, a column, a
/// box, or (in the `Diagonal` variant) lie on the same main diagonal.
/// The relation is symmetric and fixed for the board's lifetime,
/// so it is computed once at construction.
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    grid: Vec<Vec<u8>>,
    variant: BoardVariant,
    cells: Vec<Cell>,
    neighbours: HashMap<Cell, Vec<Cell>>,
    groups: Vec<Vec<Cell>>,
}

impl Board {
    /// Builds a standard 9x9-shaped board from a raw grid.
    ///
    /// Fails with [`InvalidPuzzle`] when the grid shape does not match the
    /// declared dimensions or any value lies outside `0..=max(rows, cols)`.
    pub fn new(grid: Vec<Vec<u8>>, variant: BoardVariant) -> Result<Self> {
        Self::with_dimensions(grid, 9, 9, variant)
    }

    pub fn with_dimensions(
        grid: Vec<Vec<u8>>,
        rows: usize,
        cols: usize,
        variant: BoardVariant,
    ) -> Result<Self> {
        // Candidate values are u8, so dimensions above u8::MAX cannot be
        // represented in a domain.
        let max = u8::try_from(rows.max(cols)).map_err(|_| InvalidPuzzle::DimensionTooLarge {
            rows,
            cols,
            limit: u8::MAX,
        })?;
        if grid.len() != rows {
            return Err(InvalidPuzzle::RowCountMismatch {
                expected: rows,
                actual: grid.len(),
            }
            .into());
        }
        for (row, values) in grid.iter().enumerate() {
            if values.len() != cols {
                return Err(InvalidPuzzle::ColumnCountMismatch {
                    row,
                    expected: cols,
                    actual: values.len(),
                }
                .into());
            }
            for (col, &value) in values.iter().enumerate() {
                if value > max {
                    return Err(InvalidPuzzle::ValueOutOfRange {
                        row,
                        col,
                        value,
                        max,
                    }
                    .into());
                }
            }
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(row, col, grid[row][col] != 0));
            }
        }

        let neighbours = compute_neighbours(&cells, rows, variant);
        let groups = compute_groups(&cells, rows, variant);

        Ok(Self {
            rows,
            cols,
            grid,
            variant,
            cells,
            neighbours,
            groups,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn variant(&self) -> BoardVariant {
        self.variant
    }

    /// The largest candidate value on this board.
    pub fn max_value(&self) -> u8 {
        self.rows.max(self.cols) as u8
    }

    pub fn grid(&self) -> &[Vec<u8>] {
        &self.grid
    }

    pub fn value(&self, cell: Cell) -> u8 {
        self.grid[cell.row][cell.col]
    }

    /// Every cell on the board, in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All cells constrained together with `cell`, sorted by `(row, col)`.
    pub fn neighbours(&self, cell: Cell) -> &[Cell] {
        self.neighbours.get(&cell).map_or(&[], Vec::as_slice)
    }

    /// The constraint groups: rows, columns, boxes, and (diagonal variant)
    /// the two main diagonals. Every value must appear exactly once per
    /// group in a solved board.
    pub fn constraint_groups(&self) -> &[Vec<Cell>] {
        &self.groups
    }
}

fn compute_neighbours(
    cells: &[Cell],
    size: usize,
    variant: BoardVariant,
) -> HashMap<Cell, Vec<Cell>> {
    let diagonal = variant == BoardVariant::Diagonal;
    let mut neighbours = HashMap::with_capacity(cells.len());
    for &cell in cells {
        let mut related: Vec<Cell> = cells
            .iter()
            .copied()
            .filter(|other| {
                *other != cell
                    && (other.row == cell.row
                        || other.col == cell.col
                        || other.box_index() == cell.box_index()
                        || (diagonal
                            && ((cell.on_main_diagonal() && other.on_main_diagonal())
                                || (cell.on_anti_diagonal(size)
                                    && other.on_anti_diagonal(size)))))
            })
            .collect();
        related.sort_unstable();
        neighbours.insert(cell, related);
    }
    neighbours
}

fn compute_groups(cells: &[Cell], size: usize, variant: BoardVariant) -> Vec<Vec<Cell>> {
    let mut by_row: BTreeMap<usize, Vec<Cell>> = BTreeMap::new();
    let mut by_col: BTreeMap<usize, Vec<Cell>> = BTreeMap::new();
    let mut by_box: BTreeMap<usize, Vec<Cell>> = BTreeMap::new();
    for &cell in cells {
        by_row.entry(cell.row).or_default().push(cell);
        by_col.entry(cell.col).or_default().push(cell);
        by_box.entry(cell.box_index()).or_default().push(cell);
    }

    let mut groups: Vec<Vec<Cell>> = by_row
        .into_values()
        .chain(by_col.into_values())
        .chain(by_box.into_values())
        .collect();

    if variant == BoardVariant::Diagonal {
        let main: Vec<Cell> = cells
            .iter()
            .copied()
            .filter(Cell::on_main_diagonal)
            .collect();
        let anti: Vec<Cell> = cells
            .iter()
            .copied()
            .filter(|c| c.on_anti_diagonal(size))
            .collect();
        groups.push(main);
        groups.push(anti);
    }

    groups
}
