//! Strategies for ordering the candidate values of the chosen cell.

use crate::solver::{
    board::Board, cell::Cell, domains::DomainStore, solution::Assignment,
};

/// A trait for value-ordering heuristics.
pub trait ValueOrderingHeuristic {
    /// Returns the cell's remaining candidates in the order they should be
    /// tried.
    fn order_values(
        &self,
        cell: Cell,
        board: &Board,
        store: &DomainStore,
        assignment: &Assignment,
    ) -> Vec<u8>;
}

/// Tries values in ascending numeric order.
pub struct IdentityValueHeuristic;

impl ValueOrderingHeuristic for IdentityValueHeuristic {
    fn order_values(
        &self,
        cell: Cell,
        _board: &Board,
        store: &DomainStore,
        _assignment: &Assignment,
    ) -> Vec<u8> {
        let mut values: Vec<u8> = store.get(&cell).iter().copied().collect();
        values.sort_unstable();
        values
    }
}

/// Least constraining value: tries first the value that appears in the
/// fewest domains of the cell's unassigned neighbours, so each guess rules
/// out as little as possible. Equal counts fall back to ascending value.
pub struct LeastConstrainingValueHeuristic;

impl ValueOrderingHeuristic for LeastConstrainingValueHeuristic {
    fn order_values(
        &self,
        cell: Cell,
        board: &Board,
        store: &DomainStore,
        assignment: &Assignment,
    ) -> Vec<u8> {
        let unassigned_neighbours: Vec<Cell> = board
            .neighbours(cell)
            .iter()
            .copied()
            .filter(|n| !assignment.contains_key(n))
            .collect();

        let mut values: Vec<u8> = store.get(&cell).iter().copied().collect();
        values.sort_unstable_by_key(|&value| {
            let ruled_out = unassigned_neighbours
                .iter()
                .filter(|n| store.get(n).contains(&value))
                .count();
            (ruled_out, value)
        });
        values
    }
}
