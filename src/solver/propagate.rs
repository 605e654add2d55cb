use tracing::debug;

use crate::solver::{
    board::Board,
    cell::Cell,
    domains::{Domain, DomainStore},
    stats::SearchStats,
    work_list::WorkList,
};

/// Outcome of one propagation pass over the domain store.
///
/// `Contradiction` (an emptied domain, or a constraint group with no
/// remaining holder for some value) is distinct from `Unchanged`: it means
/// the current branch is dead, not merely that a fixed point was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Changed,
    Unchanged,
    Contradiction,
}

impl Propagation {
    pub fn changed(self) -> bool {
        matches!(self, Propagation::Changed)
    }

    pub fn failed(self) -> bool {
        matches!(self, Propagation::Contradiction)
    }
}

/// Prunes candidate domains against the board's constraints.
///
/// Three pruning passes are implemented: AC-3 arc consistency, forced-single
/// detection over constraint groups, and naked-subset elimination. All of
/// them mutate the store in place and must be run to a fixed point before
/// the searcher treats the domains as authoritative.
pub struct Propagator<'a> {
    board: &'a Board,
}

impl<'a> Propagator<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// Makes `x` arc-consistent with `y`: every value of `x` must leave `y`
    /// at least one distinct value. Reports whether `x`'s domain changed.
    pub fn revise(&self, store: &mut DomainStore, x: Cell, y: Cell) -> bool {
        let y_domain = store.get(&y).clone();
        let to_remove: Vec<u8> = store
            .get(&x)
            .iter()
            .copied()
            .filter(|x_val| !y_domain.iter().any(|y_val| y_val != x_val))
            .collect();
        for &value in &to_remove {
            store.remove(&x, value);
        }
        !to_remove.is_empty()
    }

    /// AC-3: revises every neighbour arc until the work list empties.
    ///
    /// Starts from all ordered pairs `(x, y)` with `y` a neighbour of `x`;
    /// when `x`'s domain shrinks, every arc `(x, n)` for the other
    /// neighbours `n` of `x` is re-queued. An emptied domain aborts the
    /// pass immediately.
    pub fn enforce_arc_consistency(
        &self,
        store: &mut DomainStore,
        stats: &mut SearchStats,
    ) -> Propagation {
        let mut worklist = WorkList::new();
        for &x in self.board.cells() {
            for &y in self.board.neighbours(x) {
                worklist.push_back(x, y);
            }
        }

        let mut changed = false;
        while let Some((x, y)) = worklist.pop_front() {
            stats.revisions += 1;
            let before = store.get(&x).len();
            if self.revise(store, x, y) {
                let after = store.get(&x).len();
                stats.prunings += (before - after) as u64;
                if after == 0 {
                    debug!(cell = %x, "arc consistency emptied a domain");
                    return Propagation::Contradiction;
                }
                for &n in self.board.neighbours(x) {
                    if n != y {
                        worklist.push_back(x, n);
                    }
                }
                changed = true;
            }
        }

        if changed {
            Propagation::Changed
        } else {
            Propagation::Unchanged
        }
    }

    /// Hidden-single detection over the constraint groups.
    ///
    /// For each group and candidate value, if exactly one cell in the group
    /// still holds the value, that cell's domain collapses to it. A value
    /// held by no cell in a group makes the group unsatisfiable.
    pub fn find_forced_singles(
        &self,
        store: &mut DomainStore,
        stats: &mut SearchStats,
    ) -> Propagation {
        #[derive(Clone, Copy)]
        enum Holder {
            Unseen,
            One(Cell),
            Many,
        }

        let max = self.board.max_value() as usize;
        let mut to_collapse: Vec<(Cell, u8)> = Vec::new();

        for group in self.board.constraint_groups() {
            let mut holders = vec![Holder::Unseen; max];
            for &cell in group {
                for &value in store.get(&cell).iter() {
                    holders[value as usize - 1] = match holders[value as usize - 1] {
                        Holder::Unseen => Holder::One(cell),
                        Holder::One(_) | Holder::Many => Holder::Many,
                    };
                }
            }
            for (index, holder) in holders.iter().enumerate() {
                match holder {
                    Holder::Unseen => {
                        debug!(value = index + 1, "value has no remaining holder in group");
                        return Propagation::Contradiction;
                    }
                    Holder::One(cell) => to_collapse.push((*cell, index as u8 + 1)),
                    Holder::Many => {}
                }
            }
        }

        let mut changed = false;
        for (cell, value) in to_collapse {
            if !store.is_singleton(&cell) {
                store.collapse(&cell, value);
                stats.forced_singles += 1;
                changed = true;
            }
        }

        if changed {
            Propagation::Changed
        } else {
            Propagation::Unchanged
        }
    }

    /// Naked-subset elimination, generalizing naked pairs and triples.
    ///
    /// Seeds each unresolved cell and grows a subset with neighbours whose
    /// domains fit inside the seed's, narrowing the set of common neighbours
    /// at every step. When the subset has as many cells as the seed domain
    /// has values, those values are stripped from every common neighbour.
    /// The recursion is bounded: the common-neighbour set strictly shrinks
    /// and extension stops at the seed's domain size.
    pub fn eliminate_naked_subsets(
        &self,
        store: &mut DomainStore,
        stats: &mut SearchStats,
    ) -> Propagation {
        let mut unresolved: Vec<Cell> = self
            .board
            .cells()
            .iter()
            .copied()
            .filter(|cell| store.get(cell).len() != 1)
            .collect();
        unresolved.sort_unstable_by_key(|cell| (store.get(cell).len(), cell.row, cell.col));
        let unresolved_set: im::HashSet<Cell> = unresolved.iter().copied().collect();

        let mut changed = false;
        for &seed in &unresolved {
            let seed_len = store.get(&seed).len();
            if seed_len == 0 {
                return Propagation::Contradiction;
            }
            // A subset spanning the full value range would have to cover an
            // entire group, which has no common neighbour left to prune.
            if seed_len >= self.board.max_value() as usize {
                continue;
            }
            let common: im::HashSet<Cell> = self
                .board
                .neighbours(seed)
                .iter()
                .copied()
                .filter(|n| unresolved_set.contains(n))
                .collect();
            let mut members = vec![seed];
            if self.extend_subset(store, &mut members, &common, stats) {
                changed = true;
            }
        }

        if changed {
            Propagation::Changed
        } else {
            Propagation::Unchanged
        }
    }

    fn extend_subset(
        &self,
        store: &mut DomainStore,
        members: &mut Vec<Cell>,
        common: &im::HashSet<Cell>,
        stats: &mut SearchStats,
    ) -> bool {
        let seed_domain: Domain = store.get(&members[0]).clone();
        debug_assert!(members.len() <= seed_domain.len());

        if seed_domain.len() == members.len() {
            let mut targets: Vec<Cell> = common.iter().copied().collect();
            targets.sort_unstable();
            let mut changed = false;
            for cell in targets {
                for &value in seed_domain.iter() {
                    if store.remove(&cell, value) {
                        stats.subset_eliminations += 1;
                        changed = true;
                    }
                }
            }
            return changed;
        }

        let mut candidates: Vec<Cell> = common.iter().copied().collect();
        candidates.sort_unstable();

        // Non-seed members are interchangeable, so extending in ascending
        // order only (past the last committed member) visits each candidate
        // subset once instead of once per permutation.
        let floor = if members.len() > 1 {
            members.last().copied()
        } else {
            None
        };

        let mut changed = false;
        for n in candidates {
            if floor.is_some_and(|last| n <= last) {
                continue;
            }
            if store.get(&n).is_subset(&seed_domain) {
                members.push(n);
                let n_neighbours: im::HashSet<Cell> =
                    self.board.neighbours(n).iter().copied().collect();
                let new_common = common.clone().intersection(n_neighbours);
                debug_assert!(new_common.len() < common.len());
                if !new_common.is_empty()
                    && self.extend_subset(store, members, &new_common, stats)
                {
                    changed = true;
                }
                members.pop();
            }
        }
        changed
    }
}
