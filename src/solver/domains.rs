use im::{HashMap, HashSet};

use crate::solver::{board::Board, cell::Cell};

/// The candidate set of a single cell.
pub type Domain = HashSet<u8>;

/// Candidate values for every cell, keyed by position.
///
/// Backed by persistent maps, so a [`DomainSnapshot`] is a cheap structural
/// clone rather than a deep copy; the searcher takes one before every
/// tentative assignment and restores it when the branch fails. Outside
/// restores, domains only ever shrink.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainStore {
    domains: HashMap<Cell, Domain>,
}

/// An opaque, whole-store copy of the domains at one point in time.
#[derive(Debug, Clone)]
pub struct DomainSnapshot(HashMap<Cell, Domain>);

impl DomainStore {
    /// One entry per cell: given cells get the singleton of their clue,
    /// empty cells the full `1..=max` candidate range.
    pub fn new(board: &Board) -> Self {
        let full: Domain = (1..=board.max_value()).collect();
        let mut domains = HashMap::new();
        for &cell in board.cells() {
            let domain = if cell.is_given {
                im::hashset![board.value(cell)]
            } else {
                full.clone()
            };
            domains.insert(cell, domain);
        }
        Self { domains }
    }

    pub fn get(&self, cell: &Cell) -> &Domain {
        self.domains
            .get(cell)
            .expect("every board cell has a domain")
    }

    pub fn is_singleton(&self, cell: &Cell) -> bool {
        self.get(cell).len() == 1
    }

    /// The committed value of `cell`, if its domain has collapsed.
    pub fn singleton_value(&self, cell: &Cell) -> Option<u8> {
        let domain = self.get(cell);
        if domain.len() == 1 {
            domain.iter().next().copied()
        } else {
            None
        }
    }

    /// Removes `value` from the cell's domain; reports whether it was there.
    pub fn remove(&mut self, cell: &Cell, value: u8) -> bool {
        self.domains
            .get_mut(cell)
            .expect("every board cell has a domain")
            .remove(&value)
            .is_some()
    }

    /// Collapses the cell's domain to a single value.
    pub fn collapse(&mut self, cell: &Cell, value: u8) {
        self.domains.insert(*cell, im::hashset![value]);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Cell, &Domain)> {
        self.domains.iter()
    }

    pub fn snapshot(&self) -> DomainSnapshot {
        DomainSnapshot(self.domains.clone())
    }

    /// Replaces all domains atomically; partial restore is not supported.
    pub fn restore(&mut self, snapshot: DomainSnapshot) {
        self.domains = snapshot.0;
    }
}
