use std::collections::{HashSet, VecDeque};

use crate::solver::cell::Cell;

/// FIFO queue of arcs `(x, y)` awaiting revision, with a membership set so
/// an arc is never queued twice. FIFO order keeps propagation deterministic.
pub struct WorkList {
    queue: VecDeque<(Cell, Cell)>,
    queue_members: HashSet<(Cell, Cell)>,
}

impl WorkList {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            queue_members: HashSet::new(),
        }
    }

    pub fn push_back(&mut self, x: Cell, y: Cell) {
        if self.queue_members.insert((x, y)) {
            self.queue.push_back((x, y));
        }
    }

    pub fn pop_front(&mut self) -> Option<(Cell, Cell)> {
        let arc = self.queue.pop_front()?;
        self.queue_members.remove(&arc);
        Some(arc)
    }
}

impl Default for WorkList {
    fn default() -> Self {
        Self::new()
    }
}
