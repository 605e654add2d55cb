//! The solving engine: board model, domain store, propagation passes, and
//! heuristic-guided backtracking search.

pub mod board;
pub mod cell;
pub mod domains;
pub mod heuristics;
pub mod propagate;
pub mod search;
pub mod solution;
pub mod stats;
pub mod work_list;
