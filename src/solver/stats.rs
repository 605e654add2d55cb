use prettytable::{Cell, Row, Table};
use serde::Serialize;

/// Counters accumulated over a single solve call.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SearchStats {
    /// Backtracking nodes entered.
    pub nodes_visited: u64,
    /// Tentative values that failed and were rolled back.
    pub backtracks: u64,
    /// Arc revisions attempted by AC-3.
    pub revisions: u64,
    /// Values removed from a domain by AC-3.
    pub prunings: u64,
    /// Domains collapsed by forced-single detection.
    pub forced_singles: u64,
    /// Values removed by naked-subset elimination.
    pub subset_eliminations: u64,
}

pub fn render_stats_table(stats: &SearchStats) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Counter"), Cell::new("Value")]));
    let rows: [(&str, u64); 6] = [
        ("Nodes visited", stats.nodes_visited),
        ("Backtracks", stats.backtracks),
        ("Arc revisions", stats.revisions),
        ("AC-3 prunings", stats.prunings),
        ("Forced singles", stats.forced_singles),
        ("Subset eliminations", stats.subset_eliminations),
    ];
    for (name, value) in rows {
        table.add_row(Row::new(vec![
            Cell::new(name),
            Cell::new(&value.to_string()),
        ]));
    }
    table.to_string()
}
