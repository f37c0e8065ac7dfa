use std::cmp::Ordering;

use super::model::ObservationTable;

/// Column the data table is ordered by. Indices past the source columns refer
/// to the appended status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSort {
    pub column: usize,
    pub ascending: bool,
}

impl TableSort {
    /// Clicking the active column flips direction; another column starts ascending.
    pub fn toggled(current: Option<TableSort>, column: usize) -> TableSort {
        match current {
            Some(s) if s.column == column => TableSort {
                column,
                ascending: !s.ascending,
            },
            _ => TableSort {
                column,
                ascending: true,
            },
        }
    }
}

/// Reorder `indices` for display. Numbers compare numerically, everything
/// else as text; ties keep source order.
pub fn sort_indices(table: &ObservationTable, indices: &mut [usize], sort: TableSort) {
    indices.sort_by(|&a, &b| {
        let ord = compare_cells(cell(table, a, sort.column), cell(table, b, sort.column));
        if sort.ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}

fn cell(table: &ObservationTable, idx: usize, column: usize) -> &str {
    let row = &table.rows[idx];
    if column < table.columns.len() {
        row.fields.get(column).map(String::as_str).unwrap_or("")
    } else {
        row.anomaly.label()
    }
}

fn compare_cells(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
