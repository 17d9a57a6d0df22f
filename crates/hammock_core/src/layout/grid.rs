//! Column padding: turns ragged columns into a rectangular grid.
//!
//! # Invariants
//! - After `pad_columns(columns)`, every row holds exactly `columns.len()`
//!   cells.
//! - Missing cells are filled with `BLANK_CELL`, never left out.
//! - `expand_multiline_rows` keeps the input row order; the lines of one
//!   logical row stay adjacent.

use super::{Grid, BLANK_CELL};

/// Aligns columns left to right into rows of equal length.
///
/// The first column seeds one row per cell. Each later column appends one
/// cell to every existing row (a blank when the column is shorter) and, when
/// it is longer than the current grid, opens new rows pre-filled with blanks
/// for every column already processed.
pub fn pad_columns<S: AsRef<str>>(columns: &[Vec<S>]) -> Grid {
    let mut rows = Grid::new();
    for (processed, column) in columns.iter().enumerate() {
        push_column(&mut rows, processed, column);
    }
    rows
}

/// Splits multi-line cells into extra output rows.
///
/// Each row's cells are treated as columns of lines and padded with
/// `pad_columns`, so a cell spanning three lines turns its row into three
/// output rows with blanks under the shorter neighbours.
pub fn expand_multiline_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Grid {
    let mut expanded = Grid::new();
    for row in rows {
        let cell_lines = row
            .iter()
            .map(|cell| split_cell(cell.as_ref()))
            .collect::<Vec<_>>();
        expanded.extend(pad_columns(&cell_lines));
    }
    expanded
}

fn push_column<S: AsRef<str>>(rows: &mut Grid, processed: usize, column: &[S]) {
    let existing = rows.len();
    for (index, row) in rows.iter_mut().enumerate() {
        let cell = column.get(index).map_or(BLANK_CELL, AsRef::as_ref);
        row.push(cell.to_string());
    }

    for cell in column.iter().skip(existing) {
        let mut row = vec![BLANK_CELL.to_string(); processed];
        row.push(cell.as_ref().to_string());
        rows.push(row);
    }
}

fn split_cell(cell: &str) -> Vec<String> {
    cell.trim()
        .split('\n')
        .map(|line| {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                BLANK_CELL.to_string()
            } else {
                line.to_string()
            }
        })
        .collect()
}
