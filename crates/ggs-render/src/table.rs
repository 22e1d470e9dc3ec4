//! Fixed-column-count row batching with span padding.
//!
//! Input is a flat sequence of per-field cell tuples; tuple element 0 is the
//! field's header cell and later elements are its value cells. Tuples are
//! grouped `cols` at a time and each group is transposed so that every
//! header lands in the group's first output row and every value in the rows
//! below. Two padding rules keep the grid rectangular:
//!
//! - a tuple shorter than its group's tallest tuple contributes ROW spans
//!   below its last cell (merge upward);
//! - a final group holding fewer than `cols` tuples is widened to `cols`,
//!   with ROW spans on rows whose trailing cell is already padding and COL
//!   spans on rows ending in real content (merge leftward).
//!
//! Downstream sinks therefore never see a ragged row.

use crate::cell::{Span, TableCell};

/// Batch and transpose cell tuples into rows of exactly `cols` cells.
///
/// # Panics
///
/// Panics if `cols` is zero.
pub fn dynamic_row_table(tuples: &[Vec<TableCell>], cols: usize) -> Vec<Vec<TableCell>> {
    assert!(cols > 0, "a table needs at least one column");

    let mut result = Vec::new();
    for batch in tuples.chunks(cols) {
        let height = batch.iter().map(Vec::len).max().unwrap_or(0);
        for row_index in 0..height {
            let mut row: Vec<TableCell> = batch
                .iter()
                .map(|tuple| {
                    tuple
                        .get(row_index)
                        .cloned()
                        .unwrap_or(TableCell::Span(Span::Row))
                })
                .collect();

            if batch.len() < cols {
                let filler = match row.last() {
                    Some(cell) if cell.is_span(Span::Row) => Span::Row,
                    _ => Span::Col,
                };
                row.extend(std::iter::repeat(TableCell::from(filler)).take(cols - batch.len()));
            }
            result.push(row);
        }
    }
    result
}
