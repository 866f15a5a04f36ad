// src/view.rs

//! Projection of raw results into the rows and columns actually shown.

use std::collections::BTreeSet;

use crate::models::{Column, ContractYear, RawResultRow, RowId};
use crate::store::{StoreState, exclusion};

/// A raw row that survived exclusion.
pub type DisplayedRow<'a> = &'a RawResultRow;

/// Rows whose id is not excluded, in their original order.
pub fn visible_rows<'a>(
    raw: &'a [RawResultRow],
    excluded: &BTreeSet<RowId>,
) -> Vec<DisplayedRow<'a>> {
    raw.iter()
        .filter(|row| !exclusion::is_excluded(excluded, row.id))
        .collect()
}

/// Table-ready view of the current results.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub columns: Vec<Column>,
    pub rows: Vec<ViewRow>,

    /// Rows on this page hidden by exclusion
    pub hidden_count: usize,

    /// Matches on the server across all pages
    pub total_count: u64,
}

/// One displayed row as text cells, aligned with `ResultView::columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow {
    pub id: RowId,
    pub cells: Vec<String>,
}

/// Build the view for a store state and a column layout.
pub fn project(state: &StoreState, columns: &[Column]) -> ResultView {
    let raw = &state.results.results;
    let year = state.filters.contract_year;
    let rows: Vec<ViewRow> = visible_rows(raw, &state.filters.excluded_ids)
        .into_iter()
        .map(|row| view_row(row, columns, year))
        .collect();

    ResultView {
        columns: columns.to_vec(),
        hidden_count: raw.len() - rows.len(),
        total_count: state.results.count,
        rows,
    }
}

fn view_row(row: &RawResultRow, columns: &[Column], year: ContractYear) -> ViewRow {
    ViewRow {
        id: row.id,
        cells: columns.iter().map(|column| row.cell(*column, year)).collect(),
    }
}
