//! Summary metrics over a filtered view.

use std::collections::HashSet;

use polars::prelude::AnyValue;

use ledger_ingest::{any_to_f64, any_to_text};
use ledger_model::{FilteredView, LedgerColumns, Statistics};

/// Computes row count, amount total and distinct source count for `view`.
///
/// Amount cells that are null or cannot be read as a number count as zero.
/// The total is `None` when the schema has no amount column.
pub fn compute_stats(view: &FilteredView<'_>, columns: &LedgerColumns) -> Statistics {
    let frame = view.frame();

    let amount_total = frame.column(&columns.amount).ok().map(|column| {
        view.row_indices()
            .map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)).unwrap_or(0.0))
            .sum()
    });

    let source_count = frame
        .column(view.source_column())
        .map(|column| {
            view.row_indices()
                .filter_map(|idx| any_to_text(column.get(idx).unwrap_or(AnyValue::Null)))
                .collect::<HashSet<_>>()
                .len()
        })
        .unwrap_or(0);

    Statistics {
        row_count: view.height(),
        amount_total,
        source_count,
    }
}
