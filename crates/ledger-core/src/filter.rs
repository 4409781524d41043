//! Conjunctive row filters.

use std::collections::{BTreeSet, HashSet};

use polars::prelude::{AnyValue, Column};
use tracing::debug;

use ledger_ingest::any_to_text;
use ledger_model::{FilterCriteria, FilterOptions, FilteredView, LedgerColumns, MergedTable};

/// One active filter stage bound to its column.
enum Stage<'a> {
    /// Cell text must be one of the accepted values.
    Membership {
        column: &'a Column,
        accepted: &'a BTreeSet<String>,
    },
    /// Cell text must contain the lowercased needle, ignoring case.
    Contains { column: &'a Column, needle: String },
}

impl Stage<'_> {
    fn matches(&self, idx: usize) -> bool {
        match self {
            Self::Membership { column, accepted } => {
                cell_text(column, idx).is_some_and(|text| accepted.contains(&text))
            }
            Self::Contains { column, needle } => {
                cell_text(column, idx).is_some_and(|text| text.to_lowercase().contains(needle))
            }
        }
    }
}

fn cell_text(column: &Column, idx: usize) -> Option<String> {
    any_to_text(column.get(idx).unwrap_or(AnyValue::Null))
}

/// Applies every non-empty criterion as a logical AND.
///
/// A criterion whose column is absent from the schema is ignored. When no
/// stage is active the view is the whole table.
pub fn apply_filters<'a>(
    table: &'a MergedTable,
    criteria: &FilterCriteria,
    columns: &LedgerColumns,
) -> FilteredView<'a> {
    let stages = active_stages(table, criteria, columns);
    if stages.is_empty() {
        return FilteredView::all(table);
    }

    let view = FilteredView::select(table, |&idx| {
        stages.iter().all(|stage| stage.matches(idx))
    });
    debug!(
        stage_count = stages.len(),
        total_rows = table.height(),
        kept_rows = view.height(),
        "applied filters"
    );
    view
}

fn active_stages<'s>(
    table: &'s MergedTable,
    criteria: &'s FilterCriteria,
    columns: &LedgerColumns,
) -> Vec<Stage<'s>> {
    let frame = table.frame();
    let mut stages = Vec::new();

    if !criteria.statuses.is_empty() {
        if let Ok(column) = frame.column(&columns.status) {
            stages.push(Stage::Membership {
                column,
                accepted: &criteria.statuses,
            });
        }
    }

    if !criteria.code_pattern.is_empty() {
        if let Ok(column) = frame.column(&columns.code) {
            stages.push(Stage::Contains {
                column,
                needle: criteria.code_pattern.to_lowercase(),
            });
        }
    }

    if !criteria.sources.is_empty() {
        if let Ok(column) = frame.column(table.source_column()) {
            stages.push(Stage::Membership {
                column,
                accepted: &criteria.sources,
            });
        }
    }

    stages
}

/// Lists the filter controls the view's rows can offer.
///
/// Status values and sources are distinct, non-null, in first-seen order.
pub fn filter_options(view: &FilteredView<'_>, columns: &LedgerColumns) -> FilterOptions {
    let frame = view.frame();
    let statuses = frame
        .column(&columns.status)
        .ok()
        .map(|column| distinct_texts(view, column));
    let sources = frame
        .column(view.source_column())
        .map(|column| distinct_texts(view, column))
        .unwrap_or_default();

    FilterOptions {
        statuses,
        code_search: frame.column(&columns.code).is_ok(),
        sources,
    }
}

fn distinct_texts(view: &FilteredView<'_>, column: &Column) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for idx in view.row_indices() {
        if let Some(text) = cell_text(column, idx) {
            if seen.insert(text.clone()) {
                values.push(text);
            }
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

    fn table() -> MergedTable {
        let codes: Vec<Option<&str>> = vec![Some("A100"), None, Some("b100")];
        let df = DataFrame::new(vec![
            Series::new("工事番号".into(), codes).into_column(),
            Series::new("ソースファイル".into(), vec!["a.xlsx", "a.xlsx", "b.xlsx"])
                .into_column(),
        ])
        .unwrap();
        MergedTable::new(df, "ソースファイル").unwrap()
    }

    #[test]
    fn missing_status_column_is_ignored() {
        let table = table();
        let criteria = FilterCriteria::new().with_statuses(["完了"]);
        let view = apply_filters(&table, &criteria, &LedgerColumns::default());
        assert!(view.is_identity());
    }

    #[test]
    fn stages_combine_with_and() {
        let table = table();
        let criteria = FilterCriteria::new()
            .with_code_pattern("100")
            .with_sources(["b.xlsx"]);
        let view = apply_filters(&table, &criteria, &LedgerColumns::default());
        assert_eq!(view.row_indices().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn options_omit_unavailable_stages() {
        let table = table();
        let options = filter_options(&table.view(), &LedgerColumns::default());
        assert_eq!(options.statuses, None);
        assert!(options.code_search);
        assert_eq!(options.sources, vec!["a.xlsx", "b.xlsx"]);
    }
}
