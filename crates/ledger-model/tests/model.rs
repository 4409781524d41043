//! Tests for ledger-model types.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use ledger_model::{
    FilterCriteria, FilteredView, IngestSummary, LedgerColumns, MergedTable, ModelError,
    Statistics,
};

fn test_df(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| {
            Series::new(
                name.into(),
                values.iter().copied().map(String::from).collect::<Vec<_>>(),
            )
            .into_column()
        })
        .collect();
    DataFrame::new(cols).unwrap()
}

fn merged() -> MergedTable {
    let df = test_df(vec![
        ("工事番号", vec!["A100", "B200", "C300"]),
        ("ソースファイル", vec!["a.xlsx", "a.xlsx", "b.xlsx"]),
    ]);
    MergedTable::new(df, "ソースファイル").unwrap()
}

#[test]
fn merged_table_requires_provenance_column() {
    let df = test_df(vec![("工事番号", vec!["A100"])]);
    let err = MergedTable::new(df, "ソースファイル").unwrap_err();
    assert_eq!(
        err,
        ModelError::MissingProvenance {
            column: "ソースファイル".to_string()
        }
    );
}

#[test]
fn full_view_is_identity() {
    let table = merged();
    let view = table.view();
    assert!(view.is_identity());
    assert_eq!(view.height(), 3);
    assert_eq!(view.row_indices().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert!(view.to_frame().unwrap().equals_missing(table.frame()));
}

#[test]
fn row_view_materialises_selected_rows() {
    let table = merged();
    let view = FilteredView::from_rows(&table, vec![2, 0, 2]).unwrap();
    assert!(!view.is_identity());
    assert_eq!(view.height(), 2);
    assert_eq!(view.row_indices().collect::<Vec<_>>(), vec![0, 2]);

    let frame = view.to_frame().unwrap();
    assert_eq!(frame.height(), 2);
    assert_eq!(view.column_names(), vec!["工事番号", "ソースファイル"]);
    // The underlying table is untouched.
    assert_eq!(table.height(), 3);
}

#[test]
fn row_view_rejects_rows_past_the_end() {
    let table = merged();
    let error = FilteredView::from_rows(&table, vec![1, 3]).unwrap_err();
    assert_eq!(error, ModelError::RowOutOfBounds { index: 3, height: 3 });

    let view = FilteredView::select(&table, |&idx| idx != 1);
    assert_eq!(view.row_indices().collect::<Vec<_>>(), vec![0, 2]);
}

#[test]
fn criteria_builder_and_emptiness() {
    assert!(FilterCriteria::new().is_empty());
    let criteria = FilterCriteria::new()
        .with_statuses(["完了"])
        .with_code_pattern("a1")
        .with_sources(["a.xlsx"]);
    assert!(!criteria.is_empty());
    assert!(criteria.statuses.contains("完了"));
}

#[test]
fn columns_default_to_ledger_names() {
    let columns = LedgerColumns::default();
    assert_eq!(columns.status, "ステータス");
    assert_eq!(columns.code, "工事番号");
    assert_eq!(columns.amount, "金額");
    assert_eq!(columns.source, "ソースファイル");
    assert_eq!(LedgerColumns::default().with_amount("Amount").amount, "Amount");
}

#[test]
fn results_serialize() {
    let stats = Statistics {
        row_count: 45,
        amount_total: Some(1200.0),
        source_count: 3,
    };
    let json = serde_json::to_string(&stats).expect("serialize stats");
    let round: Statistics = serde_json::from_str(&json).expect("deserialize stats");
    assert_eq!(round, stats);

    let summary = IngestSummary {
        files_discovered: 4,
        files_loaded: 3,
        files_failed: 1,
        rows_loaded: 45,
    };
    let json = serde_json::to_value(summary).expect("serialize summary");
    assert_eq!(json["files_failed"], 1);
}
