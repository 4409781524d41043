//! Tests for CSV and XLSX export.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use polars::prelude::{DataFrame, DataType, IntoColumn, NamedFrom, Series, TimeUnit};
use tempfile::TempDir;

use ledger_model::{FilteredView, MergedTable};
use ledger_output::{
    DEFAULT_CSV_NAME, DEFAULT_XLSX_NAME, SHEET_NAME, UTF8_BOM, to_csv_bytes, to_xlsx_bytes,
    write_csv, write_xlsx,
};

// 2024-04-01 00:00:00 and 2024-04-02 09:30:00 UTC, in milliseconds.
const APRIL_1: i64 = 1_711_929_600_000;
const APRIL_2_0930: i64 = 1_712_050_200_000;

fn typed_table() -> MergedTable {
    let dates = Series::new("日付".into(), vec![Some(APRIL_1), Some(APRIL_2_0930), None])
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .unwrap();
    let df = DataFrame::new(vec![
        Series::new("工事番号".into(), vec!["A-1", "B,2", "C\"3"]).into_column(),
        Series::new("金額".into(), vec![Some(1500.0), None, Some(2.5)]).into_column(),
        Series::new("検収済".into(), vec![Some(true), Some(false), None]).into_column(),
        dates.into_column(),
        Series::new("ソースファイル".into(), vec!["a.xlsx", "a.xlsx", "b.xlsx"]).into_column(),
    ])
    .unwrap();
    MergedTable::new(df, "ソースファイル").unwrap()
}

fn csv_text(bytes: &[u8]) -> &str {
    assert!(bytes.starts_with(UTF8_BOM), "missing byte order mark");
    std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap()
}

#[test]
fn test_csv_rendering() {
    let table = typed_table();
    let bytes = to_csv_bytes(&table.view()).unwrap();
    let text = csv_text(&bytes);

    assert!(text.ends_with('\n'));
    assert!(!text.contains('\r'));
    insta::assert_snapshot!(text.trim_end(), @r#"
    工事番号,金額,検収済,日付,ソースファイル
    A-1,1500,True,2024-04-01,a.xlsx
    "B,2",,False,2024-04-02 09:30:00,a.xlsx
    "C""3",2.5,,,b.xlsx
    "#);
}

#[test]
fn test_csv_round_trip_of_filtered_view() {
    let table = typed_table();
    let view = FilteredView::from_rows(&table, vec![1, 2]).unwrap();
    let bytes = to_csv_bytes(&view).unwrap();

    let mut reader = csv::ReaderBuilder::new().from_reader(csv_text(&bytes).as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(String::from)
        .collect();
    assert_eq!(headers, table.column_names());

    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|record| record.unwrap().iter().map(String::from).collect())
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        vec!["B,2", "", "False", "2024-04-02 09:30:00", "a.xlsx"]
    );
    assert_eq!(rows[1], vec!["C\"3", "2.5", "", "", "b.xlsx"]);
}

#[test]
fn test_xlsx_has_one_typed_sheet() {
    let table = typed_table();
    let bytes = to_xlsx_bytes(&table.view()).unwrap();

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();

    assert_eq!(range.height(), 4);
    assert_eq!(range.width(), 5);
    assert_eq!(
        range.get_value((0, 0)),
        Some(&Data::String("工事番号".into()))
    );
    assert_eq!(range.get_value((1, 0)), Some(&Data::String("A-1".into())));
    assert_eq!(range.get_value((1, 1)), Some(&Data::Float(1500.0)));
    assert_eq!(range.get_value((1, 2)), Some(&Data::Bool(true)));
    assert_eq!(range.get_value((2, 2)), Some(&Data::Bool(false)));

    match range.get_value((2, 3)) {
        Some(Data::DateTime(dt)) => assert!((dt.as_f64() - 45384.395_833).abs() < 1e-5),
        other => panic!("expected a date-time cell, got {other:?}"),
    }

    // Nulls stay blank.
    assert!(matches!(range.get_value((2, 1)), None | Some(Data::Empty)));
    assert!(matches!(range.get_value((3, 3)), None | Some(Data::Empty)));
}

fn millis(y: i32, m: u32, d: u32) -> i64 {
    chrono::NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}

#[test]
fn test_xlsx_dates_around_1900() {
    let dates = Series::new(
        "日付".into(),
        vec![millis(1900, 1, 1), millis(1900, 1, 15), millis(1900, 3, 1), millis(1899, 12, 31)],
    )
    .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
    .unwrap();
    let df = DataFrame::new(vec![
        dates.into_column(),
        Series::new("ソースファイル".into(), vec!["a.xlsx"; 4]).into_column(),
    ])
    .unwrap();
    let table = MergedTable::new(df, "ソースファイル").unwrap();
    let bytes = to_xlsx_bytes(&table.view()).unwrap();

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    let serial = |row: u32| match range.get_value((row, 0)) {
        Some(Data::DateTime(dt)) => dt.as_f64(),
        other => panic!("expected a date-time cell, got {other:?}"),
    };

    assert_eq!(serial(1), 1.0);
    assert_eq!(serial(2), 15.0);
    assert_eq!(serial(3), 61.0);
    match range.get_value((2, 0)) {
        Some(Data::DateTime(dt)) => assert_eq!(
            dt.as_datetime().map(|value| value.date()),
            chrono::NaiveDate::from_ymd_opt(1900, 1, 15)
        ),
        other => panic!("expected a date-time cell, got {other:?}"),
    }
    assert_eq!(
        range.get_value((4, 0)),
        Some(&Data::String("1899-12-31".into()))
    );
}

#[test]
fn test_xlsx_of_empty_view_keeps_header() {
    let table = typed_table();
    let view = FilteredView::from_rows(&table, Vec::new()).unwrap();
    let bytes = to_xlsx_bytes(&view).unwrap();

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    assert_eq!(range.height(), 1);
    assert_eq!(range.width(), 5);
}

#[test]
fn test_write_to_disk() {
    let dir = TempDir::new().unwrap();
    let table = typed_table();
    let view = table.view();

    let csv_path = dir.path().join(DEFAULT_CSV_NAME);
    let xlsx_path = dir.path().join(DEFAULT_XLSX_NAME);
    write_csv(&view, &csv_path).unwrap();
    write_xlsx(&view, &xlsx_path).unwrap();

    assert_eq!(std::fs::read(&csv_path).unwrap(), to_csv_bytes(&view).unwrap());
    assert!(std::fs::metadata(&xlsx_path).unwrap().len() > 0);

    let missing = dir.path().join("missing").join("out.csv");
    let err = write_csv(&view, &missing).unwrap_err();
    assert!(err.to_string().contains("out.csv"));
}
