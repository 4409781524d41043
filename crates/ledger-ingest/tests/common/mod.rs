//! Workbook fixtures shared by the ingestion tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;

#[derive(Debug, Clone)]
pub enum Cell {
    Text(String),
    Number(f64),
    Blank,
}

pub fn t(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

pub fn n(value: f64) -> Cell {
    Cell::Number(value)
}

/// Writes a workbook with the given sheets, each a list of rows.
pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<Cell>>)]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("sheet name");
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    Cell::Text(value) => {
                        worksheet.write_string(r, c, value).expect("write string");
                    }
                    Cell::Number(value) => {
                        worksheet.write_number(r, c, *value).expect("write number");
                    }
                    Cell::Blank => {}
                }
            }
        }
    }
    workbook.save(path).expect("save workbook");
}

/// A ledger sheet: header row plus `count` rows of code/status/amount.
pub fn ledger_rows(prefix: &str, count: usize) -> Vec<Vec<Cell>> {
    let mut rows = vec![vec![t("工事番号"), t("ステータス"), t("金額")]];
    for idx in 0..count {
        let status = if idx % 2 == 0 { "完了" } else { "施工中" };
        rows.push(vec![
            t(&format!("{prefix}{idx:03}")),
            t(status),
            n(1000.0 * (idx as f64 + 1.0)),
        ]);
    }
    rows
}

/// Writes a single-sheet ledger workbook and returns its path.
pub fn write_ledger(dir: &Path, name: &str, prefix: &str, count: usize) -> PathBuf {
    let path = dir.join(name);
    write_workbook(&path, &[("台帳", ledger_rows(prefix, count))]);
    path
}

/// Writes bytes that are not a workbook under a workbook extension.
pub fn write_corrupt(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"this is not a zip container").expect("write corrupt file");
    path
}
