//! XLSX export.

use chrono::{Datelike, NaiveDateTime};
use polars::prelude::AnyValue;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::debug;

use ledger_ingest::{any_to_f64, any_to_string, datetime_from_timestamp, format_datetime};
use ledger_model::FilteredView;

use crate::error::{OutputError, Result};

/// Name of the single worksheet in exported workbooks.
pub const SHEET_NAME: &str = "一覧";

/// Number format applied to date-time cells.
pub const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Excel row limit, header included.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

/// First year of the 1900 date system.
const FIRST_EXCEL_YEAR: i32 = 1900;

/// Renders the view as a workbook with one sheet named [`SHEET_NAME`].
///
/// Row 0 is the header. Numbers, booleans and date-times keep their cell
/// type; nulls are left blank. Date-times before 1900 have no Excel serial
/// and are written as text.
pub fn to_xlsx_bytes(view: &FilteredView<'_>) -> Result<Vec<u8>> {
    let frame = view.frame();
    let columns = frame.get_columns();
    check_limits(view.height() + 1, columns.len())?;

    let mut workbook = Workbook::new();
    let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, column) in columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, column.name().as_str())?;
    }

    for (offset, idx) in view.row_indices().enumerate() {
        let row = (offset + 1) as u32;
        for (col, column) in columns.iter().enumerate() {
            write_cell(worksheet, row, col as u16, column.get(idx)?, &datetime_format)?;
        }
    }

    let bytes = workbook.save_to_buffer()?;
    debug!(
        row_count = view.height(),
        byte_count = bytes.len(),
        "rendered workbook"
    );
    Ok(bytes)
}

fn check_limits(rows: usize, columns: usize) -> Result<()> {
    if rows > MAX_ROWS {
        return Err(OutputError::SheetLimit {
            axis: "rows",
            count: rows,
        });
    }
    if columns > MAX_COLUMNS {
        return Err(OutputError::SheetLimit {
            axis: "columns",
            count: columns,
        });
    }
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: AnyValue<'_>,
    datetime_format: &Format,
) -> Result<()> {
    match value {
        AnyValue::Null => {}
        AnyValue::Boolean(b) => {
            worksheet.write_boolean(row, col, b)?;
        }
        AnyValue::Datetime(v, unit, _) => match datetime_from_timestamp(v, unit) {
            Some(dt) if has_excel_serial(dt) => {
                worksheet.write_datetime_with_format(row, col, &dt, datetime_format)?;
            }
            Some(dt) => {
                worksheet.write_string(row, col, format_datetime(dt))?;
            }
            None => {
                worksheet.write_string(row, col, v.to_string())?;
            }
        },
        AnyValue::String(_) | AnyValue::StringOwned(_) => {
            worksheet.write_string(row, col, any_to_string(value))?;
        }
        other => match any_to_f64(other.clone()) {
            Some(number) => {
                worksheet.write_number(row, col, number)?;
            }
            None => {
                worksheet.write_string(row, col, any_to_string(other))?;
            }
        },
    }
    Ok(())
}

fn has_excel_serial(value: NaiveDateTime) -> bool {
    value.year() >= FIRST_EXCEL_YEAR
}
