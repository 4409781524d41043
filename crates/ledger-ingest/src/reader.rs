//! Workbook sheet loading with a configurable number of skipped rows.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::{debug, info, info_span, warn};

use ledger_model::{LoadError, LoadOptions, LoadProgress, RawTable, SheetSelector, SourceFile};

use crate::cells::{CellValue, build_column};
use crate::error::{IngestError, Result};

/// Outcome of loading every discovered file.
#[derive(Debug, Default)]
pub struct LoadBatch {
    /// Successfully loaded tables, in load order.
    pub tables: Vec<RawTable>,
    /// One entry per file that failed to load.
    pub errors: Vec<LoadError>,
}

/// Loads one workbook sheet and tags every row with the file's display name.
///
/// Any failure is reported as a [`LoadError`] whose message is clipped to
/// 100 characters.
pub fn load_table(
    file: &SourceFile,
    options: &LoadOptions,
    source_column: &str,
) -> std::result::Result<RawTable, LoadError> {
    read_sheet_frame(file.path(), options)
        .and_then(|frame| add_source_column(frame, source_column, &file.name))
        .map(|frame| RawTable {
            source: file.clone(),
            frame,
        })
        .map_err(|error| LoadError::new(file.name.clone(), &error.to_string()))
}

/// Loads files one at a time, in order, collecting failures instead of stopping.
///
/// `on_progress` runs after every file, whether it loaded or not.
pub fn load_all<F>(
    files: &[SourceFile],
    options: &LoadOptions,
    source_column: &str,
    mut on_progress: F,
) -> LoadBatch
where
    F: FnMut(LoadProgress<'_>),
{
    let span = info_span!("load", file_count = files.len());
    let _guard = span.enter();
    let start = Instant::now();

    let mut batch = LoadBatch::default();
    for (idx, file) in files.iter().enumerate() {
        debug!(file_name = %file.name, "loading workbook");
        match load_table(file, options, source_column) {
            Ok(table) => {
                debug!(file_name = %file.name, row_count = table.height(), "loaded workbook");
                batch.tables.push(table);
            }
            Err(error) => {
                warn!(file_name = %error.file_name, message = %error.message, "skipping workbook");
                batch.errors.push(error);
            }
        }
        on_progress(LoadProgress {
            processed: idx + 1,
            total: files.len(),
            file_name: &file.name,
        });
    }

    info!(
        loaded = batch.tables.len(),
        failed = batch.errors.len(),
        duration_ms = start.elapsed().as_millis(),
        "load complete"
    );
    batch
}

/// Reads the selected sheet of a workbook into a typed frame.
pub fn read_sheet_frame(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    let range = open_sheet(path, &options.sheet)?;
    frame_from_range(&range, options.skip_rows())
}

fn open_sheet(path: &Path, sheet: &SheetSelector) -> Result<Range<Data>> {
    let mut workbook: Xlsx<BufReader<File>> = open_workbook(path)?;
    match sheet {
        SheetSelector::First => workbook
            .worksheet_range_at(0)
            .ok_or(IngestError::NoWorksheet)?
            .map_err(IngestError::from),
        SheetSelector::Named(name) => {
            let names = workbook.sheet_names();
            if !names.iter().any(|candidate| candidate == name) {
                return Err(IngestError::SheetNotFound {
                    sheet: name.clone(),
                    available: names.join(", "),
                });
            }
            workbook.worksheet_range(name).map_err(IngestError::from)
        }
    }
}

/// Builds a frame from a worksheet range.
///
/// Rows and columns are addressed physically from cell A1: the blank rows ahead
/// of the used range count towards `skip_rows`, and blank columns left of it are
/// kept as empty `Unnamed: N` columns. Blank rows between the skipped area and
/// the header are passed over. Fully blank data rows are dropped.
pub fn frame_from_range(range: &Range<Data>, skip_rows: usize) -> Result<DataFrame> {
    let (first_used_row, first_used_col) = range
        .start()
        .map_or((0, 0), |(row, col)| (row as usize, col as usize));
    let header_offset = skip_rows.saturating_sub(first_used_row);

    let mut rows = range
        .rows()
        .skip(header_offset)
        .map(|row| padded_cells(row, first_used_col))
        .filter(|cells| !cells.iter().all(CellValue::is_null));
    let Some(header_row) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let headers = header_names(&header_row);

    let mut columns_cells: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];
    for cells in rows {
        for (column, cell) in columns_cells.iter_mut().zip(cells) {
            column.push(cell);
        }
    }

    let columns = headers
        .iter()
        .zip(&columns_cells)
        .map(|(name, cells)| build_column(name, cells))
        .collect::<Result<Vec<_>>>()?;
    Ok(DataFrame::new(columns)?)
}

/// Decodes a range row, restoring the blank columns left of the used range.
fn padded_cells(row: &[Data], leading: usize) -> Vec<CellValue> {
    std::iter::repeat_n(CellValue::Null, leading)
        .chain(row.iter().map(CellValue::from))
        .collect()
}

/// Names header cells, filling blanks with `Unnamed: N` and suffixing repeats with `.1`, `.2`, ...
fn header_names(row: &[CellValue]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    row.iter()
        .enumerate()
        .map(|(idx, cell)| {
            let base = cell.to_text().unwrap_or_else(|| format!("Unnamed: {idx}"));
            let mut name = base.clone();
            let mut suffix = 1;
            while seen.contains(&name) {
                name = format!("{base}.{suffix}");
                suffix += 1;
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}

/// Adds the provenance column. An existing column of the same name is replaced.
fn add_source_column(
    mut frame: DataFrame,
    source_column: &str,
    file_name: &str,
) -> Result<DataFrame> {
    let values = vec![file_name; frame.height()];
    frame.with_column(Series::new(source_column.into(), values))?;
    Ok(frame)
}
