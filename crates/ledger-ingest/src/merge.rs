//! Merging loaded tables into one provenance-tagged table.

use std::collections::HashMap;
use std::time::Instant;

use polars::prelude::{AnyValue, Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tracing::{info, info_span};

use ledger_model::{
    IngestSummary, LedgerColumns, LoadError, LoadOptions, LoadProgress, MergedTable, RawTable,
    SourceFile,
};

use crate::error::{IngestError, Result};
use crate::polars_utils::any_to_text;
use crate::reader::{LoadBatch, load_all};

/// Result of loading and merging a batch of files.
#[derive(Debug)]
pub struct MergeOutcome {
    pub table: MergedTable,
    /// Per-file failures, in discovery order.
    pub errors: Vec<LoadError>,
    pub summary: IngestSummary,
}

/// Resolved type of one merged column.
#[derive(Debug, Clone, PartialEq)]
enum ColumnType {
    /// Only null cells seen so far.
    Unset,
    Single(DataType),
    /// Tables disagree; everything is rendered as text.
    Mixed,
}

impl ColumnType {
    fn observe(&mut self, dtype: &DataType) {
        match self {
            Self::Unset => *self = Self::Single(dtype.clone()),
            Self::Single(current) if current != dtype => *self = Self::Mixed,
            _ => {}
        }
    }

    fn dtype(&self) -> DataType {
        match self {
            Self::Single(dtype) => dtype.clone(),
            Self::Unset | Self::Mixed => DataType::String,
        }
    }
}

/// Concatenates tables in order under the union of their schemas.
///
/// Columns appear in first-seen order; rows missing a column hold nulls.
/// When tables disagree on a column's type, that column becomes text.
pub fn merge_tables(tables: &[RawTable], source_column: &str) -> Result<MergedTable> {
    if tables.is_empty() {
        return Err(IngestError::NoDataLoaded { attempted: 0 });
    }

    let schema = union_schema(tables);
    let mut combined: Option<DataFrame> = None;
    for table in tables {
        let aligned = align_frame(&table.frame, &schema)?;
        if let Some(existing) = combined.as_mut() {
            existing.vstack_mut(&aligned)?;
        } else {
            combined = Some(aligned);
        }
    }

    let Some(frame) = combined else {
        return Err(IngestError::NoDataLoaded { attempted: 0 });
    };
    Ok(MergedTable::new(frame, source_column)?)
}

/// Loads every file and merges the successes.
///
/// Fails with [`IngestError::NoDataLoaded`] only when no file could be loaded.
pub fn load_and_merge<F>(
    files: &[SourceFile],
    options: &LoadOptions,
    columns: &LedgerColumns,
    on_progress: F,
) -> Result<MergeOutcome>
where
    F: FnMut(LoadProgress<'_>),
{
    let LoadBatch { tables, errors } = load_all(files, options, &columns.source, on_progress);
    if tables.is_empty() {
        return Err(IngestError::NoDataLoaded {
            attempted: files.len(),
        });
    }

    let span = info_span!("merge", table_count = tables.len());
    let _guard = span.enter();
    let start = Instant::now();
    let table = merge_tables(&tables, &columns.source)?;

    let summary = IngestSummary {
        files_discovered: files.len(),
        files_loaded: tables.len(),
        files_failed: errors.len(),
        rows_loaded: table.height(),
    };
    info!(
        column_count = table.frame().width(),
        row_count = table.height(),
        duration_ms = start.elapsed().as_millis(),
        "merge complete"
    );

    Ok(MergeOutcome {
        table,
        errors,
        summary,
    })
}

fn union_schema(tables: &[RawTable]) -> Vec<(String, DataType)> {
    let mut order: Vec<(String, ColumnType)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for table in tables {
        for column in table.frame.get_columns() {
            let name = column.name().to_string();
            let idx = *positions.entry(name.clone()).or_insert_with(|| {
                order.push((name, ColumnType::Unset));
                order.len() - 1
            });
            if !is_all_null(column) {
                order[idx].1.observe(column.dtype());
            }
        }
    }

    order
        .into_iter()
        .map(|(name, column_type)| (name, column_type.dtype()))
        .collect()
}

fn align_frame(frame: &DataFrame, schema: &[(String, DataType)]) -> Result<DataFrame> {
    let height = frame.height();
    let columns: Vec<Column> = schema
        .iter()
        .map(|(name, dtype)| match frame.column(name) {
            Ok(column) if column.dtype() == dtype => column.clone(),
            Ok(column) if !is_all_null(column) => text_column(name, column),
            _ => Series::full_null(name.as_str().into(), height, dtype).into_column(),
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn is_all_null(column: &Column) -> bool {
    column.null_count() == column.len()
}

fn text_column(name: &str, column: &Column) -> Column {
    let values: Vec<Option<String>> = (0..column.len())
        .map(|idx| any_to_text(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect();
    Series::new(name.into(), values).into_column()
}
