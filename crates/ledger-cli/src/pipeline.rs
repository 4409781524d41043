//! Ledger merge pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Discover**: list `.xlsx` and `.xlsm` files in one folder
//! 2. **Load & merge**: read one sheet per file and union the results
//! 3. **Filter**: narrow the merged table to a row view
//! 4. **Summarise / export**: statistics, CSV and XLSX over the view
//!
//! Stages 3 and 4 never modify the merged table, so a front end can re-run
//! them every time its criteria change.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use ledger_ingest::{IngestError, MergeOutcome};
use ledger_model::{
    FilterCriteria, FilterOptions, FilteredView, LedgerColumns, LoadOptions, LoadProgress,
    MergedTable, ModelError, SheetSelector, SourceFile, Statistics,
};
use ledger_output::OutputError;

/// Everything needed to load a folder of ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub dir: PathBuf,
    /// Worksheet name; empty selects the first sheet.
    pub sheet: String,
    /// Rows to discard above the header, 0 to 20.
    pub skip_rows: u32,
    pub columns: LedgerColumns,
}

impl PipelineConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            sheet: String::new(),
            skip_rows: 0,
            columns: LedgerColumns::default(),
        }
    }

    #[must_use]
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = sheet.into();
        self
    }

    #[must_use]
    pub fn with_skip_rows(mut self, skip_rows: u32) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: LedgerColumns) -> Self {
        self.columns = columns;
        self
    }

    /// Validates the sheet and skip settings.
    pub fn load_options(&self) -> std::result::Result<LoadOptions, ModelError> {
        LoadOptions::new(SheetSelector::from_input(&self.sheet), self.skip_rows)
    }
}

// ============================================================================
// Stage 1: Discover
// ============================================================================

/// Lists the workbooks in `dir`, failing when there are none.
pub fn discover(dir: &Path) -> std::result::Result<Vec<SourceFile>, IngestError> {
    ledger_ingest::discover(dir)
}

// ============================================================================
// Stage 2: Load & merge
// ============================================================================

/// Loads every file and merges the successes into one table.
pub fn load_and_merge<F>(
    files: &[SourceFile],
    options: &LoadOptions,
    columns: &LedgerColumns,
    on_progress: F,
) -> std::result::Result<MergeOutcome, IngestError>
where
    F: FnMut(LoadProgress<'_>),
{
    ledger_ingest::load_and_merge(files, options, columns, on_progress)
}

/// Runs stages 1 and 2 for a configuration.
///
/// Errors keep their [`IngestError`] or [`ModelError`] source, so callers can
/// tell an empty folder from a folder where nothing could be read.
pub fn ingest<F>(config: &PipelineConfig, on_progress: F) -> Result<MergeOutcome>
where
    F: FnMut(LoadProgress<'_>),
{
    let span = info_span!("ingest", dir = %config.dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let options = config.load_options().context("invalid load options")?;
    let files = discover(&config.dir)?;
    info!(file_count = files.len(), "discovered workbooks");

    let outcome = load_and_merge(&files, &options, &config.columns, on_progress)?;
    info!(
        files_loaded = outcome.summary.files_loaded,
        files_failed = outcome.summary.files_failed,
        row_count = outcome.summary.rows_loaded,
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(outcome)
}

// ============================================================================
// Stage 3: Filter
// ============================================================================

pub fn apply_filters<'a>(
    table: &'a MergedTable,
    criteria: &FilterCriteria,
    columns: &LedgerColumns,
) -> FilteredView<'a> {
    ledger_core::apply_filters(table, criteria, columns)
}

/// Filter values a front end can offer for the rows of `view`.
pub fn filter_options(view: &FilteredView<'_>, columns: &LedgerColumns) -> FilterOptions {
    ledger_core::filter_options(view, columns)
}

// ============================================================================
// Stage 4: Summarise & export
// ============================================================================

pub fn compute_stats(view: &FilteredView<'_>, columns: &LedgerColumns) -> Statistics {
    ledger_core::compute_stats(view, columns)
}

/// Renders the view as BOM-prefixed UTF-8 CSV.
pub fn export_csv(view: &FilteredView<'_>) -> std::result::Result<Vec<u8>, OutputError> {
    ledger_output::to_csv_bytes(view)
}

/// Renders the view as a single-sheet workbook.
pub fn export_xlsx(view: &FilteredView<'_>) -> std::result::Result<Vec<u8>, OutputError> {
    ledger_output::to_xlsx_bytes(view)
}
