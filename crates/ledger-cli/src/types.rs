use std::path::PathBuf;

use polars::prelude::DataFrame;
use serde::Serialize;

use ledger_model::{FilterCriteria, FilterOptions, IngestSummary, LoadError, Statistics};

#[derive(Debug, Serialize)]
pub struct MergeReport {
    pub summary: IngestSummary,
    pub criteria: FilterCriteria,
    pub statistics: Statistics,
    pub errors: Vec<LoadError>,
    pub exports: Vec<ExportSummary>,
    /// Leading rows of the filtered view, for the terminal preview.
    #[serde(skip)]
    pub preview: DataFrame,
}

#[derive(Debug, Serialize)]
pub struct ExportSummary {
    pub format: &'static str,
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug, Serialize)]
pub struct OptionsReport {
    pub summary: IngestSummary,
    pub options: FilterOptions,
    pub errors: Vec<LoadError>,
}
