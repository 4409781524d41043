//! Error types for export operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while rendering or writing an export.
#[derive(Debug, Error)]
pub enum OutputError {
    /// CSV serialisation failed.
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// XLSX serialisation failed.
    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The view does not fit in one worksheet.
    #[error("{count} {axis} exceed the worksheet limit")]
    SheetLimit { axis: &'static str, count: usize },

    /// Writing the rendered bytes to disk failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for OutputError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, OutputError>;
