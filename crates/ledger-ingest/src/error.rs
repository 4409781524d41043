//! Error types for ledger ingestion.

use std::path::PathBuf;
use thiserror::Error;

use ledger_model::ModelError;

/// Errors that can occur during ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Batch-level failures ===
    /// No workbook matched in the directory (missing, unreadable, or empty).
    #[error("no .xlsx or .xlsm files found in {path}")]
    DirectoryEmpty { path: PathBuf },

    /// Every discovered file failed to load, so there is nothing to merge.
    #[error("none of the {attempted} discovered files could be loaded")]
    NoDataLoaded { attempted: usize },

    // === Per-file failures ===
    /// The workbook container could not be opened or parsed.
    #[error("failed to open workbook: {message}")]
    Workbook { message: String },

    /// The requested worksheet does not exist.
    #[error("worksheet '{sheet}' not found (available: {available})")]
    SheetNotFound { sheet: String, available: String },

    /// The workbook has no worksheets at all.
    #[error("workbook contains no worksheets")]
    NoWorksheet,

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<calamine::XlsxError> for IngestError {
    fn from(err: calamine::XlsxError) -> Self {
        Self::Workbook {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::DirectoryEmpty {
            path: PathBuf::from("/data/ledgers"),
        };
        assert_eq!(err.to_string(), "no .xlsx or .xlsm files found in /data/ledgers");

        let err = IngestError::NoDataLoaded { attempted: 3 };
        assert_eq!(
            err.to_string(),
            "none of the 3 discovered files could be loaded"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
