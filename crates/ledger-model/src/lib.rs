//! Data model shared by the ledger merge pipeline.
//!
//! The pipeline discovers spreadsheet files, loads each one into a
//! [`RawTable`], merges them into a [`MergedTable`] tagged with provenance,
//! and derives [`FilteredView`]s, [`Statistics`] and exports from it.

pub mod columns;
pub mod criteria;
pub mod error;
pub mod options;
pub mod source;
pub mod stats;
pub mod table;

pub use columns::{
    DEFAULT_AMOUNT_COLUMN, DEFAULT_CODE_COLUMN, DEFAULT_SOURCE_COLUMN, DEFAULT_STATUS_COLUMN,
    LedgerColumns,
};
pub use criteria::{FilterCriteria, FilterOptions};
pub use error::{ModelError, Result};
pub use options::{LoadOptions, MAX_SKIP_ROWS, SheetSelector};
pub use source::{LOAD_ERROR_MESSAGE_LIMIT, LoadError, LoadProgress, SourceFile};
pub use stats::{IngestSummary, Statistics};
pub use table::{FilteredView, MergedTable, RawTable, RowIndices};
