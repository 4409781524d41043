//! Ledger ingestion utilities.
//!
//! This crate discovers workbook files in a folder, loads one sheet of each
//! into a typed Polars DataFrame, and merges the results into a single
//! provenance-tagged table.
//!
//! # Features
//!
//! - **Discovery**: `.xlsx` files, then `.xlsm` files, from one directory
//! - **Loading**: first or named sheet, with 0-20 leading rows skipped
//! - **Merging**: union schema, explicit nulls, per-file failures collected
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ledger_ingest::{discover, load_and_merge};
//! use ledger_model::{LedgerColumns, LoadOptions};
//!
//! let files = discover(Path::new("data/ledgers"))?;
//! let outcome = load_and_merge(&files, &LoadOptions::default(), &LedgerColumns::default(), |_| {})?;
//! println!("{} rows, {} failures", outcome.table.height(), outcome.errors.len());
//! ```

mod cells;
mod discovery;
mod error;
mod merge;
mod polars_utils;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Discovery ===
pub use discovery::{WORKBOOK_EXTENSIONS, discover};

// === Loading ===
pub use cells::{CellValue, ColumnKind};
pub use reader::{LoadBatch, frame_from_range, load_all, load_table, read_sheet_frame};

// === Merging ===
pub use merge::{MergeOutcome, load_and_merge, merge_tables};

// === Value Coercion ===
pub use polars_utils::{
    any_to_f64, any_to_string, any_to_text, datetime_from_timestamp, format_bool,
    format_datetime, format_numeric, parse_amount, parse_f64,
};
