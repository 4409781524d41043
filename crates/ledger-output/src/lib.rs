//! Ledger export library.
//!
//! Renders a filtered view of the merged ledger in two formats:
//!
//! - **CSV**: UTF-8 with BOM, comma separated, `\n` line endings
//! - **XLSX**: one worksheet named `一覧`, typed cells
//!
//! Rendering works purely from the in-memory view; input workbooks are never
//! re-read.

mod csv_writer;
mod error;
mod xlsx_writer;

use std::path::Path;

use tracing::info;

use ledger_model::FilteredView;

pub use csv_writer::{UTF8_BOM, to_csv_bytes};
pub use error::{OutputError, Result};
pub use xlsx_writer::{DATETIME_FORMAT, SHEET_NAME, to_xlsx_bytes};

/// Suggested file name for CSV downloads.
pub const DEFAULT_CSV_NAME: &str = "工事台帳一覧.csv";
/// Suggested file name for XLSX downloads.
pub const DEFAULT_XLSX_NAME: &str = "工事台帳一覧.xlsx";

/// Renders the view as CSV and writes it to `path`.
pub fn write_csv(view: &FilteredView<'_>, path: &Path) -> Result<()> {
    let bytes = to_csv_bytes(view)?;
    write_bytes(path, &bytes)?;
    info!(path = %path.display(), row_count = view.height(), "wrote CSV export");
    Ok(())
}

/// Renders the view as XLSX and writes it to `path`.
pub fn write_xlsx(view: &FilteredView<'_>, path: &Path) -> Result<()> {
    let bytes = to_xlsx_bytes(view)?;
    write_bytes(path, &bytes)?;
    info!(path = %path.display(), row_count = view.height(), "wrote XLSX export");
    Ok(())
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}
