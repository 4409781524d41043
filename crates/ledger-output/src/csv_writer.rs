//! CSV export.

use csv::{Terminator, WriterBuilder};
use tracing::debug;

use ledger_ingest::any_to_string;
use ledger_model::FilteredView;

use crate::error::Result;

/// UTF-8 byte order mark, so spreadsheet tools detect the encoding.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Renders the view as BOM-prefixed UTF-8 CSV.
///
/// Columns follow the merged schema; nulls are empty fields.
pub fn to_csv_bytes(view: &FilteredView<'_>) -> Result<Vec<u8>> {
    let frame = view.frame();
    let columns = frame.get_columns();

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.to_vec());
    writer.write_record(columns.iter().map(|column| column.name().as_str()))?;

    let mut record: Vec<String> = Vec::with_capacity(columns.len());
    for idx in view.row_indices() {
        record.clear();
        for column in columns {
            record.push(any_to_string(column.get(idx)?));
        }
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    debug!(
        row_count = view.height(),
        byte_count = bytes.len(),
        "rendered CSV"
    );
    Ok(bytes)
}
