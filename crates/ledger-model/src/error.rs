use thiserror::Error;

/// Errors raised while validating options or building tables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The header skip count exceeds the allowed maximum.
    #[error("header skip count {value} is out of range (0..={max})")]
    SkipRowsOutOfRange { value: u32, max: u8 },

    /// A merged table was built without its provenance column.
    #[error("table is missing the provenance column '{column}'")]
    MissingProvenance { column: String },

    /// A view was asked for a row the table does not have.
    #[error("row {index} is out of bounds for a table of {height} rows")]
    RowOutOfBounds { index: usize, height: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
