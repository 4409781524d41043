//! Names of the semantic columns the pipeline understands.
//!
//! All of them are matched by exact name and are optional on any given file,
//! except the provenance column, which the loader synthesizes.

use serde::{Deserialize, Serialize};

/// Status text column used for categorical filtering.
pub const DEFAULT_STATUS_COLUMN: &str = "ステータス";
/// Project/code identifier column used for substring search.
pub const DEFAULT_CODE_COLUMN: &str = "工事番号";
/// Monetary amount column summed by the statistics.
pub const DEFAULT_AMOUNT_COLUMN: &str = "金額";
/// Synthesized provenance column holding the source file name.
pub const DEFAULT_SOURCE_COLUMN: &str = "ソースファイル";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerColumns {
    pub status: String,
    pub code: String,
    pub amount: String,
    pub source: String,
}

impl Default for LedgerColumns {
    fn default() -> Self {
        Self {
            status: DEFAULT_STATUS_COLUMN.to_string(),
            code: DEFAULT_CODE_COLUMN.to_string(),
            amount: DEFAULT_AMOUNT_COLUMN.to_string(),
            source: DEFAULT_SOURCE_COLUMN.to_string(),
        }
    }
}

impl LedgerColumns {
    #[must_use]
    pub fn with_status(mut self, name: impl Into<String>) -> Self {
        self.status = name.into();
        self
    }

    #[must_use]
    pub fn with_code(mut self, name: impl Into<String>) -> Self {
        self.code = name.into();
        self
    }

    #[must_use]
    pub fn with_amount(mut self, name: impl Into<String>) -> Self {
        self.amount = name.into();
        self
    }

    #[must_use]
    pub fn with_source(mut self, name: impl Into<String>) -> Self {
        self.source = name.into();
        self
    }
}
