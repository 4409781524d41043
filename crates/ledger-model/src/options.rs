//! Options controlling how each workbook is read.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Largest accepted number of leading rows to discard before the header.
pub const MAX_SKIP_ROWS: u8 = 20;

/// Which worksheet to read from every workbook.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SheetSelector {
    /// The first worksheet in the file.
    #[default]
    First,
    /// A worksheet with exactly this name.
    Named(String),
}

impl SheetSelector {
    /// Builds a selector from user input, where a blank string means "first sheet".
    ///
    /// Any other name is kept exactly as typed, surrounding spaces included.
    pub fn from_input(value: &str) -> Self {
        if value.trim().is_empty() {
            Self::First
        } else {
            Self::Named(value.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadOptions {
    pub sheet: SheetSelector,
    skip_rows: u8,
}

impl LoadOptions {
    pub fn new(sheet: SheetSelector, skip_rows: u32) -> Result<Self> {
        Self::default().with_sheet(sheet).with_skip_rows(skip_rows)
    }

    #[must_use]
    pub fn with_sheet(mut self, sheet: SheetSelector) -> Self {
        self.sheet = sheet;
        self
    }

    /// Sets the header skip count, rejecting values above [`MAX_SKIP_ROWS`].
    pub fn with_skip_rows(mut self, skip_rows: u32) -> Result<Self> {
        match u8::try_from(skip_rows) {
            Ok(value) if value <= MAX_SKIP_ROWS => {
                self.skip_rows = value;
                Ok(self)
            }
            _ => Err(ModelError::SkipRowsOutOfRange {
                value: skip_rows,
                max: MAX_SKIP_ROWS,
            }),
        }
    }

    pub fn skip_rows(&self) -> usize {
        usize::from(self.skip_rows)
    }
}
