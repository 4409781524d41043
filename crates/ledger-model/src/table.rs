//! Loaded, merged and filtered tables.

use std::ops::Range;
use std::slice;

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray, PolarsResult};

use crate::error::{ModelError, Result};
use crate::source::SourceFile;

/// One successfully loaded workbook sheet.
///
/// The frame already carries the provenance column for every row.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub source: SourceFile,
    pub frame: DataFrame,
}

impl RawTable {
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        frame_column_names(&self.frame)
    }
}

/// The union of all loaded tables, tagged with provenance.
///
/// Immutable once built: only shared accessors are exposed, and filtering
/// produces a [`FilteredView`] that borrows it.
#[derive(Debug, Clone)]
pub struct MergedTable {
    frame: DataFrame,
    source_column: String,
}

impl MergedTable {
    pub fn new(frame: DataFrame, source_column: impl Into<String>) -> Result<Self> {
        let source_column = source_column.into();
        if frame.column(&source_column).is_err() {
            return Err(ModelError::MissingProvenance {
                column: source_column,
            });
        }
        Ok(Self {
            frame,
            source_column,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn source_column(&self) -> &str {
        &self.source_column
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.column(name).is_ok()
    }

    /// Column names in merged-schema order.
    pub fn column_names(&self) -> Vec<String> {
        frame_column_names(&self.frame)
    }

    /// A view over every row.
    pub fn view(&self) -> FilteredView<'_> {
        FilteredView::all(self)
    }
}

impl<'a> From<&'a MergedTable> for FilteredView<'a> {
    fn from(table: &'a MergedTable) -> Self {
        FilteredView::all(table)
    }
}

/// A read-only subset of a [`MergedTable`]'s rows.
///
/// Holds row indices rather than copied data.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    table: &'a MergedTable,
    rows: Option<Vec<usize>>,
}

impl<'a> FilteredView<'a> {
    pub fn all(table: &'a MergedTable) -> Self {
        Self { table, rows: None }
    }

    /// Builds a view over the rows for which `keep` returns true.
    pub fn select<F>(table: &'a MergedTable, keep: F) -> Self
    where
        F: FnMut(&usize) -> bool,
    {
        Self {
            table,
            rows: Some((0..table.height()).filter(keep).collect()),
        }
    }

    /// Builds a view from explicit row indices.
    ///
    /// Indices are sorted into table order and deduplicated. Any index past
    /// the end of the table is rejected.
    pub fn from_rows(table: &'a MergedTable, mut rows: Vec<usize>) -> Result<Self> {
        rows.sort_unstable();
        rows.dedup();
        if let Some(&index) = rows.last().filter(|&&last| last >= table.height()) {
            return Err(ModelError::RowOutOfBounds {
                index,
                height: table.height(),
            });
        }
        Ok(Self {
            table,
            rows: Some(rows),
        })
    }

    pub fn table(&self) -> &'a MergedTable {
        self.table
    }

    pub fn frame(&self) -> &'a DataFrame {
        self.table.frame()
    }

    pub fn source_column(&self) -> &'a str {
        self.table.source_column()
    }

    /// True when the view selects every row of its table.
    pub fn is_identity(&self) -> bool {
        self.rows.is_none()
    }

    pub fn height(&self) -> usize {
        match &self.rows {
            Some(rows) => rows.len(),
            None => self.table.height(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.table.column_names()
    }

    /// Indices into [`Self::frame`] of the selected rows, in table order.
    pub fn row_indices(&self) -> RowIndices<'_> {
        match &self.rows {
            Some(rows) => RowIndices::Selected(rows.iter()),
            None => RowIndices::All(0..self.table.height()),
        }
    }

    /// Materialises the view into its own frame.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let Some(rows) = &self.rows else {
            return Ok(self.table.frame().clone());
        };
        let mut keep = vec![false; self.table.height()];
        for &idx in rows {
            keep[idx] = true;
        }
        let mask = BooleanChunked::from_slice("view".into(), &keep);
        self.table.frame().filter(&mask)
    }
}

pub enum RowIndices<'v> {
    All(Range<usize>),
    Selected(slice::Iter<'v, usize>),
}

impl Iterator for RowIndices<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            Self::All(range) => range.next(),
            Self::Selected(iter) => iter.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::All(range) => range.size_hint(),
            Self::Selected(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for RowIndices<'_> {}

fn frame_column_names(frame: &DataFrame) -> Vec<String> {
    frame
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}
