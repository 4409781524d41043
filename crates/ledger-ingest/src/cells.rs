//! Worksheet cell values and per-column typing.
//!
//! A column's type is decided once, at load time, from the kinds of its
//! non-empty cells. Mixed columns fall back to text.

use calamine::Data;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::{Column, DataType, IntoColumn, NamedFrom, Series, TimeUnit};

use crate::error::Result;
use crate::polars_utils::{format_bool, format_datetime, format_numeric};

/// A single worksheet cell after decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Renders the cell for text columns and header names.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Text(s) => Some(s.clone()),
            Self::Number(v) => Some(format_numeric(*v)),
            Self::Bool(b) => Some(format_bool(*b)),
            Self::DateTime(dt) => Some(format_datetime(*dt)),
        }
    }

    fn kind(&self) -> Option<ColumnKind> {
        match self {
            Self::Null => None,
            Self::Text(_) => Some(ColumnKind::Text),
            Self::Number(_) => Some(ColumnKind::Number),
            Self::Bool(_) => Some(ColumnKind::Bool),
            Self::DateTime(_) => Some(ColumnKind::DateTime),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => Self::Null,
            Data::Int(v) => Self::Number(*v as f64),
            Data::Float(v) => Self::Number(*v),
            Data::Bool(b) => Self::Bool(*b),
            Data::String(s) if s.is_empty() => Self::Null,
            Data::String(s) => Self::Text(s.clone()),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(value) => Self::DateTime(value),
                None => Self::Number(dt.as_f64()),
            },
            Data::DateTimeIso(s) => match parse_iso_datetime(s) {
                Some(value) => Self::DateTime(value),
                None => Self::Text(s.clone()),
            },
            Data::DurationIso(s) => Self::Text(s.clone()),
            Data::Error(e) => Self::Text(e.to_string()),
        }
    }
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Logical type of a loaded column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    Bool,
    DateTime,
}

impl ColumnKind {
    /// Infers the kind from the non-null cells; `None` when every cell is null.
    pub fn infer(cells: &[CellValue]) -> Option<Self> {
        let mut kinds = cells.iter().filter_map(CellValue::kind);
        let first = kinds.next()?;
        if kinds.all(|kind| kind == first) {
            Some(first)
        } else {
            Some(Self::Text)
        }
    }

    pub fn dtype(self) -> DataType {
        match self {
            Self::Text => DataType::String,
            Self::Number => DataType::Float64,
            Self::Bool => DataType::Boolean,
            Self::DateTime => DataType::Datetime(TimeUnit::Milliseconds, None),
        }
    }
}

/// Builds a typed column from decoded cells.
///
/// All-null columns become text columns of nulls.
pub fn build_column(name: &str, cells: &[CellValue]) -> Result<Column> {
    let kind = ColumnKind::infer(cells).unwrap_or(ColumnKind::Text);
    let series = match kind {
        ColumnKind::Text => {
            let values: Vec<Option<String>> = cells.iter().map(CellValue::to_text).collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Number => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| match cell {
                    CellValue::Number(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Bool => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| match cell {
                    CellValue::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ColumnKind::DateTime => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    CellValue::DateTime(dt) => Some(dt.and_utc().timestamp_millis()),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values).cast(&kind.dtype())?
        }
    };
    Ok(series.into_column())
}
