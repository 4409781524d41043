//! Summary metrics.

use serde::{Deserialize, Serialize};

/// Metrics derived from one table or view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub row_count: usize,
    /// Sum of the amount column; `None` when the schema has no such column.
    pub amount_total: Option<f64>,
    /// Distinct provenance values among the rows that are present.
    pub source_count: usize,
}

impl Statistics {
    /// Renders the amount total as yen with thousands separators, e.g. `¥1,234,567`.
    pub fn format_amount(&self) -> Option<String> {
        self.amount_total.map(format_yen)
    }
}

fn format_yen(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("¥-{grouped}")
    } else {
        format!("¥{grouped}")
    }
}

/// Batch-level counters, kept apart from the per-view [`Statistics::source_count`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    pub files_discovered: usize,
    pub files_loaded: usize,
    pub files_failed: usize,
    pub rows_loaded: usize,
}
