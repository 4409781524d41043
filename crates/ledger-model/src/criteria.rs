//! Filter criteria held by the presentation layer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Conjunctive filter criteria. Every empty component means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Accepted values of the status column.
    pub statuses: BTreeSet<String>,
    /// Case-insensitive substring searched in the code column.
    pub code_pattern: String,
    /// Accepted provenance (source file name) values.
    pub sources: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statuses = statuses.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_code_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.code_pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty() && self.code_pattern.is_empty() && self.sources.is_empty()
    }
}

/// The filter controls a table can actually offer.
///
/// A stage whose column is absent from the schema is omitted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Distinct non-null status values, or `None` when there is no status column.
    pub statuses: Option<Vec<String>>,
    /// Whether the code column exists and can be searched.
    pub code_search: bool,
    /// Distinct provenance values in first-seen order.
    pub sources: Vec<String>,
}
