//! Filtering and statistics over a merged ledger table.
//!
//! Both operations are read-only: a [`ledger_model::MergedTable`] is never
//! modified, and repeated calls with the same inputs return equal results.

pub mod filter;
pub mod stats;

pub use filter::{apply_filters, filter_options};
pub use stats::compute_stats;
