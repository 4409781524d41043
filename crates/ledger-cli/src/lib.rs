//! CLI library components for the ledger merge tool.

pub mod logging;
pub mod pipeline;
