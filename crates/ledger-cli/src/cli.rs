//! CLI argument definitions for the ledger merge tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use ledger_model::{
    DEFAULT_AMOUNT_COLUMN, DEFAULT_CODE_COLUMN, DEFAULT_SOURCE_COLUMN, DEFAULT_STATUS_COLUMN,
    LedgerColumns, MAX_SKIP_ROWS,
};

#[derive(Parser)]
#[command(
    name = "ledger-merge",
    version,
    about = "Merge a folder of construction ledger workbooks into one table",
    long_about = "Merge every .xlsx/.xlsm ledger in a folder into one table.\n\n\
                  Each row is tagged with its source file. The merged table can be\n\
                  filtered by status, project code and source, summarised, and\n\
                  exported as CSV or XLSX."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load, merge, filter, and optionally export a folder of ledgers.
    Merge(MergeArgs),

    /// List the filter values available in a folder of ledgers.
    Options(OptionsArgs),
}

/// How to find and read the input workbooks.
#[derive(Args)]
pub struct SourceArgs {
    /// Folder containing the .xlsx/.xlsm ledgers.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Worksheet to read from every file (default: the first sheet).
    #[arg(long = "sheet", value_name = "NAME", default_value = "")]
    pub sheet: String,

    /// Rows to skip above the header row.
    #[arg(
        long = "skip-rows",
        value_name = "N",
        default_value_t = 0,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_SKIP_ROWS))
    )]
    pub skip_rows: u32,

    #[command(flatten)]
    pub columns: ColumnArgs,
}

/// Names of the columns the filters and statistics look for.
#[derive(Args)]
pub struct ColumnArgs {
    #[arg(long = "status-column", value_name = "NAME", default_value = DEFAULT_STATUS_COLUMN)]
    pub status_column: String,

    #[arg(long = "code-column", value_name = "NAME", default_value = DEFAULT_CODE_COLUMN)]
    pub code_column: String,

    #[arg(long = "amount-column", value_name = "NAME", default_value = DEFAULT_AMOUNT_COLUMN)]
    pub amount_column: String,

    /// Name of the column added to hold each row's source file.
    #[arg(long = "source-column", value_name = "NAME", default_value = DEFAULT_SOURCE_COLUMN)]
    pub source_column: String,
}

impl ColumnArgs {
    pub fn to_columns(&self) -> LedgerColumns {
        LedgerColumns::default()
            .with_status(self.status_column.as_str())
            .with_code(self.code_column.as_str())
            .with_amount(self.amount_column.as_str())
            .with_source(self.source_column.as_str())
    }
}

#[derive(Args)]
pub struct MergeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Keep rows whose status is one of these values (repeatable).
    #[arg(long = "status", value_name = "VALUE")]
    pub statuses: Vec<String>,

    /// Keep rows whose code contains this text (case-insensitive).
    #[arg(long = "code", value_name = "TEXT", default_value = "")]
    pub code: String,

    /// Keep rows loaded from these files (repeatable).
    #[arg(long = "source", value_name = "FILE")]
    pub sources: Vec<String>,

    /// Write the filtered rows as CSV.
    #[arg(long = "csv", value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Write the filtered rows as XLSX.
    #[arg(long = "xlsx", value_name = "PATH")]
    pub xlsx: Option<PathBuf>,

    /// Number of rows to show in the preview table.
    #[arg(long = "preview", value_name = "N", default_value_t = 10)]
    pub preview: usize,

    /// Print the summary, statistics and load errors as JSON.
    #[arg(long = "json")]
    pub json: bool,

    /// Hide the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Args)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the options as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
