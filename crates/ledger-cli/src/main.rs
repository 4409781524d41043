//! Ledger merge CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use ledger_cli::logging::{LogConfig, LogFormat, init_logging};
use serde::Serialize;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_merge, run_options};
use crate::summary::{print_merge_summary, print_options};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Merge(args) => match run_merge(&args) {
            Ok(report) if args.json => print_json(&report),
            Ok(report) => {
                print_merge_summary(&report);
                0
            }
            Err(error) => report_error(&error),
        },
        Command::Options(args) => match run_options(&args) {
            Ok(report) if args.json => print_json(&report),
            Ok(report) => {
                print_options(&report);
                0
            }
            Err(error) => report_error(&error),
        },
    };
    std::process::exit(exit_code);
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(error) => {
            eprintln!("error: failed to encode JSON: {error}");
            1
        }
    }
}

fn report_error(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
