use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span};

use ledger_cli::pipeline::{PipelineConfig, apply_filters, compute_stats, filter_options, ingest};
use ledger_model::{FilterCriteria, LoadProgress};
use ledger_output::{write_csv, write_xlsx};

use crate::cli::{MergeArgs, OptionsArgs, SourceArgs};
use crate::types::{ExportSummary, MergeReport, OptionsReport};

pub fn run_merge(args: &MergeArgs) -> Result<MergeReport> {
    let config = pipeline_config(&args.source);
    let columns = &config.columns;

    let progress = load_progress_bar(args.no_progress || args.json);
    let outcome = ingest(&config, |p| advance(&progress, p))?;
    progress.finish_and_clear();

    let criteria = FilterCriteria::new()
        .with_statuses(args.statuses.iter().map(String::as_str))
        .with_code_pattern(args.code.as_str())
        .with_sources(args.sources.iter().map(String::as_str));

    let span = info_span!("present", criteria_empty = criteria.is_empty());
    let _guard = span.enter();
    let view = apply_filters(&outcome.table, &criteria, columns);
    let statistics = compute_stats(&view, columns);
    info!(
        row_count = statistics.row_count,
        source_count = statistics.source_count,
        "filtered view ready"
    );

    let mut exports = Vec::new();
    if let Some(path) = &args.csv {
        write_csv(&view, path).context("export CSV")?;
        exports.push(ExportSummary {
            format: "csv",
            path: path.clone(),
            rows: view.height(),
        });
    }
    if let Some(path) = &args.xlsx {
        write_xlsx(&view, path).context("export XLSX")?;
        exports.push(ExportSummary {
            format: "xlsx",
            path: path.clone(),
            rows: view.height(),
        });
    }

    let preview = view
        .to_frame()
        .context("materialise preview")?
        .head(Some(args.preview));

    Ok(MergeReport {
        summary: outcome.summary,
        criteria,
        statistics,
        errors: outcome.errors,
        exports,
        preview,
    })
}

pub fn run_options(args: &OptionsArgs) -> Result<OptionsReport> {
    let config = pipeline_config(&args.source);
    let progress = load_progress_bar(args.json);
    let outcome = ingest(&config, |p| advance(&progress, p))?;
    progress.finish_and_clear();

    let options = filter_options(&outcome.table.view(), &config.columns);
    Ok(OptionsReport {
        summary: outcome.summary,
        options,
        errors: outcome.errors,
    })
}

fn pipeline_config(args: &SourceArgs) -> PipelineConfig {
    PipelineConfig::new(&args.dir)
        .with_sheet(args.sheet.as_str())
        .with_skip_rows(args.skip_rows)
        .with_columns(args.columns.to_columns())
}

fn load_progress_bar(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.blue} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar
}

fn advance(bar: &ProgressBar, progress: LoadProgress<'_>) {
    bar.set_length(progress.total as u64);
    bar.set_position(progress.processed as u64);
    bar.set_message(progress.file_name.to_string());
}
