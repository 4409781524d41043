use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame};

use ledger_ingest::any_to_string;
use ledger_model::LoadError;

use crate::types::{MergeReport, OptionsReport};

pub fn print_merge_summary(report: &MergeReport) {
    println!(
        "{} files, {} rows merged",
        report.summary.files_loaded, report.summary.rows_loaded
    );
    print_load_errors(&report.errors);

    if report.preview.width() > 0 {
        println!();
        println!(
            "Preview ({} of {} rows):",
            report.preview.height(),
            report.statistics.row_count
        );
        println!("{}", preview_table(&report.preview));
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Rows"),
        Cell::new(report.statistics.row_count),
    ]);
    table.add_row(vec![
        Cell::new("Amount total"),
        match report.statistics.format_amount() {
            Some(amount) => Cell::new(amount).add_attribute(Attribute::Bold),
            None => dim_cell("-"),
        },
    ]);
    table.add_row(vec![
        Cell::new("Sources"),
        Cell::new(report.statistics.source_count),
    ]);
    println!();
    println!("{table}");

    for export in &report.exports {
        println!(
            "Wrote {} ({} rows): {}",
            export.format.to_uppercase(),
            export.rows,
            export.path.display()
        );
    }
}

pub fn print_options(report: &OptionsReport) {
    println!(
        "{} files, {} rows merged",
        report.summary.files_loaded, report.summary.rows_loaded
    );
    print_load_errors(&report.errors);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Filter"), header_cell("Values")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Status"),
        match &report.options.statuses {
            Some(values) => Cell::new(values.join(", ")),
            None => dim_cell("(no status column)"),
        },
    ]);
    table.add_row(vec![
        Cell::new("Code search"),
        if report.options.code_search {
            Cell::new("available").fg(Color::Green)
        } else {
            dim_cell("(no code column)")
        },
    ]);
    table.add_row(vec![
        Cell::new("Source"),
        Cell::new(report.options.sources.join("\n")),
    ]);
    println!("{table}");
}

fn print_load_errors(errors: &[LoadError]) {
    for error in errors {
        eprintln!("warning: {error}");
    }
}

fn preview_table(frame: &DataFrame) -> Table {
    let mut table = Table::new();
    table.set_header(
        frame
            .get_column_names()
            .into_iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for idx in 0..frame.height() {
        let row: Vec<Cell> = frame
            .get_columns()
            .iter()
            .map(|column| match column.get(idx).unwrap_or(AnyValue::Null) {
                AnyValue::Null => dim_cell(""),
                value => Cell::new(any_to_string(value)),
            })
            .collect();
        table.add_row(row);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
