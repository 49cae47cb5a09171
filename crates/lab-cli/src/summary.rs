use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use lab_cli::preview::{PREVIEW_COLUMNS, preview_table};

use crate::types::ConsolidateResult;

pub fn print_summary(result: &ConsolidateResult) {
    let report = &result.report;
    let (rows, columns) = report.shape();
    println!("Input: {}", report.source.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    println!(
        "Report: {rows} rows x {columns} columns in {:.2?}",
        result.elapsed
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Rows"),
        header_cell("Kept"),
        header_cell("Visits"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_rows = 0usize;
    let mut total_kept = 0usize;
    let mut total_visits = 0usize;
    for sheet in &report.sheets {
        total_rows += sheet.raw_rows;
        total_kept += sheet.kept_rows;
        total_visits += sheet.visits;
        let status = if sheet.is_skipped() {
            dim_cell("skipped")
        } else {
            Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            Cell::new(&sheet.name),
            Cell::new(sheet.raw_rows),
            count_cell(sheet.kept_rows),
            count_cell(sheet.visits),
            status,
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        Cell::new(total_kept).add_attribute(Attribute::Bold),
        Cell::new(total_visits).add_attribute(Attribute::Bold),
        Cell::new(format!("{rows} report rows")).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if report.is_empty() {
        eprintln!("No rows matched consulta externa or urgencia general.");
    }

    if let Some(max_rows) = result.preview_rows {
        match preview_table(&report.table, max_rows, PREVIEW_COLUMNS) {
            Ok(preview) => {
                println!();
                println!("Preview (first {} rows):", max_rows.min(rows));
                println!("{preview}");
            }
            Err(error) => eprintln!("error: failed to render preview: {error}"),
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
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

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
