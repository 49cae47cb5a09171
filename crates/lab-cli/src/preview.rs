//! Terminal preview of the consolidated report.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use polars::prelude::{DataFrame, DataType, PolarsResult};

/// Rows shown when a preview is requested without a count.
pub const DEFAULT_PREVIEW_ROWS: usize = 80;
/// Leading columns shown in the preview.
pub const PREVIEW_COLUMNS: usize = 20;
/// Maximum characters per preview cell, ellipsis included.
pub const CELL_CHARS: usize = 120;

/// Shortens `value` to at most `max_chars` characters, ending with `…`.
pub fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut out: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Builds a table with the first `max_rows` rows and `max_columns` columns.
pub fn preview_table(df: &DataFrame, max_rows: usize, max_columns: usize) -> PolarsResult<Table> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    if df.width() == 0 {
        table.set_header(vec![Cell::new("Sin datos").fg(Color::DarkGrey)]);
        return Ok(table);
    }

    let view = df.head(Some(max_rows));
    let columns: Vec<Vec<String>> = view
        .get_columns()
        .iter()
        .take(max_columns)
        .map(|column| -> PolarsResult<Vec<String>> {
            let text = column.cast(&DataType::String)?;
            Ok(text
                .str()?
                .into_iter()
                .map(|value| truncate(value.unwrap_or_default(), CELL_CHARS))
                .collect())
        })
        .collect::<PolarsResult<_>>()?;

    table.set_header(
        view.get_column_names()
            .iter()
            .take(max_columns)
            .map(|name| {
                Cell::new(truncate(name.as_str(), CELL_CHARS))
                    .fg(Color::Cyan)
                    .add_attribute(Attribute::Bold)
            })
            .collect::<Vec<_>>(),
    );
    for row in 0..view.height() {
        table.add_row(
            columns
                .iter()
                .map(|values| values.get(row).cloned().unwrap_or_default())
                .collect::<Vec<_>>(),
        );
    }
    Ok(table)
}
