//! Single-sheet xlsx writer.

use std::path::Path;

use polars::prelude::{Column, DataFrame, DataType};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::{OutputError, Result};

/// Writes `df` to a new workbook with one worksheet named `sheet_name`.
///
/// The first row holds the column names. Integer columns are written as
/// numbers; every other column as text. Nulls and empty strings are left
/// blank.
pub fn write_xlsx(df: &DataFrame, path: &Path, sheet_name: &str) -> Result<()> {
    let too_large = || OutputError::SheetLimit {
        rows: df.height(),
        columns: df.width(),
    };

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (idx, column) in df.get_columns().iter().enumerate() {
        let col = u16::try_from(idx).map_err(|_| too_large())?;
        worksheet.write_string_with_format(0, col, column.name().as_str(), &header_format)?;
        write_column(worksheet, col, column).map_err(|error| match error {
            OutputError::SheetLimit { .. } => too_large(),
            other => other,
        })?;
    }
    if df.width() > 0 {
        worksheet.set_freeze_panes(1, 0)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_column(worksheet: &mut Worksheet, col: u16, column: &Column) -> Result<()> {
    match column.dtype() {
        DataType::Int64 => {
            for (idx, value) in column.i64()?.into_iter().enumerate() {
                if let Some(number) = value {
                    worksheet.write_number(data_row(idx)?, col, number as f64)?;
                }
            }
        }
        _ => {
            let text = column.cast(&DataType::String)?;
            for (idx, value) in text.str()?.into_iter().enumerate() {
                if let Some(value) = value
                    && !value.is_empty()
                {
                    worksheet.write_string(data_row(idx)?, col, value)?;
                }
            }
        }
    }
    Ok(())
}

/// Worksheet row for the `idx`-th data row (row 0 is the header).
fn data_row(idx: usize) -> Result<u32> {
    u32::try_from(idx + 1).map_err(|_| OutputError::SheetLimit {
        rows: idx,
        columns: 0,
    })
}
