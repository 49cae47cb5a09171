//! Report export.
//!
//! The consolidated report is written either as a workbook with a single
//! worksheet (default name `REPORTE`) or as CSV with the same header.

mod csv;
mod error;
mod options;
mod xlsx;

use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::info;

pub use crate::csv::write_csv;
pub use error::{OutputError, Result};
pub use options::{DEFAULT_SHEET_NAME, ExportFormat, ExportOptions, OUTPUT_SUFFIX};
pub use xlsx::write_xlsx;

/// Writes the report to `target` and returns the path written.
///
/// A target without an extension gets the one of the selected format. Parent
/// directories are created as needed.
pub fn export_report(df: &DataFrame, target: &Path, options: &ExportOptions) -> Result<PathBuf> {
    let path = if target.extension().is_none() {
        target.with_extension(options.format.extension())
    } else {
        target.to_path_buf()
    };
    ensure_parent_dir(&path)?;

    match options.format {
        ExportFormat::Xlsx => write_xlsx(df, &path, &options.sheet_name)?,
        ExportFormat::Csv => write_csv(df, &path)?,
    }
    info!(
        path = %path.display(),
        format = %options.format,
        rows = df.height(),
        columns = df.width(),
        "report exported"
    );
    Ok(path)
}

/// Default report path: `<input stem>_REPORTE_UNICO.<ext>` next to the input.
pub fn default_output_path(input: &Path, format: ExportFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "reporte".to_string());
    let file_name = format!("{stem}{OUTPUT_SUFFIX}.{}", format.extension());
    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_path_uses_input_stem() {
        assert_eq!(
            default_output_path(Path::new("/datos/resultados_2023.xlsx"), ExportFormat::Xlsx),
            PathBuf::from("/datos/resultados_2023_REPORTE_UNICO.xlsx")
        );
        assert_eq!(
            default_output_path(Path::new("enero.xls"), ExportFormat::Csv),
            PathBuf::from("enero_REPORTE_UNICO.csv")
        );
    }
}
