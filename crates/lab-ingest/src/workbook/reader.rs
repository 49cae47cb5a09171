//! Workbook file reading.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::sheet::RawSheet;

use super::cell::cell_to_string;

/// Maximum file size for workbook loading (200 MB default).
pub const MAX_WORKBOOK_FILE_SIZE: u64 = 200 * 1024 * 1024;

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_WORKBOOK_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Lists the sheet names of a workbook without decoding cell data.
pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
    check_file_size(path)?;
    let workbook = open_workbook_auto(path).map_err(|e| IngestError::WorkbookOpen {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(workbook.sheet_names())
}

/// Reads every sheet of a workbook.
///
/// The first row of each sheet is the header. Sheets without a header row
/// are returned with no columns; rows with no content are skipped. Any sheet
/// that cannot be decoded fails the whole read.
pub fn read_workbook(path: &Path) -> Result<Vec<RawSheet>> {
    check_file_size(path)?;
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::WorkbookOpen {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let names = workbook.sheet_names();
    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| IngestError::SheetRead {
                path: path.to_path_buf(),
                sheet: name.clone(),
                message: e.to_string(),
            })?;
        let sheet = range_to_sheet(&name, &range);
        debug!(
            sheet = %sheet.name,
            rows = sheet.len(),
            columns = sheet.width(),
            "read sheet"
        );
        sheets.push(sheet);
    }

    info!(
        path = %path.display(),
        sheets = sheets.len(),
        "workbook loaded"
    );
    Ok(sheets)
}

/// Converts a decoded cell range into a raw sheet.
fn range_to_sheet(name: &str, range: &Range<Data>) -> RawSheet {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return RawSheet::new(name, Vec::new(), Vec::new());
    };

    let headers = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let label = cell_to_string(cell).trim().to_string();
            if label.is_empty() {
                format!("unnamed_{idx}")
            } else {
                label
            }
        })
        .collect();

    let data = rows
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|value| !value.trim().is_empty()))
        .collect();

    RawSheet::new(name, headers, data)
}
