//! Raw sheet representation.

/// One worksheet as read from the workbook.
///
/// Headers are the raw first-row labels (free text, possibly abbreviated or
/// misspelled). Every data row has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawSheet {
    /// Builds a sheet, padding or truncating rows to the header width.
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the sheet has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_header_width() {
        let sheet = RawSheet::new(
            "Hoja1",
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            vec![vec!["1".to_string()], vec![
                "1".to_string(),
                "2".to_string(),
                "3".to_string(),
                "4".to_string(),
            ]],
        );
        assert_eq!(sheet.width(), 3);
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.rows[0], vec!["1", "", ""]);
        assert_eq!(sheet.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn empty_sheet() {
        let sheet = RawSheet::new("Vacia", vec!["A".to_string()], Vec::new());
        assert!(sheet.is_empty());
    }
}
