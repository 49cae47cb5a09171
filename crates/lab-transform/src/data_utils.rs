//! Column-oriented helpers shared by the pipeline stages.
//!
//! Stages exchange polars [`DataFrame`]s whose cells are all text. Inside a
//! stage the values are handled through [`ColumnBuffer`], an ordered set of
//! string columns that converts to and from a frame.

use std::collections::HashMap;

use polars::prelude::{Column, DataFrame, DataType, NamedFrom, Series};

use crate::error::{Result, TransformError};

/// Returns the first value whose trimmed form is not empty.
///
/// The value itself is returned untrimmed. Pivoting, cross-sheet merging and
/// schema projection all resolve conflicts through this function.
///
/// # Examples
///
/// ```
/// use lab_transform::data_utils::first_non_empty;
///
/// assert_eq!(first_non_empty(["", "  ", " 95", "90"]), Some(" 95"));
/// assert_eq!(first_non_empty(["", " "]), None);
/// ```
pub fn first_non_empty<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    values.into_iter().find(|value| !value.trim().is_empty())
}

/// Sorts column names case-insensitively, breaking ties by exact text.
pub fn sort_case_insensitive(names: &mut [String]) {
    names.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
}

/// Builds a zero-row frame with the given string columns.
pub fn empty_frame<S: AsRef<str>>(columns: &[S]) -> Result<DataFrame> {
    let columns: Vec<Column> = columns
        .iter()
        .map(|name| Series::new(name.as_ref().into(), Vec::<String>::new()).into())
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// Cell text of an optional column, empty when the column or row is absent.
pub fn cell(values: Option<&[String]>, row: usize) -> &str {
    values
        .and_then(|values| values.get(row))
        .map_or("", String::as_str)
}

/// Ordered string columns of equal length, indexed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnBuffer {
    height: usize,
    columns: Vec<(String, Vec<String>)>,
    positions: HashMap<String, usize>,
}

impl ColumnBuffer {
    /// Creates an empty buffer whose columns will hold `height` rows.
    pub fn with_height(height: usize) -> Self {
        Self {
            height,
            columns: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Reads every column of `df` as text; nulls become empty strings.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let mut buffer = Self::with_height(df.height());
        for column in df.get_columns() {
            let text = column.cast(&DataType::String)?;
            let values = text
                .str()?
                .into_iter()
                .map(|value| value.unwrap_or_default().to_string())
                .collect();
            buffer.set(column.name().as_str(), values)?;
        }
        Ok(buffer)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Insertion index of the column `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|idx| self.columns[idx].1.as_slice())
    }

    /// Cell text, empty when the column is absent.
    ///
    /// Row loops over many columns should resolve each column once with
    /// [`ColumnBuffer::get`] and read cells through [`cell`].
    pub fn value(&self, name: &str, row: usize) -> &str {
        cell(self.get(name), row)
    }

    /// Replaces the column `name`, or appends it when absent.
    pub fn set(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.height {
            return Err(TransformError::ColumnLength {
                column: name.to_string(),
                expected: self.height,
                actual: values.len(),
            });
        }
        match self.position(name) {
            Some(idx) => self.columns[idx].1 = values,
            None => self.push(name, values),
        }
        Ok(())
    }

    /// Appends an all-empty column unless `name` already exists.
    pub fn ensure(&mut self, name: &str) {
        if !self.contains(name) {
            self.push(name, vec![String::new(); self.height]);
        }
    }

    fn push(&mut self, name: &str, values: Vec<String>) {
        self.positions.insert(name.to_string(), self.columns.len());
        self.columns.push((name.to_string(), values));
    }

    /// Keeps the rows whose flag is true.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        for (_, values) in &mut self.columns {
            let mut flags = keep.iter();
            values.retain(|_| flags.next().copied().unwrap_or(false));
        }
        self.height = keep.iter().take(self.height).filter(|flag| **flag).count();
    }

    /// Builds a frame with the named columns in the given order.
    ///
    /// Names missing from the buffer become empty columns.
    pub fn select_frame<S: AsRef<str>>(&self, names: &[S]) -> Result<DataFrame> {
        let columns: Vec<Column> = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let values = self
                    .get(name)
                    .map(<[String]>::to_vec)
                    .unwrap_or_else(|| vec![String::new(); self.height]);
                Series::new(name.into(), values).into()
            })
            .collect();
        Ok(DataFrame::new(columns)?)
    }

    /// Converts every column into a frame, in insertion order.
    pub fn into_frame(self) -> Result<DataFrame> {
        let columns: Vec<Column> = self
            .columns
            .into_iter()
            .map(|(name, values)| Series::new(name.as_str().into(), values).into())
            .collect();
        Ok(DataFrame::new(columns)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> ColumnBuffer {
        let mut buffer = ColumnBuffer::with_height(3);
        buffer
            .set("a", vec!["1".into(), "2".into(), "3".into()])
            .expect("set a");
        buffer
            .set("b", vec!["x".into(), "".into(), "z".into()])
            .expect("set b");
        buffer
    }

    #[test]
    fn first_non_empty_skips_blank_values() {
        assert_eq!(first_non_empty(["", "\t", "7"]), Some("7"));
        assert_eq!(first_non_empty(Vec::<&str>::new()), None);
    }

    #[test]
    fn case_insensitive_sort_is_total() {
        let mut names: Vec<String> = ["b", "A", "a", "C"].map(String::from).to_vec();
        sort_case_insensitive(&mut names);
        assert_eq!(names, ["A", "a", "b", "C"]);
    }

    #[test]
    fn set_rejects_wrong_length() {
        let mut buffer = buffer();
        let error = buffer.set("c", vec!["only".into()]).unwrap_err();
        assert!(matches!(error, TransformError::ColumnLength { expected: 3, actual: 1, .. }));
    }

    #[test]
    fn set_replaces_existing_column_in_place() {
        let mut buffer = buffer();
        buffer
            .set("a", vec!["9".into(), "8".into(), "7".into()])
            .expect("replace");
        assert_eq!(buffer.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(buffer.value("a", 0), "9");
    }

    #[test]
    fn positions_follow_insertion_order_across_many_columns() {
        let mut buffer = ColumnBuffer::with_height(1);
        for idx in 0..200 {
            buffer
                .set(&format!("QS6 – Prueba {idx}"), vec![idx.to_string()])
                .expect("set");
        }
        buffer.ensure("QS6 – Prueba 7");
        buffer.set("QS6 – Prueba 7", vec!["siete".into()]).expect("replace");

        assert_eq!(buffer.width(), 200);
        assert_eq!(buffer.position("QS6 – Prueba 0"), Some(0));
        assert_eq!(buffer.position("QS6 – Prueba 199"), Some(199));
        assert_eq!(buffer.position("QS6 – Prueba 200"), None);
        assert_eq!(buffer.value("QS6 – Prueba 7", 0), "siete");
        assert_eq!(buffer.value("QS6 – Prueba 123", 0), "123");
    }

    #[test]
    fn cell_is_empty_for_missing_column_or_row() {
        let buffer = buffer();
        assert_eq!(cell(buffer.get("b"), 2), "z");
        assert_eq!(cell(buffer.get("b"), 3), "");
        assert_eq!(cell(buffer.get("missing"), 0), "");
    }

    #[test]
    fn retain_rows_filters_every_column() {
        let mut buffer = buffer();
        buffer.retain_rows(&[true, false, true]);
        assert_eq!(buffer.height(), 2);
        assert_eq!(buffer.get("a").expect("a"), ["1", "3"]);
        assert_eq!(buffer.get("b").expect("b"), ["x", "z"]);
    }

    #[test]
    fn ensure_adds_empty_column() {
        let mut buffer = buffer();
        buffer.ensure("c");
        buffer.ensure("a");
        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.value("c", 2), "");
        assert_eq!(buffer.value("missing", 0), "");
    }

    #[test]
    fn frame_round_trip_keeps_order_and_text() {
        let df = buffer().into_frame().expect("frame");
        assert_eq!(df.shape(), (3, 2));
        let back = ColumnBuffer::from_frame(&df).expect("buffer");
        assert_eq!(back, buffer());
    }

    #[test]
    fn select_frame_fills_missing_columns() {
        let df = buffer().select_frame(&["b", "missing"]).expect("frame");
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, ["b", "missing"]);
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn empty_frame_has_header_only() {
        let df = empty_frame(&["nombre", "sexo"]).expect("frame");
        assert_eq!(df.shape(), (0, 2));
    }
}
