//! Workbook reading utilities.

mod cell;
mod reader;

pub use cell::{cell_to_string, format_numeric};
pub use reader::{
    MAX_WORKBOOK_FILE_SIZE, check_file_size, check_file_size_with_limit, read_workbook,
    sheet_names,
};
