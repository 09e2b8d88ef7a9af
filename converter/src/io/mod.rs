//! Tabular file input and output.
//!
//! - `reader`: delimited text to [`crate::Table`], with encoding detection
//! - `writer`: [`crate::Table`] to CSV and XLSX

pub mod reader;
pub mod writer;

pub use reader::{decode_content, detect_encoding, parse_table, read_table};
pub use writer::{write_csv, write_xlsx, xlsx_path, OUTPUT_DELIMITER};
