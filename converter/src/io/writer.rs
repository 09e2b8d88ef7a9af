//! Output writers.
//!
//! CSV output is always comma separated and starts with a `sep=,` line so
//! spreadsheet applications pick the right separator. XLSX output goes to a
//! sibling path with the extension swapped.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ConvertResult, PathError};
use crate::table::Table;

/// Separator used for every CSV output, whatever the input delimiter.
pub const OUTPUT_DELIMITER: u8 = b',';

/// Plain decimal notation: optional minus, no leading zeros, optional fraction.
static PLAIN_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?$").expect("Invalid number regex")
});

/// Path of the spreadsheet written next to a CSV output.
pub fn xlsx_path(output: &Path) -> PathBuf {
    output.with_extension("xlsx")
}

/// Write `table` as CSV with a leading separator declaration.
pub fn write_csv(table: &Table, path: &Path) -> ConvertResult<()> {
    let write_err = |source| PathError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(write_err)?;
    writeln!(file, "sep={}", OUTPUT_DELIMITER as char).map_err(write_err)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(OUTPUT_DELIMITER)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);

    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush().map_err(write_err)?;

    Ok(())
}

/// Write `table` as a single-sheet workbook.
pub fn write_xlsx(table: &Table, path: &Path) -> ConvertResult<()> {
    build_workbook(table)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|source| PathError::Xlsx {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(())
}

fn build_workbook(table: &Table) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    // Out-of-range indices saturate so the worksheet reports its own limit error.
    for (col, name) in table.headers().iter().enumerate() {
        worksheet.write_string_with_format(0, col_index(col), name, &header_format)?;
    }

    for (r, row) in table.rows().iter().enumerate() {
        let row_num = u32::try_from(r + 1).unwrap_or(u32::MAX);
        for (c, cell) in row.iter().enumerate() {
            let col_num = col_index(c);
            if cell.is_empty() {
                continue;
            }
            match as_number(cell) {
                Some(n) => worksheet.write_number(row_num, col_num, n)?,
                None => worksheet.write_string(row_num, col_num, cell)?,
            };
        }
    }

    Ok(workbook)
}

fn col_index(col: usize) -> u16 {
    u16::try_from(col).unwrap_or(u16::MAX)
}

/// Numeric value of a cell, only for plain decimals whose text survives the
/// round trip (no exponent, sign prefix, trailing dot or leading zeros).
fn as_number(cell: &str) -> Option<f64> {
    if !PLAIN_NUMBER.is_match(cell) {
        return None;
    }
    cell.parse::<f64>().ok().filter(|n| n.is_finite())
}
