//! Delimited text input with encoding detection.
//!
//! Bytes are decoded (UTF-8 first, then whatever chardet reports) before the
//! csv reader sees them, so Latin-1 exports from external systems load as-is.
//! A leading `sep=<c>` line, as written by [`super::writer::write_csv`], is skipped.

use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::path::Path;

use crate::error::{ConvertResult, PathError, SchemaError};
use crate::table::Table;

static SEP_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^sep=.\r?$").expect("Invalid separator line regex"));

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if std::str::from_utf8(bytes).is_ok() {
        return encoding_rs::UTF_8;
    }

    encoding_for_charset(&chardet::detect(bytes).0)
}

/// Map a chardet charset name to a decoder. Latin-1 labels decode as
/// windows-1252, which agrees with ISO-8859-1 on every printable byte.
fn encoding_for_charset(charset: &str) -> &'static Encoding {
    match charset.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::WINDOWS_1252,
        label => Encoding::for_label(label.as_bytes()).unwrap_or(encoding_rs::WINDOWS_1252),
    }
}

/// Decode bytes to text, dropping a byte order mark.
pub fn decode_content(bytes: &[u8]) -> Cow<'_, str> {
    let encoding = detect_encoding(bytes);
    let (text, _, _) = encoding.decode(bytes);
    text
}

/// Read a delimited file into a table.
///
/// With an empty `input_header` the first row names the columns; otherwise
/// every row is data and `input_header` names the columns by position.
pub fn read_table(path: &Path, delimiter: u8, input_header: &[String]) -> ConvertResult<Table> {
    let bytes = std::fs::read(path).map_err(|source| PathError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(&decode_content(&bytes), delimiter, input_header)
}

/// Parse delimited text into a table.
pub fn parse_table(content: &str, delimiter: u8, input_header: &[String]) -> ConvertResult<Table> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let first_line = content.lines().next().unwrap_or("");
    let (body, line_offset) = if SEP_LINE.is_match(first_line) {
        let rest = content
            .split_once('\n')
            .map(|(_, rest)| rest)
            .unwrap_or("");
        (rest, 1)
    } else {
        (content, 0)
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut records = reader.records();

    let headers: Vec<String> = if input_header.is_empty() {
        match records.next() {
            Some(record) => record?.iter().map(str::to_string).collect(),
            None => return Err(SchemaError::EmptyInput.into()),
        }
    } else {
        input_header.to_vec()
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        if record.len() != headers.len() {
            // input_header mismatches are reported against the first row
            if !input_header.is_empty() && rows.is_empty() {
                return Err(SchemaError::HeaderCount {
                    expected: headers.len(),
                    found: record.len(),
                }
                .into());
            }
            let line = record.position().map_or(0, |p| p.line()) + line_offset;
            return Err(SchemaError::FieldCount {
                line,
                expected: headers.len(),
                found: record.len(),
            }
            .into());
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(headers, rows)?)
}
