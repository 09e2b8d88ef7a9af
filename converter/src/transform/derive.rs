//! Columns derived from the input file name.
//!
//! Each rule pairs a target column with a regex that must define exactly one
//! capture group. The pattern is matched at the start of the file name and the
//! captured text becomes the column value for every row of that file.

use regex::Regex;

use crate::error::PatternError;
use crate::table::Table;

/// Value used when a rule's pattern does not match the file name.
pub const NO_MATCH: &str = "No match";

/// A compiled `header_from_file_name` rule.
#[derive(Debug, Clone)]
pub struct FileNameRule {
    column: String,
    regex: Regex,
}

impl FileNameRule {
    /// Compile a rule, rejecting patterns without exactly one capture group.
    pub fn new(column: &str, pattern: &str) -> Result<Self, PatternError> {
        let unanchored = Regex::new(pattern).map_err(|source| PatternError::Compile {
            column: column.to_string(),
            source,
        })?;

        // captures_len counts the implicit whole-match group
        let groups = unanchored.captures_len() - 1;
        if groups != 1 {
            return Err(PatternError::GroupCount {
                column: column.to_string(),
                found: groups,
            });
        }

        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|source| {
            PatternError::Compile {
                column: column.to_string(),
                source,
            }
        })?;

        Ok(Self {
            column: column.to_string(),
            regex,
        })
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Captured text, or [`NO_MATCH`].
    ///
    /// A group that does not take part in the match yields an empty string.
    pub fn value_for(&self, file_name: &str) -> String {
        match self.regex.captures(file_name) {
            Some(caps) => caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            None => NO_MATCH.to_string(),
        }
    }
}

/// Derived `(column, value)` pairs for one file name, in rule order.
pub fn derive(file_name: &str, rules: &[FileNameRule]) -> Vec<(String, String)> {
    rules
        .iter()
        .map(|rule| (rule.column().to_string(), rule.value_for(file_name)))
        .collect()
}

/// Broadcast every derived value over all rows of the table.
pub fn apply(table: Table, file_name: &str, rules: &[FileNameRule]) -> Table {
    derive(file_name, rules)
        .into_iter()
        .fold(table, |table, (column, value)| table.fill_column(&column, &value))
}
