//! Error types for the conversion pipeline.
//!
//! This module defines one error type per failure kind:
//!
//! - [`ConfigError`] - Profile unreadable, unparsable, or invalid
//! - [`PatternError`] - Malformed file name derivation pattern
//! - [`SchemaError`] - Missing or mismatched columns in a table
//! - [`PathError`] - Missing input directory, unreadable or unwritable files
//! - [`ConvertError`] - Top-level error wrapping all of the above
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while loading or validating a profile.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Profile file could not be read.
    #[error("Cannot read profile '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Profile is not valid JSON.
    #[error("Invalid profile JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Profile root is not a JSON object.
    #[error("Profile must be a JSON object")]
    NotAnObject,

    /// Profile contains a key this tool does not know.
    #[error("param not supported: {0}")]
    UnsupportedParam(String),

    /// A required key is absent or null.
    #[error("Missing required profile field: {0}")]
    MissingField(&'static str),

    /// Profile violates the profile schema.
    #[error("Invalid profile: {}", .errors.join("; "))]
    Invalid { errors: Vec<String> },

    /// Delimiter is not a single ASCII character.
    #[error("Delimiter must be a single ASCII character, got '{0}'")]
    InvalidDelimiter(String),

    /// Neither an input/output file pair nor an input/output directory pair was given.
    #[error("No input configured: set input_file and output_file, or input_dir and output_dir")]
    NoInput,

    /// A derivation pattern is malformed.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

// =============================================================================
// Pattern Errors
// =============================================================================

/// Errors in `header_from_file_name` patterns, detected at profile load.
#[derive(Debug, Error)]
pub enum PatternError {
    /// Regex did not compile.
    #[error("Invalid pattern for column '{column}': {source}")]
    Compile {
        column: String,
        #[source]
        source: regex::Error,
    },

    /// Regex does not define exactly one capture group.
    #[error("Pattern for column '{column}' must have exactly one capture group, found {found}")]
    GroupCount { column: String, found: usize },
}

// =============================================================================
// Schema Errors
// =============================================================================

/// Errors when a table does not have the columns a stage expects.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A column referenced by a stage does not exist.
    #[error("Column '{column}' not found ({stage})")]
    MissingColumn { stage: &'static str, column: String },

    /// `input_header` does not match the number of fields in the file.
    #[error("input_header has {expected} names but the file has {found} columns")]
    HeaderCount { expected: usize, found: usize },

    /// A data row has a different number of fields than the header.
    #[error("Line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Two columns share a name.
    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// File contains no header row.
    #[error("CSV file is empty")]
    EmptyInput,
}

// =============================================================================
// Path Errors
// =============================================================================

/// Filesystem errors around input and output locations.
#[derive(Debug, Error)]
pub enum PathError {
    /// Input directory does not exist.
    #[error("Path does not exist: [input_dir={}]", .0.display())]
    MissingInputDir(PathBuf),

    /// File or directory could not be read.
    #[error("Cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output could not be written.
    #[error("Cannot write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Spreadsheet output could not be written.
    #[error("Cannot write '{}': {source}", .path.display())]
    Xlsx {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}

// =============================================================================
// Conversion Errors (top-level)
// =============================================================================

/// Top-level error returned by the pipeline and batch driver.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Profile error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Column error.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Filesystem error.
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    /// Malformed delimited data.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for profile operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for table operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type for filesystem operations.
pub type PathResult<T> = Result<T, PathError>;

/// Result type for pipeline operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // SchemaError -> ConvertError
        let schema_err = SchemaError::MissingColumn {
            stage: "output_header",
            column: "region".into(),
        };
        let err: ConvertError = schema_err.into();
        assert!(err.to_string().contains("region"));
        assert!(err.to_string().contains("output_header"));

        // PatternError -> ConfigError -> ConvertError
        let pattern_err = PatternError::GroupCount {
            column: "region".into(),
            found: 2,
        };
        let config_err: ConfigError = pattern_err.into();
        let err: ConvertError = config_err.into();
        assert!(err.to_string().contains("exactly one capture group"));
    }

    #[test]
    fn test_unsupported_param_format() {
        let err = ConfigError::UnsupportedParam("colour".into());
        assert_eq!(err.to_string(), "param not supported: colour");
    }

    #[test]
    fn test_missing_input_dir_format() {
        let err = PathError::MissingInputDir(PathBuf::from("/nope"));
        assert_eq!(err.to_string(), "Path does not exist: [input_dir=/nope]");
    }
}
