//! Transformation profile.
//!
//! A profile is a JSON document describing how to turn one shape of CSV into a
//! fixed output schema. It is loaded and validated once; every check happens in
//! [`Profile::from_value`] so a [`Profile`] value is always complete.
//!
//! # Example
//!
//! ```json
//! {
//!   "delimiter": ";",
//!   "input_header": [],
//!   "header_from_file_name": { "region": "^(\\w+)_.*" },
//!   "header_map": { "id": "ID", "value": "Value", "comment": null },
//!   "output_header": ["id", "region", "value", "comment"],
//!   "sort_by": ["id"],
//!   "output_types": ["csv", "xlsx"],
//!   "input_dir": "incoming",
//!   "output_dir": "normalized"
//! }
//! ```
//!
//! # Validation order
//!
//! 1. The document must be an object with only supported keys
//! 2. `input_header`, `output_header` and `sort_by` must be present
//! 3. The document must match the embedded schema (`schemas/profile.json`)
//! 4. The delimiter must be one ASCII character
//! 5. Every `sort_by` column must be part of `output_header`
//! 6. Every derivation pattern must compile with exactly one capture group

use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::transform::derive::FileNameRule;
use crate::transform::header_map::HeaderRule;

/// Keys accepted in a profile document.
pub const SUPPORTED_PARAMS: &[&str] = &[
    "delimiter",
    "input_header",
    "header_from_file_name",
    "header_map",
    "output_header",
    "sort_by",
    "output_types",
    "input_file",
    "output_file",
    "input_dir",
    "output_dir",
];

const REQUIRED_PARAMS: &[&str] = &["input_header", "output_header", "sort_by"];

static PROFILE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/profile.json"))
        .expect("Invalid embedded schema")
});

/// Output format identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    Csv,
    Xlsx,
}

/// Input and output locations named in the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePaths {
    pub input_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl ProfilePaths {
    /// Paths set in `overrides` win over paths set here.
    pub fn overridden_by(&self, overrides: &ProfilePaths) -> ProfilePaths {
        let pick = |over: &Option<PathBuf>, base: &Option<PathBuf>| {
            over.clone().or_else(|| base.clone())
        };
        ProfilePaths {
            input_file: pick(&overrides.input_file, &self.input_file),
            output_file: pick(&overrides.output_file, &self.output_file),
            input_dir: pick(&overrides.input_dir, &self.input_dir),
            output_dir: pick(&overrides.output_dir, &self.output_dir),
        }
    }
}

/// A validated transformation profile.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Input field separator
    pub delimiter: u8,
    /// Column names for headerless input; empty means the file has a header row
    pub input_header: Vec<String>,
    /// Columns derived from the input file name, in document order
    pub header_from_file_name: Vec<FileNameRule>,
    /// Rename / blank-column rules, in document order
    pub header_map: Vec<HeaderRule>,
    /// Final column list; defines output order
    pub output_header: Vec<String>,
    /// Composite ascending sort key
    pub sort_by: Vec<String>,
    /// Formats to write, never empty
    pub output_types: Vec<OutputType>,
    /// Paths configured in the profile itself
    pub paths: ProfilePaths,
}

/// Shape of the document after schema validation.
#[derive(Debug, Deserialize)]
struct RawProfile {
    #[serde(default)]
    delimiter: Option<String>,
    input_header: Vec<String>,
    #[serde(default)]
    header_from_file_name: Option<Map<String, Value>>,
    #[serde(default)]
    header_map: Option<Map<String, Value>>,
    output_header: Vec<String>,
    sort_by: Vec<String>,
    #[serde(default)]
    output_types: Option<Vec<OutputType>>,
    #[serde(default)]
    input_file: Option<String>,
    #[serde(default)]
    output_file: Option<String>,
    #[serde(default)]
    input_dir: Option<String>,
    #[serde(default)]
    output_dir: Option<String>,
}

impl Profile {
    /// Read and validate a profile file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate a profile from a JSON string.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Validate a parsed JSON document.
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        let doc = value.as_object().ok_or(ConfigError::NotAnObject)?;

        if let Some(key) = doc.keys().find(|k| !SUPPORTED_PARAMS.contains(&k.as_str())) {
            return Err(ConfigError::UnsupportedParam(key.clone()));
        }

        for &key in REQUIRED_PARAMS {
            if doc.get(key).map_or(true, Value::is_null) {
                return Err(ConfigError::MissingField(key));
            }
        }

        check_schema(&value)?;

        let raw: RawProfile = serde_json::from_value(value)?;
        raw.try_into()
    }
}

impl TryFrom<RawProfile> for Profile {
    type Error = ConfigError;

    fn try_from(raw: RawProfile) -> ConfigResult<Self> {
        let delimiter = parse_delimiter(raw.delimiter.as_deref())?;

        if let Some(key) = raw.sort_by.iter().find(|k| !raw.output_header.contains(k)) {
            return Err(ConfigError::Invalid {
                errors: vec![format!("sort_by column '{}' is not in output_header", key)],
            });
        }

        let header_from_file_name = raw
            .header_from_file_name
            .unwrap_or_default()
            .into_iter()
            .map(|(column, pattern)| {
                let pattern = pattern.as_str().unwrap_or_default();
                FileNameRule::new(&column, pattern)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let header_map = raw
            .header_map
            .unwrap_or_default()
            .into_iter()
            .map(|(target, source)| HeaderRule {
                target,
                source: source.as_str().map(str::to_string),
            })
            .collect();

        let mut output_types = Vec::new();
        for t in raw.output_types.unwrap_or_default() {
            if !output_types.contains(&t) {
                output_types.push(t);
            }
        }
        if output_types.is_empty() {
            output_types.push(OutputType::Csv);
        }

        Ok(Profile {
            delimiter,
            input_header: raw.input_header,
            header_from_file_name,
            header_map,
            output_header: raw.output_header,
            sort_by: raw.sort_by,
            output_types,
            paths: ProfilePaths {
                input_file: non_empty_path(raw.input_file),
                output_file: non_empty_path(raw.output_file),
                input_dir: non_empty_path(raw.input_dir),
                output_dir: non_empty_path(raw.output_dir),
            },
        })
    }
}

fn check_schema(doc: &Value) -> ConfigResult<()> {
    let validator = jsonschema::draft7::new(&*PROFILE_SCHEMA).map_err(|e| ConfigError::Invalid {
        errors: vec![format!("Invalid profile schema: {}", e)],
    })?;

    let errors: Vec<String> = validator.iter_errors(doc).map(|e| e.to_string()).collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Invalid { errors })
    }
}

/// Absent, null and "" all mean a comma.
fn parse_delimiter(raw: Option<&str>) -> ConfigResult<u8> {
    match raw {
        None | Some("") => Ok(b','),
        Some(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(ConfigError::InvalidDelimiter(s.to_string())),
            }
        }
    }
}

fn non_empty_path(raw: Option<String>) -> Option<PathBuf> {
    raw.filter(|s| !s.is_empty()).map(PathBuf::from)
}
