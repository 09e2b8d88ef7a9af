//! Single-file conversion pipeline.
//!
//! One input file goes through these stages, each taking the table by value:
//!
//! 1. Load the delimited file (`input_header` decides where names come from)
//! 2. Derive columns from the file name (`header_from_file_name`)
//! 3. Rename and create columns (`header_map`)
//! 4. Project onto `output_header`, in that order
//! 5. Stable sort by `sort_by`
//! 6. Write every format in `output_types`
//!
//! Derivations run before the header map, so a header-map rule targeting a
//! derived column replaces it.
//!
//! # Example
//!
//! ```rust,no_run
//! use csvconv::{convert_file, ConsoleSink, Profile};
//! use std::path::Path;
//!
//! let profile = Profile::load("profile.json")?;
//! let report = convert_file(
//!     &profile,
//!     Path::new("east_data.csv"),
//!     Path::new("normalized/east_data.csv"),
//!     &ConsoleSink::new(false),
//! )?;
//! println!("{} rows", report.rows);
//! # Ok::<(), csvconv::ConvertError>(())
//! ```

use std::path::{Path, PathBuf};

use super::{derive, header_map};
use crate::error::{ConvertResult, SchemaResult};
use crate::io::{read_table, write_csv, write_xlsx, xlsx_path};
use crate::logs::LogSink;
use crate::profile::{OutputType, Profile};
use crate::table::Table;

/// Outcome of converting one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub input: PathBuf,
    /// Every file written, in `output_types` order
    pub outputs: Vec<PathBuf>,
    /// Rows in the final table
    pub rows: usize,
}

/// Run derive, rename, project and sort on an already loaded table.
///
/// `file_name` is the base name of the file the table came from.
pub fn transform_table(profile: &Profile, table: Table, file_name: &str) -> SchemaResult<Table> {
    let table = derive::apply(table, file_name, &profile.header_from_file_name);
    let table = header_map::apply(table, &profile.header_map)?;
    let table = table.select(&profile.output_header)?;
    table.sort_by(&profile.sort_by)
}

/// Convert `input` into `output` (plus any sibling formats).
pub fn convert_file<S: LogSink>(
    profile: &Profile,
    input: &Path,
    output: &Path,
    sink: &S,
) -> ConvertResult<FileReport> {
    sink.info(format!("[CSV] Reading from {}...", input.display()), 2);
    let table = read_table(input, profile.delimiter, &profile.input_header)?;

    sink.info("Converting...", 4);
    let table = transform_table(profile, table, &file_name(input))?;

    let outputs = emit(profile, &table, output, sink)?;

    Ok(FileReport {
        input: input.to_path_buf(),
        outputs,
        rows: table.row_count(),
    })
}

/// Write the final table once per output type.
pub fn emit<S: LogSink>(
    profile: &Profile,
    table: &Table,
    output: &Path,
    sink: &S,
) -> ConvertResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(profile.output_types.len());

    for output_type in &profile.output_types {
        match output_type {
            OutputType::Csv => {
                sink.info(format!("[CSV] Writing to {}...", output.display()), 2);
                write_csv(table, output)?;
                written.push(output.to_path_buf());
            }
            OutputType::Xlsx => {
                let path = xlsx_path(output);
                sink.info(format!("[XLSX] Writing to {}...", path.display()), 2);
                write_xlsx(table, &path)?;
                written.push(path);
            }
        }
    }

    Ok(written)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConvertError, SchemaError};
    use crate::logs::MemorySink;
    use crate::transform::NO_MATCH;
    use serde_json::json;

    fn scenario_profile() -> Profile {
        Profile::from_value(json!({
            "delimiter": ",",
            "input_header": [],
            "header_from_file_name": { "region": "^(\\w+)_.*" },
            "header_map": { "id": "ID", "value": "Value" },
            "output_header": ["id", "region", "value"],
            "sort_by": ["id"]
        }))
        .unwrap()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("east_data.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "ID,Value\n3,30\n1,10\n2,20\n").unwrap();

        let sink = MemorySink::new();
        let report = convert_file(&scenario_profile(), &input, &output, &sink).unwrap();

        assert_eq!(report.rows, 3);
        assert_eq!(report.outputs, vec![output.clone()]);

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            content,
            "sep=,\nid,region,value\n1,east,10\n2,east,20\n3,east,30\n"
        );

        let messages = sink.messages();
        assert!(messages[0].starts_with("[CSV] Reading from"));
        assert_eq!(messages[1], "Converting...");
        assert!(messages[2].starts_with("[CSV] Writing to"));
    }

    #[test]
    fn test_output_columns_follow_output_header() {
        let table = Table::new(
            vec!["Value".into(), "ID".into()],
            vec![vec!["10".into(), "1".into()]],
        )
        .unwrap();

        let table = transform_table(&scenario_profile(), table, "west_2024.csv").unwrap();
        assert_eq!(table.headers(), &["id", "region", "value"]);
        assert_eq!(table.rows()[0], vec!["1", "west", "10"]);
    }

    #[test]
    fn test_unmatched_file_name() {
        let table = Table::new(
            vec!["ID".into(), "Value".into()],
            vec![vec!["1".into(), "10".into()], vec!["2".into(), "20".into()]],
        )
        .unwrap();

        let table = transform_table(&scenario_profile(), table, "nounderscore.csv").unwrap();
        assert_eq!(table.column("region").unwrap(), vec![NO_MATCH, NO_MATCH]);
    }

    #[test]
    fn test_missing_projected_column() {
        let table = Table::new(vec!["ID".into(), "Other".into()], vec![]).unwrap();
        let err = transform_table(&scenario_profile(), table, "east_x.csv").unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn { ref column, .. } if column == "Value"));
    }

    #[test]
    fn test_header_map_overrides_derived_column() {
        let profile = Profile::from_value(json!({
            "input_header": ["code", "zone"],
            "header_from_file_name": { "region": "^(\\w+)_" },
            "header_map": { "region": "zone", "comment": null },
            "output_header": ["code", "region", "comment"],
            "sort_by": ["code"]
        }))
        .unwrap();

        let table = Table::new(
            vec!["code".into(), "zone".into()],
            vec![vec!["b".into(), "north".into()], vec!["a".into(), "south".into()]],
        )
        .unwrap();

        let table = transform_table(&profile, table, "east_file.csv").unwrap();
        assert_eq!(table.column("region").unwrap(), vec!["south", "north"]);
        assert_eq!(table.column("comment").unwrap(), vec!["", ""]);
    }

    #[test]
    fn test_failed_file_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("east_data.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "Identifier,Value\n1,10\n").unwrap();

        let err = convert_file(&scenario_profile(), &input, &output, &MemorySink::new()).unwrap_err();
        assert!(matches!(err, ConvertError::Schema(SchemaError::MissingColumn { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_emit_csv_and_xlsx() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("east_data.csv");
        let output = dir.path().join("east_out.csv");
        std::fs::write(&input, "ID;Value\n2;20\n1;10\n").unwrap();

        let profile = Profile::from_value(json!({
            "delimiter": ";",
            "input_header": [],
            "header_map": { "id": "ID", "value": "Value" },
            "output_header": ["id", "value"],
            "sort_by": ["id"],
            "output_types": ["csv", "xlsx"]
        }))
        .unwrap();

        let sink = MemorySink::new();
        let report = convert_file(&profile, &input, &output, &sink).unwrap();

        let xlsx = dir.path().join("east_out.xlsx");
        assert_eq!(report.outputs, vec![output.clone(), xlsx.clone()]);
        assert!(xlsx.exists());
        // output is comma separated regardless of the input delimiter
        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content, "sep=,\nid,value\n1,10\n2,20\n");
        assert!(sink.messages().iter().any(|m| m.starts_with("[XLSX] Writing to")));
    }

    #[test]
    fn test_file_name_is_base_name() {
        assert_eq!(file_name(Path::new("/data/in/east_data.csv")), "east_data.csv");
    }
}
