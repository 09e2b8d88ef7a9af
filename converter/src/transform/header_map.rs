//! Header renaming.
//!
//! A rule either renames an existing source column to its target name, or,
//! when it has no source, creates the target column filled with empty strings.

use crate::error::SchemaResult;
use crate::table::Table;

/// One `header_map` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRule {
    /// Column name after the rule is applied
    pub target: String,
    /// Existing column to rename, or `None` to create a blank column
    pub source: Option<String>,
}

impl HeaderRule {
    pub fn rename(target: &str, source: &str) -> Self {
        Self {
            target: target.to_string(),
            source: Some(source.to_string()),
        }
    }

    pub fn blank(target: &str) -> Self {
        Self {
            target: target.to_string(),
            source: None,
        }
    }
}

/// Apply rules in order. A missing source column is an error.
pub fn apply(table: Table, rules: &[HeaderRule]) -> SchemaResult<Table> {
    rules.iter().try_fold(table, |table, rule| match &rule.source {
        Some(source) => table.rename_column(source, &rule.target, "header_map"),
        None => Ok(table.fill_column(&rule.target, "")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;

    fn sample() -> Table {
        Table::new(
            vec!["ID".into(), "Value".into(), "Extra".into()],
            vec![
                vec!["1".into(), "10".into(), "x".into()],
                vec!["2".into(), "20".into(), "y".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rename_only_touches_source() {
        let table = apply(sample(), &[HeaderRule::rename("id", "ID")]).unwrap();

        assert_eq!(table.headers(), &["id", "Value", "Extra"]);
        assert_eq!(table.column("id").unwrap(), vec!["1", "2"]);
        assert_eq!(table.column("Value").unwrap(), vec!["10", "20"]);
        assert_eq!(table.column("Extra").unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn test_blank_column_created() {
        let table = apply(sample(), &[HeaderRule::blank("comment")]).unwrap();

        assert_eq!(table.column_count(), 4);
        assert_eq!(table.column("comment").unwrap(), vec!["", ""]);
    }

    #[test]
    fn test_missing_source_is_error() {
        let err = apply(sample(), &[HeaderRule::rename("id", "Identifier")]).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingColumn { stage: "header_map", ref column } if column == "Identifier"
        ));
    }

    #[test]
    fn test_rename_overrides_existing_target() {
        let table = sample().fill_column("region", "No match");
        let table = apply(table, &[HeaderRule::rename("region", "Extra")]).unwrap();

        assert_eq!(table.headers(), &["ID", "Value", "region"]);
        assert_eq!(table.column("region").unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn test_rules_apply_in_order() {
        let rules = vec![
            HeaderRule::rename("tmp", "ID"),
            HeaderRule::rename("id", "tmp"),
        ];
        let table = apply(sample(), &rules).unwrap();
        assert_eq!(table.headers(), &["id", "Value", "Extra"]);
    }
}
