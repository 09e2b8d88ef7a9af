//! In-memory row table.
//!
//! A [`Table`] is a list of uniquely named columns over a fixed number of rows.
//! Stages take the table by value and hand back the updated table, so each
//! step of the pipeline can be tested on its own.
//!
//! ```
//! use csvconv::Table;
//!
//! let table = Table::new(
//!     vec!["id".into(), "value".into()],
//!     vec![vec!["2".into(), "b".into()], vec!["1".into(), "a".into()]],
//! ).unwrap();
//!
//! let sorted = table.sort_by(&["id".to_string()]).unwrap();
//! assert_eq!(sorted.column("value").unwrap(), vec!["a", "b"]);
//! ```

mod sort;

use std::collections::HashSet;

use crate::error::{SchemaError, SchemaResult};

/// Ordered rows of text cells under a unique header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, checking that names are unique and every row has one
    /// cell per column.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> SchemaResult<Self> {
        let mut seen = HashSet::new();
        for name in &headers {
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateColumn(name.clone()));
            }
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(SchemaError::FieldCount {
                    line: i as u64 + 2,
                    expected: headers.len(),
                    found: row.len(),
                });
            }
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// All values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Set every row of `name` to `value`.
    ///
    /// An existing column with that name is overwritten in place; otherwise the
    /// column is appended.
    pub fn fill_column(mut self, name: &str, value: &str) -> Self {
        match self.column_index(name) {
            Some(idx) => {
                for row in &mut self.rows {
                    row[idx] = value.to_string();
                }
            }
            None => {
                self.headers.push(name.to_string());
                for row in &mut self.rows {
                    row.push(value.to_string());
                }
            }
        }
        self
    }

    /// Rename column `from` to `to`.
    ///
    /// If another column is already called `to`, it is dropped so names stay
    /// unique.
    pub fn rename_column(mut self, from: &str, to: &str, stage: &'static str) -> SchemaResult<Self> {
        let idx = self
            .column_index(from)
            .ok_or_else(|| SchemaError::MissingColumn {
                stage,
                column: from.to_string(),
            })?;

        if from == to {
            return Ok(self);
        }

        self.headers[idx] = to.to_string();
        if let Some(clash) = self
            .headers
            .iter()
            .enumerate()
            .position(|(i, h)| i != idx && h == to)
        {
            self.remove_column(clash);
        }
        Ok(self)
    }

    /// Keep exactly `names`, in that order.
    pub fn select(self, names: &[String]) -> SchemaResult<Self> {
        let indices = names
            .iter()
            .map(|name| {
                self.column_index(name).ok_or_else(|| SchemaError::MissingColumn {
                    stage: "output_header",
                    column: name.clone(),
                })
            })
            .collect::<SchemaResult<Vec<usize>>>()?;

        let rows = self
            .rows
            .into_iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Table::new(names.to_vec(), rows)
    }

    /// Stable ascending sort on a composite key, leftmost column first.
    ///
    /// A key column whose non-empty values are all numbers is compared
    /// numerically; any other column is compared as text. Empty cells sort last.
    pub fn sort_by(mut self, keys: &[String]) -> SchemaResult<Self> {
        let indices = keys
            .iter()
            .map(|name| {
                self.column_index(name).ok_or_else(|| SchemaError::MissingColumn {
                    stage: "sort_by",
                    column: name.clone(),
                })
            })
            .collect::<SchemaResult<Vec<usize>>>()?;

        self.rows = sort::stable_sort(std::mem::take(&mut self.rows), &indices);
        Ok(self)
    }

    fn remove_column(&mut self, idx: usize) {
        self.headers.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let result = Table::new(names(&["a", "a"]), vec![]);
        assert!(matches!(result, Err(SchemaError::DuplicateColumn(ref c)) if c == "a"));
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let result = Table::new(names(&["a", "b"]), vec![vec!["1".into()]]);
        assert!(matches!(
            result,
            Err(SchemaError::FieldCount { line: 2, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_fill_column_appends_and_overwrites() {
        let t = table(&["a"], &[&["1"], &["2"]]);

        let t = t.fill_column("b", "x");
        assert_eq!(t.headers(), &names(&["a", "b"])[..]);
        assert_eq!(t.column("b").unwrap(), vec!["x", "x"]);

        let t = t.fill_column("a", "");
        assert_eq!(t.column_count(), 2);
        assert_eq!(t.column("a").unwrap(), vec!["", ""]);
    }

    #[test]
    fn test_rename_keeps_position_and_values() {
        let t = table(&["ID", "Value", "Other"], &[&["1", "10", "z"]]);
        let t = t.rename_column("Value", "value", "header_map").unwrap();

        assert_eq!(t.headers(), &names(&["ID", "value", "Other"])[..]);
        assert_eq!(t.column("value").unwrap(), vec!["10"]);
        assert_eq!(t.column("Other").unwrap(), vec!["z"]);
        assert!(t.column("Value").is_none());
    }

    #[test]
    fn test_rename_onto_existing_name_replaces_it() {
        let t = table(&["region", "Region"], &[&["derived", "source"]]);
        let t = t.rename_column("Region", "region", "header_map").unwrap();

        assert_eq!(t.headers(), &names(&["region"])[..]);
        assert_eq!(t.column("region").unwrap(), vec!["source"]);
    }

    #[test]
    fn test_rename_missing_source_fails() {
        let t = table(&["a"], &[]);
        let err = t.rename_column("nope", "b", "header_map").unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn { ref column, .. } if column == "nope"));
    }

    #[test]
    fn test_select_reorders_and_drops() {
        let t = table(&["c", "a", "x", "b"], &[&["3", "1", "?", "2"]]);
        let t = t.select(&names(&["a", "b", "c"])).unwrap();

        assert_eq!(t.headers(), &names(&["a", "b", "c"])[..]);
        assert_eq!(t.rows()[0], names(&["1", "2", "3"]));
    }

    #[test]
    fn test_select_missing_column_fails() {
        let t = table(&["a"], &[&["1"]]);
        let err = t.select(&names(&["a", "b"])).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingColumn { stage: "output_header", ref column } if column == "b"
        ));
    }

    #[test]
    fn test_sort_is_stable() {
        let t = table(
            &["k", "order"],
            &[&["b", "1"], &["a", "2"], &["b", "3"], &["a", "4"]],
        );
        let t = t.sort_by(&names(&["k"])).unwrap();
        assert_eq!(t.column("order").unwrap(), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_sort_numeric_column() {
        let t = table(&["n"], &[&["10"], &["9"], &["-1.5"], &["100"]]);
        let t = t.sort_by(&names(&["n"])).unwrap();
        assert_eq!(t.column("n").unwrap(), vec!["-1.5", "9", "10", "100"]);
    }

    #[test]
    fn test_sort_composite_key() {
        let t = table(
            &["a", "b"],
            &[&["2", "y"], &["1", "z"], &["2", "x"], &["1", "a"]],
        );
        let t = t.sort_by(&names(&["a", "b"])).unwrap();
        assert_eq!(t.column("b").unwrap(), vec!["a", "z", "x", "y"]);
    }

    #[test]
    fn test_sort_missing_key_fails() {
        let t = table(&["a"], &[&["1"]]);
        let err = t.sort_by(&names(&["z"])).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn { stage: "sort_by", .. }));
    }
}
