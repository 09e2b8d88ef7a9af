//! Composite-key row ordering.

use std::cmp::Ordering;

/// Comparable form of one cell.
#[derive(Debug, Clone)]
enum SortValue {
    Number(f64),
    Text(String),
    Missing,
}

impl SortValue {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
            (SortValue::Missing, _) => Ordering::Greater,
            (_, SortValue::Missing) => Ordering::Less,
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            // A column is either all numbers or all text.
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

fn is_missing(cell: &str) -> bool {
    cell.trim().is_empty()
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}

/// A column sorts numerically when every non-empty cell is a number.
fn is_numeric_column(rows: &[Vec<String>], idx: usize) -> bool {
    rows.iter()
        .map(|row| row[idx].as_str())
        .filter(|cell| !is_missing(cell))
        .all(|cell| parse_number(cell).is_some())
}

fn sort_value(cell: &str, numeric: bool) -> SortValue {
    if is_missing(cell) {
        return SortValue::Missing;
    }
    if numeric {
        match parse_number(cell) {
            Some(n) if n.is_nan() => SortValue::Missing,
            Some(n) => SortValue::Number(n),
            None => SortValue::Missing,
        }
    } else {
        SortValue::Text(cell.to_string())
    }
}

/// Sort rows by the columns at `key_indices`, keeping the input order of ties.
pub(super) fn stable_sort(rows: Vec<Vec<String>>, key_indices: &[usize]) -> Vec<Vec<String>> {
    let numeric: Vec<bool> = key_indices
        .iter()
        .map(|&idx| is_numeric_column(&rows, idx))
        .collect();

    let mut keyed: Vec<(Vec<SortValue>, Vec<String>)> = rows
        .into_iter()
        .map(|row| {
            let key = key_indices
                .iter()
                .zip(&numeric)
                .map(|(&idx, &is_num)| sort_value(&row[idx], is_num))
                .collect();
            (key, row)
        })
        .collect();

    // slice::sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| {
        a.iter()
            .zip(b)
            .map(|(x, y)| x.compare(y))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });

    keyed.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(cells: &[&[&str]]) -> Vec<Vec<String>> {
        cells
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_empty_cells_sort_last() {
        let sorted = stable_sort(rows(&[&[""], &["2"], &["1"], &[" "]]), &[0]);
        assert_eq!(sorted, rows(&[&["1"], &["2"], &[""], &[" "]]));
    }

    #[test]
    fn test_text_column_is_lexicographic() {
        let sorted = stable_sort(rows(&[&["10"], &["9"], &["x"]]), &[0]);
        assert_eq!(sorted, rows(&[&["10"], &["9"], &["x"]]));
    }

    #[test]
    fn test_nan_is_treated_as_missing() {
        let sorted = stable_sort(rows(&[&["NaN"], &["3"], &["1"]]), &[0]);
        assert_eq!(sorted, rows(&[&["1"], &["3"], &["NaN"]]));
    }

    #[test]
    fn test_no_rows() {
        assert!(stable_sort(Vec::new(), &[0]).is_empty());
    }
}
