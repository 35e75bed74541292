use std::sync::Arc;

use super::row::{CustomDbRow, index_columns};
use crate::driver::ExecuteResult;
use crate::types::RowValues;

/// Row-number column injected by paginated selects; never surfaced to callers.
pub const ROW_NUMBER_COLUMN: &str = "_rn";

/// Rows returned by a statement, sharing one set of column names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<CustomDbRow>,
    /// Column names shared by all rows
    column_names: Arc<Vec<String>>,
}

impl ResultSet {
    /// Create a new result set with a known capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            column_names: Arc::default(),
        }
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CustomDbRow> {
        self.results.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a CustomDbRow;
    type IntoIter = std::slice::Iter<'a, CustomDbRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Pair each positional row with the driver's column metadata.
///
/// Columns are matched by position; a row shorter than the metadata is padded with NULL.
/// The pagination row-number column is dropped.
#[must_use]
pub fn build_result_set(result: &ExecuteResult) -> ResultSet {
    let keep: Vec<usize> = result
        .meta_data
        .iter()
        .enumerate()
        .filter(|(_, column)| column.name != ROW_NUMBER_COLUMN)
        .map(|(i, _)| i)
        .collect();

    let column_names: Arc<Vec<String>> = Arc::new(
        keep.iter()
            .map(|&i| result.meta_data[i].name.clone())
            .collect(),
    );
    let cache = Arc::new(index_columns(&column_names));

    let rows = result.rows.as_deref().unwrap_or_default();
    let mut set = ResultSet::with_capacity(rows.len());
    set.column_names = Arc::clone(&column_names);

    for row in rows {
        let values = keep
            .iter()
            .map(|&i| row.get(i).cloned().unwrap_or(RowValues::Null))
            .collect();
        set.results.push(CustomDbRow {
            column_names: Arc::clone(&column_names),
            rows: values,
            column_index_cache: Arc::clone(&cache),
        });
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::ColumnMetadata;

    #[test]
    fn maps_rows_by_metadata_and_drops_row_number() {
        let result = ExecuteResult {
            rows: Some(vec![
                vec![RowValues::Int(1), RowValues::Text("ann".into()), RowValues::Int(32)],
                vec![RowValues::Int(2), RowValues::Text("bob".into()), RowValues::Int(33)],
            ]),
            meta_data: vec![
                ColumnMetadata::new("id"),
                ColumnMetadata::new("name"),
                ColumnMetadata::new(ROW_NUMBER_COLUMN),
            ],
            ..ExecuteResult::default()
        };

        let set = build_result_set(&result);
        assert_eq!(set.len(), 2);
        assert_eq!(set.column_names(), ["id", "name"]);
        assert_eq!(set.results[1].get("name"), Some(&RowValues::Text("bob".into())));
        assert!(set.results[0].get(ROW_NUMBER_COLUMN).is_none());
        assert_eq!(set.results[0].rows.len(), 2);
    }

    #[test]
    fn missing_rows_yield_empty_set() {
        let result = ExecuteResult {
            meta_data: vec![ColumnMetadata::new("id")],
            ..ExecuteResult::default()
        };
        let set = build_result_set(&result);
        assert!(set.is_empty());
        assert_eq!(set.column_names(), ["id"]);
    }

    #[test]
    fn short_rows_are_padded_with_null() {
        let result = ExecuteResult {
            rows: Some(vec![vec![RowValues::Int(1)]]),
            meta_data: vec![ColumnMetadata::new("a"), ColumnMetadata::new("b")],
            ..ExecuteResult::default()
        };
        let set = build_result_set(&result);
        assert_eq!(set.results[0].get("b"), Some(&RowValues::Null));
    }
}
