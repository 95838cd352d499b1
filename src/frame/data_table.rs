use miette::Result;

use super::{Table, column::Column, row::Row};
use crate::{FrameError, Value};

/// An owned, column-oriented table.
///
/// `DataTable` keeps its columns in insertion order. Construction checks the
/// table invariants (unique names, equal column lengths); the row index is
/// implied as `0..row_count`.
///
/// # Example
///
/// ```
/// use colframe::{Column, DataTable, Table, Value};
///
/// let table = DataTable::new(vec![
///     Column::new("x", [1, 2, 3]),
///     Column::new("y", [6, 7, 8]),
/// ])
/// .unwrap();
///
/// assert_eq!(table.shape(), (3, 2));
/// assert_eq!(table.column_names(), vec!["x", "y"]);
/// assert_eq!(table.value("y", 1).unwrap(), &Value::Int64(7));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataTable {
    columns: Vec<Column>,
}

impl DataTable {
    /// Creates a table from columns.
    ///
    /// # Errors
    ///
    /// - [`FrameError::DuplicateColumn`] if two columns share a name
    /// - [`FrameError::ShapeMismatch`] if the columns differ in length
    pub fn new(columns: Vec<Column>) -> Result<Self, FrameError> {
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|other| other.name == column.name) {
                return Err(FrameError::DuplicateColumn(column.name.clone()));
            }
        }

        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(ragged) = columns.iter().find(|column| column.len() != expected) {
                return Err(FrameError::ShapeMismatch {
                    column: ragged.name.clone(),
                    expected,
                    actual: ragged.len(),
                });
            }
        }

        Ok(Self { columns })
    }

    /// Creates a table with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Combines rows into a table.
    ///
    /// Columns appear in the order their names are first seen across the
    /// rows. A row without a value for some column gets `missing` there.
    ///
    /// # Example
    ///
    /// ```
    /// use colframe::{Column, DataTable, Row, Value};
    ///
    /// let rows: Vec<Row> = vec![
    ///     [("x", 1), ("y", 20)].into_iter().collect(),
    ///     [("x", 2)].into_iter().collect(),
    /// ];
    ///
    /// let table = DataTable::from_rows(&rows, &Value::Null);
    /// let expected = DataTable::new(vec![
    ///     Column::new("x", [1, 2]),
    ///     Column::new("y", [Some(20), None]),
    /// ])
    /// .unwrap();
    /// assert_eq!(table, expected);
    /// ```
    pub fn from_rows(rows: &[Row], missing: &Value) -> Self {
        let mut names: Vec<&str> = Vec::new();
        for row in rows {
            for name in row.names() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }

        let columns = names
            .into_iter()
            .map(|name| {
                let values = rows
                    .iter()
                    .map(|row| row.get(name).unwrap_or(missing).clone())
                    .collect::<Vec<_>>();
                Column::new(name, values)
            })
            .collect();

        Self { columns }
    }

    /// The columns in table order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Finds the position of a column by name.
    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    pub fn first_column_name(&self) -> Option<&str> {
        self.columns.first().map(|column| column.name.as_str())
    }

    /// Returns the value of one cell.
    pub fn value(&self, column: &str, index: usize) -> Result<&Value, FrameError> {
        let values = self.require_column(column)?;
        values.get(index).ok_or(FrameError::IndexOutOfBounds {
            index,
            len: values.len(),
        })
    }

    /// Returns a single-column table holding a copy of `name`.
    pub fn column_table(&self, name: &str) -> Result<DataTable, FrameError> {
        let values = self.require_column(name)?;
        Ok(Self {
            columns: vec![Column::new(name, values.to_vec())],
        })
    }

    /// Returns the values of row `index` in column order.
    pub fn row_values(&self, index: usize) -> Result<Vec<Value>, FrameError> {
        let len = self.row_count();
        if index >= len {
            return Err(FrameError::IndexOutOfBounds { index, len });
        }
        Ok(self
            .columns
            .iter()
            .map(|column| column.values[index].clone())
            .collect())
    }

    /// Iterates over `(index, row)` pairs from top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = (usize, Row)> + '_ {
        self.index().map(move |index| {
            let row = self
                .columns
                .iter()
                .map(|column| (column.name.as_str(), column.values[index].clone()))
                .collect();
            (index, row)
        })
    }

    /// Returns every row as a vector of values in column order.
    pub fn row_tuples(&self) -> Vec<Vec<Value>> {
        self.index()
            .map(|index| {
                self.columns
                    .iter()
                    .map(|column| column.values[index].clone())
                    .collect()
            })
            .collect()
    }

    /// Iterates over `(name, values)` pairs in column order.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.columns
            .iter()
            .map(|column| (column.name.as_str(), column.values.as_slice()))
    }

    /// Returns the first `n` rows.
    pub fn head(&self, n: usize) -> DataTable {
        let end = n.min(self.row_count());
        self.slice_rows(0, end)
    }

    /// Returns the last `n` rows.
    pub fn tail(&self, n: usize) -> DataTable {
        let len = self.row_count();
        self.slice_rows(len.saturating_sub(n), len)
    }

    fn slice_rows(&self, start: usize, end: usize) -> DataTable {
        let columns = self
            .columns
            .iter()
            .map(|column| Column::new(column.name.as_str(), column.values[start..end].to_vec()))
            .collect();
        Self { columns }
    }

    /// Projects the table onto `names`, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::ColumnNotFound`] for a name that is not a column.
    pub fn select(&self, names: &[&str]) -> Result<DataTable, FrameError> {
        let columns = names
            .iter()
            .map(|name| Ok(Column::new(*name, self.require_column(name)?.to_vec())))
            .collect::<Result<Vec<_>, FrameError>>()?;

        DataTable::new(columns)
    }

    /// Replaces the values of `name` in place, or appends a new column.
    ///
    /// Callers are responsible for keeping column lengths equal.
    pub(crate) fn set_column(&mut self, name: &str, values: Vec<Value>) {
        match self.columns.iter_mut().find(|column| column.name == name) {
            Some(column) => column.values = values,
            None => self.columns.push(Column::new(name, values)),
        }
    }

    pub(crate) fn column_values_mut(&mut self, name: &str) -> Option<&mut Vec<Value>> {
        self.columns
            .iter_mut()
            .find(|column| column.name == name)
            .map(|column| &mut column.values)
    }

    pub(crate) fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }
}

impl Table for DataTable {
    fn column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|column| column.name.as_str())
            .collect()
    }

    fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .map(|column| column.values.as_slice())
    }

    fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::RowMask;

    fn sample() -> DataTable {
        DataTable::new(vec![
            Column::new("x", [1, 2, 3]),
            Column::new("y", [6, 7, 8]),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_ragged_columns() {
        let result = DataTable::new(vec![Column::new("x", [1, 2, 3]), Column::new("y", [6, 7])]);
        assert_eq!(
            result,
            Err(FrameError::ShapeMismatch {
                column: "y".to_string(),
                expected: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let result = DataTable::new(vec![Column::new("x", [1]), Column::new("x", [2])]);
        assert_eq!(result, Err(FrameError::DuplicateColumn("x".to_string())));
    }

    #[test]
    fn test_shape_and_size() {
        let table = sample();
        assert_eq!(table.shape(), (3, 2));
        assert_eq!(table.size(), 6);
        assert_eq!(table.index(), 0..3);
        assert_eq!(DataTable::empty().shape(), (0, 0));
    }

    #[test]
    fn test_first_column_name() {
        assert_eq!(sample().first_column_name(), Some("x"));
        assert_eq!(DataTable::empty().first_column_name(), None);
    }

    #[test]
    fn test_head_and_tail() {
        let table = sample();
        let head = DataTable::new(vec![Column::new("x", [1, 2]), Column::new("y", [6, 7])]).unwrap();
        let tail = DataTable::new(vec![Column::new("x", [2, 3]), Column::new("y", [7, 8])]).unwrap();

        assert_eq!(table.head(2), head);
        assert_eq!(table.tail(2), tail);
        assert_eq!(table.head(10), table);
        assert_eq!(table.tail(10), table);
        assert_eq!(table.head(0).row_count(), 0);
    }

    #[test]
    fn test_value_and_row_access() {
        let table = sample();

        assert_eq!(table.value("x", 1), Ok(&Value::Int64(2)));
        assert_eq!(
            table.value("x", 3),
            Err(FrameError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(
            table.value("z", 0),
            Err(FrameError::ColumnNotFound("z".to_string()))
        );

        let expected: Row = [("x", 2), ("y", 7)].into_iter().collect();
        assert_eq!(table.row(1).unwrap(), expected);
        assert_eq!(table.row_values(0).unwrap(), vec![Value::Int64(1), Value::Int64(6)]);
    }

    #[test]
    fn test_iter_rows_and_tuples() {
        let table = sample();
        let rows: Vec<(usize, Row)> = table.iter_rows().collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].0, 2);
        assert_eq!(rows[2].1.get("y"), Some(&Value::Int64(8)));
        assert_eq!(
            table.row_tuples(),
            vec![
                vec![Value::Int64(1), Value::Int64(6)],
                vec![Value::Int64(2), Value::Int64(7)],
                vec![Value::Int64(3), Value::Int64(8)],
            ]
        );
    }

    #[test]
    fn test_column_table() {
        let table = sample();
        let expected = DataTable::new(vec![Column::new("y", [6, 7, 8])]).unwrap();
        assert_eq!(table.column_table("y").unwrap(), expected);
    }

    #[test]
    fn test_select_reorders_and_rejects_unknown() {
        let table = sample();
        let selected = table.select(&["y", "x"]).unwrap();

        assert_eq!(selected.column_names(), vec!["y", "x"]);
        assert_eq!(
            table.select(&["y", "nope"]),
            Err(FrameError::ColumnNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_filter_rows() {
        let table = sample();
        let mask = RowMask::from_fn(3, |i| i != 1);
        let expected = DataTable::new(vec![Column::new("x", [1, 3]), Column::new("y", [6, 8])]).unwrap();

        assert_eq!(table.filter_rows(&mask).unwrap(), expected);
    }

    #[test]
    fn test_from_rows_with_heterogeneous_keys() {
        let rows: Vec<Row> = vec![
            [("x", 1), ("y", 20)].into_iter().collect(),
            [("x", 2)].into_iter().collect(),
            [("z", 5), ("x", 3), ("y", 22)].into_iter().collect(),
        ];
        let expected = DataTable::new(vec![
            Column::new("x", [1, 2, 3]),
            Column::new("y", [Some(20), None, Some(22)]),
            Column::new("z", [None, None, Some(5)]),
        ])
        .unwrap();

        assert_eq!(DataTable::from_rows(&rows, &Value::Null), expected);
    }

    #[test]
    fn test_from_rows_empty() {
        assert_eq!(DataTable::from_rows(&[], &Value::Null), DataTable::empty());
    }
}
