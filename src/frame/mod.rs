use std::ops::Range;

use miette::Result;

use crate::{FrameError, Value};

pub mod column;
pub mod data_table;
pub mod mask;
pub mod row;

use column::Column;
use data_table::DataTable;
use mask::RowMask;
use row::Row;

/// Trait for column-oriented table-like structures.
///
/// A table is an ordered set of uniquely named columns that all hold the
/// same number of values. Joins and groupby accept any implementor, so a
/// caller can hand in its own storage without copying it into a
/// [`DataTable`] first.
///
/// Implementors only provide ordered column names, column lookup and the
/// row count; everything else is derived.
pub trait Table {
    /// Returns the column names in table order.
    fn column_names(&self) -> Vec<&str>;

    /// Returns the values of a column, or `None` if there is no such column.
    fn column(&self, name: &str) -> Option<&[Value]>;

    /// Returns the number of rows. A table without columns has no rows.
    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize {
        self.column_names().len()
    }

    fn contains_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Returns `(rows, columns)`; `(0, 0)` for a table without columns.
    fn shape(&self) -> (usize, usize) {
        match self.column_count() {
            0 => (0, 0),
            columns => (self.row_count(), columns),
        }
    }

    /// Returns the number of cells.
    fn size(&self) -> usize {
        let (rows, columns) = self.shape();
        rows * columns
    }

    /// Returns the implied row index `0..row_count`.
    fn index(&self) -> Range<usize> {
        0..self.row_count()
    }

    /// Like [`Table::column`] but fails with [`FrameError::ColumnNotFound`].
    fn require_column(&self, name: &str) -> Result<&[Value], FrameError> {
        self.column(name)
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_owned()))
    }

    /// Returns the row at `index` as a name to value mapping.
    fn row(&self, index: usize) -> Result<Row, FrameError> {
        let len = self.row_count();
        if index >= len {
            return Err(FrameError::IndexOutOfBounds { index, len });
        }

        let mut row = Row::new();
        for name in self.column_names() {
            let values = self.require_column(name)?;
            let value = values
                .get(index)
                .ok_or_else(|| FrameError::ShapeMismatch {
                    column: name.to_owned(),
                    expected: len,
                    actual: values.len(),
                })?;
            row.insert(name, value.clone());
        }
        Ok(row)
    }

    /// Copies the rows selected by `mask` into a new table, keeping every
    /// column and the relative row order.
    fn filter_rows(&self, mask: &RowMask) -> Result<DataTable, FrameError> {
        let columns = self
            .column_names()
            .into_iter()
            .map(|name| {
                let values = self.require_column(name)?;
                let kept = mask
                    .iter_set()
                    .map(|index| {
                        values
                            .get(index)
                            .cloned()
                            .ok_or_else(|| FrameError::ShapeMismatch {
                                column: name.to_owned(),
                                expected: mask.len(),
                                actual: values.len(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Column::new(name, kept))
            })
            .collect::<Result<Vec<_>, FrameError>>()?;

        DataTable::new(columns)
    }

    /// Copies the table into an owned [`DataTable`].
    fn to_data_table(&self) -> Result<DataTable, FrameError> {
        let columns = self
            .column_names()
            .into_iter()
            .map(|name| Ok(Column::new(name, self.require_column(name)?.to_vec())))
            .collect::<Result<Vec<_>, FrameError>>()?;

        DataTable::new(columns)
    }
}
