//! Editing, dropping and column arithmetic.
//!
//! Every operation comes in two forms. The plain form copies its input and
//! returns the edited copy; the `_in_place` form mutates the one
//! [`DataTable`] it is handed. Both validate before they write, so a failed
//! edit leaves the table as it was.

use miette::Result;

use crate::types::arith::{values_add, values_divide, values_multiply, values_subtract};
use crate::{DataTable, FrameError, Row, Table, Value};

/// Values written to a column: one value broadcast to every row, or one
/// value per row.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    One(Value),
    Many(Vec<Value>),
}

impl From<Value> for ColumnValues {
    fn from(value: Value) -> Self {
        ColumnValues::One(value)
    }
}

impl From<i64> for ColumnValues {
    fn from(value: i64) -> Self {
        ColumnValues::One(value.into())
    }
}

impl From<i32> for ColumnValues {
    fn from(value: i32) -> Self {
        ColumnValues::One(value.into())
    }
}

impl From<f64> for ColumnValues {
    fn from(value: f64) -> Self {
        ColumnValues::One(value.into())
    }
}

impl From<bool> for ColumnValues {
    fn from(value: bool) -> Self {
        ColumnValues::One(value.into())
    }
}

impl From<&str> for ColumnValues {
    fn from(value: &str) -> Self {
        ColumnValues::One(value.into())
    }
}

impl From<String> for ColumnValues {
    fn from(value: String) -> Self {
        ColumnValues::One(value.into())
    }
}

impl<V: Into<Value>> From<Vec<V>> for ColumnValues {
    fn from(values: Vec<V>) -> Self {
        ColumnValues::Many(values.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>, const N: usize> From<[V; N]> for ColumnValues {
    fn from(values: [V; N]) -> Self {
        ColumnValues::Many(values.into_iter().map(Into::into).collect())
    }
}

impl From<&[Value]> for ColumnValues {
    fn from(values: &[Value]) -> Self {
        ColumnValues::Many(values.to_vec())
    }
}

fn check_index(table: &DataTable, index: usize) -> Result<(), FrameError> {
    let len = table.row_count();
    if index >= len {
        return Err(FrameError::IndexOutOfBounds { index, len });
    }
    Ok(())
}

/// Sets the named cells of row `index`. Columns not named keep their values.
///
/// # Errors
///
/// - [`FrameError::IndexOutOfBounds`] if there is no row `index`
/// - [`FrameError::ColumnNotFound`] if `items` names an unknown column
pub fn edit_row_items_in_place(
    table: &mut DataTable,
    index: usize,
    items: &Row,
) -> Result<(), FrameError> {
    check_index(table, index)?;
    if let Some(name) = items.names().find(|name| !table.contains_column(name)) {
        return Err(FrameError::ColumnNotFound(name.to_owned()));
    }

    for (name, value) in items.iter() {
        if let Some(values) = table.column_values_mut(name) {
            values[index] = value.clone();
        }
    }
    Ok(())
}

pub fn edit_row_items<T: Table + ?Sized>(
    table: &T,
    index: usize,
    items: &Row,
) -> Result<DataTable, FrameError> {
    let mut edited = table.to_data_table()?;
    edit_row_items_in_place(&mut edited, index, items)?;
    Ok(edited)
}

/// Replaces every value of row `index`, in column order.
///
/// # Errors
///
/// - [`FrameError::IndexOutOfBounds`] if there is no row `index`
/// - [`FrameError::LengthMismatch`] unless there is one value per column
pub fn edit_row_values_in_place(
    table: &mut DataTable,
    index: usize,
    values: &[Value],
) -> Result<(), FrameError> {
    check_index(table, index)?;
    let expected = table.column_count();
    if values.len() != expected {
        return Err(FrameError::LengthMismatch {
            expected,
            actual: values.len(),
        });
    }

    for (column, value) in table.columns_mut().iter_mut().zip(values) {
        column.values[index] = value.clone();
    }
    Ok(())
}

pub fn edit_row_values<T: Table + ?Sized>(
    table: &T,
    index: usize,
    values: &[Value],
) -> Result<DataTable, FrameError> {
    let mut edited = table.to_data_table()?;
    edit_row_values_in_place(&mut edited, index, values)?;
    Ok(edited)
}

/// Overwrites column `name`, or appends it if the table has no such column.
///
/// A table without columns accepts a column of any length.
///
/// # Errors
///
/// [`FrameError::LengthMismatch`] if [`ColumnValues::Many`] does not hold
/// one value per row.
///
/// # Example
///
/// ```
/// use colframe::{Column, DataTable, Table, Value};
/// use colframe::edit::edit_column;
///
/// let data = DataTable::new(vec![Column::new("x", [1, 2, 3])]).unwrap();
///
/// let edited = edit_column(&data, "x", vec![11, 22, 33]).unwrap();
/// assert_eq!(edited.column("x").unwrap()[2], Value::Int64(33));
///
/// let edited = edit_column(&data, "z", "same").unwrap();
/// assert_eq!(edited.column_names(), vec!["x", "z"]);
/// ```
pub fn edit_column_in_place(
    table: &mut DataTable,
    name: &str,
    values: impl Into<ColumnValues>,
) -> Result<(), FrameError> {
    let row_count = table.row_count();
    let values = match values.into() {
        ColumnValues::One(value) => vec![value; row_count],
        ColumnValues::Many(values) => {
            if table.column_count() > 0 && values.len() != row_count {
                return Err(FrameError::LengthMismatch {
                    expected: row_count,
                    actual: values.len(),
                });
            }
            values
        }
    };

    table.set_column(name, values);
    Ok(())
}

pub fn edit_column<T: Table + ?Sized>(
    table: &T,
    name: &str,
    values: impl Into<ColumnValues>,
) -> Result<DataTable, FrameError> {
    let mut edited = table.to_data_table()?;
    edit_column_in_place(&mut edited, name, values)?;
    Ok(edited)
}

/// Sets one cell.
///
/// # Errors
///
/// - [`FrameError::ColumnNotFound`] if there is no column `name`
/// - [`FrameError::IndexOutOfBounds`] if there is no row `index`
pub fn edit_value_in_place(
    table: &mut DataTable,
    name: &str,
    index: usize,
    value: impl Into<Value>,
) -> Result<(), FrameError> {
    let values = table
        .column_values_mut(name)
        .ok_or_else(|| FrameError::ColumnNotFound(name.to_owned()))?;
    let len = values.len();
    let cell = values
        .get_mut(index)
        .ok_or(FrameError::IndexOutOfBounds { index, len })?;
    *cell = value.into();
    Ok(())
}

pub fn edit_value<T: Table + ?Sized>(
    table: &T,
    name: &str,
    index: usize,
    value: impl Into<Value>,
) -> Result<DataTable, FrameError> {
    let mut edited = table.to_data_table()?;
    edit_value_in_place(&mut edited, name, index, value)?;
    Ok(edited)
}

/// Removes row `index` from every column.
pub fn drop_row_in_place(table: &mut DataTable, index: usize) -> Result<(), FrameError> {
    check_index(table, index)?;
    for column in table.columns_mut() {
        column.values.remove(index);
    }
    Ok(())
}

pub fn drop_row<T: Table + ?Sized>(table: &T, index: usize) -> Result<DataTable, FrameError> {
    let mut edited = table.to_data_table()?;
    drop_row_in_place(&mut edited, index)?;
    Ok(edited)
}

/// Removes column `name`.
pub fn drop_column_in_place(table: &mut DataTable, name: &str) -> Result<(), FrameError> {
    let position = table
        .get_column_index(name)
        .ok_or_else(|| FrameError::ColumnNotFound(name.to_owned()))?;
    table.columns_mut().remove(position);
    Ok(())
}

pub fn drop_column<T: Table + ?Sized>(table: &T, name: &str) -> Result<DataTable, FrameError> {
    let mut edited = table.to_data_table()?;
    drop_column_in_place(&mut edited, name)?;
    Ok(edited)
}

/// Removes entry `index` from optional row labels, keeping them aligned
/// with a table after [`drop_row`]. Absent labels stay absent.
///
/// # Example
///
/// ```
/// use colframe::edit::drop_label;
///
/// assert_eq!(drop_label(Some(&[1, 2, 3, 4, 5][..]), 1).unwrap(), Some(vec![1, 3, 4, 5]));
/// assert_eq!(drop_label::<i32>(None, 1).unwrap(), None);
/// ```
pub fn drop_label<L: Clone>(labels: Option<&[L]>, index: usize) -> Result<Option<Vec<L>>, FrameError> {
    let mut labels = labels.map(<[L]>::to_vec);
    drop_label_in_place(&mut labels, index)?;
    Ok(labels)
}

pub fn drop_label_in_place<L>(labels: &mut Option<Vec<L>>, index: usize) -> Result<(), FrameError> {
    if let Some(labels) = labels {
        let len = labels.len();
        if index >= len {
            return Err(FrameError::IndexOutOfBounds { index, len });
        }
        labels.remove(index);
    }
    Ok(())
}

/// Renames every column, pairing `names` with the columns in order.
///
/// # Errors
///
/// - [`FrameError::LengthMismatch`] unless there is one name per column
/// - [`FrameError::DuplicateColumn`] if a name repeats
pub fn replace_column_names_in_place(
    table: &mut DataTable,
    names: &[&str],
) -> Result<(), FrameError> {
    let expected = table.column_count();
    if names.len() != expected {
        return Err(FrameError::LengthMismatch {
            expected,
            actual: names.len(),
        });
    }
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Err(FrameError::DuplicateColumn((*name).to_owned()));
        }
    }

    for (column, name) in table.columns_mut().iter_mut().zip(names) {
        column.name = (*name).to_owned();
    }
    Ok(())
}

pub fn replace_column_names<T: Table + ?Sized>(
    table: &T,
    names: &[&str],
) -> Result<DataTable, FrameError> {
    let mut edited = table.to_data_table()?;
    replace_column_names_in_place(&mut edited, names)?;
    Ok(edited)
}

/// Combines column `name` with `operand` using `op`, element by element.
///
/// [`ColumnValues::One`] is applied to every value; [`ColumnValues::Many`]
/// pairs values positionally and must match the column's length.
pub fn operate_column_in_place<F>(
    table: &mut DataTable,
    name: &str,
    operand: impl Into<ColumnValues>,
    op: F,
) -> Result<(), FrameError>
where
    F: Fn(&Value, &Value) -> Result<Value, FrameError>,
{
    let current = table.require_column(name)?;
    let updated = match operand.into() {
        ColumnValues::One(operand) => current
            .iter()
            .map(|value| op(value, &operand))
            .collect::<Result<Vec<_>, _>>()?,
        ColumnValues::Many(operands) => {
            if operands.len() != current.len() {
                return Err(FrameError::LengthMismatch {
                    expected: current.len(),
                    actual: operands.len(),
                });
            }
            current
                .iter()
                .zip(&operands)
                .map(|(value, operand)| op(value, operand))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    table.set_column(name, updated);
    Ok(())
}

pub fn operate_column<T, F>(
    table: &T,
    name: &str,
    operand: impl Into<ColumnValues>,
    op: F,
) -> Result<DataTable, FrameError>
where
    T: Table + ?Sized,
    F: Fn(&Value, &Value) -> Result<Value, FrameError>,
{
    let mut edited = table.to_data_table()?;
    operate_column_in_place(&mut edited, name, operand, op)?;
    Ok(edited)
}

pub fn add_to_column_in_place(
    table: &mut DataTable,
    name: &str,
    operand: impl Into<ColumnValues>,
) -> Result<(), FrameError> {
    operate_column_in_place(table, name, operand, values_add)
}

/// Adds a scalar or per-row values to column `name`.
///
/// # Example
///
/// ```
/// use colframe::{Column, DataTable, Table, Value};
/// use colframe::edit::add_to_column;
///
/// let data = DataTable::new(vec![Column::new("x", [1, 2, 3])]).unwrap();
/// let added = add_to_column(&data, "x", 1).unwrap();
/// assert_eq!(added.column("x").unwrap(), &[Value::Int64(2), Value::Int64(3), Value::Int64(4)]);
/// ```
pub fn add_to_column<T: Table + ?Sized>(
    table: &T,
    name: &str,
    operand: impl Into<ColumnValues>,
) -> Result<DataTable, FrameError> {
    operate_column(table, name, operand, values_add)
}

pub fn subtract_from_column_in_place(
    table: &mut DataTable,
    name: &str,
    operand: impl Into<ColumnValues>,
) -> Result<(), FrameError> {
    operate_column_in_place(table, name, operand, values_subtract)
}

pub fn subtract_from_column<T: Table + ?Sized>(
    table: &T,
    name: &str,
    operand: impl Into<ColumnValues>,
) -> Result<DataTable, FrameError> {
    operate_column(table, name, operand, values_subtract)
}

pub fn multiply_column_in_place(
    table: &mut DataTable,
    name: &str,
    operand: impl Into<ColumnValues>,
) -> Result<(), FrameError> {
    operate_column_in_place(table, name, operand, values_multiply)
}

pub fn multiply_column<T: Table + ?Sized>(
    table: &T,
    name: &str,
    operand: impl Into<ColumnValues>,
) -> Result<DataTable, FrameError> {
    operate_column(table, name, operand, values_multiply)
}

pub fn divide_column_in_place(
    table: &mut DataTable,
    name: &str,
    operand: impl Into<ColumnValues>,
) -> Result<(), FrameError> {
    operate_column_in_place(table, name, operand, values_divide)
}

/// Divides column `name`; quotients are always floats.
pub fn divide_column<T: Table + ?Sized>(
    table: &T,
    name: &str,
    operand: impl Into<ColumnValues>,
) -> Result<DataTable, FrameError> {
    operate_column(table, name, operand, values_divide)
}
