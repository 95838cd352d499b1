use miette::Result;

use super::matching::{JoinSide, JoinStrategy, matches};
use crate::{Column, DataTable, FrameError, Table, Value};

/// Gathers `values` at each index, using [`Value::Null`] where the index is
/// absent.
///
/// # Errors
///
/// Returns [`FrameError::ShapeMismatch`] if an index lies past the end of
/// `values`, which means the source table's columns disagree in length.
pub(crate) fn gather_values(
    column: &str,
    values: &[Value],
    indices: &[Option<usize>],
    expected: usize,
) -> Result<Vec<Value>, FrameError> {
    indices
        .iter()
        .map(|index| match index {
            None => Ok(Value::Null),
            Some(index) => values
                .get(*index)
                .cloned()
                .ok_or_else(|| FrameError::ShapeMismatch {
                    column: column.to_owned(),
                    expected,
                    actual: values.len(),
                }),
        })
        .collect()
}

/// Joins two tables on a key column using `strategy`.
///
/// `right_on` defaults to `left_on`. The output holds every left column in
/// its original order followed by the right columns other than the key
/// columns; the key column takes the matched key of each record so outer
/// rows keep their key. When `right_on` differs from `left_on` it is emitted
/// too, holding the same keys. A right column whose name is already used by
/// a left column overwrites it in place.
///
/// With `select`, the result is projected onto exactly those columns.
///
/// # Errors
///
/// - [`FrameError::MissingJoinColumn`] if a key column is missing
/// - [`FrameError::ColumnNotFound`] if a selected column is not in the result
/// - [`FrameError::DuplicateColumn`] if `select` names a column twice
/// - [`FrameError::ShapeMismatch`] if a source table has ragged columns
///
/// # Example
///
/// ```
/// use colframe::{Column, DataTable, JoinStrategy, join};
///
/// let left = DataTable::new(vec![
///     Column::new("id", ["a", "c", "d", "f", "g"]),
///     Column::new("x", [33, 44, 55, 66, 77]),
/// ])
/// .unwrap();
/// let right = DataTable::new(vec![
///     Column::new("id", ["a", "b", "c", "d"]),
///     Column::new("y", [11, 22, 33, 44]),
/// ])
/// .unwrap();
///
/// let joined = join(&left, &right, "id", None, None, JoinStrategy::Inner).unwrap();
/// let expected = DataTable::new(vec![
///     Column::new("id", ["a", "c", "d"]),
///     Column::new("x", [33, 44, 55]),
///     Column::new("y", [11, 33, 44]),
/// ])
/// .unwrap();
/// assert_eq!(joined, expected);
/// ```
pub fn join<L, R>(
    left: &L,
    right: &R,
    left_on: &str,
    right_on: Option<&str>,
    select: Option<&[&str]>,
    strategy: JoinStrategy,
) -> Result<DataTable, FrameError>
where
    L: Table + ?Sized,
    R: Table + ?Sized,
{
    let right_on = right_on.unwrap_or(left_on);

    let left_keys = left
        .column(left_on)
        .ok_or_else(|| FrameError::MissingJoinColumn {
            column: left_on.to_owned(),
            side: JoinSide::Left,
        })?;
    let right_keys = right
        .column(right_on)
        .ok_or_else(|| FrameError::MissingJoinColumn {
            column: right_on.to_owned(),
            side: JoinSide::Right,
        })?;

    let records = matches(strategy, left_keys, right_keys);
    log::trace!(
        "{strategy} join on {left_on}/{right_on} produced {} records",
        records.len()
    );

    let keys: Vec<Value> = records.iter().map(|record| record.value.clone()).collect();
    let left_indices: Vec<Option<usize>> = records.iter().map(|record| record.left_index).collect();
    let right_indices: Vec<Option<usize>> =
        records.iter().map(|record| record.right_index).collect();

    let mut joined = DataTable::empty();

    let left_rows = left.row_count();
    for name in left.column_names() {
        let values = gather_values(name, left.require_column(name)?, &left_indices, left_rows)?;
        joined.set_column(name, values);
    }

    let right_rows = right.row_count();
    for name in right.column_names() {
        if name == left_on || name == right_on {
            continue;
        }
        if joined.contains_column(name) {
            log::warn!("right column {name} overwrites the left column of the same name");
        }
        let values = gather_values(name, right.require_column(name)?, &right_indices, right_rows)?;
        joined.set_column(name, values);
    }

    if right_on != left_on {
        joined.set_column(right_on, keys.clone());
    }
    joined.set_column(left_on, keys);

    let joined = DataTable::new(joined.into_columns())?;

    match select {
        Some(names) if !names.is_empty() => joined.select(names),
        _ => Ok(joined),
    }
}

/// Keeps only rows whose key appears on both sides.
pub fn inner_join<L, R>(
    left: &L,
    right: &R,
    left_on: &str,
    right_on: Option<&str>,
    select: Option<&[&str]>,
) -> Result<DataTable, FrameError>
where
    L: Table + ?Sized,
    R: Table + ?Sized,
{
    join(left, right, left_on, right_on, select, JoinStrategy::Inner)
}

/// Keeps every left row; right columns are null where nothing matched.
pub fn left_join<L, R>(
    left: &L,
    right: &R,
    left_on: &str,
    right_on: Option<&str>,
    select: Option<&[&str]>,
) -> Result<DataTable, FrameError>
where
    L: Table + ?Sized,
    R: Table + ?Sized,
{
    join(left, right, left_on, right_on, select, JoinStrategy::Left)
}

/// Keeps every right row, in right order.
pub fn right_join<L, R>(
    left: &L,
    right: &R,
    left_on: &str,
    right_on: Option<&str>,
    select: Option<&[&str]>,
) -> Result<DataTable, FrameError>
where
    L: Table + ?Sized,
    R: Table + ?Sized,
{
    join(left, right, left_on, right_on, select, JoinStrategy::Right)
}

/// Keeps every row of both tables. Right rows without a match come last.
pub fn full_join<L, R>(
    left: &L,
    right: &R,
    left_on: &str,
    right_on: Option<&str>,
    select: Option<&[&str]>,
) -> Result<DataTable, FrameError>
where
    L: Table + ?Sized,
    R: Table + ?Sized,
{
    join(left, right, left_on, right_on, select, JoinStrategy::Full)
}
