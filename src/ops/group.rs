use std::fmt;

use miette::Result;

use crate::{DataTable, FrameError, RowMask, Table, Value};

/// The key a group was formed on.
///
/// Grouping by one column yields [`GroupKey::Single`]; grouping by several
/// yields [`GroupKey::Multi`] with one value per grouping column, in the
/// order the columns were given.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupKey {
    Single(Value),
    Multi(Vec<Value>),
}

impl GroupKey {
    /// The key values, one per grouping column.
    pub fn values(&self) -> &[Value] {
        match self {
            GroupKey::Single(value) => std::slice::from_ref(value),
            GroupKey::Multi(values) => values,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Single(value) => write!(f, "{value}"),
            GroupKey::Multi(values) => {
                write!(f, "(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// The column(s) to group by.
///
/// Converts from a single name or from a sequence of names:
///
/// ```
/// use colframe::GroupColumns;
///
/// assert_eq!(GroupColumns::from("x"), GroupColumns::One("x".to_string()));
/// assert_eq!(
///     GroupColumns::from(["x", "y"]),
///     GroupColumns::Many(vec!["x".to_string(), "y".to_string()])
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupColumns {
    One(String),
    Many(Vec<String>),
}

impl GroupColumns {
    pub fn names(&self) -> Vec<&str> {
        match self {
            GroupColumns::One(name) => vec![name.as_str()],
            GroupColumns::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for GroupColumns {
    fn from(name: &str) -> Self {
        GroupColumns::One(name.to_owned())
    }
}

impl From<String> for GroupColumns {
    fn from(name: String) -> Self {
        GroupColumns::One(name)
    }
}

impl From<&[&str]> for GroupColumns {
    fn from(names: &[&str]) -> Self {
        GroupColumns::Many(names.iter().map(|name| (*name).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for GroupColumns {
    fn from(names: [&str; N]) -> Self {
        GroupColumns::from(&names[..])
    }
}

impl From<Vec<&str>> for GroupColumns {
    fn from(names: Vec<&str>) -> Self {
        GroupColumns::from(names.as_slice())
    }
}

impl From<Vec<String>> for GroupColumns {
    fn from(names: Vec<String>) -> Self {
        GroupColumns::Many(names)
    }
}

impl From<&GroupColumns> for GroupColumns {
    fn from(columns: &GroupColumns) -> Self {
        columns.clone()
    }
}

/// A group key and the rows that share it.
pub type Group = (GroupKey, DataTable);

/// Returns the distinct items of `values` in first-seen order.
///
/// Uses equality only, so it works for values that cannot be hashed.
///
/// # Example
///
/// ```
/// use colframe::uniques;
///
/// assert_eq!(uniques(&[1, 1, 2, 4, 5, 2, 0, 6, 1]), vec![1, 2, 4, 5, 0, 6]);
/// ```
pub fn uniques<T: PartialEq + Clone>(values: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for value in values {
        if !out.contains(value) {
            out.push(value.clone());
        }
    }
    out
}

/// Returns, per row, the values of the named columns in the given order.
pub fn row_value_tuples<T>(table: &T, names: &[&str]) -> Result<Vec<Vec<Value>>, FrameError>
where
    T: Table + ?Sized,
{
    let columns = names
        .iter()
        .map(|name| table.require_column(name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(table
        .index()
        .map(|index| {
            columns
                .iter()
                .map(|values| values.get(index).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect())
}

/// Partitions `table` by a precomputed key per row.
///
/// One group per distinct key in first-seen order; each sub-table holds
/// exactly the rows with that key, in their original relative order.
/// Every row belongs to exactly one group. A key that equals nothing, such
/// as a `NaN` float, forms a single-row group of its own.
pub fn groupby_column<T>(table: &T, keys: &[GroupKey]) -> Result<Vec<Group>, FrameError>
where
    T: Table + ?Sized,
{
    let row_count = table.row_count();
    if keys.len() != row_count {
        return Err(FrameError::LengthMismatch {
            expected: row_count,
            actual: keys.len(),
        });
    }

    // Each row joins the first group whose key it equals, so a row lands in
    // exactly one group even for keys equal to nothing (NaN).
    let mut group_keys: Vec<&GroupKey> = Vec::new();
    let assigned: Vec<usize> = keys
        .iter()
        .map(|key| match group_keys.iter().position(|seen| *seen == key) {
            Some(group) => group,
            None => {
                group_keys.push(key);
                group_keys.len() - 1
            }
        })
        .collect();

    group_keys
        .into_iter()
        .enumerate()
        .map(|(group, key)| {
            let mask = RowMask::from_fn(row_count, |index| assigned[index] == group);
            Ok((key.clone(), table.filter_rows(&mask)?))
        })
        .collect()
}

/// Groups rows by the values of one column.
pub fn groupby_one<T>(table: &T, name: &str) -> Result<Vec<Group>, FrameError>
where
    T: Table + ?Sized,
{
    let keys: Vec<GroupKey> = table
        .require_column(name)?
        .iter()
        .cloned()
        .map(GroupKey::Single)
        .collect();
    groupby_column(table, &keys)
}

/// Groups rows by the combined values of several columns.
pub fn groupby_multi<T>(table: &T, names: &[&str]) -> Result<Vec<Group>, FrameError>
where
    T: Table + ?Sized,
{
    let keys: Vec<GroupKey> = row_value_tuples(table, names)?
        .into_iter()
        .map(GroupKey::Multi)
        .collect();
    groupby_column(table, &keys)
}

/// Groups rows by one column or by a sequence of columns.
///
/// # Example
///
/// ```
/// use colframe::{Column, DataTable, GroupKey, Value, groupby};
///
/// let data = DataTable::new(vec![
///     Column::new("x", [1, 2, 2]),
///     Column::new("y", [6, 7, 8]),
/// ])
/// .unwrap();
///
/// let groups = groupby(&data, "x").unwrap();
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].0, GroupKey::Single(Value::Int64(1)));
/// assert_eq!(groups[1].1, DataTable::new(vec![
///     Column::new("x", [2, 2]),
///     Column::new("y", [7, 8]),
/// ]).unwrap());
/// ```
pub fn groupby<T>(table: &T, by: impl Into<GroupColumns>) -> Result<Vec<Group>, FrameError>
where
    T: Table + ?Sized,
{
    match by.into() {
        GroupColumns::One(name) => groupby_one(table, &name),
        GroupColumns::Many(names) => {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            groupby_multi(table, &names)
        }
    }
}
