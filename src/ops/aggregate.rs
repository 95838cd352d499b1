//! Reduction of tables and groups to one row each.
//!
//! A reducer that is not defined for a column's values reports
//! [`FrameError::IncompatibleAggregation`]; the aggregator leaves that column
//! out of the row and records its name instead of failing.

use std::fmt;

use miette::Result;

use super::group::{Group, GroupColumns};
use crate::types::arith::values_add;
use crate::{DataTable, FrameError, Row, Table, Value};

/// One aggregated row plus the columns the reducer could not handle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregate {
    pub row: Row,
    pub skipped: Vec<String>,
}

/// Identifies the group an aggregated row belongs to.
///
/// Behaves like a named record: `name` is the record's type name and
/// `fields` pairs each grouping column with the group's key value.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupLabel {
    name: String,
    fields: Vec<(String, Value)>,
}

impl GroupLabel {
    pub fn new(name: impl Into<String>, fields: Vec<(String, Value)>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    /// Returns the key value of one grouping column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, value)| value)
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, (column, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{column}={value}")?;
        }
        write!(f, ")")
    }
}

/// The result of aggregating groups.
///
/// `labels`, the rows of `table` and `skipped` line up: entry `i` of each
/// describes the same surviving group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupedAggregate {
    pub labels: Vec<GroupLabel>,
    pub table: DataTable,
    pub skipped: Vec<Vec<String>>,
}

/// Applies `func` to every column of `table`, in column order.
///
/// Columns for which `func` returns [`FrameError::IncompatibleAggregation`]
/// are left out of the row and listed in [`Aggregate::skipped`].
///
/// # Errors
///
/// Any other error returned by `func` is propagated.
///
/// # Example
///
/// ```
/// use colframe::{Column, DataTable, Value, aggregate_data, sum_values};
///
/// let data = DataTable::new(vec![
///     Column::new("x", [1, 2, 3]),
///     Column::new("name", ["a", "b", "c"]),
/// ])
/// .unwrap();
///
/// let aggregate = aggregate_data(&data, sum_values).unwrap();
/// assert_eq!(aggregate.row.get("x"), Some(&Value::Int64(6)));
/// assert_eq!(aggregate.skipped, vec!["name".to_string()]);
/// ```
pub fn aggregate_data<T, F>(table: &T, func: F) -> Result<Aggregate, FrameError>
where
    T: Table + ?Sized,
    F: Fn(&[Value]) -> Result<Value, FrameError>,
{
    let mut aggregate = Aggregate::default();

    for name in table.column_names() {
        let values = table.require_column(name)?;
        match func(values) {
            Ok(value) => aggregate.row.insert(name, value),
            Err(FrameError::IncompatibleAggregation { reason }) => {
                log::debug!("skipping column {name}: {reason}");
                aggregate.skipped.push(name.to_owned());
            }
            Err(err) => return Err(err),
        }
    }

    Ok(aggregate)
}

/// Reduces every group to one row and labels it with its key.
///
/// Groups whose row ends up empty (no column survived `func`) are dropped.
/// The surviving rows are combined into one table; a column missing from
/// some row is filled with [`Value::Null`] there.
///
/// # Errors
///
/// Propagates errors from [`aggregate_data`].
pub fn aggregate_groups<F>(
    groups: &[Group],
    by: impl Into<GroupColumns>,
    func: F,
    label_name: &str,
) -> Result<GroupedAggregate, FrameError>
where
    F: Fn(&[Value]) -> Result<Value, FrameError>,
{
    let by = by.into();
    let names = by.names();

    let mut labels = Vec::new();
    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for (key, table) in groups {
        let aggregate = aggregate_data(table, &func)?;
        if aggregate.row.is_empty() {
            log::debug!("dropping group {key}: no column could be aggregated");
            continue;
        }

        let fields = names
            .iter()
            .zip(key.values())
            .map(|(name, value)| ((*name).to_owned(), value.clone()))
            .collect();
        labels.push(GroupLabel::new(label_name, fields));
        rows.push(aggregate.row);
        skipped.push(aggregate.skipped);
    }

    Ok(GroupedAggregate {
        labels,
        table: DataTable::from_rows(&rows, &Value::Null),
        skipped,
    })
}

/// Adds up numeric values.
///
/// An empty slice sums to `Int64(0)`. Booleans count as `0`/`1`; the sum is
/// an integer unless a float is present.
///
/// # Errors
///
/// [`FrameError::IncompatibleAggregation`] for text or null values, or when
/// an integer sum overflows.
pub fn sum_values(values: &[Value]) -> Result<Value, FrameError> {
    values.iter().try_fold(Value::Int64(0), |total, value| {
        let addend = match value {
            Value::Bool(b) => Value::Int64(i64::from(*b)),
            Value::Int64(_) | Value::Float64(_) => value.clone(),
            other => {
                return Err(FrameError::incompatible(format!(
                    "cannot sum {} values",
                    other.type_name()
                )));
            }
        };
        values_add(&total, &addend).map_err(|err| FrameError::incompatible(err.to_string()))
    })
}

/// Counts values. Defined for every column.
pub fn count_values(values: &[Value]) -> Result<Value, FrameError> {
    Ok(Value::from(values.len()))
}

pub fn sum_data<T: Table + ?Sized>(table: &T) -> Result<Aggregate, FrameError> {
    aggregate_data(table, sum_values)
}

pub fn count_data<T: Table + ?Sized>(table: &T) -> Result<Aggregate, FrameError> {
    aggregate_data(table, count_values)
}

/// Sums every group; labels are named `Sums`.
///
/// # Example
///
/// ```
/// use colframe::{Column, DataTable, Value, groupby, sum_groups};
///
/// let data = DataTable::new(vec![
///     Column::new("x", [1, 2, 2]),
///     Column::new("y", [6, 7, 8]),
/// ])
/// .unwrap();
///
/// let sums = sum_groups(&groupby(&data, "x").unwrap(), "x").unwrap();
/// assert_eq!(sums.labels[1].to_string(), "Sums(x=2)");
/// assert_eq!(sums.table.value("y", 1).unwrap(), &Value::Int64(15));
/// ```
pub fn sum_groups(
    groups: &[Group],
    by: impl Into<GroupColumns>,
) -> Result<GroupedAggregate, FrameError> {
    aggregate_groups(groups, by, sum_values, "Sums")
}

/// Counts the rows of every group; labels are named `Counts`.
pub fn count_groups(
    groups: &[Group],
    by: impl Into<GroupColumns>,
) -> Result<GroupedAggregate, FrameError> {
    aggregate_groups(groups, by, count_values, "Counts")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::{Column, GroupKey, groupby};

    fn table(columns: Vec<Column>) -> DataTable {
        DataTable::new(columns).unwrap()
    }

    fn people() -> DataTable {
        table(vec![
            Column::new("team", ["red", "blue", "red", "blue"]),
            Column::new("name", ["ann", "bob", "cid", "dee"]),
            Column::new("points", [3, 5, 4, 1]),
        ])
    }

    #[test]
    fn test_sum_values() {
        assert_eq!(sum_values(&[]), Ok(Value::Int64(0)));
        assert_eq!(
            sum_values(&[Value::Int64(1), Value::Int64(2)]),
            Ok(Value::Int64(3))
        );
        assert_eq!(
            sum_values(&[Value::Int64(1), Value::Float64(0.5)]),
            Ok(Value::Float64(1.5))
        );
        assert_eq!(
            sum_values(&[Value::Bool(true), Value::Bool(true), Value::Int64(1)]),
            Ok(Value::Int64(3))
        );
    }

    #[test]
    fn test_sum_values_incompatible() {
        assert!(matches!(
            sum_values(&[Value::Int64(1), Value::from("a")]),
            Err(FrameError::IncompatibleAggregation { .. })
        ));
        assert!(matches!(
            sum_values(&[Value::Null]),
            Err(FrameError::IncompatibleAggregation { .. })
        ));
        assert!(matches!(
            sum_values(&[Value::Int64(i64::MAX), Value::Int64(1)]),
            Err(FrameError::IncompatibleAggregation { .. })
        ));
    }

    #[test]
    fn test_count_values() {
        assert_eq!(count_values(&[]), Ok(Value::Int64(0)));
        assert_eq!(
            count_values(&[Value::Null, Value::from("a")]),
            Ok(Value::Int64(2))
        );
    }

    #[test]
    fn test_aggregate_data_skips_text_columns() {
        let aggregate = sum_data(&people()).unwrap();

        let expected: Row = [("points", 13)].into_iter().collect();
        assert_eq!(aggregate.row, expected);
        assert_eq!(aggregate.skipped, vec!["team".to_string(), "name".to_string()]);
    }

    #[test]
    fn test_aggregate_data_propagates_other_errors() {
        let result = aggregate_data(&people(), |_| Err(FrameError::DivisionByZero));
        assert_eq!(result, Err(FrameError::DivisionByZero));
    }

    #[test]
    fn test_count_data() {
        let aggregate = count_data(&people()).unwrap();
        let expected: Row = [("team", 4), ("name", 4), ("points", 4)].into_iter().collect();

        assert_eq!(aggregate.row, expected);
        assert!(aggregate.skipped.is_empty());
    }

    #[test]
    fn test_sum_groups() {
        let data = people();
        let groups = groupby(&data, "team").unwrap();
        let sums = sum_groups(&groups, "team").unwrap();

        assert_eq!(
            sums.labels,
            vec![
                GroupLabel::new("Sums", vec![("team".to_string(), "red".into())]),
                GroupLabel::new("Sums", vec![("team".to_string(), "blue".into())]),
            ]
        );
        assert_eq!(sums.table, table(vec![Column::new("points", [7, 6])]));
        assert_eq!(
            sums.skipped,
            vec![
                vec!["team".to_string(), "name".to_string()],
                vec!["team".to_string(), "name".to_string()],
            ]
        );
    }

    #[test]
    fn test_count_groups_multi_key() {
        let data = table(vec![
            Column::new("a", [1, 1, 2]),
            Column::new("b", ["p", "p", "q"]),
            Column::new("v", [0, 0, 0]),
        ]);
        let groups = groupby(&data, ["a", "b"]).unwrap();
        let counts = count_groups(&groups, ["a", "b"]).unwrap();

        assert_eq!(counts.labels.len(), 2);
        assert_eq!(counts.labels[0].name(), "Counts");
        assert_eq!(counts.labels[0].get("b"), Some(&Value::from("p")));
        assert_eq!(counts.labels[1].to_string(), "Counts(a=2, b=q)");
        assert_eq!(counts.table.column("v").unwrap(), &[Value::Int64(2), Value::Int64(1)]);
    }

    #[test]
    fn test_groups_without_surviving_columns_are_dropped() {
        let groups = vec![
            (
                GroupKey::Single("t".into()),
                table(vec![Column::new("s", ["only", "text"])]),
            ),
            (
                GroupKey::Single("n".into()),
                table(vec![Column::new("s", [1, 2])]),
            ),
        ];
        let sums = sum_groups(&groups, "s").unwrap();

        assert_eq!(sums.labels.len(), 1);
        assert_eq!(sums.labels[0].get("s"), Some(&Value::from("n")));
        assert_eq!(sums.table, table(vec![Column::new("s", [3])]));
    }

    #[test]
    fn test_heterogeneous_rows_fill_with_null() {
        // "v" holds text in the first group only, so it is summed in the second.
        let groups = vec![
            (
                GroupKey::Single(1.into()),
                table(vec![Column::new("n", [1, 2]), Column::new("v", ["a", "b"])]),
            ),
            (
                GroupKey::Single(2.into()),
                table(vec![Column::new("n", [3]), Column::new("v", [10])]),
            ),
        ];
        let sums = sum_groups(&groups, "k").unwrap();

        assert_eq!(
            sums.table,
            table(vec![
                Column::new("n", [3, 3]),
                Column::new("v", [None, Some(10)]),
            ])
        );
        assert_eq!(sums.skipped, vec![vec!["v".to_string()], vec![]]);
    }
}
