use miette::Result;
use strum::{Display, EnumString};

use super::group::{row_value_tuples, uniques};
use crate::{FrameError, Row, Table, Value};

/// Order of the entries returned by [`value_counts`] and [`row_value_counts`].
///
/// Sorting is stable: entries with equal counts keep first-seen order.
///
/// ```
/// use colframe::CountOrder;
///
/// assert_eq!("desc".parse::<CountOrder>().unwrap(), CountOrder::Descending);
/// assert_eq!(CountOrder::FirstSeen.to_string(), "first_seen");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum CountOrder {
    /// Highest count first.
    #[default]
    #[strum(to_string = "descending", serialize = "desc")]
    Descending,
    #[strum(to_string = "ascending", serialize = "asc")]
    Ascending,
    /// Order in which each distinct item first appears.
    #[strum(to_string = "first_seen", serialize = "unsorted")]
    FirstSeen,
}

fn tally<T: PartialEq + Clone>(items: &[T], order: CountOrder) -> Vec<(T, usize)> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(seen, _)| seen == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item.clone(), 1)),
        }
    }

    match order {
        CountOrder::Descending => counts.sort_by(|(_, a), (_, b)| b.cmp(a)),
        CountOrder::Ascending => counts.sort_by_key(|(_, count)| *count),
        CountOrder::FirstSeen => {}
    }
    counts
}

/// Counts each distinct value.
///
/// Distinctness is value equality, so `Int64(1)` and `Float64(1.0)` are
/// counted together under whichever appeared first.
///
/// # Example
///
/// ```
/// use colframe::{CountOrder, Value, value_counts};
///
/// let values: Vec<Value> = [4, 1, 1, 4, 5, 1].into_iter().map(Value::from).collect();
/// assert_eq!(
///     value_counts(&values, CountOrder::Descending),
///     vec![(Value::Int64(1), 3), (Value::Int64(4), 2), (Value::Int64(5), 1)]
/// );
/// ```
pub fn value_counts(values: &[Value], order: CountOrder) -> Vec<(Value, usize)> {
    tally(values, order)
}

/// Counts each distinct row, a row being its values in column order.
pub fn row_value_counts<T>(table: &T, order: CountOrder) -> Result<Vec<(Vec<Value>, usize)>, FrameError>
where
    T: Table + ?Sized,
{
    let names = table.column_names();
    let rows = row_value_tuples(table, &names)?;
    Ok(tally(&rows, order))
}

/// Number of distinct values in each column.
pub fn nunique<T>(table: &T) -> Result<Row, FrameError>
where
    T: Table + ?Sized,
{
    let mut counts = Row::new();
    for name in table.column_names() {
        let distinct = uniques(table.require_column(name)?).len();
        counts.insert(name, Value::from(distinct));
    }
    Ok(counts)
}
