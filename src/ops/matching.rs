//! Index matching between two key sequences.
//!
//! Every strategy is a nested-loop scan built on [`locate`]. The order of
//! the produced records is part of the contract: the join assembler turns
//! record `k` into output row `k`.

use strum::{Display, EnumString};

use crate::{RowMask, Value};

/// How unmatched rows are treated when joining.
///
/// Parses case-insensitively; `"outer"` is accepted for [`JoinStrategy::Full`].
///
/// # Example
///
/// ```
/// use colframe::JoinStrategy;
///
/// assert_eq!("LEFT".parse::<JoinStrategy>().unwrap(), JoinStrategy::Left);
/// assert_eq!("outer".parse::<JoinStrategy>().unwrap(), JoinStrategy::Full);
/// assert_eq!(JoinStrategy::Full.to_string(), "full");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum JoinStrategy {
    /// Only matched pairs.
    Inner,

    /// Matched pairs plus unmatched left rows.
    Left,

    /// Matched pairs plus unmatched right rows, in right order.
    Right,

    /// Left join followed by the right rows that never matched.
    #[default]
    #[strum(to_string = "full", serialize = "outer")]
    Full,
}

/// Identifies one side of a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum JoinSide {
    Left,
    Right,
}

/// A correspondence between a left row and/or a right row sharing a key.
///
/// At least one of the indices is always present. `value` is the key value
/// of whichever side contributed the record.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub value: Value,
    pub left_index: Option<usize>,
    pub right_index: Option<usize>,
}

impl MatchRecord {
    pub fn matched(value: Value, left_index: usize, right_index: usize) -> Self {
        Self {
            value,
            left_index: Some(left_index),
            right_index: Some(right_index),
        }
    }

    pub fn left_only(value: Value, left_index: usize) -> Self {
        Self {
            value,
            left_index: Some(left_index),
            right_index: None,
        }
    }

    pub fn right_only(value: Value, right_index: usize) -> Self {
        Self {
            value,
            left_index: None,
            right_index: Some(right_index),
        }
    }
}

/// Returns the index of every item in `values` equal to `value`, ascending.
///
/// # Example
///
/// ```
/// use colframe::{Value, locate};
///
/// let values: Vec<Value> = [1, 2, 1, 2, 4, 5, 1].into_iter().map(Value::from).collect();
/// assert_eq!(locate(&values, &Value::Int64(1)), vec![0, 2, 6]);
/// ```
pub fn locate(values: &[Value], value: &Value) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, candidate)| *candidate == value)
        .map(|(index, _)| index)
        .collect()
}

/// Traverses `left`, emitting every matching right index per left row and,
/// when `keep_unmatched` is set, a left-only record for rows without one.
fn scan_left(left: &[Value], right: &[Value], keep_unmatched: bool) -> Vec<MatchRecord> {
    let mut records = Vec::new();

    for (left_index, value) in left.iter().enumerate() {
        let right_indices = locate(right, value);
        if right_indices.is_empty() {
            if keep_unmatched {
                records.push(MatchRecord::left_only(value.clone(), left_index));
            }
            continue;
        }

        records.extend(
            right_indices
                .into_iter()
                .map(|right_index| MatchRecord::matched(value.clone(), left_index, right_index)),
        );
    }

    records
}

/// Pairs every left row with every equal right row.
///
/// Records are ordered by left index, then right index.
///
/// # Example
///
/// ```
/// use colframe::{MatchRecord, Value, inner_matches};
///
/// let left: Vec<Value> = ["a", "c", "d", "f", "a"].into_iter().map(Value::from).collect();
/// let right: Vec<Value> = ["a", "b", "c", "d", "c"].into_iter().map(Value::from).collect();
///
/// assert_eq!(
///     inner_matches(&left, &right),
///     vec![
///         MatchRecord::matched("a".into(), 0, 0),
///         MatchRecord::matched("c".into(), 1, 2),
///         MatchRecord::matched("c".into(), 1, 4),
///         MatchRecord::matched("d".into(), 2, 3),
///         MatchRecord::matched("a".into(), 4, 0),
///     ]
/// );
/// ```
pub fn inner_matches(left: &[Value], right: &[Value]) -> Vec<MatchRecord> {
    scan_left(left, right, false)
}

/// Like [`inner_matches`], plus one left-only record for each unmatched left
/// row, emitted where that row is reached in left order.
pub fn left_matches(left: &[Value], right: &[Value]) -> Vec<MatchRecord> {
    scan_left(left, right, true)
}

/// Traverses `right`: every matching left index per right row, or a
/// right-only record for a right row without a match.
pub fn right_matches(left: &[Value], right: &[Value]) -> Vec<MatchRecord> {
    let mut records = Vec::new();

    for (right_index, value) in right.iter().enumerate() {
        let left_indices = locate(left, value);
        if left_indices.is_empty() {
            records.push(MatchRecord::right_only(value.clone(), right_index));
            continue;
        }

        records.extend(
            left_indices
                .into_iter()
                .map(|left_index| MatchRecord::matched(value.clone(), left_index, right_index)),
        );
    }

    records
}

/// The [`left_matches`] records followed by a right-only record for each
/// right row that never matched any left row, in right order.
pub fn full_matches(left: &[Value], right: &[Value]) -> Vec<MatchRecord> {
    let mut records = left_matches(left, right);

    let mut matched_right = RowMask::new(right.len());
    for index in records.iter().filter_map(|record| record.right_index) {
        matched_right.set(index);
    }

    records.extend(
        right
            .iter()
            .enumerate()
            .filter(|(index, _)| !matched_right.is_set(*index))
            .map(|(index, value)| MatchRecord::right_only(value.clone(), index)),
    );

    records
}

/// Dispatches to the matcher for `strategy`.
pub fn matches(strategy: JoinStrategy, left: &[Value], right: &[Value]) -> Vec<MatchRecord> {
    match strategy {
        JoinStrategy::Inner => inner_matches(left, right),
        JoinStrategy::Left => left_matches(left, right),
        JoinStrategy::Right => right_matches(left, right),
        JoinStrategy::Full => full_matches(left, right),
    }
}
