//! In-memory column-oriented tables.
//!
//! A table is an ordered set of uniquely named, equal-length columns of
//! [`Value`]s. On top of that model the crate provides relational joins
//! (inner, left, right and full, with duplicate keys multiplying out),
//! groupby with lenient per-column aggregation, editing in both functional
//! and in-place forms ([`edit`]), and missing-value handling ([`na`]).
//!
//! Row and column order are significant everywhere: joins and groups follow
//! input order, never sorted order.
//!
//! ```
//! use colframe::{Column, DataTable, JoinStrategy, Table, join};
//!
//! let left = DataTable::new(vec![
//!     Column::new("id", ["a", "c"]),
//!     Column::new("x", [1, 2]),
//! ])
//! .unwrap();
//! let right = DataTable::new(vec![
//!     Column::new("id", ["c", "b"]),
//!     Column::new("y", [3, 4]),
//! ])
//! .unwrap();
//!
//! let joined = join(&left, &right, "id", None, None, JoinStrategy::Full).unwrap();
//! assert_eq!(joined.shape(), (3, 3));
//! ```

pub(crate) mod common;
pub(crate) mod frame;
pub(crate) mod ops;
pub(crate) mod types;

pub mod edit;
pub mod na;

pub use common::error::FrameError;
pub use frame::{Table, column::Column, data_table::DataTable, mask::RowMask, row::Row};
pub use ops::{
    aggregate::{
        Aggregate, GroupLabel, GroupedAggregate, aggregate_data, aggregate_groups, count_data,
        count_groups, count_values, sum_data, sum_groups, sum_values,
    },
    counts::{CountOrder, nunique, row_value_counts, value_counts},
    group::{
        Group, GroupColumns, GroupKey, groupby, groupby_column, groupby_multi, groupby_one,
        row_value_tuples, uniques,
    },
    join::{full_join, inner_join, join, left_join, right_join},
    matching::{
        JoinSide, JoinStrategy, MatchRecord, full_matches, inner_matches, left_matches, locate,
        matches, right_matches,
    },
};
pub use types::{
    arith::{values_add, values_divide, values_multiply, values_subtract},
    value::{DataType, Value},
};
