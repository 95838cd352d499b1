//! Missing-value detection, filling and dropping.
//!
//! A cell is missing when it equals the `na_value` in effect, which is
//! [`Value::Null`](crate::Value::Null) unless the caller passes another one.

use strum::{Display, EnumString};

pub mod dropna;
pub mod fill;
pub mod isna;

pub use dropna::{DropHow, DropOptions, dropna, dropna_in_place};
pub use fill::{FillMethod, FillOptions, FillValue, fillna, fillna_in_place};
pub use isna::{
    column_isna, column_notna, isna, isna_in_place, notna, notna_in_place, row_isna, row_notna,
};

/// The direction an operation walks a table.
///
/// # Example
///
/// ```
/// use colframe::na::Axis;
///
/// assert_eq!("index".parse::<Axis>().unwrap(), Axis::Rows);
/// assert_eq!("1".parse::<Axis>().unwrap(), Axis::Columns);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum Axis {
    #[strum(to_string = "rows", serialize = "row", serialize = "index", serialize = "0")]
    Rows,

    #[strum(to_string = "columns", serialize = "column", serialize = "1")]
    Columns,
}
