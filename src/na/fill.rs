use miette::Result;
use strum::{Display, EnumString};

use super::Axis;
use crate::{DataTable, FrameError, Row, Table, Value};

/// How gaps are filled from neighbouring values.
///
/// # Example
///
/// ```
/// use colframe::na::FillMethod;
///
/// assert_eq!("pad".parse::<FillMethod>().unwrap(), FillMethod::Forward);
/// assert_eq!("BFILL".parse::<FillMethod>().unwrap(), FillMethod::Backward);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum FillMethod {
    /// Propagate the last present value forward.
    #[strum(to_string = "ffill", serialize = "pad")]
    Forward,

    /// Use the next present value to fill the gap.
    #[strum(to_string = "bfill", serialize = "backfill")]
    Backward,
}

/// The replacement for missing values.
#[derive(Debug, Clone, PartialEq)]
pub enum FillValue {
    /// One value for every missing cell.
    Scalar(Value),

    /// A value per column name. Columns not named are left alone.
    PerColumn(Row),
}

impl FillValue {
    fn for_column(&self, name: &str) -> Option<&Value> {
        match self {
            FillValue::Scalar(value) => Some(value),
            FillValue::PerColumn(row) => row.get(name),
        }
    }
}

impl From<Value> for FillValue {
    fn from(value: Value) -> Self {
        FillValue::Scalar(value)
    }
}

impl From<i64> for FillValue {
    fn from(value: i64) -> Self {
        FillValue::Scalar(value.into())
    }
}

impl From<i32> for FillValue {
    fn from(value: i32) -> Self {
        FillValue::Scalar(value.into())
    }
}

impl From<f64> for FillValue {
    fn from(value: f64) -> Self {
        FillValue::Scalar(value.into())
    }
}

impl From<bool> for FillValue {
    fn from(value: bool) -> Self {
        FillValue::Scalar(value.into())
    }
}

impl From<&str> for FillValue {
    fn from(value: &str) -> Self {
        FillValue::Scalar(value.into())
    }
}

impl From<String> for FillValue {
    fn from(value: String) -> Self {
        FillValue::Scalar(value.into())
    }
}

impl From<Row> for FillValue {
    fn from(row: Row) -> Self {
        FillValue::PerColumn(row)
    }
}

/// Options for [`fillna`].
///
/// Exactly one of `value` and `method` must be set. By default gaps are
/// filled down each column without limit and `Null` is the missing value.
///
/// # Example
///
/// ```
/// use colframe::na::{Axis, FillMethod, FillOptions};
///
/// let options = FillOptions::method(FillMethod::Forward).axis(Axis::Rows).limit(1);
/// assert_eq!(options.limit, Some(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FillOptions {
    pub value: Option<FillValue>,
    pub method: Option<FillMethod>,
    pub axis: Axis,
    /// Maximum number of cells filled per column (or per row along
    /// [`Axis::Rows`]).
    pub limit: Option<usize>,
    pub na_value: Value,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            value: None,
            method: None,
            axis: Axis::Columns,
            limit: None,
            na_value: Value::Null,
        }
    }
}

impl FillOptions {
    /// Fill with a fixed value, or a value per column.
    pub fn value(value: impl Into<FillValue>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Fill from neighbouring values.
    pub fn method(method: FillMethod) -> Self {
        Self {
            method: Some(method),
            ..Self::default()
        }
    }

    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn na_value(mut self, na_value: impl Into<Value>) -> Self {
        self.na_value = na_value.into();
        self
    }
}

enum Fill<'a> {
    Value(&'a FillValue),
    Method(FillMethod),
}

impl<'a> Fill<'a> {
    fn from_options(options: &'a FillOptions) -> Result<Self, FrameError> {
        match (&options.value, options.method) {
            (Some(value), None) => Ok(Fill::Value(value)),
            (None, Some(method)) => Ok(Fill::Method(method)),
            (Some(_), Some(_)) => Err(FrameError::InvalidArgument(
                "cannot specify both a fill value and a fill method".to_string(),
            )),
            (None, None) => Err(FrameError::InvalidArgument(
                "must specify a fill value or a fill method".to_string(),
            )),
        }
    }
}

fn limit_reached(filled: usize, limit: Option<usize>) -> bool {
    limit.is_some_and(|limit| filled >= limit)
}

/// Fills missing values in `values`; `names[i]` is the column of `values[i]`.
fn fill_sequence(
    values: &mut [Value],
    names: &[&str],
    fill: &Fill<'_>,
    options: &FillOptions,
) -> usize {
    let na_value = &options.na_value;
    let mut filled = 0;

    match fill {
        Fill::Value(fill_value) => {
            for (value, name) in values.iter_mut().zip(names) {
                if limit_reached(filled, options.limit) {
                    break;
                }
                if *value != *na_value {
                    continue;
                }
                if let Some(replacement) = fill_value.for_column(name) {
                    *value = replacement.clone();
                    filled += 1;
                }
            }
        }
        Fill::Method(FillMethod::Forward) => {
            for i in 1..values.len() {
                if limit_reached(filled, options.limit) {
                    break;
                }
                if values[i] == *na_value && values[i - 1] != *na_value {
                    values[i] = values[i - 1].clone();
                    filled += 1;
                }
            }
        }
        Fill::Method(FillMethod::Backward) => {
            for i in (0..values.len().saturating_sub(1)).rev() {
                if limit_reached(filled, options.limit) {
                    break;
                }
                if values[i] == *na_value && values[i + 1] != *na_value {
                    values[i] = values[i + 1].clone();
                    filled += 1;
                }
            }
        }
    }

    filled
}

/// Fills missing values of `table` in place.
///
/// # Errors
///
/// [`FrameError::InvalidArgument`] unless exactly one of
/// [`FillOptions::value`] and [`FillOptions::method`] is set.
pub fn fillna_in_place(table: &mut DataTable, options: &FillOptions) -> Result<(), FrameError> {
    let fill = Fill::from_options(options)?;

    let filled: usize = match options.axis {
        Axis::Columns => table
            .columns_mut()
            .iter_mut()
            .map(|column| {
                let names = vec![column.name.as_str(); column.values.len()];
                fill_sequence(&mut column.values, &names, &fill, options)
            })
            .sum(),
        Axis::Rows => {
            let names: Vec<String> = table.column_names().into_iter().map(str::to_owned).collect();
            let names: Vec<&str> = names.iter().map(String::as_str).collect();

            let mut total = 0;
            for index in table.index() {
                let mut values = table.row_values(index)?;
                total += fill_sequence(&mut values, &names, &fill, options);
                for (column, value) in table.columns_mut().iter_mut().zip(values) {
                    column.values[index] = value;
                }
            }
            total
        }
    };

    log::trace!("filled {filled} missing values along {}", options.axis);
    Ok(())
}

/// Returns a copy of `table` with missing values filled.
///
/// # Example
///
/// ```
/// use colframe::{Column, DataTable, Value};
/// use colframe::na::{FillMethod, FillOptions, fillna};
///
/// let data = DataTable::new(vec![Column::new("x", [Some(1), None, None, Some(4)])]).unwrap();
///
/// let zeros = fillna(&data, &FillOptions::value(0)).unwrap();
/// assert_eq!(zeros, DataTable::new(vec![Column::new("x", [1, 0, 0, 4])]).unwrap());
///
/// let padded = fillna(&data, &FillOptions::method(FillMethod::Forward)).unwrap();
/// assert_eq!(padded, DataTable::new(vec![Column::new("x", [1, 1, 1, 4])]).unwrap());
/// ```
pub fn fillna<T: Table + ?Sized>(table: &T, options: &FillOptions) -> Result<DataTable, FrameError> {
    let mut filled = table.to_data_table()?;
    fillna_in_place(&mut filled, options)?;
    Ok(filled)
}
