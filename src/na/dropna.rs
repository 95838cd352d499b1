use miette::Result;
use strum::{Display, EnumString};

use super::Axis;
use crate::{DataTable, FrameError, RowMask, Table, Value};

/// When a row or column counts as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum DropHow {
    /// Drop if any inspected value is missing.
    #[default]
    Any,

    /// Drop only if every inspected value is missing.
    All,
}

/// Options for [`dropna`].
///
/// `thresh`, when set, takes precedence over `how`: a row or column is kept
/// when it holds at least `thresh` present values.
///
/// `subset` limits which columns are looked at. Along [`Axis::Rows`] only the
/// subset's cells decide whether a row goes; along [`Axis::Columns`] only the
/// subset's columns may be dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct DropOptions {
    pub axis: Axis,
    pub how: DropHow,
    pub thresh: Option<usize>,
    pub subset: Option<Vec<String>>,
    pub na_value: Value,
}

impl Default for DropOptions {
    fn default() -> Self {
        Self {
            axis: Axis::Rows,
            how: DropHow::Any,
            thresh: None,
            subset: None,
            na_value: Value::Null,
        }
    }
}

impl DropOptions {
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn how(mut self, how: DropHow) -> Self {
        self.how = how;
        self
    }

    pub fn thresh(mut self, thresh: usize) -> Self {
        self.thresh = Some(thresh);
        self
    }

    pub fn subset(mut self, subset: &[&str]) -> Self {
        self.subset = Some(subset.iter().map(|name| (*name).to_owned()).collect());
        self
    }

    pub fn na_value(mut self, na_value: impl Into<Value>) -> Self {
        self.na_value = na_value.into();
        self
    }

    fn keeps<'v>(&self, values: impl Iterator<Item = &'v Value>) -> bool {
        let mut present = 0;
        let mut missing = 0;
        for value in values {
            if *value == self.na_value {
                missing += 1;
            } else {
                present += 1;
            }
        }

        match (self.thresh, self.how) {
            (Some(thresh), _) => present >= thresh,
            (None, DropHow::Any) => missing == 0,
            (None, DropHow::All) => present > 0,
        }
    }
}

/// Names of the columns `options` inspects, in table order.
fn inspected<'t>(table: &'t DataTable, options: &DropOptions) -> Result<Vec<&'t str>, FrameError> {
    let names = table.column_names();
    let Some(subset) = &options.subset else {
        return Ok(names);
    };

    if let Some(unknown) = subset.iter().find(|name| !table.contains_column(name)) {
        return Err(FrameError::ColumnNotFound(unknown.clone()));
    }
    Ok(names
        .into_iter()
        .filter(|name| subset.iter().any(|wanted| wanted == name))
        .collect())
}

/// Drops rows or columns with missing values from `table`.
///
/// # Errors
///
/// [`FrameError::ColumnNotFound`] if `subset` names an unknown column.
pub fn dropna_in_place(table: &mut DataTable, options: &DropOptions) -> Result<(), FrameError> {
    match options.axis {
        Axis::Rows => {
            let columns = inspected(table, options)?
                .into_iter()
                .map(|name| table.require_column(name))
                .collect::<Result<Vec<_>, _>>()?;

            let row_count = table.row_count();
            let mask = RowMask::from_fn(row_count, |index| {
                options.keeps(columns.iter().filter_map(|values| values.get(index)))
            });
            log::debug!("dropping {} of {row_count} rows", row_count - mask.count_set());

            *table = table.filter_rows(&mask)?;
        }
        Axis::Columns => {
            let dropped: Vec<String> = inspected(table, options)?
                .into_iter()
                .filter(|name| {
                    table
                        .column(name)
                        .is_some_and(|values| !options.keeps(values.iter()))
                })
                .map(str::to_owned)
                .collect();
            log::debug!("dropping columns {dropped:?}");

            table
                .columns_mut()
                .retain(|column| !dropped.contains(&column.name));
        }
    }
    Ok(())
}

/// Returns a copy of `table` without the rows or columns that have
/// missing values.
///
/// # Example
///
/// ```
/// use colframe::{Column, DataTable};
/// use colframe::na::{DropOptions, dropna};
///
/// let data = DataTable::new(vec![
///     Column::new("x", [Some(1), None, Some(3)]),
///     Column::new("y", [Some(4), Some(5), Some(6)]),
/// ])
/// .unwrap();
///
/// let expected = DataTable::new(vec![
///     Column::new("x", [1, 3]),
///     Column::new("y", [4, 6]),
/// ])
/// .unwrap();
/// assert_eq!(dropna(&data, &DropOptions::default()).unwrap(), expected);
/// ```
pub fn dropna<T: Table + ?Sized>(table: &T, options: &DropOptions) -> Result<DataTable, FrameError> {
    let mut kept = table.to_data_table()?;
    dropna_in_place(&mut kept, options)?;
    Ok(kept)
}
