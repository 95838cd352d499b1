use miette::Result;

use crate::{DataTable, FrameError, Row, Table, Value};

fn mark(values: &[Value], na_value: &Value, missing: bool) -> Vec<Value> {
    values
        .iter()
        .map(|value| Value::Bool((value == na_value) == missing))
        .collect()
}

/// `Bool(true)` for each missing value.
pub fn column_isna(values: &[Value], na_value: &Value) -> Vec<Value> {
    mark(values, na_value, true)
}

/// `Bool(true)` for each present value.
pub fn column_notna(values: &[Value], na_value: &Value) -> Vec<Value> {
    mark(values, na_value, false)
}

pub fn row_isna(row: &Row, na_value: &Value) -> Row {
    row.iter()
        .map(|(name, value)| (name, value == na_value))
        .collect()
}

pub fn row_notna(row: &Row, na_value: &Value) -> Row {
    row.iter()
        .map(|(name, value)| (name, value != na_value))
        .collect()
}

pub fn isna_in_place(table: &mut DataTable, na_value: &Value) {
    for column in table.columns_mut() {
        column.values = column_isna(&column.values, na_value);
    }
}

pub fn notna_in_place(table: &mut DataTable, na_value: &Value) {
    for column in table.columns_mut() {
        column.values = column_notna(&column.values, na_value);
    }
}

/// Returns a table of the same shape holding `Bool(true)` where a cell is
/// missing.
///
/// # Example
///
/// ```
/// use colframe::{Column, DataTable, Value};
/// use colframe::na::isna;
///
/// let data = DataTable::new(vec![Column::new("x", [Some(1), None])]).unwrap();
/// let expected = DataTable::new(vec![Column::new("x", [false, true])]).unwrap();
/// assert_eq!(isna(&data, &Value::Null).unwrap(), expected);
/// ```
pub fn isna<T: Table + ?Sized>(table: &T, na_value: &Value) -> Result<DataTable, FrameError> {
    let mut marked = table.to_data_table()?;
    isna_in_place(&mut marked, na_value);
    Ok(marked)
}

pub fn notna<T: Table + ?Sized>(table: &T, na_value: &Value) -> Result<DataTable, FrameError> {
    let mut marked = table.to_data_table()?;
    notna_in_place(&mut marked, na_value);
    Ok(marked)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Column;

    fn sample() -> DataTable {
        DataTable::new(vec![
            Column::new("x", [Some(1), None, Some(3)]),
            Column::new("y", [None, Some("b"), Some("c")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_isna_and_notna() {
        let expected = DataTable::new(vec![
            Column::new("x", [false, true, false]),
            Column::new("y", [true, false, false]),
        ])
        .unwrap();

        assert_eq!(isna(&sample(), &Value::Null).unwrap(), expected);

        let mut data = sample();
        notna_in_place(&mut data, &Value::Null);
        assert_eq!(data.column("x").unwrap()[1], Value::Bool(false));
        assert_eq!(data.column("y").unwrap()[1], Value::Bool(true));
    }

    #[test]
    fn test_custom_na_value() {
        let values = vec![Value::Int64(-1), Value::Int64(4), Value::Null];
        assert_eq!(
            column_isna(&values, &Value::Int64(-1)),
            vec![Value::Bool(true), Value::Bool(false), Value::Bool(false)]
        );
        assert_eq!(
            column_notna(&values, &Value::Null),
            vec![Value::Bool(true), Value::Bool(true), Value::Bool(false)]
        );
    }

    #[test]
    fn test_row_isna() {
        let row: Row = [("a", Value::Int64(1)), ("b", Value::Null)].into_iter().collect();

        let expected: Row = [("a", false), ("b", true)].into_iter().collect();
        assert_eq!(row_isna(&row, &Value::Null), expected);

        let expected: Row = [("a", true), ("b", false)].into_iter().collect();
        assert_eq!(row_notna(&row, &Value::Null), expected);
    }
}
