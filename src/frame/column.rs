use crate::Value;

/// A named sequence of values.
///
/// # Example
///
/// ```
/// use colframe::{Column, Value};
///
/// let column = Column::new("x", [1, 2, 3]);
/// assert_eq!(column.name, "x");
/// assert_eq!(column.values[1], Value::Int64(2));
///
/// let sparse = Column::new("y", [Some(1.5), None]);
/// assert_eq!(sparse.values, vec![Value::Float64(1.5), Value::Null]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// The column name, unique within a table.
    pub name: String,

    /// The column values; [`Value::Null`] marks a missing cell.
    pub values: Vec<Value>,
}

impl Column {
    pub fn new<N, I, V>(name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
