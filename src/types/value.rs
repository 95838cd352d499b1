/// The kinds of scalar a column can hold.
///
/// A column is not bound to a single type; `DataType` is used to describe
/// values in error messages and to decide which reducers apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,

    /// 64-bit floating point number.
    Float64,

    /// UTF-8 text.
    Text,

    /// Boolean true/false value.
    Bool,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Int64 => write!(f, "Integer"),
            DataType::Float64 => write!(f, "Float"),
            DataType::Text => write!(f, "String"),
            DataType::Bool => write!(f, "Boolean"),
        }
    }
}

/// A single cell of a table.
///
/// [`Value::Null`] is the absent marker: it fills the unmatched side of an
/// outer join, missing cells when rows with different keys are combined,
/// and is the default missing value for `fillna`/`dropna`/`isna`.
///
/// Equality is value equality rather than structural equality: integers and
/// floats compare numerically and `Null` equals `Null`, so null join keys
/// match each other. An integer equals a float only when the float holds
/// exactly that integer. `NaN` equals nothing, not even itself.
///
/// `Bool` never equals a number, so `true` and `1` are distinct join and
/// group keys, unlike Python where `True == 1`. Reducers such as
/// [`sum_values`](crate::sum_values) still count a bool as 0 or 1.
///
/// # Example
///
/// ```
/// use colframe::Value;
///
/// assert_eq!(Value::Int64(2), Value::Float64(2.0));
/// assert_eq!(Value::Null, Value::Null);
/// assert_ne!(Value::Text("2".to_string()), Value::Int64(2));
/// assert_eq!(Value::from(Some(3)), Value::Int64(3));
/// assert_eq!(Value::from(None::<i64>), Value::Null);
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit signed integer value.
    Int64(i64),

    /// A 64-bit floating point number.
    Float64(f64),

    /// A UTF-8 text string.
    Text(String),

    /// A boolean value (true/false).
    Bool(bool),

    /// The absent marker.
    Null,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Float64(a), Value::Float64(b)) => a == b,
            (Value::Int64(a), Value::Float64(b)) | (Value::Float64(b), Value::Int64(a)) => {
                int_equals_float(*a, *b)
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

/// Exact comparison; a float only equals an integer it represents without
/// rounding, so equality stays transitive beyond 2^53.
fn int_equals_float(int: i64, float: f64) -> bool {
    const I64_END: f64 = 9_223_372_036_854_775_808.0;

    float.fract() == 0.0 && (-I64_END..I64_END).contains(&float) && float as i64 == int
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int64(i) => write!(f, "{}", i),
            Value::Float64(fl) => write!(f, "{}", fl),
            Value::Text(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => write!(f, "NULL"),
        }
    }
}

impl Value {
    /// Returns the data type of this value.
    ///
    /// Returns `None` for [`Value::Null`] since the absent marker has no type.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Int64(_) => Some(DataType::Int64),
            Value::Float64(_) => Some(DataType::Float64),
            Value::Text(_) => Some(DataType::Text),
            Value::Bool(_) => Some(DataType::Bool),
            Value::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Human readable name of the value's type, `"NULL"` for the absent marker.
    pub(crate) fn type_name(&self) -> String {
        self.data_type()
            .map_or_else(|| "NULL".to_string(), |data_type| data_type.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int64(i64::from(value))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Int64(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values_compare_across_types() {
        assert_eq!(Value::Int64(7), Value::Float64(7.0));
        assert_eq!(Value::Float64(7.0), Value::Int64(7));
        assert_ne!(Value::Int64(7), Value::Float64(7.5));
    }

    #[test]
    fn test_large_integers_compare_exactly_with_floats() {
        let two_53 = 9_007_199_254_740_992_i64;
        assert_eq!(Value::Int64(two_53), Value::Float64(two_53 as f64));
        assert_ne!(Value::Int64(two_53 + 1), Value::Float64(two_53 as f64));
        assert_ne!(Value::Float64(two_53 as f64), Value::Int64(two_53 + 1));
        assert_ne!(Value::Int64(i64::MAX), Value::Float64(i64::MAX as f64));
        assert_eq!(Value::Int64(i64::MIN), Value::Float64(i64::MIN as f64));
    }

    #[test]
    fn test_non_finite_floats_equal_no_integer() {
        assert_ne!(Value::Float64(f64::NAN), Value::Float64(f64::NAN));
        assert_ne!(Value::Float64(f64::NAN), Value::Int64(0));
        assert_ne!(Value::Float64(f64::INFINITY), Value::Int64(i64::MAX));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_usize_conversion_saturates() {
        assert_eq!(Value::from(usize::MAX), Value::Int64(i64::MAX));
        assert_eq!(Value::from(3_usize), Value::Int64(3));
    }

    #[test]
    fn test_null_equals_null() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Null, Value::Int64(0));
        assert_ne!(Value::Text(String::new()), Value::Null);
    }

    #[test]
    fn test_bool_is_not_an_integer() {
        assert_ne!(Value::Bool(true), Value::Int64(1));
    }

    #[test]
    fn test_nan_is_not_equal_to_itself() {
        assert_ne!(Value::Float64(f64::NAN), Value::Float64(f64::NAN));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Int64(1).type_name(), "Integer");
        assert_eq!(Value::from("a").type_name(), "String");
        assert_eq!(Value::Null.type_name(), "NULL");
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int64(-3).to_string(), "-3");
        assert_eq!(Value::Float64(1.5).to_string(), "1.5");
        assert_eq!(Value::Null.to_string(), "NULL");
    }
}
