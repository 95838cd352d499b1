use miette::Result;

use crate::{FrameError, Value};

fn mismatch(verb: &str, left: &Value, right: &Value) -> FrameError {
    FrameError::TypeMismatch(format!(
        "cannot {verb} {} and {}",
        left.type_name(),
        right.type_name()
    ))
}

fn overflow(verb: &str, left: i64, right: i64) -> FrameError {
    FrameError::Overflow(format!("cannot {verb} {left} and {right}"))
}

pub fn values_add(left: &Value, right: &Value) -> Result<Value, FrameError> {
    match (left, right) {
        (Value::Int64(a), Value::Int64(b)) => a
            .checked_add(*b)
            .map(Value::Int64)
            .ok_or_else(|| overflow("add", *a, *b)),
        (Value::Float64(a), Value::Float64(b)) => Ok(Value::Float64(a + b)),
        (Value::Int64(a), Value::Float64(b)) => Ok(Value::Float64(*a as f64 + *b)),
        (Value::Float64(a), Value::Int64(b)) => Ok(Value::Float64(*a + *b as f64)),
        (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
        _ => Err(mismatch("add", left, right)),
    }
}

pub fn values_subtract(left: &Value, right: &Value) -> Result<Value, FrameError> {
    match (left, right) {
        (Value::Int64(a), Value::Int64(b)) => a
            .checked_sub(*b)
            .map(Value::Int64)
            .ok_or_else(|| overflow("subtract", *a, *b)),
        (Value::Float64(a), Value::Float64(b)) => Ok(Value::Float64(a - b)),
        (Value::Int64(a), Value::Float64(b)) => Ok(Value::Float64(*a as f64 - *b)),
        (Value::Float64(a), Value::Int64(b)) => Ok(Value::Float64(*a - *b as f64)),
        (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
        _ => Err(mismatch("subtract", left, right)),
    }
}

pub fn values_multiply(left: &Value, right: &Value) -> Result<Value, FrameError> {
    match (left, right) {
        (Value::Int64(a), Value::Int64(b)) => a
            .checked_mul(*b)
            .map(Value::Int64)
            .ok_or_else(|| overflow("multiply", *a, *b)),
        (Value::Float64(a), Value::Float64(b)) => Ok(Value::Float64(a * b)),
        (Value::Int64(a), Value::Float64(b)) => Ok(Value::Float64(*a as f64 * *b)),
        (Value::Float64(a), Value::Int64(b)) => Ok(Value::Float64(*a * *b as f64)),
        (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
        _ => Err(mismatch("multiply", left, right)),
    }
}

/// True division: the quotient is always a float, even for two integers.
pub fn values_divide(left: &Value, right: &Value) -> Result<Value, FrameError> {
    let (a, b) = match (left, right) {
        (Value::Null, _) | (_, Value::Null) => return Ok(Value::Null),
        (Value::Int64(a), Value::Int64(b)) => (*a as f64, *b as f64),
        (Value::Float64(a), Value::Float64(b)) => (*a, *b),
        (Value::Int64(a), Value::Float64(b)) => (*a as f64, *b),
        (Value::Float64(a), Value::Int64(b)) => (*a, *b as f64),
        _ => return Err(mismatch("divide", left, right)),
    };

    if b == 0.0 {
        return Err(FrameError::DivisionByZero);
    }
    Ok(Value::Float64(a / b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_add_integers() {
        let result = values_add(&Value::Int64(5), &Value::Int64(3));
        assert_eq!(result, Ok(Value::Int64(8)));
    }

    #[test]
    fn test_values_add_mixed_promotes_to_float() {
        let result = values_add(&Value::Int64(1), &Value::Float64(0.5));
        assert_eq!(result, Ok(Value::Float64(1.5)));
    }

    #[test]
    fn test_values_add_null_propagates() {
        assert_eq!(values_add(&Value::Null, &Value::Int64(1)), Ok(Value::Null));
        assert_eq!(values_add(&Value::Int64(1), &Value::Null), Ok(Value::Null));
    }

    #[test]
    fn test_values_add_text_is_type_mismatch() {
        let result = values_add(&Value::from("a"), &Value::Int64(1));
        assert!(matches!(result, Err(FrameError::TypeMismatch(_))));
    }

    #[test]
    fn test_values_add_overflow() {
        let result = values_add(&Value::Int64(i64::MAX), &Value::Int64(1));
        assert!(matches!(result, Err(FrameError::Overflow(_))));
    }

    #[test]
    fn test_values_subtract() {
        let result = values_subtract(&Value::Int64(1), &Value::Int64(11));
        assert_eq!(result, Ok(Value::Int64(-10)));
    }

    #[test]
    fn test_values_multiply() {
        let result = values_multiply(&Value::Float64(1.5), &Value::Int64(2));
        assert_eq!(result, Ok(Value::Float64(3.0)));
    }

    #[test]
    fn test_values_divide_integers_yields_float() {
        let result = values_divide(&Value::Int64(1), &Value::Int64(2));
        assert_eq!(result, Ok(Value::Float64(0.5)));
    }

    #[test]
    fn test_values_divide_by_zero() {
        assert_eq!(
            values_divide(&Value::Int64(1), &Value::Int64(0)),
            Err(FrameError::DivisionByZero)
        );
        assert_eq!(
            values_divide(&Value::Float64(1.0), &Value::Float64(0.0)),
            Err(FrameError::DivisionByZero)
        );
    }
}
