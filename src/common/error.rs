use miette::Diagnostic;
use thiserror::Error;

use crate::ops::matching::JoinSide;

/// Errors produced by table operations.
///
/// Every fallible operation in the crate returns this type. The only
/// variant that is ever absorbed internally is
/// [`FrameError::IncompatibleAggregation`]: the aggregator drops the
/// offending column instead of failing the whole group.
#[derive(Debug, Error, Diagnostic, PartialEq)]
pub enum FrameError {
    /// A join key column is absent from one of the joined tables.
    #[error("column `{column}` is missing from the {side} table")]
    #[diagnostic(
        code(colframe::missing_join_column),
        help("`right_on` defaults to `left_on`; pass it explicitly when the key columns differ")
    )]
    MissingJoinColumn { column: String, side: JoinSide },

    #[error("column `{0}` not found")]
    #[diagnostic(code(colframe::column_not_found))]
    ColumnNotFound(String),

    /// Column lengths disagree.
    #[error("column `{column}` has {actual} values, expected {expected}")]
    #[diagnostic(
        code(colframe::shape_mismatch),
        help("every column of a table must hold the same number of values")
    )]
    ShapeMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate column `{0}`")]
    #[diagnostic(code(colframe::duplicate_column))]
    DuplicateColumn(String),

    #[error("index {index} is out of bounds for {len} rows")]
    #[diagnostic(code(colframe::index_out_of_bounds))]
    IndexOutOfBounds { index: usize, len: usize },

    /// An edit payload does not fit the table it is applied to.
    #[error("expected {expected} values, got {actual}")]
    #[diagnostic(code(colframe::length_mismatch))]
    LengthMismatch { expected: usize, actual: usize },

    #[error("type mismatch: {0}")]
    #[diagnostic(code(colframe::type_mismatch))]
    TypeMismatch(String),

    #[error("division by zero")]
    #[diagnostic(code(colframe::division_by_zero))]
    DivisionByZero,

    #[error("arithmetic overflow: {0}")]
    #[diagnostic(code(colframe::overflow))]
    Overflow(String),

    /// A reducer is not defined for the values it was handed.
    #[error("incompatible aggregation: {reason}")]
    #[diagnostic(code(colframe::incompatible_aggregation))]
    IncompatibleAggregation { reason: String },

    #[error("invalid argument: {0}")]
    #[diagnostic(code(colframe::invalid_argument))]
    InvalidArgument(String),
}

impl FrameError {
    pub(crate) fn incompatible(reason: impl Into<String>) -> Self {
        Self::IncompatibleAggregation {
            reason: reason.into(),
        }
    }
}
