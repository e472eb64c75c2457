use thiserror::Error;

/// Errors raised while reading query results.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error("row index {index} out of range (rows: {rows})")]
    RowOutOfRange { index: usize, rows: usize },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("expected {expected} value, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("value {value} of column {column} does not fit in {target}")]
    OutOfRange {
        column: String,
        value: i64,
        target: &'static str,
    },
}
