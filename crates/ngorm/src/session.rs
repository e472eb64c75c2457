//! Seams between generated code and a graph database client.

use std::fmt;

use crate::QueryError;

/// A connection able to run nGQL statements.
pub trait Session {
    type ResultSet: ResultSet;
    type Error: fmt::Display;

    fn execute(&mut self, nql: &str) -> Result<Self::ResultSet, Self::Error>;
}

/// Tabular response of one statement.
pub trait ResultSet {
    type Record: Record;

    fn row_size(&self) -> usize;

    fn row(&self, index: usize) -> Result<Self::Record, QueryError>;

    /// Zero on success.
    fn error_code(&self) -> i32;

    fn error_msg(&self) -> &str;

    fn is_succeed(&self) -> bool {
        self.error_code() == 0
    }
}

/// One row of a [`ResultSet`], addressed by column alias.
pub trait Record {
    fn value_by_col_name(&self, name: &str) -> Result<Value, QueryError>;
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Value {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }

    pub fn as_int(&self) -> Result<i64, QueryError> {
        match self {
            Self::Int(v) => Ok(*v),
            other => Err(QueryError::TypeMismatch {
                expected: "int",
                actual: other.kind(),
            }),
        }
    }

    pub fn as_float(&self) -> Result<f64, QueryError> {
        match self {
            Self::Float(v) => Ok(*v),
            other => Err(QueryError::TypeMismatch {
                expected: "float",
                actual: other.kind(),
            }),
        }
    }

    pub fn as_string(&self) -> Result<String, QueryError> {
        match self {
            Self::String(v) => Ok(v.clone()),
            other => Err(QueryError::TypeMismatch {
                expected: "string",
                actual: other.kind(),
            }),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// `SKIP`/`LIMIT` window of a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub size: i64,
}

impl Page {
    pub const fn new(offset: i64, size: i64) -> Self {
        Self { offset, size }
    }

    /// The window used by point lookups.
    pub const fn first() -> Self {
        Self { offset: 0, size: 1 }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SKIP {} LIMIT {}", self.offset, self.size)
    }
}
