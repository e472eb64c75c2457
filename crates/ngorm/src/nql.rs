//! Helpers called by generated code.
//!
//! Literal helpers render Rust values as nGQL literals. The execution and
//! column helpers panic on any failure: generated operations never return a
//! partially bound model or continue after the database rejected a statement.

use crate::{Page, QueryError, Record, ResultSet, Session};

/// Render a string literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn int(value: i64) -> String {
    value.to_string()
}

/// Shortest exponential form that parses back to the same `f32`.
///
/// # Panics
///
/// NaN and the infinities have no nGQL literal.
pub fn float32(value: f32) -> String {
    finite(f64::from(value));
    format!("{value:E}")
}

/// Shortest exponential form that parses back to the same `f64`.
///
/// # Panics
///
/// NaN and the infinities have no nGQL literal.
pub fn float64(value: f64) -> String {
    finite(value);
    format!("{value:E}")
}

fn finite(value: f64) {
    if !value.is_finite() {
        panic!("{value} has no nGQL literal");
    }
}

/// `src->dst`, with `@rank` appended when the rank is not zero.
pub fn edge_key(src: i64, dst: i64, rank: i64) -> String {
    if rank == 0 {
        format!("{src}->{dst}")
    } else {
        format!("{src}->{dst}@{rank}")
    }
}

/// Assemble a `MATCH` statement from a pattern, `AND`-joined conditions, a
/// projection and an optional page.
pub fn match_query(
    pattern: &str,
    conditions: &[String],
    projection: &str,
    page: Option<Page>,
) -> String {
    let mut nql = String::from(pattern);
    if !conditions.is_empty() {
        nql.push_str(" WHERE ");
        nql.push_str(&conditions.join(" AND "));
    }
    nql.push_str(" RETURN ");
    nql.push_str(projection);
    if let Some(page) = page {
        nql.push(' ');
        nql.push_str(&page.to_string());
    }
    nql
}

/// Run `nql` and abort on transport errors or a non-zero error code.
pub fn execute<S: Session>(session: &mut S, nql: &str) -> S::ResultSet {
    match session.execute(nql) {
        Ok(result) => {
            check_result_set(nql, &result);
            result
        }
        Err(e) => panic!("{nql}, execute failed: {e}"),
    }
}

pub fn check_result_set<R: ResultSet>(nql: &str, result: &R) {
    if !result.is_succeed() {
        panic!(
            "{nql}, ErrorCode: {}, ErrorMsg: {}",
            result.error_code(),
            result.error_msg()
        );
    }
}

pub fn record<R: ResultSet>(result: &R, index: usize) -> R::Record {
    result.row(index).unwrap_or_else(|e| panic!("{e}"))
}

pub fn int_column<R: Record>(record: &R, column: &str) -> i64 {
    record
        .value_by_col_name(column)
        .and_then(|v| v.as_int())
        .unwrap_or_else(|e| panic!("column {column}: {e}"))
}

pub fn float_column<R: Record>(record: &R, column: &str) -> f64 {
    record
        .value_by_col_name(column)
        .and_then(|v| v.as_float())
        .unwrap_or_else(|e| panic!("column {column}: {e}"))
}

pub fn string_column<R: Record>(record: &R, column: &str) -> String {
    record
        .value_by_col_name(column)
        .and_then(|v| v.as_string())
        .unwrap_or_else(|e| panic!("column {column}: {e}"))
}

/// Checked conversion of an integer column into a narrower field type.
pub fn try_narrow<T: TryFrom<i64>>(value: i64, column: &str) -> Result<T, QueryError> {
    T::try_from(value).map_err(|_| QueryError::OutOfRange {
        column: column.to_string(),
        value,
        target: std::any::type_name::<T>(),
    })
}

pub fn narrow<T: TryFrom<i64>>(value: i64, column: &str) -> T {
    try_narrow(value, column).unwrap_or_else(|e| panic!("{e}"))
}

/// Dispatch fallthrough for a field name the model does not declare.
pub fn unknown_field(entity: &str, field: &str) -> ! {
    panic!("{entity} has no field named {field:?}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("Alice"), "\"Alice\"");
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
        assert_eq!(quote("x\ny"), "\"x\\ny\"");
    }

    #[test]
    fn test_float_literals_round_trip() {
        for v in [0.0f64, -1.5, 1e-300, f64::MAX, f64::MIN_POSITIVE] {
            assert_eq!(float64(v).parse::<f64>().unwrap(), v);
        }
        for v in [0.0f32, 3.25, f32::MAX, f32::MIN] {
            assert_eq!(float32(v).parse::<f32>().unwrap(), v);
        }
    }

    #[test]
    #[should_panic(expected = "NaN has no nGQL literal")]
    fn test_nan_literal_panics() {
        float64(f64::NAN);
    }

    #[test]
    #[should_panic(expected = "inf has no nGQL literal")]
    fn test_infinite_literal_panics() {
        float32(f32::INFINITY);
    }

    #[test]
    fn test_edge_key() {
        assert_eq!(edge_key(1, 2, 0), "1->2");
        assert_eq!(edge_key(1, -2, 3), "1->-2@3");
    }

    #[test]
    fn test_match_query() {
        let nql = match_query(
            "MATCH (v:person)",
            &["v.person.age==30".to_string(), "id(v)==7".to_string()],
            "id(v) AS person_id",
            Some(Page::new(10, 5)),
        );
        assert_eq!(
            nql,
            "MATCH (v:person) WHERE v.person.age==30 AND id(v)==7 RETURN id(v) AS person_id SKIP 10 LIMIT 5"
        );

        let bare = match_query("MATCH (v:person)", &[], "id(v) AS person_id", None);
        assert_eq!(bare, "MATCH (v:person) RETURN id(v) AS person_id");
    }

    #[test]
    fn test_try_narrow() {
        assert_eq!(try_narrow::<i8>(-128, "c"), Ok(-128i8));
        let err = try_narrow::<i8>(300, "person_age").unwrap_err();
        assert!(matches!(err, QueryError::OutOfRange { value: 300, .. }));
    }

    struct Row(Vec<(&'static str, Value)>);

    impl Record for Row {
        fn value_by_col_name(&self, name: &str) -> Result<Value, QueryError> {
            self.0
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.clone())
                .ok_or_else(|| QueryError::ColumnNotFound(name.to_string()))
        }
    }

    #[test]
    fn test_columns() {
        let row = Row(vec![("a", Value::Int(5)), ("b", Value::from("x"))]);
        assert_eq!(int_column(&row, "a"), 5);
        assert_eq!(string_column(&row, "b"), "x");
    }

    #[test]
    #[should_panic(expected = "column missing")]
    fn test_missing_column_panics() {
        let row = Row(vec![]);
        int_column(&row, "missing");
    }
}
