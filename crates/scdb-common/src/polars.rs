//! Polars AnyValue utility functions.
//!
//! Every cell read in the workspace goes through these helpers so that null
//! handling is uniform: nulls, blank strings, and non-finite floats are all
//! `None`, never an empty string or a `NaN` that leaks into an aggregate.

use polars::prelude::{AnyValue, DataFrame, PolarsResult};

/// Converts a cell to its display label.
///
/// Returns `None` for nulls and blank strings. Floats are printed without
/// trailing zeros so that `1.0` and `1` produce the same label.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use scdb_common::any_to_label;
///
/// assert_eq!(any_to_label(AnyValue::Null), None);
/// assert_eq!(any_to_label(AnyValue::Int32(1946)), Some("1946".to_string()));
/// assert_eq!(any_to_label(AnyValue::String("  Federal ")), Some("Federal".to_string()));
/// ```
pub fn any_to_label(value: AnyValue<'_>) -> Option<String> {
    let label = match value {
        AnyValue::Null => return None,
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) if v.is_finite() => format_numeric(f64::from(v)),
        AnyValue::Float64(v) if v.is_finite() => format_numeric(v),
        AnyValue::Float32(_) | AnyValue::Float64(_) => return None,
        AnyValue::String(s) => s.trim().to_string(),
        AnyValue::StringOwned(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    if label.is_empty() { None } else { Some(label) }
}

/// Formats a floating-point number without trailing zeros.
///
/// ```
/// use scdb_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(-0.25), "-0.25");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    v.to_string()
}

/// Extracts an integer category code from a cell.
///
/// Integers are codes as-is. Floats count only when integral, which is how a
/// code column with blanks usually arrives from CSV inference. Strings are
/// parsed with [`parse_code`]. Everything else is `None`.
pub fn any_to_code(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(i64::from(v)),
        AnyValue::Int16(v) => Some(i64::from(v)),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(i64::from(v)),
        AnyValue::UInt16(v) => Some(i64::from(v)),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        AnyValue::Float32(v) => integral_f64(f64::from(v)),
        AnyValue::Float64(v) => integral_f64(v),
        AnyValue::String(s) => parse_code(s),
        AnyValue::StringOwned(s) => parse_code(&s),
        _ => None,
    }
}

/// Converts a cell to `f64`, returning `None` for nulls, non-numeric text,
/// and non-finite values.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    let number = match value {
        AnyValue::Null => return None,
        AnyValue::Int8(v) => f64::from(v),
        AnyValue::Int16(v) => f64::from(v),
        AnyValue::Int32(v) => f64::from(v),
        AnyValue::Int64(v) => v as f64,
        AnyValue::UInt8(v) => f64::from(v),
        AnyValue::UInt16(v) => f64::from(v),
        AnyValue::UInt32(v) => f64::from(v),
        AnyValue::UInt64(v) => v as f64,
        AnyValue::Float32(v) => f64::from(v),
        AnyValue::Float64(v) => v,
        AnyValue::String(s) => return parse_f64(s),
        AnyValue::StringOwned(s) => return parse_f64(&s),
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Parses a code string such as `"9"`, `" 9 "` or `"9.0"`.
pub fn parse_code(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(code) = trimmed.parse::<i64>() {
        return Some(code);
    }
    trimmed.parse::<f64>().ok().and_then(integral_f64)
}

/// Parses a string as a finite `f64`.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn integral_f64(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// Reads a whole column as display labels.
pub fn column_labels(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_label(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

/// Reads a whole column as numbers.
pub fn column_numbers(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}
