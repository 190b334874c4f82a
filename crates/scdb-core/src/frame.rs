//! Small DataFrame helpers shared by the recoder, filter, and views.

use anyhow::Result;
use polars::prelude::{BooleanChunked, DataFrame, NamedFrom, NewChunkedArray, Series};

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Returns the rows where `keep` is true. The source frame is untouched.
pub fn filter_rows(df: &DataFrame, keep: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok(df.filter(&mask)?)
}

pub fn set_string_column(df: &mut DataFrame, name: &str, values: Vec<String>) -> Result<()> {
    let series = Series::new(name.into(), values);
    df.with_column(series)?;
    Ok(())
}
