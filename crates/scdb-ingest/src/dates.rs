//! Date coercion for the decision and argument columns.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::{DataFrame, DataType, NamedFrom, Series};
use tracing::debug;

use scdb_common::column_labels;
use scdb_model::columns;

use crate::error::Result;

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d-%b-%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

/// Parses a date cell. Returns `None` for anything unparsable.
pub fn parse_case_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                .map(|value| value.date())
        })
}

/// Per-column outcome of date coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateCoercion {
    pub column: String,
    pub parsed: usize,
    /// Non-blank cells that could not be parsed and became null.
    pub coerced_to_null: usize,
}

/// Replaces each present date column with a `Date` column and derives
/// `decision_year` from `date_decision`.
///
/// Missing date columns are skipped.
pub fn coerce_date_columns(df: &mut DataFrame) -> Result<Vec<DateCoercion>> {
    let mut outcomes = Vec::new();
    for name in columns::DATE_COLUMNS {
        if df.column(name).is_err() {
            debug!(column = name, "date column not present");
            continue;
        }
        let raw = column_labels(df, name)?;
        let mut outcome = DateCoercion {
            column: name.to_string(),
            ..DateCoercion::default()
        };
        let dates: Vec<Option<NaiveDate>> = raw
            .iter()
            .map(|cell| {
                let cell = cell.as_deref()?;
                let parsed = parse_case_date(cell);
                match parsed {
                    Some(_) => outcome.parsed += 1,
                    None => outcome.coerced_to_null += 1,
                }
                parsed
            })
            .collect();

        let days: Vec<Option<i32>> = dates
            .iter()
            .map(|date| date.map(|date| date.num_days_from_ce() - EPOCH_DAYS_FROM_CE))
            .collect();
        let series = Series::new(name.into(), days).cast(&DataType::Date)?;
        df.with_column(series)?;

        if name == columns::DATE_DECISION {
            let years: Vec<Option<i32>> =
                dates.iter().map(|date| date.map(|date| date.year())).collect();
            df.with_column(Series::new(columns::DECISION_YEAR.into(), years))?;
        }

        debug!(
            column = name,
            parsed = outcome.parsed,
            coerced_to_null = outcome.coerced_to_null,
            "coerced date column"
        );
        outcomes.push(outcome);
    }
    Ok(outcomes)
}
