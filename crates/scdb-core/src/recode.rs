//! Code-to-label recoding.
//!
//! Labels are not valid codes, so recoding a column twice turns every value
//! into the fallback. [`CaseDataset`](crate::CaseDataset) is the only caller
//! in the pipeline and it recodes each column exactly once, before any view
//! can see the frame.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, DataFrame};
use tracing::debug;

use scdb_common::any_to_code;
use scdb_model::CodeMapping;

use crate::frame::{has_column, set_string_column};

/// What recoding did to a frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecodeReport {
    /// Columns replaced with labels, in application order.
    pub recoded: Vec<String>,
    /// Coded columns absent from the input.
    pub missing: Vec<String>,
    /// Cells per column that received the fallback label.
    pub fallback_counts: BTreeMap<String, usize>,
}

impl RecodeReport {
    pub fn is_recoded(&self, column: &str) -> bool {
        self.recoded.iter().any(|name| name == column)
    }
}

/// Replaces a coded column with its labels.
///
/// Returns the number of cells that fell back, or `None` when the column is
/// not in the frame.
pub fn recode_column(df: &mut DataFrame, mapping: &CodeMapping) -> Result<Option<usize>> {
    if !has_column(df, mapping.column) {
        return Ok(None);
    }
    let column = df.column(mapping.column)?;
    let mut fallbacks = 0usize;
    let mut labels = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let code = any_to_code(column.get(idx).unwrap_or(AnyValue::Null));
        if !code.is_some_and(|code| mapping.is_mapped(code)) {
            fallbacks += 1;
        }
        labels.push(mapping.label(code).to_string());
    }
    set_string_column(df, mapping.column, labels)
        .with_context(|| format!("recode {}", mapping.column))?;
    Ok(Some(fallbacks))
}

/// Applies every mapping to its column.
pub fn recode_columns(df: &mut DataFrame, mappings: &[&CodeMapping]) -> Result<RecodeReport> {
    let mut report = RecodeReport::default();
    for mapping in mappings {
        match recode_column(df, mapping)? {
            Some(fallbacks) => {
                debug!(
                    column = mapping.column,
                    fallbacks,
                    fallback_label = mapping.fallback,
                    "recoded column"
                );
                report.recoded.push(mapping.column.to_string());
                report
                    .fallback_counts
                    .insert(mapping.column.to_string(), fallbacks);
            }
            None => {
                debug!(column = mapping.column, "coded column not present");
                report.missing.push(mapping.column.to_string());
            }
        }
    }
    Ok(report)
}
