//! The recoded, read-only case snapshot every view works from.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use scdb_ingest::{IngestOptions, load_cases};
use scdb_model::{FilterSelection, STANDARD_MAPPINGS, columns};

use crate::aggregate::distinct_values;
use crate::filter::apply_filters;
use crate::frame::has_column;
use crate::recode::{RecodeReport, recode_columns};

/// Loaded and recoded cases.
///
/// Construction is the only place recoding happens. Clones share the frame.
#[derive(Debug, Clone)]
pub struct CaseDataset {
    frame: Arc<DataFrame>,
    recode: RecodeReport,
}

impl CaseDataset {
    /// Wraps a freshly loaded frame, replacing every coded column with labels.
    ///
    /// The frame must still hold raw codes.
    pub fn from_frame(mut df: DataFrame) -> Result<Self> {
        let recode = recode_columns(&mut df, &STANDARD_MAPPINGS)?;
        info!(
            rows = df.height(),
            recoded = recode.recoded.len(),
            missing = recode.missing.len(),
            "case dataset ready"
        );
        Ok(Self {
            frame: Arc::new(df),
            recode,
        })
    }

    /// Loads a CSV file and recodes it.
    pub fn load(path: &Path, options: &IngestOptions) -> Result<Self> {
        let df = load_cases(path, options)
            .with_context(|| format!("failed to load cases from {}", path.display()))?;
        Self::from_frame(df)
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn recode_report(&self) -> &RecodeReport {
        &self.recode
    }

    /// Rows matching `selection`, as a new frame.
    pub fn filter(&self, selection: &FilterSelection) -> Result<DataFrame> {
        apply_filters(&self.frame, selection)
    }

    /// Values a user can pick for each filterable column present in the data.
    pub fn filter_options(&self) -> Result<BTreeMap<String, Vec<String>>> {
        let mut options = BTreeMap::new();
        for column in columns::FILTER_COLUMNS {
            if !has_column(&self.frame, column) {
                debug!(column, "filter column not present; no options");
                continue;
            }
            options.insert(column.to_string(), distinct_values(&self.frame, column)?);
        }
        Ok(options)
    }
}
