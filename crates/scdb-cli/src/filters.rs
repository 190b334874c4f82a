//! Translation of command-line filter flags into a [`FilterSelection`].

use scdb_model::{FilterSelection, ModelError, columns};

/// Raw filter values as collected from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterFlags {
    pub years: Vec<String>,
    pub jurisdictions: Vec<String>,
    pub issue_areas: Vec<String>,
    pub law_types: Vec<String>,
    /// Generic `COLUMN=VALUE` pairs.
    pub extra: Vec<String>,
}

impl FilterFlags {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
            && self.jurisdictions.is_empty()
            && self.issue_areas.is_empty()
            && self.law_types.is_empty()
            && self.extra.is_empty()
    }
}

/// Builds the selection. Columns with no flags stay unconstrained.
pub fn build_selection(flags: &FilterFlags) -> Result<FilterSelection, ModelError> {
    let mut selection = FilterSelection::new();
    for year in &flags.years {
        let year = year.trim();
        if year.parse::<i32>().is_err() {
            return Err(ModelError::InvalidFilter {
                filter: format!("{}={year}", columns::DECISION_YEAR),
                reason: "year must be a whole number".to_string(),
            });
        }
        selection.allow(columns::DECISION_YEAR, year);
    }
    let labelled = [
        (columns::JURISDICTION, &flags.jurisdictions),
        (columns::ISSUE_AREA, &flags.issue_areas),
        (columns::LAW_TYPE, &flags.law_types),
    ];
    for (column, values) in labelled {
        for value in values {
            selection.allow_pair(&format!("{column}={value}"))?;
        }
    }
    for pair in &flags.extra {
        selection.allow_pair(pair)?;
    }
    Ok(selection)
}
