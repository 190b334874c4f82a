//! User filter selections.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Allowed values per column for one render pass.
///
/// A column with no entry is unconstrained. A column with an empty set
/// matches nothing; the two cases are deliberately different states.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    allowed: BTreeMap<String, BTreeSet<String>>,
}

impl FilterSelection {
    /// A selection with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrains `column` to `values`, replacing any previous set.
    #[must_use]
    pub fn with<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(column, values);
        self
    }

    pub fn set<I, S>(&mut self, column: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.allowed.insert(column.into(), values);
    }

    /// Adds one value to a column's allowed set, creating the set if needed.
    pub fn allow(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.allowed
            .entry(column.into())
            .or_default()
            .insert(value.into());
    }

    /// Adds a `column=value` pair, as typed on a command line.
    pub fn allow_pair(&mut self, pair: &str) -> Result<()> {
        let invalid = |reason: &str| ModelError::InvalidFilter {
            filter: pair.to_string(),
            reason: reason.to_string(),
        };
        let (column, value) = pair
            .split_once('=')
            .ok_or_else(|| invalid("expected COLUMN=VALUE"))?;
        let column = column.trim();
        let value = value.trim();
        if column.is_empty() {
            return Err(invalid("column name is empty"));
        }
        if value.is_empty() {
            return Err(invalid("value is empty"));
        }
        self.allow(column, value);
        Ok(())
    }

    /// Removes the constraint on `column`.
    pub fn clear(&mut self, column: &str) {
        self.allowed.remove(column);
    }

    pub fn allowed(&self, column: &str) -> Option<&BTreeSet<String>> {
        self.allowed.get(column)
    }

    pub fn is_constrained(&self, column: &str) -> bool {
        self.allowed.contains_key(column)
    }

    /// True when no column is constrained.
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    /// Iterates constrained columns in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.allowed
            .iter()
            .map(|(column, values)| (column.as_str(), values))
    }

    /// Keeps only the constraints on `columns`.
    #[must_use]
    pub fn restrict_to(&self, columns: &[&str]) -> Self {
        let allowed = self
            .allowed
            .iter()
            .filter(|(column, _)| columns.contains(&column.as_str()))
            .map(|(column, values)| (column.clone(), values.clone()))
            .collect();
        Self { allowed }
    }
}
